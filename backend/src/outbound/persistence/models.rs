//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations. None of them filter by
//! `tenant_id` themselves: visibility is decided by the row-level policies
//! reading the session binding.

use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{employees, pto_balances, tenants};

/// Row struct for reading from the tenants catalog.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tenants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TenantRow {
    pub id: String,
    pub name: String,
}

/// Insertable struct for provisioning tenant rows (seeding only).
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tenants)]
pub(crate) struct NewTenantRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
}

/// Row struct for reading from the employees table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EmployeeRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Insertable struct for creating employee records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = employees)]
pub(crate) struct NewEmployeeRow<'a> {
    pub id: Uuid,
    pub tenant_id: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
    pub hire_date: Option<NaiveDate>,
}

/// Row struct for reading PTO balances.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pto_balances)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PtoBalanceRow {
    pub pto_days_remaining: i32,
}

/// Insertable struct for creating PTO balance records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pto_balances)]
pub(crate) struct NewPtoBalanceRow<'a> {
    pub id: Uuid,
    pub tenant_id: &'a str,
    pub employee_id: Uuid,
    pub pto_days_remaining: i32,
}
