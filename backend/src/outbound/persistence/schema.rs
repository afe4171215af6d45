//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation.
//!
//! Tenant-owned tables (`employees`, `pto_balances`) carry a text
//! `tenant_id` column referencing the catalog; the migrations attach forced
//! row-level-security policies comparing that column against the session's
//! `app.tenant_id` setting. The `tenants` catalog itself has no owning
//! column and no restrictive policy.

diesel::table! {
    /// Global tenant catalog.
    ///
    /// No tenant-owning column; readable from unbound sessions.
    tenants (id) {
        /// Stable tenant identifier, compared textually by the policies.
        id -> Text,
        /// Human-readable display name.
        name -> Text,
        /// Provisioning timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tenant-owned employee records.
    employees (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning tenant; cascades on tenant deletion.
        tenant_id -> Text,
        /// Full name.
        name -> Text,
        /// Work email, unique per tenant.
        email -> Text,
        /// Coarse role label.
        role -> Text,
        /// Optional hire date.
        hire_date -> Nullable<Date>,
    }
}

diesel::table! {
    /// Tenant-owned PTO balances, one row per employee.
    pto_balances (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning tenant; cascades on tenant deletion.
        tenant_id -> Text,
        /// Employee the balance belongs to.
        employee_id -> Uuid,
        /// Remaining paid-time-off days.
        pto_days_remaining -> Int4,
    }
}

diesel::joinable!(pto_balances -> employees (employee_id));

diesel::allow_tables_to_appear_in_same_query!(tenants, employees, pto_balances);
