//! Employee endpoints scoped by the asserted tenant.
//!
//! Handlers never filter by tenant themselves: they pass the extracted
//! [`crate::domain::TenantContext`] to the directory port, whose adapter
//! opens a bound session and lets the row-level policies decide visibility.

use actix_web::{HttpRequest, get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::EmployeeDirectory;
use crate::domain::{Employee, EmployeeProfile};

use super::error::{ApiError, ApiResult};
use super::tenant_header::TenantHeader;

/// Name of the user-asserting request header (DEV placeholder for real
/// authentication).
pub const USER_EMAIL_HEADER: &str = "X-User-Email";

/// Employee listing entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    /// Employee identifier.
    pub id: Uuid,
    /// Full name.
    pub name: String,
    /// Work email.
    pub email: String,
    /// Coarse role label.
    pub role: String,
}

impl From<Employee> for EmployeeDto {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name,
            email: employee.email,
            role: employee.role,
        }
    }
}

/// Employee profile with PTO balance, returned by `/me`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProfileDto {
    /// Employee identifier.
    pub id: Uuid,
    /// Full name.
    pub name: String,
    /// Work email.
    pub email: String,
    /// Coarse role label.
    pub role: String,
    /// Remaining paid-time-off days.
    pub pto_days_remaining: i32,
}

impl From<EmployeeProfile> for EmployeeProfileDto {
    fn from(profile: EmployeeProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            role: profile.role,
            pto_days_remaining: profile.pto_days_remaining,
        }
    }
}

/// List employees of the tenant asserted in `X-Tenant-ID`.
#[utoipa::path(
    get,
    path = "/employees",
    tags = ["employees"],
    params(
        ("X-Tenant-ID" = String, Header, description = "Asserted tenant identifier")
    ),
    responses(
        (status = 200, description = "Employees visible to the tenant", body = [EmployeeDto]),
        (status = 400, description = "Missing or invalid tenant header"),
        (status = 503, description = "No database connection available"),
        (status = 500, description = "Internal server error")
    ),
    operation_id = "listEmployees"
)]
#[get("/employees")]
pub async fn list_employees(
    tenant: TenantHeader,
    directory: web::Data<dyn EmployeeDirectory>,
) -> ApiResult<web::Json<Vec<EmployeeDto>>> {
    let employees = directory.list(tenant.context()).await?;
    Ok(web::Json(
        employees.into_iter().map(EmployeeDto::from).collect(),
    ))
}

/// DEV endpoint: profile of the user asserted via `X-User-Email`, resolved
/// within the tenant asserted via `X-Tenant-ID`. Production replaces the
/// header pair with a verified identity layer.
#[utoipa::path(
    get,
    path = "/me",
    tags = ["employees"],
    params(
        ("X-Tenant-ID" = String, Header, description = "Asserted tenant identifier"),
        ("X-User-Email" = String, Header, description = "Asserted user email (DEV)")
    ),
    responses(
        (status = 200, description = "Profile of the asserted user", body = EmployeeProfileDto),
        (status = 400, description = "Missing or invalid headers"),
        (status = 404, description = "User not visible in this tenant"),
        (status = 503, description = "No database connection available"),
        (status = 500, description = "Internal server error")
    ),
    operation_id = "currentEmployee"
)]
#[get("/me")]
pub async fn current_employee(
    req: HttpRequest,
    tenant: TenantHeader,
    directory: web::Data<dyn EmployeeDirectory>,
) -> ApiResult<web::Json<EmployeeProfileDto>> {
    let email = req
        .headers()
        .get(USER_EMAIL_HEADER)
        .ok_or_else(|| ApiError::invalid_request("Missing X-User-Email header"))?
        .to_str()
        .map_err(|_| ApiError::invalid_request("X-User-Email header is not valid UTF-8"))?;

    let profile = directory
        .find_by_email(tenant.context(), email)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found in this tenant"))?;

    Ok(web::Json(EmployeeProfileDto::from(profile)))
}
