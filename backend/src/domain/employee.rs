//! Domain records exposed by the directory ports.
//!
//! These types carry no tenant column: by the time a record reaches the
//! domain it has already been read through a session bound to exactly one
//! tenant, so the owning tenant is implied by the context the caller
//! supplied.

use uuid::Uuid;

use super::tenant::TenantId;

/// Catalog entry for an isolated customer organisation.
///
/// Provisioned out-of-band; read-only from this service's perspective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tenant {
    /// Stable, globally unique identifier.
    pub id: TenantId,
    /// Human-readable display name.
    pub name: String,
}

/// Employee record as returned by tenant-scoped listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    /// Primary key.
    pub id: Uuid,
    /// Full name.
    pub name: String,
    /// Work email address, unique within the owning tenant.
    pub email: String,
    /// Coarse role label (e.g. `employee`, `manager`).
    pub role: String,
}

/// Employee profile joined with the PTO balance, the "current user" shape.
///
/// A missing balance row reads as zero remaining days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeProfile {
    /// Primary key.
    pub id: Uuid,
    /// Full name.
    pub name: String,
    /// Work email address.
    pub email: String,
    /// Coarse role label.
    pub role: String,
    /// Remaining paid-time-off days.
    pub pto_days_remaining: i32,
}
