//! Domain primitives and ports.
//!
//! Purpose: define the strongly typed tenant-isolation vocabulary used by
//! the API and persistence layers. Keep types immutable and document
//! invariants in each type's Rustdoc. Transport and storage concerns live in
//! the adapters; nothing here depends on Actix or Diesel.

pub mod employee;
pub mod ports;
pub mod tenant;

pub use self::employee::{Employee, EmployeeProfile, Tenant};
pub use self::ports::{DirectoryError, EmployeeDirectory, TenantCatalog};
pub use self::tenant::{TenantContext, TenantContextError, TenantId};
