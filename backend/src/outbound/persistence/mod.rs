//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain directory ports, backed by
//! PostgreSQL via Diesel with async support through `diesel-async` and
//! `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Scoped sessions**: every query runs through a [`ScopedSession`]
//!   opened for exactly one [`crate::domain::TenantContext`]; the tenant
//!   binding is applied before any query and released with the connection.
//! - **Thin adapters**: repository implementations only translate between
//!   Diesel rows and domain types. No business logic, and no tenant
//!   filtering — that is the row-level policies' job.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) never leak to the domain layer.
//! - **Strongly typed errors**: pool, session, and query failures map to
//!   distinct domain error variants.

mod diesel_employee_directory;
mod diesel_tenant_catalog;
mod migrations;
mod models;
mod pool;
mod schema;
mod scoped;
pub mod seed;

pub use diesel_employee_directory::DieselEmployeeDirectory;
pub use diesel_tenant_catalog::DieselTenantCatalog;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
pub use scoped::{ScopedSession, SessionError, TENANT_ATTRIBUTE};
