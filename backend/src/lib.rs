//! Multi-tenant HR backend with database-enforced tenant isolation.
//!
//! Tenant isolation is enforced by PostgreSQL row-level security rather
//! than application-side filtering: every database-facing unit of work is
//! opened through a session bound to exactly one
//! [`domain::TenantContext`], and the policies read that binding per row.
//! See `outbound::persistence` for the session mechanism and `api` for the
//! HTTP surface.

pub mod api;
pub mod doc;
pub mod domain;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
