//! REST API modules.

pub mod employees;
pub mod error;
pub mod health;
pub mod tenant_header;

pub use error::{ApiError, ApiResult, ErrorCode};
pub use tenant_header::{TENANT_ID_HEADER, TenantHeader};
