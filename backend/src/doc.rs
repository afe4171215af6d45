//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: employee endpoints, health probes, the error envelope, and
//! the `X-Tenant-ID` header declared as an API-key-style security scheme.
//! The generated document backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::employees::{EmployeeDto, EmployeeProfileDto};
use crate::api::error::{ApiError, ErrorCode};

/// Enrich the generated document with the tenant header security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "TenantHeader",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-Tenant-ID",
                "Caller-asserted tenant identifier (DEV; replaced by a \
                 verified identity layer in production).",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "HR backend API",
        description = "Multi-tenant employee and PTO records with row-level-security tenant isolation."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("TenantHeader" = [])),
    paths(
        crate::api::employees::list_employees,
        crate::api::employees::current_employee,
        crate::api::health::ready,
        crate::api::health::live,
    ),
    components(schemas(EmployeeDto, EmployeeProfileDto, ApiError, ErrorCode))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_all_paths() {
        let doc = ApiDoc::openapi();
        let paths = doc.paths.paths;
        assert!(paths.contains_key("/employees"));
        assert!(paths.contains_key("/me"));
        assert!(paths.contains_key("/health/ready"));
        assert!(paths.contains_key("/health/live"));
    }
}
