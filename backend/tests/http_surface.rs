//! HTTP surface tests over stub directory ports.
//!
//! The stubs honour the tenant context the way a bound session would:
//! a bound context sees exactly its own tenant's rows, an unbound context
//! sees none. The real enforcement lives in the database policies; these
//! tests pin the contract that handlers always thread the extracted
//! context through and map failures to the documented statuses.

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use async_trait::async_trait;
use uuid::Uuid;

use backend::Trace;
use backend::api::employees::{current_employee, list_employees};
use backend::domain::ports::{DirectoryError, EmployeeDirectory};
use backend::domain::{Employee, EmployeeProfile, TenantContext};

/// In-memory directory keyed by tenant identifier.
#[derive(Default)]
struct StubDirectory {
    employees: HashMap<String, Vec<Employee>>,
    failure: Option<DirectoryError>,
}

impl StubDirectory {
    fn with_tenant(mut self, tenant_id: &str, employees: Vec<Employee>) -> Self {
        self.employees.insert(tenant_id.to_owned(), employees);
        self
    }

    fn failing_with(failure: DirectoryError) -> Self {
        Self {
            employees: HashMap::new(),
            failure: Some(failure),
        }
    }

    fn visible(&self, context: &TenantContext) -> Vec<Employee> {
        context
            .tenant_id()
            .and_then(|id| self.employees.get(id.as_str()).cloned())
            .unwrap_or_default()
    }
}

#[async_trait]
impl EmployeeDirectory for StubDirectory {
    async fn list(&self, context: &TenantContext) -> Result<Vec<Employee>, DirectoryError> {
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        Ok(self.visible(context))
    }

    async fn find_by_email(
        &self,
        context: &TenantContext,
        email: &str,
    ) -> Result<Option<EmployeeProfile>, DirectoryError> {
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        Ok(self
            .visible(context)
            .into_iter()
            .find(|employee| employee.email == email)
            .map(|employee| EmployeeProfile {
                id: employee.id,
                name: employee.name,
                email: employee.email,
                role: employee.role,
                pto_days_remaining: 12,
            }))
    }
}

fn employee(name: &str, email: &str) -> Employee {
    Employee {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        email: email.to_owned(),
        role: "employee".to_owned(),
    }
}

fn two_tenant_directory() -> StubDirectory {
    StubDirectory::default()
        .with_tenant("acme", vec![employee("Sarah Johnson", "sarah@acme.com")])
        .with_tenant("globex", vec![employee("David Lee", "david@globex.com")])
}

async fn service(
    directory: StubDirectory,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    let directory: Arc<dyn EmployeeDirectory> = Arc::new(directory);
    test::init_service(
        App::new()
            .app_data(web::Data::from(directory))
            .wrap(Trace)
            .service(list_employees)
            .service(current_employee),
    )
    .await
}

#[actix_web::test]
async fn each_tenant_sees_only_its_own_employees() {
    let app = service(two_tenant_directory()).await;

    for (tenant, expected_email) in [("acme", "sarah@acme.com"), ("globex", "david@globex.com")] {
        let req = test::TestRequest::get()
            .uri("/employees")
            .insert_header(("X-Tenant-ID", tenant))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let rows = body.as_array().expect("array body");
        assert_eq!(rows.len(), 1, "tenant {tenant} must see exactly one row");
        assert_eq!(rows[0]["email"], expected_email);
    }
}

#[actix_web::test]
async fn missing_tenant_header_is_rejected() {
    let app = service(two_tenant_directory()).await;

    let req = test::TestRequest::get().uri("/employees").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert!(
        body["message"]
            .as_str()
            .is_some_and(|m| m.contains("X-Tenant-ID"))
    );
}

#[actix_web::test]
async fn blank_tenant_header_never_degrades_to_unbound() {
    let app = service(two_tenant_directory()).await;

    let req = test::TestRequest::get()
        .uri("/employees")
        .insert_header(("X-Tenant-ID", "   "))
        .to_request();
    let res = test::call_service(&app, req).await;

    // A blank identifier is a client error, not an unbound catalog view.
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn me_returns_profile_within_the_asserted_tenant() {
    let app = service(two_tenant_directory()).await;

    let req = test::TestRequest::get()
        .uri("/me")
        .insert_header(("X-Tenant-ID", "acme"))
        .insert_header(("X-User-Email", "sarah@acme.com"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["email"], "sarah@acme.com");
    assert_eq!(body["ptoDaysRemaining"], 12);
}

#[actix_web::test]
async fn me_is_not_found_across_tenants() {
    let app = service(two_tenant_directory()).await;

    // The email exists, but under a different tenant.
    let req = test::TestRequest::get()
        .uri("/me")
        .insert_header(("X-Tenant-ID", "globex"))
        .insert_header(("X-User-Email", "sarah@acme.com"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn me_requires_the_user_email_header() {
    let app = service(two_tenant_directory()).await;

    let req = test::TestRequest::get()
        .uri("/me")
        .insert_header(("X-Tenant-ID", "acme"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn connection_failures_surface_as_service_unavailable() {
    let app = service(StubDirectory::failing_with(DirectoryError::connection(
        "pool checkout timed out",
    )))
    .await;

    let req = test::TestRequest::get()
        .uri("/employees")
        .insert_header(("X-Tenant-ID", "acme"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "service_unavailable");
    // The bb8 diagnostic stays in the log, never in the body.
    assert_eq!(body["message"], "Service temporarily unavailable");
}

#[actix_web::test]
async fn binding_failures_surface_redacted_as_internal_errors() {
    let app = service(StubDirectory::failing_with(DirectoryError::binding(
        "set_config rejected by policy role",
    )))
    .await;

    let req = test::TestRequest::get()
        .uri("/employees")
        .insert_header(("X-Tenant-ID", "acme"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Internal server error");
}

#[actix_web::test]
async fn responses_carry_a_trace_id_header() {
    let app = service(two_tenant_directory()).await;

    let req = test::TestRequest::get()
        .uri("/employees")
        .insert_header(("X-Tenant-ID", "acme"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert!(res.headers().contains_key("trace-id"));
}
