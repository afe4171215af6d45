//! Tenant context extraction from the `X-Tenant-ID` request header.
//!
//! DEV trust boundary: the header carries a caller-asserted identifier and
//! nothing here verifies the caller is entitled to assert it. A production
//! deployment must place an identity layer (JWT/SSO) upstream and treat the
//! verified tenant identifier as this extractor's precondition.
//!
//! What the extractor does guarantee: a request either yields a validated
//! [`TenantContext::Bound`] or a client error. A missing or blank header is
//! never silently treated as an unbound context — unbound sessions are
//! reserved for code that asks for them explicitly.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload};

use crate::domain::TenantContext;

use super::error::ApiError;

/// Name of the tenant-asserting request header.
pub const TENANT_ID_HEADER: &str = "X-Tenant-ID";

/// Extractor wrapping the [`TenantContext`] asserted by the request.
///
/// # Examples
/// ```ignore
/// #[get("/employees")]
/// async fn list(tenant: TenantHeader) -> ApiResult<HttpResponse> {
///     let context = tenant.into_context();
///     // ...
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantHeader(TenantContext);

impl TenantHeader {
    /// Consume the extractor, yielding the bound context.
    pub fn into_context(self) -> TenantContext {
        self.0
    }

    /// Borrow the bound context.
    pub const fn context(&self) -> &TenantContext {
        &self.0
    }
}

fn extract(req: &HttpRequest) -> Result<TenantHeader, ApiError> {
    let value = req
        .headers()
        .get(TENANT_ID_HEADER)
        .ok_or_else(|| ApiError::invalid_request("Missing X-Tenant-ID header"))?;

    let value = value
        .to_str()
        .map_err(|_| ApiError::invalid_request("X-Tenant-ID header is not valid UTF-8"))?;

    let context = TenantContext::bound(value)?;
    Ok(TenantHeader(context))
}

impl FromRequest for TenantHeader {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    use crate::api::error::ErrorCode;

    fn extract_from(req: &HttpRequest) -> Result<TenantHeader, ApiError> {
        extract(req)
    }

    #[rstest]
    fn valid_header_yields_bound_context() {
        let req = TestRequest::default()
            .insert_header((TENANT_ID_HEADER, "acme"))
            .to_http_request();

        let tenant = extract_from(&req).expect("valid header");
        assert!(tenant.context().is_bound());
        assert_eq!(
            tenant.into_context(),
            TenantContext::bound("acme").expect("valid identifier")
        );
    }

    #[rstest]
    fn missing_header_is_a_client_error() {
        let req = TestRequest::default().to_http_request();

        let err = extract_from(&req).expect_err("missing header");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert!(err.message().contains("X-Tenant-ID"));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_header_never_degrades_to_unbound(#[case] value: &str) {
        let req = TestRequest::default()
            .insert_header((TENANT_ID_HEADER, value))
            .to_http_request();

        let err = extract_from(&req).expect_err("blank header");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}
