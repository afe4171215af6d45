//! HTTP error payloads and mapping from domain errors.
//!
//! Keeps the domain free of transport concerns by translating
//! [`DirectoryError`] and [`TenantContextError`] into Actix responses here.
//! The mapping: a missing or malformed tenant context is the
//! client's fault (400); an unavailable pool is a service condition (503);
//! a failed binding or query is an internal error (500). 5xx diagnostics are
//! logged and redacted from the response body.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{DirectoryError, TenantContextError};
use crate::middleware::trace::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed: missing or invalid tenant context, or a
    /// missing required header.
    InvalidRequest,
    /// The requested resource is not visible within the bound tenant.
    NotFound,
    /// No database connection is currently available.
    ServiceUnavailable,
    /// Binding or query failure inside the service.
    InternalError,
}

/// Standard error envelope returned by HTTP handlers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    #[schema(example = "invalid_request")]
    code: ErrorCode,
    #[schema(example = "Missing X-Tenant-ID header")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

impl ApiError {
    fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Client error for malformed requests.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// The resource does not exist within the caller's tenant scope.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// The service cannot reach its database right now.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Unexpected internal failure; the message is logged but redacted from
    /// the response.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Stable machine-readable error code.
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    const fn to_status_code(&self) -> StatusCode {
        match self.code {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Connection { message } => Self::service_unavailable(message),
            // Binding failures are never recovered from or disguised:
            // surface as internal errors so callers decide on retry.
            DirectoryError::Binding { message } | DirectoryError::Query { message } => {
                Self::internal(message)
            }
        }
    }
}

impl From<TenantContextError> for ApiError {
    fn from(err: TenantContextError) -> Self {
        Self::invalid_request(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.to_status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = &self.trace_id {
            builder.insert_header(("trace-id", id.clone()));
        }
        if matches!(
            self.code,
            ErrorCode::InternalError | ErrorCode::ServiceUnavailable
        ) {
            error!(code = ?self.code, message = %self.message, "request failed");
        }
        // Pool and storage diagnostics can embed connection-string fragments,
        // so 5xx bodies carry a generic message only.
        let generic = match self.code {
            ErrorCode::InternalError => Some("Internal server error"),
            ErrorCode::ServiceUnavailable => Some("Service temporarily unavailable"),
            ErrorCode::InvalidRequest | ErrorCode::NotFound => None,
        };
        if let Some(message) = generic {
            let mut redacted = self.clone();
            redacted.message = message.to_owned();
            return builder.json(redacted);
        }
        builder.json(self)
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;

    #[rstest]
    #[case(ApiError::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(ApiError::not_found("missing"), StatusCode::NOT_FOUND)]
    #[case(
        ApiError::service_unavailable("pool dry"),
        StatusCode::SERVICE_UNAVAILABLE
    )]
    #[case(ApiError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn codes_map_to_expected_statuses(#[case] err: ApiError, #[case] status: StatusCode) {
        assert_eq!(err.status_code(), status);
    }

    #[rstest]
    #[case(DirectoryError::connection("exhausted"), ErrorCode::ServiceUnavailable)]
    #[case(DirectoryError::binding("rejected"), ErrorCode::InternalError)]
    #[case(DirectoryError::query("bad sql"), ErrorCode::InternalError)]
    fn directory_errors_map_to_expected_codes(
        #[case] err: DirectoryError,
        #[case] code: ErrorCode,
    ) {
        assert_eq!(ApiError::from(err).code(), code);
    }

    #[rstest]
    fn tenant_context_errors_are_client_errors() {
        let err = ApiError::from(TenantContextError::EmptyIdentifier);
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert!(err.message().contains("identifier must not be empty"));
    }

    #[actix_web::test]
    async fn internal_messages_are_redacted() {
        let response = ApiError::internal("connection string with secrets").error_response();
        let body = to_bytes(response.into_body()).await.expect("body bytes");
        let payload: serde_json::Value = serde_json::from_slice(&body).expect("json body");

        assert_eq!(payload["message"], "Internal server error");
        assert_eq!(payload["code"], "internal_error");
    }

    #[actix_web::test]
    async fn service_unavailable_messages_are_redacted() {
        let response =
            ApiError::service_unavailable("could not connect to postgres://user:pass@db/hr")
                .error_response();
        let body = to_bytes(response.into_body()).await.expect("body bytes");
        let payload: serde_json::Value = serde_json::from_slice(&body).expect("json body");

        assert_eq!(payload["message"], "Service temporarily unavailable");
        assert_eq!(payload["code"], "service_unavailable");
    }

    #[actix_web::test]
    async fn client_error_messages_are_preserved() {
        let response = ApiError::invalid_request("Missing X-Tenant-ID header").error_response();
        let body = to_bytes(response.into_body()).await.expect("body bytes");
        let payload: serde_json::Value = serde_json::from_slice(&body).expect("json body");

        assert_eq!(payload["message"], "Missing X-Tenant-ID header");
    }
}
