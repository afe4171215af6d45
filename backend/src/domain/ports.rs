//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters.
//! Each trait exposes strongly typed errors so adapters map their failures
//! into predictable variants instead of returning `anyhow::Result`. Every
//! tenant-scoped operation takes the [`TenantContext`] explicitly — there is
//! no ambient application-side tenant state; the only ambient binding lives
//! in the storage engine's session, where the enforcing policy reads it.

use async_trait::async_trait;
use thiserror::Error;

use super::employee::{Employee, EmployeeProfile, Tenant};
use super::tenant::TenantContext;

/// Errors surfaced by the persistence adapters behind the directory ports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// No database connection available (pool exhausted or unreachable).
    #[error("directory connection unavailable: {message}")]
    Connection {
        /// Adapter-supplied diagnostic.
        message: String,
    },
    /// The tenant binding was rejected by the storage engine. Never
    /// recovered from silently: a session that failed to bind was not used.
    #[error("directory tenant binding failed: {message}")]
    Binding {
        /// Adapter-supplied diagnostic.
        message: String,
    },
    /// Query execution failed after a successfully bound session.
    #[error("directory query failed: {message}")]
    Query {
        /// Adapter-supplied diagnostic.
        message: String,
    },
}

impl DirectoryError {
    /// Connection-level failure with the given diagnostic.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Binding-level failure with the given diagnostic.
    pub fn binding(message: impl Into<String>) -> Self {
        Self::Binding {
            message: message.into(),
        }
    }

    /// Query-level failure with the given diagnostic.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Read access to tenant-owned employee records.
///
/// Implementations must execute every query through a session bound to the
/// supplied context; the row-level policies then decide row visibility.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// List the employees visible to `context`, ordered by name ascending.
    ///
    /// A [`TenantContext::Unbound`] context legitimately yields an empty
    /// list: unbound sessions see no tenant-owned rows.
    async fn list(&self, context: &TenantContext) -> Result<Vec<Employee>, DirectoryError>;

    /// Look up one employee profile by email within `context`.
    ///
    /// Returns `Ok(None)` when no visible row matches — including when the
    /// email exists under a different tenant.
    async fn find_by_email(
        &self,
        context: &TenantContext,
        email: &str,
    ) -> Result<Option<EmployeeProfile>, DirectoryError>;
}

/// Read access to the global tenant catalog.
///
/// The catalog carries no tenant-owning column; implementations read it
/// through an explicitly unbound session.
#[async_trait]
pub trait TenantCatalog: Send + Sync {
    /// List all provisioned tenants.
    async fn list(&self) -> Result<Vec<Tenant>, DirectoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn directory_error_display_includes_diagnostics() {
        assert!(
            DirectoryError::connection("pool timed out")
                .to_string()
                .contains("pool timed out")
        );
        assert!(
            DirectoryError::binding("set_config rejected")
                .to_string()
                .contains("set_config rejected")
        );
        assert!(
            DirectoryError::query("relation missing")
                .to_string()
                .contains("relation missing")
        );
    }
}
