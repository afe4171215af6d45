//! Diesel-backed [`TenantCatalog`] adapter.
//!
//! The catalog is global state with no tenant-owning column, so reads go
//! through an explicitly unbound session. The explicit reset that an
//! unbound session performs matters here: a pooled connection may carry a
//! previous caller's binding, and "unbound" must mean the default setting,
//! not whatever was left behind.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DirectoryError, TenantCatalog};
use crate::domain::{Tenant, TenantContext, TenantId};

use super::diesel_employee_directory::{map_diesel_error, map_session_error};
use super::models::TenantRow;
use super::pool::DbPool;
use super::schema::tenants;

/// Diesel-backed tenant catalog reading through unbound sessions.
#[derive(Clone)]
pub struct DieselTenantCatalog {
    pool: DbPool,
}

impl DieselTenantCatalog {
    /// Create a new catalog backed by the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn tenant_from_row(row: TenantRow) -> Result<Tenant, DirectoryError> {
    let TenantRow { id, name } = row;
    let id = TenantId::new(id)
        .map_err(|err| DirectoryError::query(format!("catalog row has invalid identifier: {err}")))?;
    Ok(Tenant { id, name })
}

#[async_trait]
impl TenantCatalog for DieselTenantCatalog {
    async fn list(&self) -> Result<Vec<Tenant>, DirectoryError> {
        let mut session = self
            .pool
            .scoped(TenantContext::unbound())
            .await
            .map_err(map_session_error)?;

        let rows: Vec<TenantRow> = tenants::table
            .order(tenants::created_at.asc())
            .select(TenantRow::as_select())
            .load(session.conn())
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(tenant_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn valid_rows_convert_to_domain_tenants() {
        let tenant = tenant_from_row(TenantRow {
            id: "acme".to_owned(),
            name: "Acme Corp".to_owned(),
        })
        .expect("valid row");

        assert_eq!(tenant.id.as_str(), "acme");
        assert_eq!(tenant.name, "Acme Corp");
    }

    #[rstest]
    fn blank_identifier_rows_surface_as_query_errors() {
        let result = tenant_from_row(TenantRow {
            id: "  ".to_owned(),
            name: "Broken".to_owned(),
        });

        assert!(matches!(result, Err(DirectoryError::Query { .. })));
    }
}
