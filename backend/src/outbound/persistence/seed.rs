//! Demo-data seeding through tenant-scoped sessions.
//!
//! Seeding is the one workflow that legitimately uses both context
//! variants: an unbound session to provision and enumerate the tenant
//! catalog, then one bound session per tenant to populate tenant-owned
//! rows. The bound inserts must satisfy the policies' `WITH CHECK` clause,
//! so a binding mismatch fails loudly instead of writing cross-tenant data.

use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::domain::{Tenant, TenantContext};

use super::models::{NewEmployeeRow, NewPtoBalanceRow, NewTenantRow};
use super::pool::DbPool;
use super::schema::{employees, pto_balances, tenants};
use super::scoped::SessionError;

/// Errors raised while seeding demo data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    /// Session could not be opened (checkout or binding failure).
    #[error("seed session failed: {message}")]
    Session {
        /// Session diagnostic.
        message: String,
    },
    /// A seed statement failed.
    #[error("seed statement failed: {message}")]
    Statement {
        /// Statement diagnostic.
        message: String,
    },
}

impl From<SessionError> for SeedError {
    fn from(error: SessionError) -> Self {
        Self::Session {
            message: error.to_string(),
        }
    }
}

impl From<diesel::result::Error> for SeedError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Statement {
            message: error.to_string(),
        }
    }
}

/// One employee to provision under a tenant.
#[derive(Debug, Clone)]
pub struct SeedEmployee {
    /// Full name.
    pub name: String,
    /// Work email.
    pub email: String,
    /// Coarse role label.
    pub role: String,
    /// Initial PTO balance in days.
    pub pto_days: i32,
}

/// The two demo tenants provisioned by default.
pub fn demo_tenants() -> Vec<(&'static str, &'static str)> {
    vec![("acme", "Acme Corp"), ("globex", "Globex Corporation")]
}

/// Demo employees for a tenant, with emails derived from the display name
/// the way the original fixtures did.
pub fn demo_employees(tenant_name: &str) -> Vec<SeedEmployee> {
    let domain = tenant_name.replace(' ', "").to_lowercase();
    vec![
        SeedEmployee {
            name: "Sarah Johnson".to_owned(),
            email: format!("sarah@{domain}.com"),
            role: "employee".to_owned(),
            pto_days: 12,
        },
        SeedEmployee {
            name: "David Lee".to_owned(),
            email: format!("david@{domain}.com"),
            role: "manager".to_owned(),
            pto_days: 18,
        },
    ]
}

/// Upsert the demo tenants, refreshing display names on reruns.
///
/// Runs under an explicitly unbound session: the catalog is global and the
/// reset performed at binding time guarantees no stale tenant binding from
/// pooled reuse taints the writes. Enumeration afterwards goes through the
/// [`crate::domain::TenantCatalog`] port.
///
/// # Errors
/// Returns [`SeedError`] when the session cannot be opened or a statement
/// fails.
pub async fn ensure_demo_tenants(pool: &DbPool) -> Result<(), SeedError> {
    let mut session = pool.scoped(TenantContext::unbound()).await?;

    let rows: Vec<NewTenantRow<'_>> = demo_tenants()
        .into_iter()
        .map(|(id, name)| NewTenantRow { id, name })
        .collect();

    diesel::insert_into(tenants::table)
        .values(&rows)
        .on_conflict(tenants::id)
        .do_update()
        .set(tenants::name.eq(excluded(tenants::name)))
        .execute(session.conn())
        .await?;

    Ok(())
}

/// Populate one tenant's employees and PTO balances through a bound
/// session, skipping employees that already exist.
///
/// # Errors
/// Returns [`SeedError`] when the session cannot be opened or a statement
/// fails.
pub async fn seed_tenant(
    pool: &DbPool,
    tenant: &Tenant,
    staff: &[SeedEmployee],
) -> Result<(), SeedError> {
    let context = TenantContext::Bound(tenant.id.clone());
    let mut session = pool.scoped(context).await?;

    for member in staff {
        let existing: Option<Uuid> = employees::table
            .filter(employees::email.eq(&member.email))
            .select(employees::id)
            .first(session.conn())
            .await
            .optional()?;

        if existing.is_some() {
            continue;
        }

        let employee_id = Uuid::new_v4();
        diesel::insert_into(employees::table)
            .values(NewEmployeeRow {
                id: employee_id,
                tenant_id: tenant.id.as_str(),
                name: &member.name,
                email: &member.email,
                role: &member.role,
                hire_date: None,
            })
            .execute(session.conn())
            .await?;

        diesel::insert_into(pto_balances::table)
            .values(NewPtoBalanceRow {
                id: Uuid::new_v4(),
                tenant_id: tenant.id.as_str(),
                employee_id,
                pto_days_remaining: member.pto_days,
            })
            .execute(session.conn())
            .await?;
    }

    info!(tenant = %tenant.id, "tenant seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn demo_employee_emails_follow_the_tenant_domain() {
        let staff = demo_employees("Acme Corp");
        assert_eq!(staff.len(), 2);
        assert!(staff.iter().all(|member| member.email.ends_with("@acmecorp.com")));
    }

    #[rstest]
    fn session_errors_map_to_seed_session_variant() {
        let err: SeedError = SessionError::binding_failed("rejected").into();
        assert!(matches!(err, SeedError::Session { .. }));
        assert!(err.to_string().contains("rejected"));
    }
}
