//! Diesel-backed [`EmployeeDirectory`] adapter.
//!
//! Every query runs through a session opened with the caller's
//! [`TenantContext`]; no `tenant_id` filter appears in the queries
//! themselves. The row-level policies decide visibility from the session
//! binding, which is the point: application code cannot forget a filter it
//! never had to write.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{DirectoryError, EmployeeDirectory};
use crate::domain::{Employee, EmployeeProfile, TenantContext};

use super::models::{EmployeeRow, PtoBalanceRow};
use super::pool::DbPool;
use super::schema::{employees, pto_balances};
use super::scoped::SessionError;

/// Diesel-backed employee directory reading through tenant-scoped sessions.
#[derive(Clone)]
pub struct DieselEmployeeDirectory {
    pool: DbPool,
}

impl DieselEmployeeDirectory {
    /// Create a new directory backed by the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map session-opening failures to directory errors.
pub(crate) fn map_session_error(error: SessionError) -> DirectoryError {
    match error {
        SessionError::ConnectionUnavailable { message } => DirectoryError::connection(message),
        SessionError::BindingFailed { message } => DirectoryError::binding(message),
    }
}

/// Map Diesel errors raised after a successful binding.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> DirectoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            debug!(message = info.message(), "database connection closed mid-query");
            DirectoryError::connection(info.message().to_owned())
        }
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
            DirectoryError::query(info.message().to_owned())
        }
        other => DirectoryError::query(other.to_string()),
    }
}

fn employee_from_row(row: EmployeeRow) -> Employee {
    Employee {
        id: row.id,
        name: row.name,
        email: row.email,
        role: row.role,
    }
}

fn profile_from_rows(employee: EmployeeRow, balance: Option<PtoBalanceRow>) -> EmployeeProfile {
    EmployeeProfile {
        id: employee.id,
        name: employee.name,
        email: employee.email,
        role: employee.role,
        // Absent balance rows read as zero remaining days.
        pto_days_remaining: balance.map_or(0, |row| row.pto_days_remaining),
    }
}

#[async_trait]
impl EmployeeDirectory for DieselEmployeeDirectory {
    async fn list(&self, context: &TenantContext) -> Result<Vec<Employee>, DirectoryError> {
        let mut session = self
            .pool
            .scoped(context.clone())
            .await
            .map_err(map_session_error)?;

        let rows: Vec<EmployeeRow> = employees::table
            .order(employees::name.asc())
            .select(EmployeeRow::as_select())
            .load(session.conn())
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(employee_from_row).collect())
    }

    async fn find_by_email(
        &self,
        context: &TenantContext,
        email: &str,
    ) -> Result<Option<EmployeeProfile>, DirectoryError> {
        let mut session = self
            .pool
            .scoped(context.clone())
            .await
            .map_err(map_session_error)?;

        // Both sides of the join are already restricted to the bound tenant
        // by the policies, so joining on employee_id alone is sufficient.
        let row: Option<(EmployeeRow, Option<PtoBalanceRow>)> = employees::table
            .left_join(pto_balances::table)
            .filter(employees::email.eq(email))
            .select((
                EmployeeRow::as_select(),
                Option::<PtoBalanceRow>::as_select(),
            ))
            .first(session.conn())
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(|(employee, balance)| profile_from_rows(employee, balance)))
    }
}
