//! Tenant-scoped database sessions.
//!
//! The row-level security policies in PostgreSQL read the text-valued
//! session setting `app.tenant_id` to decide row visibility. This module is
//! the only place that setting is ever written: [`DbPool::scoped`] checks a
//! connection out of the pool, applies (or explicitly resets) the binding
//! for the supplied [`TenantContext`], and yields a [`ScopedSession`] that
//! owns the connection for exactly one unit of work.
//!
//! # Lifecycle
//!
//! 1. **Acquire** — pool checkout; failure maps to
//!    [`SessionError::ConnectionUnavailable`] and no binding is attempted.
//! 2. **Bind** — one round-trip setting `app.tenant_id` to the tenant
//!    identifier (bound) or back to its default (unbound). Pooled
//!    connections may carry the previous user's binding, so the unbound
//!    case must reset explicitly rather than leave the setting alone.
//!    Failure maps to [`SessionError::BindingFailed`] and the connection is
//!    returned to the pool before the error propagates; a session that
//!    failed to bind is never yielded.
//! 3. **Use** — the caller runs queries through the session it exclusively
//!    owns.
//! 4. **Release** — dropping the session returns the connection to the
//!    pool on every exit path, including early returns, errors, and
//!    cancellation.
//!
//! Neither failure is retried here: blind retry could mask repeated
//! isolation failures, so retry policy belongs to the caller.

use diesel_async::AsyncPgConnection;
use diesel_async::RunQueryDsl;
use diesel_async::pooled_connection::bb8::PooledConnection;
use tracing::debug;

use crate::domain::TenantContext;

use super::pool::DbPool;

/// Name of the session setting the row-level policies compare against.
pub const TENANT_ATTRIBUTE: &str = "app.tenant_id";

/// Binds the tenant identifier for the current session. `set_config` is
/// used because `SET` accepts no bind parameters, and the identifier must
/// travel as a bound text parameter, never be interpolated.
const BIND_STATEMENT: &str = "SELECT set_config('app.tenant_id', $1, false)";

/// Explicitly restores the setting to its default. With no default
/// configured the setting reads as empty, which matches no tenant row —
/// unbound means "see nothing tenant-scoped", not "see everything".
const RESET_STATEMENT: &str = "SET app.tenant_id TO DEFAULT";

/// Errors raised while opening a tenant-scoped session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The pool was exhausted past its checkout timeout, or the storage
    /// engine is unreachable.
    #[error("no database connection available: {message}")]
    ConnectionUnavailable {
        /// Pool diagnostic.
        message: String,
    },

    /// The storage engine rejected the ambient-attribute assignment.
    #[error("failed to bind tenant context to session: {message}")]
    BindingFailed {
        /// Storage-engine diagnostic.
        message: String,
    },
}

impl SessionError {
    /// Checkout-stage failure with the given diagnostic.
    pub fn connection_unavailable(message: impl Into<String>) -> Self {
        Self::ConnectionUnavailable {
            message: message.into(),
        }
    }

    /// Binding-stage failure with the given diagnostic.
    pub fn binding_failed(message: impl Into<String>) -> Self {
        Self::BindingFailed {
            message: message.into(),
        }
    }
}

/// One unit of work bound to exactly one [`TenantContext`].
///
/// Exclusively owns its pooled connection; it is neither `Clone` nor
/// shareable, and must not be retained past the unit of work it was opened
/// for. Dropping it returns the connection to the pool.
pub struct ScopedSession<'a> {
    conn: PooledConnection<'a, AsyncPgConnection>,
    context: TenantContext,
}

impl ScopedSession<'_> {
    /// The context this session was opened with.
    pub const fn context(&self) -> &TenantContext {
        &self.context
    }

    /// The bound connection, for running Diesel queries.
    ///
    /// The binding step has already completed by the time a session exists,
    /// so every query issued here runs under the correct ambient attribute.
    pub fn conn(&mut self) -> &mut AsyncPgConnection {
        &mut self.conn
    }
}

impl std::fmt::Debug for ScopedSession<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedSession")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl DbPool {
    /// Open a session scoped to `context`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ConnectionUnavailable`] when checkout fails
    /// or times out, and [`SessionError::BindingFailed`] when the storage
    /// engine rejects the attribute assignment. In the latter case the
    /// connection has already been released.
    pub async fn scoped(
        &self,
        context: TenantContext,
    ) -> Result<ScopedSession<'_>, SessionError> {
        let mut conn = self
            .get()
            .await
            .map_err(|err| SessionError::connection_unavailable(err.to_string()))?;

        if let Err(err) = apply_binding(&mut conn, &context).await {
            // Checked back in before the error propagates; the failed
            // binding never reaches a caller.
            drop(conn);
            return Err(err);
        }

        debug!(context = %context, "tenant scope bound to session");
        Ok(ScopedSession { conn, context })
    }
}

/// Apply the ambient binding for `context` on a freshly checked-out
/// connection. Runs strictly before any caller query.
async fn apply_binding(
    conn: &mut AsyncPgConnection,
    context: &TenantContext,
) -> Result<(), SessionError> {
    let result = match context {
        TenantContext::Bound(tenant_id) => {
            diesel::sql_query(BIND_STATEMENT)
                .bind::<diesel::sql_types::Text, _>(tenant_id.as_str())
                .execute(conn)
                .await
        }
        TenantContext::Unbound => diesel::sql_query(RESET_STATEMENT).execute(conn).await,
    };

    result
        .map(|_| ())
        .map_err(|err| SessionError::binding_failed(err.to_string()))
}
