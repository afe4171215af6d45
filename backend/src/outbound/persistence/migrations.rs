//! Embedded migration runner.
//!
//! Migrations (including the row-level-security policies) are embedded into
//! the binary and applied over a synchronous connection at startup and by
//! the seed binary. The policies are part of the schema: applying them here
//! means no deployment can serve traffic against tables missing their
//! isolation predicates.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use thiserror::Error;
use tracing::info;

/// All migrations under `backend/migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Errors raised while applying migrations.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Could not connect to the database.
    #[error("failed to connect for migrations: {0}")]
    Connect(#[from] diesel::ConnectionError),
    /// A migration failed to apply.
    #[error("failed to run migrations: {message}")]
    Apply {
        /// Harness diagnostic.
        message: String,
    },
}

/// Apply all pending migrations.
///
/// Runs synchronously, once, before the async runtime starts serving.
///
/// # Errors
/// Returns [`MigrationError`] when the connection or any migration fails.
pub fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let mut conn = PgConnection::establish(database_url)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;

    if applied.is_empty() {
        info!("schema up to date");
    } else {
        info!(count = applied.len(), "migrations applied");
    }
    Ok(())
}
