//! Database migration management.
//!
//! Provides functions to run versioned SQL migrations. The central database
//! (schools, users) and the per-school tenant databases carry separate
//! migration sets; both are embedded at compile time.

use crate::error::DbError;
use sqlx::PgPool;

/// Run all pending migrations against the central database.
///
/// Migrations are embedded at compile time from `migrations/central/` and
/// run in order based on their filename prefix (0001_, 0002_, ...).
///
/// # Errors
///
/// Returns `DbError::MigrationFailed` if any migration fails to apply.
pub async fn run_central_migrations(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running central database migrations...");

    sqlx::migrate!("./migrations/central")
        .run(pool)
        .await
        .map_err(DbError::MigrationFailed)?;

    tracing::info!("Central migrations completed");
    Ok(())
}

/// Run all pending migrations against one tenant (school) database.
///
/// Called once per tenant database, typically at provisioning time.
///
/// # Errors
///
/// Returns `DbError::MigrationFailed` if any migration fails to apply.
pub async fn run_tenant_migrations(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running tenant database migrations...");

    sqlx::migrate!("./migrations/tenant")
        .run(pool)
        .await
        .map_err(DbError::MigrationFailed)?;

    tracing::info!("Tenant migrations completed");
    Ok(())
}
