//! Async database connection pool implementation.
//!
//! Uses bb8 connection pool manager with diesel_async for PostgreSQL
//! connections, with a bounded fixed-delay retry loop for the initial
//! connection and embedded migrations.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::Pool;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};

/// Async connection pool type alias.
///
/// bb8::Pool internally uses Arc, so Clone is cheap (just reference count
/// increment). Structures holding AsyncDbPool can derive Clone without
/// additional Arc wrapping.
pub type AsyncDbPool = Pool<AsyncPgConnection>;

/// All migrations bundled into the binary at compile time.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Creates an async database connection pool.
///
/// The pool is built and then probed with a checkout; an unreachable store
/// is retried `connect_retries` times with a fixed `retry_delay` between
/// attempts. Failures are logged, never surfaced to a client: requests only
/// see the store state once the server is up.
///
/// # Errors
///
/// Returns `AppError::ConnectionPool` when the store is still unreachable
/// after the last retry.
pub async fn establish_async_connection_pool(config: &DatabaseConfig) -> AppResult<AsyncDbPool> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.url.clone());
    let pool = Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build_unchecked(manager);

    let mut attempt = 0u32;
    loop {
        match pool.clone().get().await {
            Ok(_) => {
                tracing::info!(attempt = attempt + 1, "Database connection established");
                return Ok(pool);
            }
            Err(e) if attempt < config.connect_retries => {
                attempt += 1;
                tracing::warn!(
                    error = %e,
                    attempt,
                    max_attempts = config.connect_retries,
                    retry_delay_secs = config.retry_delay,
                    "Database connection failed, retrying"
                );
                tokio::time::sleep(Duration::from_secs(config.retry_delay)).await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Database connection failed, giving up");
                return Err(AppError::from(e));
            }
        }
    }
}

/// Runs all pending embedded migrations.
///
/// Migrations use a dedicated blocking connection; diesel's migration
/// harness is synchronous.
pub async fn run_migrations(database_url: &str) -> AppResult<()> {
    let url = database_url.to_string();
    tokio::task::spawn_blocking(move || -> AppResult<()> {
        use diesel::Connection;

        let mut conn = diesel::PgConnection::establish(&url).map_err(|e| AppError::Database {
            operation: "migration connection".to_string(),
            source: anyhow::Error::new(e),
        })?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| AppError::Database {
                operation: "run migrations".to_string(),
                source: anyhow::anyhow!(e.to_string()),
            })?;
        for migration in applied {
            tracing::info!(migration = %migration, "Applied migration");
        }
        Ok(())
    })
    .await
    .map_err(|e| AppError::Internal {
        source: anyhow::Error::new(e),
    })?
}
