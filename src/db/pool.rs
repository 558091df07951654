//! Async database connection pool implementation.
//!
//! Uses bb8 connection pool manager with diesel_async for PostgreSQL
//! connections; migrations run over a blocking sync connection since the
//! migration harness is synchronous.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::Pool;
use diesel_migrations::{EmbeddedMigrations, embed_migrations};

use crate::config::DatabaseConfig;
use crate::error::AppError;

/// Async connection pool type alias.
///
/// bb8::Pool internally uses Arc, so Clone is cheap. Structures holding
/// AsyncDbPool can derive Clone without additional Arc wrapping.
pub type AsyncDbPool = Pool<AsyncPgConnection>;

/// Embedded schema migrations, compiled into the binary from `migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Creates an async database connection pool from the database settings.
pub async fn establish_async_connection_pool(
    config: &DatabaseConfig,
) -> Result<AsyncDbPool, AppError> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.url);
    let pool = Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build(manager)
        .await
        .map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })?;
    Ok(pool)
}

/// Runs all pending embedded migrations against the given database.
///
/// The diesel migration harness is synchronous, so this opens a dedicated
/// sync connection on a blocking task instead of borrowing from the pool.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), AppError> {
    let url = database_url.to_string();
    tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
        use diesel::Connection;
        use diesel_migrations::MigrationHarness;

        let mut conn = diesel::PgConnection::establish(&url)?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow::anyhow!("migration failed: {}", e))?;
        for version in applied {
            tracing::info!(migration = %version, "Applied migration");
        }
        Ok(())
    })
    .await
    .map_err(|e| AppError::Internal {
        source: anyhow::Error::from(e),
    })?
    .map_err(|e| AppError::Database {
        operation: "run migrations".to_string(),
        source: e,
    })
}
