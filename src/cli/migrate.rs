//! Migrate command handler.
//!
//! Applies or rolls back schema migrations over a blocking sync
//! connection, since the diesel migration harness is synchronous.

use diesel_migrations::MigrationHarness;

use crate::config::settings::Settings;
use crate::db::MIGRATIONS;
use crate::error::{AppError, AppResult};

/// Handler for the migrate command
pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the migrate command with dry-run and rollback support.
    ///
    /// # Errors
    /// - Database connection errors
    /// - Migration execution errors
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.config.validate_for_server()?;

        if dry_run {
            self.show_pending_migrations().await?;
            return Ok(());
        }

        if let Some(steps) = rollback {
            self.rollback_migrations(steps).await?;
        } else {
            self.run_migrations().await?;
        }

        Ok(())
    }

    async fn show_pending_migrations(&self) -> AppResult<()> {
        println!("Checking for pending migrations...");

        let database_url = self.config.database.url.clone();
        let pending: Vec<String> = tokio::task::spawn_blocking(move || {
            let mut conn = establish(&database_url)?;
            let pending = conn.pending_migrations(MIGRATIONS).map_err(|e| {
                AppError::Database {
                    operation: "check pending migrations".to_string(),
                    source: anyhow::anyhow!("{}", e),
                }
            })?;
            Ok::<_, AppError>(pending.iter().map(|m| m.name().to_string()).collect())
        })
        .await
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })??;

        if pending.is_empty() {
            println!("No pending migrations - database is up to date");
        } else {
            println!("Found {} pending migration(s):", pending.len());
            for name in &pending {
                println!("  {}", name);
            }
            println!("\nRun without --dry-run to apply these migrations");
        }

        Ok(())
    }

    async fn run_migrations(&self) -> AppResult<()> {
        println!("Applying pending migrations...");

        let database_url = self.config.database.url.clone();
        let applied: Vec<String> = tokio::task::spawn_blocking(move || {
            let mut conn = establish(&database_url)?;
            let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
                AppError::Database {
                    operation: "run pending migrations".to_string(),
                    source: anyhow::anyhow!("{}", e),
                }
            })?;
            Ok::<_, AppError>(applied.iter().map(|v| v.to_string()).collect())
        })
        .await
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })??;

        if applied.is_empty() {
            println!("No pending migrations - database is up to date");
        } else {
            for version in &applied {
                println!("Applied migration {}", version);
            }
        }

        Ok(())
    }

    async fn rollback_migrations(&self, steps: u32) -> AppResult<()> {
        println!("Rolling back {} migration(s)...", steps);

        let database_url = self.config.database.url.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = establish(&database_url)?;
            for _ in 0..steps {
                let version = conn.revert_last_migration(MIGRATIONS).map_err(|e| {
                    AppError::Database {
                        operation: "rollback migration".to_string(),
                        source: anyhow::anyhow!("{}", e),
                    }
                })?;
                println!("Reverted migration {}", version);
            }
            Ok::<_, AppError>(())
        })
        .await
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })??;

        Ok(())
    }
}

fn establish(database_url: &str) -> Result<diesel::PgConnection, AppError> {
    use diesel::Connection;

    diesel::PgConnection::establish(database_url).map_err(|e| AppError::Database {
        operation: "establish migration connection".to_string(),
        source: anyhow::anyhow!("{}", e),
    })
}
