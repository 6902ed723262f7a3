//! Migrate command - manages the scheduling schema.
//!
//! `serve` applies pending migrations on boot; this command exists for
//! explicit control, rollback and inspection.

use sea_orm::DbErr;

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Connect without the automatic upgrade so `down`, `status` and
    // `fresh` see the schema exactly as it is.
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    match args.action {
        MigrateAction::Up => {
            tracing::info!("Applying pending scheduling migrations...");
            db.run_migrations().await.map_err(migration_error)?;
            tracing::info!("Scheduling schema is up to date");
        }
        MigrateAction::Down => {
            tracing::info!("Rolling back the most recent migration...");
            db.rollback_migration().await.map_err(migration_error)?;
            tracing::info!("Rollback complete");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await.map_err(migration_error)?;
            for (name, applied) in status {
                println!("{}: {}", name, if applied { "applied" } else { "pending" });
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping and recreating the scheduling schema...");
            db.fresh_migrations().await.map_err(migration_error)?;
            tracing::info!("Fresh scheduling schema created");
        }
    }

    Ok(())
}

fn migration_error(e: DbErr) -> AppError {
    AppError::internal(format!("Migration failed: {}", e))
}
