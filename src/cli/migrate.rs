use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::database::DatabaseOptions;

pub struct MigrationOpts {
    pub database: DatabaseOptions,
}

/// Apply any pending migrations from `migrations/`.
pub async fn run_migrations(opts: MigrationOpts) -> anyhow::Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_with(opts.database.connect_options())
        .await
        .context("Failed to connect to the database.")?;

    apply(&pool).await
}

async fn apply(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to apply migrations.")?;

    info!("Database migrations are up to date.");

    Ok(())
}
