//! Loads `beginner.json`, `intermediate.json` and `expert.json` into the
//! exercise catalog. Usage: `seed-catalog [DIR]` (defaults to `CATALOG_DIR`
//! or the current directory).

use std::path::PathBuf;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use dietfit::exercises::{repo::PgExerciseCatalog, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    dietfit::init_tracing();

    let dir = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CATALOG_DIR").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL")?;
    let db = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .context("connect to database")?;
    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .context("run migrations")?;

    let catalog = PgExerciseCatalog::new(db);
    let report = seed::seed_from_dir(&catalog, &dir).await?;
    tracing::info!(
        inserted = report.inserted,
        duplicates = report.duplicates,
        skipped = report.skipped,
        malformed = report.malformed,
        "catalog seeded"
    );
    Ok(())
}
