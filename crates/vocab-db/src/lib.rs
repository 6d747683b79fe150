pub mod models;
pub mod repositories;

use std::{str::FromStr, time::Duration};

use anyhow::Context;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};

/// Create a SQLite connection pool.
///
/// The database file is created when missing and foreign keys are enforced
/// on every connection. An in-memory database lives only as long as its
/// connection, so memory URLs get a single connection that is never recycled.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let in_memory = is_in_memory(database_url);

    let mut options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("invalid database url '{database_url}'"))?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections.max(1))
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .context("failed to connect to database")?;

    Ok(pool)
}

/// Run the migrations in this crate's `migrations/` folder.
pub async fn migrate(pool: &SqlitePool) -> anyhow::Result<()> {
    // Bundled at compile time from `migrations/`
    sqlx::migrate!()
        .run(pool)
        .await
        .context("failed to run database migrations")?;

    Ok(())
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = create_pool("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory database");
    migrate(&pool).await.expect("Failed to run migrations");
    pool
}
