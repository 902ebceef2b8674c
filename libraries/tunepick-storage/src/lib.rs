//! Tunepick Storage
//!
//! `SQLite` persistence layer for Tunepick. The whole application state is
//! a handful of JSON documents (song partitions, recent picks, last-import
//! metadata) stored in a single key-value table.
//!
//! # Example
//!
//! ```rust,no_run
//! use tunepick_storage::{create_pool, LibraryStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://tunepick.db").await?;
//! let store = LibraryStore::new(pool);
//!
//! let library = store.load_library().await?;
//! println!("{} songs", library.len());
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

pub mod documents;

pub use context::LibraryStore;
pub use error::{Result, StorageError};

use sqlx::sqlite::SqlitePool;

/// Create a new `SQLite` pool and bring the schema up to date
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://tunepick.db>`)
///
/// # Errors
///
/// Returns an error if the connection or the schema setup fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    tracing::debug!(url = database_url, "storage pool ready");

    Ok(pool)
}

/// Run database migrations
///
/// # Errors
///
/// Returns an error if a migration statement fails
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    // Embedded migrations for reliability across different execution contexts
    const MIGRATIONS: &[&str] = &[include_str!(
        "../migrations/20250601000001_create_documents.sql"
    )];

    for migration in MIGRATIONS {
        sqlx::query(migration)
            .execute(pool)
            .await
            .map_err(|e| StorageError::Migration(e.to_string()))?;
    }

    Ok(())
}
