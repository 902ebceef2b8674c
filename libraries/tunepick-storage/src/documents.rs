//! Document slice: JSON values keyed by dotted slice names.
//!
//! Everything the application persists goes through this table. Values are
//! stored as JSON text so the schema never has to change when a slice
//! grows a field.

use sqlx::{Row, SqlitePool};

use crate::error::{Result, StorageError};

// Document key constants
/// Active song list, a JSON array of songs
pub const DOC_LIBRARY_CURRENT: &str = "library.current";

/// Archived song list, a JSON array of songs
pub const DOC_LIBRARY_ARCHIVE: &str = "library.archive";

/// Recently picked songs, newest first
pub const DOC_PICKER_RECENT: &str = "picker.recent";

/// Metadata about the most recent import
pub const DOC_IMPORT_LAST_META: &str = "import.last_meta";

/// Get a single document by key
///
/// Returns `Ok(Some(value))` if the document exists, `Ok(None)` if not.
///
/// # Errors
///
/// Returns an error if the query fails or the stored text is not valid JSON
pub async fn get_document(pool: &SqlitePool, key: &str) -> Result<Option<serde_json::Value>> {
    let row = sqlx::query("SELECT value FROM documents WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => {
            let text: String = row.try_get("value")?;
            let value = serde_json::from_str(&text)
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Set a document, inserting or overwriting
///
/// # Errors
///
/// Returns an error if serialization or the query fails
pub async fn set_document(pool: &SqlitePool, key: &str, value: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string(value)
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        "INSERT INTO documents (key, value, updated_at)
         VALUES (?, ?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
    )
    .bind(key)
    .bind(text)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a document by key
///
/// Returns `Ok(true)` if a document was deleted, `Ok(false)` if none existed.
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn delete_document(pool: &SqlitePool, key: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM documents WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_pool;

    // Pooled in-memory SQLite gives every connection its own database, so
    // tests run against a throwaway file instead.
    async fn pool() -> (tempfile::TempDir, SqlitePool) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("test.db").display());
        let pool = create_pool(&url).await.unwrap();
        (dir, pool)
    }

    #[tokio::test]
    async fn missing_document_is_none() {
        let (_dir, pool) = pool().await;
        assert_eq!(get_document(&pool, DOC_PICKER_RECENT).await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let (_dir, pool) = pool().await;
        let value = serde_json::json!({"mode": "merge", "successCount": 3});
        set_document(&pool, DOC_IMPORT_LAST_META, &value).await.unwrap();

        let stored = get_document(&pool, DOC_IMPORT_LAST_META).await.unwrap();
        assert_eq!(stored, Some(value));
    }

    #[tokio::test]
    async fn set_overwrites_previous_value() {
        let (_dir, pool) = pool().await;
        set_document(&pool, DOC_LIBRARY_CURRENT, &serde_json::json!([1]))
            .await
            .unwrap();
        set_document(&pool, DOC_LIBRARY_CURRENT, &serde_json::json!([1, 2]))
            .await
            .unwrap();

        let stored = get_document(&pool, DOC_LIBRARY_CURRENT).await.unwrap();
        assert_eq!(stored, Some(serde_json::json!([1, 2])));
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_existed() {
        let (_dir, pool) = pool().await;
        set_document(&pool, DOC_LIBRARY_ARCHIVE, &serde_json::json!([]))
            .await
            .unwrap();

        assert!(delete_document(&pool, DOC_LIBRARY_ARCHIVE).await.unwrap());
        assert!(!delete_document(&pool, DOC_LIBRARY_ARCHIVE).await.unwrap());
    }
}
