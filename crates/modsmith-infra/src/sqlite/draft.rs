//! SQLite implementation of `DraftStore`.
//!
//! Persists module drafts in the `designed_modules` table, one row per
//! module name. Saves serialize the full document as JSON and upsert with
//! ON CONFLICT so `created_at` survives re-saves; every save replaces the
//! whole document.

use chrono::{DateTime, Utc};
use sqlx::Row;

use modsmith_core::draft_store::{DRAFT_SCHEMA_VERSION, DesignedModule, DraftStore};
use modsmith_types::draft::ModuleDraft;
use modsmith_types::error::StoreError;

use crate::sqlite::pool::DatabasePool;

/// SQLite-backed draft persistence.
pub struct SqliteDraftStore {
    pool: DatabasePool,
}

impl SqliteDraftStore {
    /// Create a new draft store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn row_to_designed_module(row: &sqlx::sqlite::SqliteRow) -> Result<DesignedModule, StoreError> {
    let name: String = row
        .try_get("name")
        .map_err(|e| StoreError::Query(e.to_string()))?;
    let document_json: String = row
        .try_get("document_json")
        .map_err(|e| StoreError::Query(e.to_string()))?;
    let schema_version: i64 = row
        .try_get("schema_version")
        .map_err(|e| StoreError::Query(e.to_string()))?;
    let created_at_str: String = row
        .try_get("created_at")
        .map_err(|e| StoreError::Query(e.to_string()))?;
    let updated_at_str: String = row
        .try_get("updated_at")
        .map_err(|e| StoreError::Query(e.to_string()))?;

    let document: ModuleDraft = serde_json::from_str(&document_json)
        .map_err(|e| StoreError::Serialization(format!("draft '{name}': {e}")))?;

    Ok(DesignedModule {
        name,
        document,
        schema_version: schema_version as u32,
        created_at: parse_datetime(&created_at_str)?,
        updated_at: parse_datetime(&updated_at_str)?,
    })
}

// ---------------------------------------------------------------------------
// DraftStore implementation
// ---------------------------------------------------------------------------

impl DraftStore for SqliteDraftStore {
    async fn list_all(&self) -> Result<Vec<DesignedModule>, StoreError> {
        let rows = sqlx::query(
            "SELECT name, document_json, schema_version, created_at, updated_at FROM designed_modules ORDER BY name",
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        rows.iter().map(row_to_designed_module).collect()
    }

    async fn upsert(&self, name: &str, document: &ModuleDraft) -> Result<(), StoreError> {
        let document_json = serde_json::to_string(document)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let now = format_datetime(&Utc::now());

        sqlx::query(
            r#"INSERT INTO designed_modules (name, document_json, schema_version, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?)
               ON CONFLICT(name) DO UPDATE SET
                   document_json = excluded.document_json,
                   schema_version = excluded.schema_version,
                   updated_at = excluded.updated_at"#,
        )
        .bind(name)
        .bind(&document_json)
        .bind(DRAFT_SCHEMA_VERSION as i64)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        tracing::debug!(module = name, "draft upserted");
        Ok(())
    }

    async fn delete_by_name(&self, name: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM designed_modules WHERE name = ?")
            .bind(name)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modsmith_core::draft::{ModuleDraftExt, ModuleSeed, new_module_draft};
    use modsmith_core::ordering::Placement;
    use modsmith_types::draft::{Block, Field, Tab};

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_draft(name: &str) -> ModuleDraft {
        let mut draft = new_module_draft(ModuleSeed {
            name: name.to_string(),
            model_class: "BookType".to_string(),
            package: Some("acme/library".to_string()),
            table_name: "book_types".to_string(),
            table_prefix: "library_".to_string(),
            icon: Some("book".to_string()),
            is_for_admin: false,
            default_route: "list".to_string(),
        })
        .unwrap();

        draft.translate("en", name.to_string(), "Book Types".to_string());
        draft
            .add_tab(
                Tab {
                    label: "tab.main".to_string(),
                    icon: None,
                    sequence: 0,
                    blocks: Vec::new(),
                },
                Placement::End,
            )
            .unwrap();
        draft
            .add_block(
                "tab.main",
                Block {
                    label: "block.general".to_string(),
                    icon: None,
                    description: None,
                    sequence: 0,
                    fields: Vec::new(),
                },
                Placement::End,
            )
            .unwrap();
        for field_name in ["title", "isbn"] {
            draft
                .add_field(
                    "tab.main",
                    "block.general",
                    Field {
                        name: field_name.to_string(),
                        uitype: "text".to_string(),
                        displaytype: "everywhere".to_string(),
                        required: field_name == "title",
                        display_in_filter: true,
                        wide: false,
                        default_value: None,
                        validation_rule: None,
                        extension: Default::default(),
                        sequence: 0,
                    },
                    Placement::End,
                )
                .unwrap();
        }
        draft
    }

    #[tokio::test]
    async fn test_save_load_roundtrip_is_lossless() {
        let store = SqliteDraftStore::new(test_pool().await);

        let draft = make_draft("book-type");
        store.upsert("book-type", &draft).await.unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "book-type");
        assert_eq!(all[0].schema_version, DRAFT_SCHEMA_VERSION);

        // Structural identity: same fields, same sequences, same translations.
        assert_eq!(all[0].document, draft);

        // Reloading and re-saving keeps the document stable.
        store.upsert("book-type", &all[0].document).await.unwrap();
        let again = store.list_all().await.unwrap();
        assert_eq!(again[0].document, draft);
    }

    #[tokio::test]
    async fn test_upsert_replaces_document_and_keeps_created_at() {
        let store = SqliteDraftStore::new(test_pool().await);

        let draft = make_draft("book-type");
        store.upsert("book-type", &draft).await.unwrap();
        let first = store.list_all().await.unwrap().remove(0);

        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        let mut changed = draft.clone();
        changed.translate("en", "tab.main".to_string(), "Main".to_string());
        store.upsert("book-type", &changed).await.unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].document, changed);
        assert_eq!(all[0].created_at, first.created_at);
        assert!(all[0].updated_at > first.updated_at);
    }

    #[tokio::test]
    async fn test_list_all_ordered_by_name() {
        let store = SqliteDraftStore::new(test_pool().await);

        store.upsert("zebra", &make_draft("zebra")).await.unwrap();
        store.upsert("alpha", &make_draft("alpha")).await.unwrap();

        let names: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, ["alpha", "zebra"]);
    }

    #[tokio::test]
    async fn test_delete_by_name_removes_entry() {
        let store = SqliteDraftStore::new(test_pool().await);

        store
            .upsert("book-type", &make_draft("book-type"))
            .await
            .unwrap();
        store.delete_by_name("book-type").await.unwrap();

        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_noop() {
        let store = SqliteDraftStore::new(test_pool().await);

        // Should not error
        store.delete_by_name("ghost").await.unwrap();
    }
}
