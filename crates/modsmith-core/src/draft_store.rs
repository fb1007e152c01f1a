//! Draft persistence trait.
//!
//! Defines `DraftStore` for saving and restoring in-progress module
//! designs. When the operator exits mid-design, the draft stays in the
//! store and can be resumed in a later session.
//!
//! Every save replaces the whole document for that module name; partial
//! field-level updates are never issued.

use std::future::Future;

use chrono::{DateTime, Utc};
use modsmith_types::draft::ModuleDraft;
use modsmith_types::error::StoreError;

/// Current draft serialization schema version.
///
/// Enables forward-compatible deserialization: if the document shape
/// changes in a future release, migration logic can inspect the version and
/// transform the JSON before deserializing.
pub const DRAFT_SCHEMA_VERSION: u32 = 1;

/// A saved module design keyed by module name.
#[derive(Debug, Clone)]
pub struct DesignedModule {
    /// Module name (matches `document.name`).
    pub name: String,
    /// The full draft document.
    pub document: ModuleDraft,
    /// Schema version the document was saved with.
    pub schema_version: u32,
    /// When the draft was first created.
    pub created_at: DateTime<Utc>,
    /// When the draft was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Persistence interface for module drafts.
///
/// Uses RPITIT (return position `impl Trait` in traits) consistent with
/// all async traits in this project.
pub trait DraftStore: Send + Sync {
    /// All saved drafts, ordered by name.
    fn list_all(&self) -> impl Future<Output = Result<Vec<DesignedModule>, StoreError>> + Send;

    /// Create or replace the draft for `name` with the full document.
    fn upsert(
        &self,
        name: &str,
        document: &ModuleDraft,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Delete a draft by module name. No-op if the draft does not exist.
    fn delete_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
