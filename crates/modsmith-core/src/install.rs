//! Installer collaborator trait.
//!
//! The installer turns a finished draft into persisted artifacts (tables,
//! menu entries, a generated tab for related lists without a host tab).
//! The designer treats it as opaque: it neither retries nor interprets
//! specific error causes, and a failed install preserves the draft.

use std::future::Future;

use modsmith_types::draft::ModuleDraft;
use modsmith_types::error::InstallError;
use uuid::Uuid;

/// Reference to a successfully installed module.
#[derive(Debug, Clone)]
pub struct InstalledModuleRef {
    /// Installation id (UUID v7, time-sortable).
    pub id: Uuid,
    /// Installed module name.
    pub name: String,
    /// Human-readable location of the installed artifacts.
    pub location: String,
}

/// Turns a finished draft document into installed artifacts.
pub trait Installer: Send + Sync {
    fn install(
        &self,
        document: &ModuleDraft,
    ) -> impl Future<Output = Result<InstalledModuleRef, InstallError>> + Send;
}
