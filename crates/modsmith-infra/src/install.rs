//! Filesystem installer.
//!
//! Writes the finished draft as a pretty-printed JSON manifest under the
//! modules directory; the module catalog reads the same directory back.
//! Schema generation and menu wiring belong to the hosting application,
//! which consumes these manifests.

use std::path::PathBuf;

use uuid::Uuid;

use modsmith_core::install::{InstalledModuleRef, Installer};
use modsmith_types::draft::ModuleDraft;
use modsmith_types::error::InstallError;

/// Installs modules by writing one manifest per module.
pub struct FsInstaller {
    modules_dir: PathBuf,
}

impl FsInstaller {
    /// Create an installer writing into the given modules directory.
    pub fn new(modules_dir: PathBuf) -> Self {
        Self { modules_dir }
    }
}

impl Installer for FsInstaller {
    async fn install(&self, document: &ModuleDraft) -> Result<InstalledModuleRef, InstallError> {
        tokio::fs::create_dir_all(&self.modules_dir)
            .await
            .map_err(|e| InstallError(format!("cannot create modules directory: {e}")))?;

        let manifest = serde_json::to_string_pretty(document)
            .map_err(|e| InstallError(format!("cannot serialize module: {e}")))?;

        let path = self.modules_dir.join(format!("{}.json", document.name));
        tokio::fs::write(&path, manifest)
            .await
            .map_err(|e| InstallError(format!("cannot write manifest: {e}")))?;

        tracing::info!(module = %document.name, path = %path.display(), "manifest written");

        Ok(InstalledModuleRef {
            id: Uuid::now_v7(),
            name: document.name.clone(),
            location: path.display().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modsmith_core::draft::{ModuleSeed, new_module_draft};

    fn make_draft(name: &str) -> ModuleDraft {
        new_module_draft(ModuleSeed {
            name: name.to_string(),
            model_class: "Invoice".to_string(),
            package: None,
            table_name: "invoices".to_string(),
            table_prefix: String::new(),
            icon: None,
            is_for_admin: false,
            default_route: "list".to_string(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_install_writes_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let installer = FsInstaller::new(dir.path().join("modules"));

        let draft = make_draft("invoice");
        let installed = installer.install(&draft).await.unwrap();

        assert_eq!(installed.name, "invoice");
        let written = tokio::fs::read_to_string(dir.path().join("modules/invoice.json"))
            .await
            .unwrap();
        let back: ModuleDraft = serde_json::from_str(&written).unwrap();
        assert_eq!(back, draft);
    }

    #[tokio::test]
    async fn test_reinstall_overwrites_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let installer = FsInstaller::new(dir.path().join("modules"));

        let mut draft = make_draft("invoice");
        installer.install(&draft).await.unwrap();

        draft.icon = Some("receipt".to_string());
        installer.install(&draft).await.unwrap();

        let written = tokio::fs::read_to_string(dir.path().join("modules/invoice.json"))
            .await
            .unwrap();
        let back: ModuleDraft = serde_json::from_str(&written).unwrap();
        assert_eq!(back.icon.as_deref(), Some("receipt"));
    }
}
