//! Filesystem catalogs.
//!
//! `FsModuleCatalog` reads the manifest directory the installer writes;
//! `FsPackageCatalog` scans a two-level `packages/<vendor>/<package>`
//! directory tree. Both return ordered results and treat a missing root as
//! empty rather than an error.

use std::path::PathBuf;

use modsmith_core::catalog::{CatalogError, ModuleCatalog, PackageCatalog};
use modsmith_core::draft::ModuleDraftExt;
use modsmith_types::draft::ModuleDraft;

/// Catalog of installed modules backed by the manifest directory.
pub struct FsModuleCatalog {
    modules_dir: PathBuf,
}

impl FsModuleCatalog {
    /// Create a catalog reading from the given modules directory.
    pub fn new(modules_dir: PathBuf) -> Self {
        Self { modules_dir }
    }

    async fn read_manifest(&self, module: &str) -> Result<ModuleDraft, CatalogError> {
        let path = self.modules_dir.join(format!("{module}.json"));
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CatalogError::ModuleNotFound(module.to_string()));
            }
            Err(e) => return Err(CatalogError::Io(e.to_string())),
        };

        serde_json::from_str(&content)
            .map_err(|e| CatalogError::InvalidManifest(module.to_string(), e.to_string()))
    }
}

impl ModuleCatalog for FsModuleCatalog {
    async fn list_modules(&self) -> Result<Vec<String>, CatalogError> {
        let mut entries = match tokio::fs::read_dir(&self.modules_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(CatalogError::Io(e.to_string())),
        };

        let mut modules = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| CatalogError::Io(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                modules.push(stem.to_string());
            }
        }

        modules.sort();
        Ok(modules)
    }

    async fn list_fields(&self, module: &str) -> Result<Vec<String>, CatalogError> {
        let manifest = self.read_manifest(module).await?;
        Ok(manifest
            .all_fields()
            .iter()
            .map(|f| f.name.clone())
            .collect())
    }
}

/// Catalog of `vendor/package` directories a module can be created in.
pub struct FsPackageCatalog {
    packages_root: PathBuf,
}

impl FsPackageCatalog {
    /// Create a catalog scanning the given packages root.
    pub fn new(packages_root: PathBuf) -> Self {
        Self { packages_root }
    }
}

impl PackageCatalog for FsPackageCatalog {
    async fn list_packages(&self) -> Result<Vec<String>, CatalogError> {
        let mut vendors = match tokio::fs::read_dir(&self.packages_root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(CatalogError::Io(e.to_string())),
        };

        let mut packages = Vec::new();
        // First level directories are vendors, second level are packages.
        while let Some(vendor) = vendors
            .next_entry()
            .await
            .map_err(|e| CatalogError::Io(e.to_string()))?
        {
            let is_dir = vendor
                .file_type()
                .await
                .map(|t| t.is_dir())
                .unwrap_or(false);
            if !is_dir {
                continue;
            }
            let vendor_name = vendor.file_name().to_string_lossy().to_string();

            let mut children = match tokio::fs::read_dir(vendor.path()).await {
                Ok(children) => children,
                Err(e) => return Err(CatalogError::Io(e.to_string())),
            };
            while let Some(package) = children
                .next_entry()
                .await
                .map_err(|e| CatalogError::Io(e.to_string()))?
            {
                let is_dir = package
                    .file_type()
                    .await
                    .map(|t| t.is_dir())
                    .unwrap_or(false);
                if is_dir {
                    packages.push(format!(
                        "{vendor_name}/{}",
                        package.file_name().to_string_lossy()
                    ));
                }
            }
        }

        packages.sort();
        Ok(packages)
    }
}
