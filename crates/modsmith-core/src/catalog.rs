//! Catalog collaborator traits.
//!
//! Related-list targets are resolved against a catalog of installed
//! modules; module creation can place the module in an external package
//! discovered by the package catalog. The designer only reads from both.

use std::future::Future;

use thiserror::Error;

/// Errors from catalog lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog io error: {0}")]
    Io(String),

    #[error("invalid manifest for '{0}': {1}")]
    InvalidManifest(String, String),

    #[error("module '{0}' not found")]
    ModuleNotFound(String),
}

/// Directory of installed modules and their fields.
pub trait ModuleCatalog: Send + Sync {
    /// Ordered set of installed module names.
    fn list_modules(&self) -> impl Future<Output = Result<Vec<String>, CatalogError>> + Send;

    /// Ordered set of field names of an installed module.
    fn list_fields(
        &self,
        module: &str,
    ) -> impl Future<Output = Result<Vec<String>, CatalogError>> + Send;
}

/// Directory of packages a module can be created in.
pub trait PackageCatalog: Send + Sync {
    /// Ordered sequence of "vendor/package" strings.
    fn list_packages(&self) -> impl Future<Output = Result<Vec<String>, CatalogError>> + Send;
}
