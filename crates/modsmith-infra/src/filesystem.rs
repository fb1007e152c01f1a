//! Filesystem layout helpers for modsmith.
//!
//! Resolves the data directory and the paths the installer and module
//! catalog share.

use std::path::{Path, PathBuf};

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `MODSMITH_DATA_DIR` environment variable
/// 2. Platform home directory (`~/.modsmith`)
/// 3. Last resort: `./.modsmith`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MODSMITH_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".modsmith");
    }

    PathBuf::from(".modsmith")
}

/// Directory holding one manifest per installed module.
pub fn modules_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("modules")
}

/// Manifest path for an installed module.
pub fn manifest_path(data_dir: &Path, module: &str) -> PathBuf {
    modules_dir(data_dir).join(format!("{module}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_paths() {
        let data_dir = PathBuf::from("/home/user/.modsmith");
        assert_eq!(
            modules_dir(&data_dir),
            PathBuf::from("/home/user/.modsmith/modules")
        );
        assert_eq!(
            manifest_path(&data_dir, "book-type"),
            PathBuf::from("/home/user/.modsmith/modules/book-type.json")
        );
    }

    #[test]
    fn test_resolve_data_dir_from_env() {
        // SAFETY: This test is single-threaded and restores the env var immediately.
        unsafe {
            std::env::set_var("MODSMITH_DATA_DIR", "/tmp/test-modsmith");
        }
        let dir = resolve_data_dir();
        assert_eq!(dir, PathBuf::from("/tmp/test-modsmith"));
        unsafe {
            std::env::remove_var("MODSMITH_DATA_DIR");
        }
    }
}
