//! Application state wiring.
//!
//! AppState resolves the data directory, opens the database pool and picks
//! the active locale. The design command builds its collaborators from it.

use std::path::PathBuf;

use modsmith_infra::filesystem::resolve_data_dir;
use modsmith_infra::sqlite::pool::DatabasePool;

/// Shared application state for the CLI commands.
pub struct AppState {
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
    pub locale: String,
}

impl AppState {
    /// Initialize the application state: resolve paths, connect to the DB.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("modsmith.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        Ok(Self {
            data_dir,
            db_pool,
            locale: resolve_locale(),
        })
    }
}

/// Resolve the active locale.
///
/// Priority: `MODSMITH_LOCALE`, then the language part of `LANG`
/// ("fr_FR.UTF-8" -> "fr"), then "en".
fn resolve_locale() -> String {
    if let Ok(locale) = std::env::var("MODSMITH_LOCALE") {
        let locale = locale.trim().to_string();
        if !locale.is_empty() {
            return locale;
        }
    }

    if let Ok(lang) = std::env::var("LANG")
        && let Some(prefix) = lang.split(['_', '.']).next()
        && !prefix.is_empty()
        && prefix != "C"
        && prefix != "POSIX"
    {
        return prefix.to_lowercase();
    }

    "en".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_locale_from_env() {
        // SAFETY: This test is single-threaded and restores the env var immediately.
        unsafe {
            std::env::set_var("MODSMITH_LOCALE", "fr");
        }
        assert_eq!(resolve_locale(), "fr");
        unsafe {
            std::env::remove_var("MODSMITH_LOCALE");
        }
    }
}
