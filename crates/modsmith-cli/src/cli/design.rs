//! Design session and draft listing commands.

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use modsmith_core::draft::ModuleDraftExt;
use modsmith_core::draft_store::DraftStore;
use modsmith_core::session::SessionController;
use modsmith_infra::catalog::{FsModuleCatalog, FsPackageCatalog};
use modsmith_infra::filesystem::modules_dir;
use modsmith_infra::install::FsInstaller;
use modsmith_infra::sqlite::draft::SqliteDraftStore;
use modsmith_infra::uitype::BuiltinUitypeRegistry;

use crate::cli::prompt::DialoguerPrompter;
use crate::state::AppState;

/// Run the interactive design session.
///
/// This is the main entry point for `modsmith design`. Packages are scanned
/// from `./packages`; installed module manifests live in the data
/// directory.
pub async fn run_design_session(state: &AppState) -> Result<()> {
    let modules = modules_dir(&state.data_dir);
    let packages_root = std::env::current_dir()
        .context("cannot resolve working directory")?
        .join("packages");

    let mut session = SessionController::new(
        SqliteDraftStore::new(state.db_pool.clone()),
        BuiltinUitypeRegistry::new(),
        FsModuleCatalog::new(modules.clone()),
        FsPackageCatalog::new(packages_root),
        FsInstaller::new(modules),
        DialoguerPrompter,
        state.locale.clone(),
    );

    println!();
    println!(
        "  {} Module designer (locale: {})",
        style("*").cyan().bold(),
        style(&state.locale).yellow()
    );
    println!();

    session.run().await.context("design session failed")?;

    println!();
    println!("  {}", style("Session ended.").dim());
    Ok(())
}

/// List saved drafts in a table, or as JSON with `--json`.
pub async fn list_drafts(state: &AppState, json: bool) -> Result<()> {
    let store = SqliteDraftStore::new(state.db_pool.clone());
    let drafts = store.list_all().await?;

    if json {
        let value: Vec<serde_json::Value> = drafts
            .iter()
            .map(|d| {
                serde_json::json!({
                    "name": d.name,
                    "updated_at": d.updated_at.to_rfc3339(),
                    "document": d.document,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if drafts.is_empty() {
        println!();
        println!(
            "  {} No drafts found. Start one with: {}",
            style("i").blue().bold(),
            style("modsmith design").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Name").fg(Color::White),
        Cell::new("Tabs").fg(Color::White),
        Cell::new("Fields").fg(Color::White),
        Cell::new("Related lists").fg(Color::White),
        Cell::new("Links").fg(Color::White),
        Cell::new("Updated").fg(Color::White),
    ]);

    for draft in &drafts {
        table.add_row(vec![
            draft.name.clone(),
            draft.document.tabs.len().to_string(),
            draft.document.all_fields().len().to_string(),
            draft.document.related_lists.len().to_string(),
            draft.document.links.len().to_string(),
            draft.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}
