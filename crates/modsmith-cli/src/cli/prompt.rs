//! Dialoguer-backed implementation of the core prompt capability.
//!
//! Renders inputs, selections and confirmations with dialoguer, messages
//! with console styling, and summary tables with comfy-table. The core
//! never sees any of these crates.

use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::{Confirm, Input, Select};

use modsmith_core::prompt::Prompter;
use modsmith_types::error::PromptError;

/// Terminal prompter for interactive sessions.
pub struct DialoguerPrompter;

fn map_err(err: dialoguer::Error) -> PromptError {
    match err {
        dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::Interrupted => {
            PromptError::Cancelled
        }
        other => PromptError::Io(other.to_string()),
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str) -> Result<String, PromptError> {
        Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(map_err)
    }

    fn input_with_default(&self, prompt: &str, default: &str) -> Result<String, PromptError> {
        Input::<String>::new()
            .with_prompt(prompt)
            .default(default.to_string())
            .interact_text()
            .map_err(map_err)
    }

    fn input_optional(&self, prompt: &str) -> Result<Option<String>, PromptError> {
        let text = Input::<String>::new()
            .with_prompt(format!("{prompt} (optional)"))
            .allow_empty(true)
            .interact_text()
            .map_err(map_err)?;

        let text = text.trim();
        Ok((!text.is_empty()).then(|| text.to_string()))
    }

    fn select(
        &self,
        prompt: &str,
        items: &[String],
        default: usize,
    ) -> Result<usize, PromptError> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()
            .map_err(map_err)
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, PromptError> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(map_err)
    }

    fn info(&self, message: &str) {
        println!("  {} {}", style("i").blue().bold(), message);
    }

    fn success(&self, message: &str) {
        println!("  {} {}", style("✓").green().bold(), message);
    }

    fn error(&self, message: &str) {
        eprintln!("  {} {}", style("✗").red().bold(), message);
    }

    fn table(&self, headers: &[&str], rows: &[Vec<String>]) {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL_CONDENSED);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::White))
                .collect::<Vec<_>>(),
        );
        for row in rows {
            table.add_row(row.clone());
        }
        println!("{table}");
    }
}
