//! Abstract prompt capability.
//!
//! The session controller and the uitype contributors only need ask /
//! choose / confirm plus a handful of output primitives; how those render
//! (dialoguer, a test script, something else) is the caller's concern. The
//! trait is object-safe so contributors can take `&dyn Prompter`.

use modsmith_types::error::PromptError;

/// Blocking operator interaction surface.
pub trait Prompter: Send + Sync {
    /// Ask for a required free-text answer.
    fn input(&self, prompt: &str) -> Result<String, PromptError>;

    /// Ask for a free-text answer with a pre-filled default.
    fn input_with_default(&self, prompt: &str, default: &str) -> Result<String, PromptError>;

    /// Ask for an optional free-text answer; empty input means `None`.
    fn input_optional(&self, prompt: &str) -> Result<Option<String>, PromptError>;

    /// Choose one item from a list; returns the selected index.
    fn select(
        &self,
        prompt: &str,
        items: &[String],
        default: usize,
    ) -> Result<usize, PromptError>;

    /// Yes/no question.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, PromptError>;

    /// Informational message.
    fn info(&self, message: &str);

    /// Positive outcome message.
    fn success(&self, message: &str);

    /// Recoverable error message.
    fn error(&self, message: &str);

    /// Render a small summary table.
    fn table(&self, headers: &[&str], rows: &[Vec<String>]);
}
