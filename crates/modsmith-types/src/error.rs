use thiserror::Error;

/// Errors raised while mutating a module draft.
///
/// All variants except `AnchorNotFound` are operator-recoverable: the
/// session reports them and returns to an interactive menu. `AnchorNotFound`
/// signals a programming defect (an anchor label that was not drawn from the
/// live collection) and is propagated instead of being swallowed.
#[derive(Debug, Error)]
pub enum DesignError {
    #[error("invalid module name '{0}': use only lowercase letters, digits and dashes")]
    InvalidName(String),

    #[error("a field called '{0}' already exists")]
    DuplicateFieldName(String),

    #[error("a {kind} labelled '{label}' already exists")]
    DuplicateLabel { kind: &'static str, label: String },

    #[error("anchor '{0}' not found among siblings")]
    AnchorNotFound(String),

    #[error("no {0} exists yet")]
    EmptyCollection(&'static str),

    #[error("invalid related list: {0}")]
    InvalidRelatedList(String),
}

/// Errors from draft store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("draft not found")]
    NotFound,
}

/// Opaque failure from the installer collaborator.
///
/// The designer surfaces the message verbatim and preserves the draft; it
/// never retries or interprets specific causes.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct InstallError(pub String);

/// Errors from the prompt capability.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt io error: {0}")]
    Io(String),

    #[error("prompt cancelled")]
    Cancelled,
}
