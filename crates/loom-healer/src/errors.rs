//! ---
//! loom_section: "06-healer"
//! loom_subsection: "errors"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Error taxonomy for the healing engine."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use thiserror::Error;

/// Errors raised while analyzing or repairing one component's source.
#[derive(Debug, Error)]
pub enum HealError {
    #[error("no fixable issues detected in {0}")]
    NoFixableIssues(String),

    #[error("healing produced no textual change for {0}")]
    NoProgress(String),

    #[error("could not identify a component class for {0} in its own source")]
    ClassNotFound(String),

    #[error("failed to apply fix '{fix}' to {component}: {detail}")]
    FixApplication {
        component: String,
        fix: String,
        detail: String,
    },

    #[error("I/O failure handling {path}: {detail}")]
    Io { path: String, detail: String },
}

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, HealError>;
