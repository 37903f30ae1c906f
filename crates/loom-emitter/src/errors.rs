//! ---
//! loom_section: "04-emitter"
//! loom_subsection: "errors"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Generation errors: missing LLM, timeout, write failure."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use thiserror::Error;

/// Errors raised while synthesizing or writing a component body.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("component '{0}' generation timed out")]
    Timeout(String),

    #[error("LLM backend error synthesizing component '{component}': {detail}")]
    Backend { component: String, detail: String },

    #[error("failed to write generated source for component '{component}': {detail}")]
    WriteFailure { component: String, detail: String },
}

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, EmitError>;
