//! ---
//! loom_section: "02-recipes"
//! loom_subsection: "errors"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Recipe lookup and skeleton-expansion errors."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use thiserror::Error;

/// Errors raised by the recipe registry and skeleton expander.
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("unknown recipe type '{requested}', known types: {known:?}")]
    UnknownType {
        requested: String,
        known: Vec<&'static str>,
    },

    /// Raised by the stub body of a generated skeleton's primary method if it
    /// is ever invoked directly, rather than replaced by the code emitter.
    /// The recipe expander never embeds real behavior; this error is the
    /// deliberate signal that behavior is still owed.
    #[error("component '{component}' primary method '{method}' has no implementation yet")]
    ImplementationRequired { component: String, method: String },
}

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, RecipeError>;
