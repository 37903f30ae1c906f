//! ---
//! loom_section: "05-validator"
//! loom_subsection: "errors"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Validator-phase errors: load, contract, functional."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use thiserror::Error;

/// Errors raised while loading, contract-checking, or functionally testing a
/// component. Each is reported per component; a component fails on any
/// category, per spec.md §4.4/§7.
#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("component '{0}' could not be constructed: {1}")]
    Instantiation(String, String),

    #[error("component '{component}' is missing required lifecycle method '{method}'")]
    MissingLifecycleMethod { component: String, method: &'static str },

    #[error("no factory registered for class '{0}'")]
    UnregisteredClass(String),
}

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, ValidatorError>;
