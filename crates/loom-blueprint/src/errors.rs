//! ---
//! loom_section: "01-data-model"
//! loom_subsection: "errors"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Structural errors raised while parsing or validating a blueprint document."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use thiserror::Error;

use crate::model::Direction;

/// Errors raised while parsing or structurally validating a blueprint document.
///
/// This is deliberately lighter than the reachability crate's VR1 taxonomy: it
/// covers document-level sanity (missing fields, dangling references, malformed
/// syntax) while the 27-type semantic taxonomy lives closer to the traversal
/// that needs it.
#[derive(Debug, Error)]
pub enum BlueprintError {
    #[error("failed to parse blueprint document: {0}")]
    ParseFailure(String),

    #[error("blueprint document is malformed: {0}")]
    MalformedBlueprint(String),

    #[error("component '{0}' is missing a required 'type' field")]
    MissingComponentType(String),

    #[error("duplicate component name '{0}'")]
    DuplicateComponent(String),

    #[error("binding refers to unknown component '{0}'")]
    ComponentNotFound(String),

    #[error("binding refers to unknown output port '{component}.{port}'")]
    MissingOutputPort { component: String, port: String },

    #[error("binding refers to unknown input port '{component}.{port}'")]
    MissingInputPort { component: String, port: String },

    #[error("binding targets port '{component}.{port}' as {expected:?} but it is declared otherwise")]
    PortDirectionMismatch {
        component: String,
        port: String,
        expected: Direction,
    },

    #[error("component '{component}' port '{port}' has conflicting flags: {reason}")]
    ConflictingPortFlags {
        component: String,
        port: String,
        reason: String,
    },

    #[error("component config error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, BlueprintError>;
