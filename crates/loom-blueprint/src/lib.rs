//! ---
//! loom_section: "01-data-model"
//! loom_subsection: "crate-root"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Blueprint, component, and port data model plus component config validation."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
#![warn(missing_docs)]
#![doc = "Blueprint data model: components, ports, bindings, and the config validation pipeline that backs the rest of the Loom workspace."]

pub mod config;
pub mod errors;
pub mod model;

pub use config::{BlueprintSource, ConfigError, ConfigValidator, DefaultConfigValidator, GeneratorBackend, RuntimeFlags};
pub use errors::BlueprintError;
pub use model::{BindingSpec, Blueprint, ComponentSpec, ConfigValue, Direction, PortInfo, PortSpec, ValidatedBlueprint};

/// Crate-local result alias over [`BlueprintError`].
pub type Result<T> = std::result::Result<T, BlueprintError>;
