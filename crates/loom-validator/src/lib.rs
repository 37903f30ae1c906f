//! ---
//! loom_section: "05-validator"
//! loom_subsection: "crate-root"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Integration validator: load/contract/functional phases over an in-process bus."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
#![warn(missing_docs)]
#![doc = "Loads emitted component sources, instantiates each one, drives it with synthetic inputs inside a shared in-process message bus, and computes per-component and system pass rates."]

pub mod bus;
pub mod errors;
pub mod factory;
pub mod result;
pub mod synthetic;
pub mod validator;

pub use bus::MessageBus;
pub use errors::ValidatorError;
pub use factory::{ComponentFactory, ComponentRegistration, GeneratedComponent, LifecycleSupport};
pub use result::{TestResult, Verdict};
pub use validator::{IntegrationValidator, DEFAULT_SYSTEM_THRESHOLD};

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, ValidatorError>;
