//! ---
//! loom_section: "05-validator"
//! loom_subsection: "factory"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "ComponentFactory trait-object registry replacing dynamic class discovery."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use loom_recipes::BasePrimitive;

use crate::errors::ValidatorError;

/// Which lifecycle methods a loaded component instance actually exposes.
/// Stands in for the original's textual pattern-matching on class members:
/// the factory reports this directly instead of the validator inspecting a
/// module namespace, per spec.md §9's discovery-protocol redesign note.
#[derive(Debug, Clone, Copy, Default)]
pub struct LifecycleSupport {
    pub has_setup: bool,
    pub has_primary: bool,
    pub has_cleanup: bool,
}

/// A loaded, instantiated component under test. The primary processing
/// method name depends on the base primitive (`generate`/`consume`/
/// `transform`/`split`/`merge`), but is exposed uniformly here as `process`.
pub trait GeneratedComponent: Send {
    /// Which lifecycle methods this instance exposes.
    fn lifecycle_support(&self) -> LifecycleSupport;

    /// Run setup, if present.
    fn setup(&mut self) -> Result<(), String>;

    /// Invoke the primary processing method on one synthetic input, returning
    /// `None` when the component drops the input (a valid outcome for
    /// Transformer/Filter-shaped components).
    fn process(&mut self, input: serde_json::Value) -> Result<Option<serde_json::Value>, String>;

    /// Run teardown, if present.
    fn cleanup(&mut self) -> Result<(), String>;
}

/// Name, type, and constructor for one generated component — the
/// registration record the validator receives instead of scanning a module
/// namespace.
pub struct ComponentRegistration {
    pub component_name: String,
    pub class_name: String,
    pub base_primitive: BasePrimitive,
    pub source_text: String,
    pub factory: Box<dyn ComponentFactory>,
}

/// Constructs a [`GeneratedComponent`] instance for one registration. Every
/// generated component is compiled in and registered through this trait
/// object, keyed by its stable `Generated<Type>_<name>` class name.
pub trait ComponentFactory: Send + Sync {
    fn create(&self) -> Result<Box<dyn GeneratedComponent>, ValidatorError>;
}

/// Required lifecycle surface for a base primitive, per spec.md §4.4's
/// "lifecycle operations appropriate to the component's base primitive."
pub fn required_lifecycle(_primitive: BasePrimitive) -> LifecycleSupport {
    LifecycleSupport {
        has_setup: true,
        has_primary: true,
        has_cleanup: true,
    }
}
