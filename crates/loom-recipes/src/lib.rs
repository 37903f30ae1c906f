//! ---
//! loom_section: "02-recipes"
//! loom_subsection: "crate-root"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Static recipe registry and structural skeleton expander."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
#![warn(missing_docs)]
#![doc = "Given a component descriptor, looks up its recipe and expands a structural skeleton that refuses to embed behavior."]

pub mod errors;
pub mod expand;
pub mod registry;

pub use errors::RecipeError;
pub use expand::{expand, Skeleton};
pub use registry::{BasePrimitive, PortTemplate, Recipe, RecipeRegistry, StaticRecipeRegistry};

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, RecipeError>;
