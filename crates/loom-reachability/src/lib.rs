//! ---
//! loom_section: "03-reachability"
//! loom_subsection: "crate-root"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Boundary-termination static analyzer."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
#![warn(missing_docs)]
#![doc = "Proves every externally observable ingress on a blueprint can reach a termination commitment via a port-faithful path, before any code is emitted."]

pub mod analyzer;
pub mod coupling;
pub mod errors;
pub mod migration;
pub mod result;
pub mod state;

pub use analyzer::{ReachabilityAnalyzer, MAX_INGRESS_HOPS};
pub use errors::{VrError, VrErrorCategory, VrErrorContext, VrErrorFactory, VrErrorType};
pub use migration::{migrate, MigrationError, MigrationReport, MIGRATION_CONFIDENCE_THRESHOLD};
pub use result::{BlueprintVerdict, ReachabilityResult, TerminationMode};
pub use state::PathTraversalState;
