//! ---
//! loom_section: "07-orchestrator"
//! loom_subsection: "crate-root"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Drives a blueprint through migration, reachability, generation, validation, and healing to a fixed point."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
#![warn(missing_docs)]
#![doc = "The orchestrator ties every upstream crate together: it migrates a blueprint, gates it on boundary-termination reachability, expands and emits component sources, validates the result, and — if validation fails — drives a bounded heal/revalidate loop before giving up with a fully explained RunOutcome."]

pub mod bridge;
pub mod errors;
pub mod orchestrator;
pub mod outcome;
pub mod session;
pub mod writer;

pub use errors::OrchestratorError;
pub use orchestrator::Orchestrator;
pub use outcome::{exit_code_for_error, exit_code_for_outcome, exitcode, FailureReason, RunOutcome};
pub use session::{HealingSession, ProgressOutcome, DEFAULT_MAX_HEALING_ATTEMPTS};

/// Crate-local result alias for startup/config failures. In-loop failures
/// are reported through [`RunOutcome`], not this alias.
pub type Result<T> = std::result::Result<T, OrchestratorError>;
