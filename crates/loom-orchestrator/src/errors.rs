//! ---
//! loom_section: "07-orchestrator"
//! loom_subsection: "errors"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Fail-fast startup/config errors distinct from the fail-soft loop outcome."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use thiserror::Error;

/// Errors that abort a run before or outside the healing loop: config and
/// prerequisite failures are fail-fast per spec.md §7's propagation policy.
/// In-loop failures (no progress, oscillation, circuit breaker) are not
/// errors — they're reported as [`crate::outcome::RunOutcome::Failed`].
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("blueprint failed structural validation: {0}")]
    Blueprint(#[from] loom_blueprint::BlueprintError),

    #[error("blueprint migration refused: {0}")]
    Migration(#[from] loom_reachability::MigrationError),

    #[error("blueprint rejected boundary-termination analysis: {0} unresolved ingress error(s)")]
    Reachability(usize),

    #[error("component '{component}' config invalid: {source}")]
    Config {
        component: String,
        #[source]
        source: loom_blueprint::config::ConfigError,
    },

    #[error("no recipe registered for component type '{0}'")]
    UnknownRecipe(String),

    #[error("failed to write output for component '{component}': {detail}")]
    OutputWrite { component: String, detail: String },
}

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, OrchestratorError>;
