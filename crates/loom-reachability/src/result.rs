//! ---
//! loom_section: "03-reachability"
//! loom_subsection: "result"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Per-ingress reachability result and termination modes."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use crate::errors::VrError;

/// Which commitment an ingress must discharge, per spec.md §4.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationMode {
    Reply,
    Durable,
    ObservabilityOk,
}

/// The outcome of tracing one ingress point to a termination commitment.
#[derive(Debug, Clone)]
pub struct ReachabilityResult {
    pub ingress_id: String,
    pub termination_found: bool,
    pub termination_mode: Option<TerminationMode>,
    pub path_trace: Vec<String>,
    pub errors: Vec<VrError>,
}

impl ReachabilityResult {
    pub fn admitted(ingress_id: String, mode: TerminationMode, path_trace: Vec<String>) -> Self {
        Self {
            ingress_id,
            termination_found: true,
            termination_mode: Some(mode),
            path_trace,
            errors: Vec::new(),
        }
    }

    pub fn rejected(ingress_id: String, path_trace: Vec<String>, errors: Vec<VrError>) -> Self {
        Self {
            ingress_id,
            termination_found: false,
            termination_mode: None,
            path_trace,
            errors,
        }
    }
}

/// Aggregate outcome over every ingress point in a blueprint.
#[derive(Debug, Clone)]
pub struct BlueprintVerdict {
    pub admitted: bool,
    pub results: Vec<ReachabilityResult>,
}

impl BlueprintVerdict {
    pub fn from_results(results: Vec<ReachabilityResult>) -> Self {
        let admitted = !results.is_empty() && results.iter().all(|r| r.termination_found);
        Self { admitted, results }
    }

    /// All errors across every rejected ingress, in ingress order.
    pub fn errors(&self) -> Vec<&VrError> {
        self.results.iter().flat_map(|r| r.errors.iter()).collect()
    }
}
