//! ---
//! loom_section: "07-orchestrator"
//! loom_subsection: "session"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Per-component attempt counts and content-hash history, owned exclusively by one run."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use std::collections::HashMap;

use sha2::{Digest, Sha256};

/// Default cap on healing attempts per component, per spec.md §4.6.
pub const DEFAULT_MAX_HEALING_ATTEMPTS: u32 = 3;

/// Whether healing a component is still making headway. Progress check A
/// (repeating a prior state) and check B (A/B/A oscillation over the last
/// three attempts) are evaluated against history recorded *before* the
/// current attempt is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressOutcome {
    Progress,
    NoProgress,
    Oscillation,
}

/// Owned exclusively by one orchestrator run (per spec.md §9's redesign
/// note: no global healing state). Tracks, per component, how many times
/// healing has been attempted and the content-hash sequence of its source
/// across attempts.
#[derive(Debug, Default)]
pub struct HealingSession {
    attempts: HashMap<String, u32>,
    history: HashMap<String, Vec<String>>,
    max_attempts: u32,
}

impl HealingSession {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            attempts: HashMap::new(),
            history: HashMap::new(),
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn attempts_for(&self, component: &str) -> u32 {
        self.attempts.get(component).copied().unwrap_or(0)
    }

    /// True once a component has exhausted its attempt budget; the
    /// orchestrator must stop retrying it for the remainder of the run.
    pub fn circuit_broken(&self, component: &str) -> bool {
        self.attempts_for(component) >= self.max_attempts
    }

    pub fn record_attempt(&mut self, component: &str) {
        *self.attempts.entry(component.to_owned()).or_insert(0) += 1;
    }

    /// Evaluate progress for `component` against its history *before*
    /// recording `source` — call [`Self::record_history`] separately once
    /// the outcome is known to be [`ProgressOutcome::Progress`].
    pub fn progress_check(&self, component: &str, source: &str) -> ProgressOutcome {
        let hash = content_hash(source);
        let Some(history) = self.history.get(component) else {
            return ProgressOutcome::Progress;
        };
        if history.iter().any(|h| h == &hash) {
            return ProgressOutcome::NoProgress;
        }
        if history.len() >= 3 && history[history.len() - 1] == history[history.len() - 3] {
            return ProgressOutcome::Oscillation;
        }
        ProgressOutcome::Progress
    }

    pub fn record_history(&mut self, component: &str, source: &str) {
        self.history
            .entry(component.to_owned())
            .or_default()
            .push(content_hash(source));
    }
}

fn content_hash(source: &str) -> String {
    let digest = Sha256::digest(source.as_bytes());
    format!("{digest:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeating_a_prior_state_is_no_progress() {
        let mut session = HealingSession::new(3);
        session.record_history("c", "version-a");
        session.record_attempt("c");
        assert_eq!(session.progress_check("c", "version-a"), ProgressOutcome::NoProgress);
    }

    #[test]
    fn bouncing_between_two_prior_states_is_oscillation() {
        let mut session = HealingSession::new(5);
        session.record_history("c", "a");
        session.record_history("c", "b");
        session.record_history("c", "a");
        // A brand new proposal, distinct from anything already recorded —
        // check A (exact repeat) does not fire, but the recorded history
        // already shows an a/b/a bounce, so this is still stuck.
        assert_eq!(session.progress_check("c", "c"), ProgressOutcome::Oscillation);
    }

    #[test]
    fn circuit_breaker_trips_at_cap() {
        let mut session = HealingSession::new(2);
        session.record_attempt("c");
        assert!(!session.circuit_broken("c"));
        session.record_attempt("c");
        assert!(session.circuit_broken("c"));
    }
}
