//! ---
//! loom_section: "04-emitter"
//! loom_subsection: "resilience"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Retry seam, present but disabled by default and never invoked by the core loop."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use std::time::Duration;

/// Retry policy mirroring the shape of a restart policy: present as a seam
/// for deployments that want retries around LLM calls, but constructed
/// disabled by default. The core loop never invokes it — the healing loop
/// itself is the retry mechanism, per spec.md §9.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub enabled: bool,
    pub max_attempts: usize,
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// An explicitly enabled policy, for deployments that opt in.
    pub fn enabled(max_attempts: usize, base_delay: Duration) -> Self {
        Self {
            enabled: true,
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            max_attempts: 1,
            base_delay: Duration::from_millis(250),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_disabled() {
        let policy = RetryPolicy::default();
        assert!(!policy.enabled);
        assert_eq!(policy.max_attempts, 1);
    }
}
