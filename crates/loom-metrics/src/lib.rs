//! ---
//! loom_section: "00-ambient"
//! loom_subsection: "module"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Metrics registry and per-subsystem collectors."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use std::sync::Arc;

use anyhow::{Context, Result};
use prometheus::{Histogram, HistogramOpts, IntCounterVec, IntGauge, Opts, Registry};

/// Shared registry type used across the workspace.
pub type SharedRegistry = Arc<Registry>;

/// Produce a new shared registry.
pub fn new_registry() -> SharedRegistry {
    Arc::new(Registry::new())
}

/// Metrics published by the reachability analyzer (spec.md §9: "publishes per-session
/// metrics: validation count/duration by bucket, error counters by category/type, a
/// path-hop histogram").
#[derive(Clone)]
pub struct ReachabilityMetrics {
    registry: SharedRegistry,
    validations_total: IntCounterVec,
    validation_seconds: Histogram,
    errors_total: IntCounterVec,
    path_hops: Histogram,
}

impl ReachabilityMetrics {
    /// Register the reachability analyzer's collectors against the given registry.
    pub fn new(registry: SharedRegistry) -> Result<Self> {
        let validations_total = IntCounterVec::new(
            Opts::new(
                "loom_reachability_validations_total",
                "Count of blueprint admission checks by outcome",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(validations_total.clone()))?;

        let buckets = prometheus::exponential_buckets(0.0005, 2.0, 14)
            .context("failed to construct validation duration buckets")?;
        let validation_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "loom_reachability_validation_seconds",
                "Time spent running boundary-termination analysis over one blueprint",
            )
            .buckets(buckets),
        )?;
        registry.register(Box::new(validation_seconds.clone()))?;

        let errors_total = IntCounterVec::new(
            Opts::new(
                "loom_reachability_errors_total",
                "Count of VR1 errors raised during analysis by category and type",
            ),
            &["category", "error_type"],
        )?;
        registry.register(Box::new(errors_total.clone()))?;

        let hop_buckets = vec![
            0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0,
        ];
        let path_hops = Histogram::with_opts(
            HistogramOpts::new(
                "loom_reachability_path_hops",
                "Hop count of terminating paths discovered from each ingress",
            )
            .buckets(hop_buckets),
        )?;
        registry.register(Box::new(path_hops.clone()))?;

        Ok(Self {
            registry,
            validations_total,
            validation_seconds,
            errors_total,
            path_hops,
        })
    }

    /// Access the underlying shared registry.
    pub fn registry(&self) -> SharedRegistry {
        self.registry.clone()
    }

    /// Record the outcome of one blueprint admission check.
    pub fn record_validation(&self, admitted: bool, seconds: f64) {
        let outcome = if admitted { "admitted" } else { "rejected" };
        self.validations_total.with_label_values(&[outcome]).inc();
        self.validation_seconds.observe(seconds);
    }

    /// Record one VR1 error occurrence.
    pub fn record_error(&self, category: &str, error_type: &str) {
        self.errors_total
            .with_label_values(&[category, error_type])
            .inc();
    }

    /// Record the hop count of a discovered terminating path.
    pub fn observe_path_hops(&self, hops: u32) {
        self.path_hops.observe(hops as f64);
    }
}

/// Metrics published by the healing orchestrator.
#[derive(Clone)]
pub struct OrchestratorMetrics {
    registry: SharedRegistry,
    components_tracked: IntGauge,
    heal_attempts_total: IntCounterVec,
    iterations: Histogram,
}

impl OrchestratorMetrics {
    /// Register the orchestrator's collectors against the given registry.
    pub fn new(registry: SharedRegistry) -> Result<Self> {
        let components_tracked = IntGauge::with_opts(Opts::new(
            "loom_orchestrator_components_tracked",
            "Number of components under active healing-session tracking",
        ))?;
        registry.register(Box::new(components_tracked.clone()))?;

        let heal_attempts_total = IntCounterVec::new(
            Opts::new(
                "loom_orchestrator_heal_attempts_total",
                "Count of healing attempts by component and outcome",
            ),
            &["component", "outcome"],
        )?;
        registry.register(Box::new(heal_attempts_total.clone()))?;

        let iterations = Histogram::with_opts(HistogramOpts::new(
            "loom_orchestrator_iterations",
            "Number of outer fixed-point iterations consumed per run",
        ))?;
        registry.register(Box::new(iterations.clone()))?;

        Ok(Self {
            registry,
            components_tracked,
            heal_attempts_total,
            iterations,
        })
    }

    /// Access the underlying shared registry.
    pub fn registry(&self) -> SharedRegistry {
        self.registry.clone()
    }

    /// Set the current count of tracked components.
    pub fn set_components_tracked(&self, count: usize) {
        self.components_tracked.set(count as i64);
    }

    /// Record one healing attempt outcome for a component.
    pub fn record_heal_attempt(&self, component: &str, outcome: &str) {
        self.heal_attempts_total
            .with_label_values(&[component, outcome])
            .inc();
    }

    /// Record the number of outer iterations a run consumed.
    pub fn observe_iterations(&self, iterations: u32) {
        self.iterations.observe(iterations as f64);
    }
}

pub use prometheus;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reachability_metrics_register_without_collision() {
        let registry = new_registry();
        let metrics = ReachabilityMetrics::new(registry).expect("metrics register");
        metrics.record_validation(true, 0.01);
        metrics.record_error("reachability_issues", "hop_limit_exceeded");
        metrics.observe_path_hops(10);
    }

    #[test]
    fn orchestrator_metrics_register_without_collision() {
        let registry = new_registry();
        let metrics = OrchestratorMetrics::new(registry).expect("metrics register");
        metrics.set_components_tracked(3);
        metrics.record_heal_attempt("controller", "healed");
        metrics.observe_iterations(2);
    }
}
