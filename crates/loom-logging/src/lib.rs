//! ---
//! loom_section: "00-ambient"
//! loom_subsection: "module"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Structured logging adapters and run-scoped context."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
#![warn(missing_docs)]

use tracing::Level;
use tracing_subscriber::{fmt as subscriber_fmt, prelude::*, EnvFilter, Registry};

/// Initialize a baseline tracing subscriber suitable for development and for `loomd`/`loomctl`.
pub fn init() {
    let _ = Registry::default()
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(subscriber_fmt::layer())
        .try_init();
}

/// Context propagated by the convenience macros, identifying which run and component a log
/// event belongs to.
#[derive(Debug, Default, Clone)]
pub struct LogContext<'a> {
    /// Identifier of the healing session / generation run.
    pub run_id: Option<&'a str>,
    /// Component name the event pertains to, if any.
    pub component: Option<&'a str>,
    /// Healing or generation iteration number.
    pub iteration: Option<u64>,
    /// Pipeline stage emitting the event (e.g. "reachability", "emit", "validate", "heal").
    pub stage: Option<&'a str>,
}

impl<'a> LogContext<'a> {
    /// Create an empty logging context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a run identifier.
    pub fn with_run(mut self, run_id: &'a str) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Attach a component name.
    pub fn with_component(mut self, component: &'a str) -> Self {
        self.component = Some(component);
        self
    }

    /// Attach an iteration counter.
    pub fn with_iteration(mut self, iteration: u64) -> Self {
        self.iteration = Some(iteration);
        self
    }

    /// Attach a pipeline stage label.
    pub fn with_stage(mut self, stage: &'a str) -> Self {
        self.stage = Some(stage);
        self
    }
}

/// High-level outcome used when emitting lifecycle log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEventOutcome {
    /// The operation completed successfully.
    Success,
    /// The operation failed or was aborted.
    Fault,
}

impl RunEventOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            RunEventOutcome::Success => "success",
            RunEventOutcome::Fault => "fault",
        }
    }

    fn level(&self) -> Level {
        match self {
            RunEventOutcome::Success => Level::INFO,
            RunEventOutcome::Fault => Level::ERROR,
        }
    }
}

/// Emit a standardized run-lifecycle event with a success/fault outcome.
pub fn log_run_event(
    context: Option<&LogContext>,
    event: &str,
    message: &str,
    outcome: RunEventOutcome,
) {
    let ctx = context.unwrap_or(&LogContext {
        run_id: None,
        component: None,
        iteration: None,
        stage: None,
    });
    let level = outcome.level();
    tracing::event!(
        level,
        event,
        outcome = outcome.as_str(),
        run_id = ctx.run_id.unwrap_or(""),
        component = ctx.component.unwrap_or(""),
        iteration = ctx.iteration.unwrap_or_default(),
        stage = ctx.stage.unwrap_or(""),
        message = %message
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_does_not_panic() {
        init();
        init();
    }

    #[test]
    fn run_event_helper_emits() {
        init();
        let ctx = LogContext::new().with_run("run-1").with_stage("heal");
        log_run_event(Some(&ctx), "heal.attempt", "attempting fix", RunEventOutcome::Success);
        log_run_event(None, "heal.attempt", "fallback context", RunEventOutcome::Fault);
    }
}
