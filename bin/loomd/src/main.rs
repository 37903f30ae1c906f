//! ---
//! loom_section: "08-binaries"
//! loom_subsection: "binary"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Binary entrypoint for the loomd batch-run daemon."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use loom_blueprint::Blueprint;
use loom_emitter::testing::{NullLlmClient, ScriptedLlmClient};
use loom_emitter::LlmClient;
use loom_metrics::{new_registry, OrchestratorMetrics};
use loom_orchestrator::{exit_code_for_error, exit_code_for_outcome, Orchestrator};

#[derive(Debug, Parser)]
#[command(
    author,
    about = "Loom batch compiler: generate, validate, and heal one blueprint to a fixed point",
    long_about = None
)]
struct Cli {
    /// Path to the blueprint document (YAML).
    #[arg(long, value_name = "FILE")]
    blueprint: PathBuf,

    /// Directory the generated system is written to.
    #[arg(long, value_name = "DIR", default_value = "./out")]
    out_dir: PathBuf,

    /// Cap on healing attempts per component before the circuit breaker trips.
    #[arg(long)]
    max_healing_attempts: Option<u32>,

    /// Run against a fixture file of `component_name: source` pairs instead of a real
    /// LLM backend (used for CI/demo runs where no concrete backend is wired).
    #[arg(long, value_name = "FILE")]
    fixtures: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    loom_logging::init();
    let cli = Cli::parse();

    let text = std::fs::read_to_string(&cli.blueprint)
        .with_context(|| format!("failed to read blueprint file '{}'", cli.blueprint.display()))?;
    let blueprint: Blueprint = serde_yaml::from_str(&text)
        .with_context(|| format!("failed to parse blueprint file '{}'", cli.blueprint.display()))?;
    info!(name = %blueprint.name, components = blueprint.components.len(), "blueprint loaded");

    let client = build_client(cli.fixtures.as_deref())?;
    let registry = new_registry();
    let metrics = OrchestratorMetrics::new(registry).context("failed to register orchestrator metrics")?;

    let mut orchestrator = Orchestrator::new(client).with_metrics(metrics);
    if let Some(max) = cli.max_healing_attempts {
        orchestrator = orchestrator.with_max_healing_attempts(max);
    }

    match orchestrator.run(blueprint, &cli.out_dir).await {
        Ok(outcome) => {
            let code = exit_code_for_outcome(&outcome);
            if outcome.admitted() {
                info!("run admitted; system written to {}", cli.out_dir.display());
            } else {
                error!(?outcome, "run ended without admission");
            }
            Ok(ExitCode::from(code as u8))
        }
        Err(err) => {
            error!(error = %err, "run failed before the healing loop could start");
            Ok(ExitCode::from(exit_code_for_error(&err) as u8))
        }
    }
}

fn build_client(fixtures: Option<&std::path::Path>) -> Result<Arc<dyn LlmClient>> {
    let Some(path) = fixtures else {
        return Ok(Arc::new(NullLlmClient));
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read fixtures file '{}'", path.display()))?;
    let recorded: std::collections::HashMap<String, String> =
        serde_yaml::from_str(&text).with_context(|| format!("failed to parse fixtures file '{}'", path.display()))?;
    let mut client = ScriptedLlmClient::new();
    for (component_name, source) in recorded {
        client.record(component_name, source);
    }
    Ok(Arc::new(client))
}
