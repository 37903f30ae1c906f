//! ---
//! loom_section: "08-binaries"
//! loom_subsection: "generate"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "One-shot generation: run the full fixed-point loop over a blueprint and report the outcome."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use loom_blueprint::Blueprint;
use loom_emitter::testing::{NullLlmClient, ScriptedLlmClient};
use loom_emitter::LlmClient;
use loom_orchestrator::Orchestrator;

#[derive(Debug, Args)]
pub struct GenerateArgs {
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
    /// LLM backend.
    #[arg(long, value_name = "FILE")]
    fixtures: Option<PathBuf>,
}

pub async fn run(args: GenerateArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.blueprint)
        .with_context(|| format!("failed to read blueprint file '{}'", args.blueprint.display()))?;
    let blueprint: Blueprint = serde_yaml::from_str(&text)
        .with_context(|| format!("failed to parse blueprint file '{}'", args.blueprint.display()))?;

    let client = build_client(args.fixtures.as_deref())?;
    let mut orchestrator = Orchestrator::new(client);
    if let Some(max) = args.max_healing_attempts {
        orchestrator = orchestrator.with_max_healing_attempts(max);
    }

    let outcome = orchestrator.run(blueprint, &args.out_dir).await?;
    if outcome.admitted() {
        println!("admitted: system written to {}", args.out_dir.display());
        Ok(())
    } else {
        anyhow::bail!("run ended without admission: {outcome:?}");
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
