//! ---
//! loom_section: "08-binaries"
//! loom_subsection: "heal"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Attempt to heal a single component source file in isolation, outside a full orchestrator run."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use loom_validator::TestResult;

#[derive(Debug, Args)]
pub struct HealArgs {
    /// Path to the component source file to heal in place.
    #[arg(long, value_name = "FILE")]
    component_file: PathBuf,

    /// Component name (used for backups, logging, and the `.backup` sibling).
    #[arg(long)]
    component_name: String,

    /// Generated class name the component source declares.
    #[arg(long)]
    class_name: String,

    /// Primary processing method name for this component's base primitive
    /// (e.g. `transform`, `generate`, `consume`, `split`, `merge`).
    #[arg(long)]
    primary_method: String,
}

/// Heals a component assumed to be currently failing functional validation —
/// this CLI path does not itself re-run the validator, so it always treats
/// the primary method as the one thing to fix. Operators who have an actual
/// `TestResult` (e.g. from a failed `loomctl generate` run) should prefer
/// driving the orchestrator instead; this is the narrow "just try a fix"
/// escape hatch.
pub fn run(args: HealArgs) -> Result<()> {
    let source = std::fs::read_to_string(&args.component_file)
        .with_context(|| format!("failed to read component file '{}'", args.component_file.display()))?;

    let assumed_failure = TestResult {
        component_name: args.component_name.clone(),
        syntax_ok: true,
        imports_ok: true,
        instantiation_ok: true,
        contract_ok: true,
        functional_ok: false,
        syntax_errors: Vec::new(),
        import_errors: Vec::new(),
        instantiation_errors: Vec::new(),
        contract_errors: Vec::new(),
        functional_errors: vec!["assumed failing: operator-invoked single-file heal".to_owned()],
        execution_time: Duration::ZERO,
    };

    let result = loom_healer::heal_component(
        &args.component_file,
        &args.component_name,
        &args.class_name,
        &args.primary_method,
        &source,
        &assumed_failure,
        &source,
    )
    .context("healing failed")?;

    println!(
        "applied {} fix(es) to '{}':",
        result.fixes.len(),
        args.component_file.display()
    );
    for fix in &result.fixes {
        println!("  - {} ({}): {}", fix.fix_type.as_str(), fix.confidence, fix.description);
    }
    Ok(())
}
