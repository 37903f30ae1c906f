//! ---
//! loom_section: "08-binaries"
//! loom_subsection: "check"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Dry-run boundary-termination reachability check over a blueprint document."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use loom_blueprint::Blueprint;
use loom_reachability::{migrate, ReachabilityAnalyzer};

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Path to the blueprint document (YAML).
    #[arg(long, value_name = "FILE")]
    blueprint: PathBuf,

    /// Allow the migration pre-pass to rewrite the document in place.
    #[arg(long)]
    force_migrate: bool,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.blueprint)
        .with_context(|| format!("failed to read blueprint file '{}'", args.blueprint.display()))?;
    let mut blueprint: Blueprint = serde_yaml::from_str(&text)
        .with_context(|| format!("failed to parse blueprint file '{}'", args.blueprint.display()))?;

    let report = migrate(&mut blueprint, args.force_migrate).context("migration pre-pass refused this blueprint")?;
    if report.migration_needed {
        println!(
            "migrated {} component(s) to explicit boundary flags: {}",
            report.components_migrated.len(),
            report.components_migrated.join(", ")
        );
    }

    let validated = blueprint.validate().context("blueprint failed structural validation")?;
    let verdict = ReachabilityAnalyzer::new().analyze(&validated);

    for result in &verdict.results {
        if result.termination_found {
            println!(
                "ingress '{}': admitted via {:?} after {} hop(s)",
                result.ingress_id,
                result.termination_mode.expect("admitted result always carries a mode"),
                result.path_trace.len()
            );
        } else {
            println!("ingress '{}': rejected", result.ingress_id);
            for err in &result.errors {
                println!("  - {err}");
            }
        }
    }

    if verdict.admitted {
        println!("blueprint admitted: every ingress reaches a termination commitment");
        Ok(())
    } else {
        anyhow::bail!(
            "blueprint rejected: {} unresolved ingress error(s)",
            verdict.errors().len()
        );
    }
}
