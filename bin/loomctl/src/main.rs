//! ---
//! loom_section: "08-binaries"
//! loom_subsection: "binary"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Control CLI for operators interacting with Loom: dry-run checks, one-shot generation, single-component healing."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(
    author,
    about = "Loom operator control utility",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Run boundary-termination reachability analysis without generating anything")]
    Check(commands::check::CheckArgs),
    #[command(about = "Generate, validate, and heal a blueprint to a fixed point")]
    Generate(commands::generate::GenerateArgs),
    #[command(about = "Attempt to heal a single component source file in place")]
    Heal(commands::heal::HealArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    loom_logging::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Check(args) => commands::check::run(args),
        Commands::Generate(args) => commands::generate::run(args).await,
        Commands::Heal(args) => commands::heal::run(args),
    }
}
