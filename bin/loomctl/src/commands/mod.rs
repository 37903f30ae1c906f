//! ---
//! loom_section: "08-binaries"
//! loom_subsection: "commands"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "One module per loomctl subcommand."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
pub mod check;
pub mod generate;
pub mod heal;
