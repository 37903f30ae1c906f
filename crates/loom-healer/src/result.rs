//! ---
//! loom_section: "06-healer"
//! loom_subsection: "result"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Outcome of healing one component."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use std::path::PathBuf;

use crate::fixes::Fix;

/// Outcome of one healing attempt against a single component. Revalidation
/// (`revalidated_ok`) is filled in by the orchestrator after it reruns
/// `loom-validator` against the healed source; the healer itself never
/// validates its own output.
#[derive(Debug)]
pub struct HealingResult {
    pub component_name: String,
    pub original_path: PathBuf,
    pub healed_path: PathBuf,
    pub fixes: Vec<Fix>,
    pub healing_ok: bool,
    pub revalidated_ok: Option<bool>,
    pub error_message: Option<String>,
    pub regeneration_attempted: bool,
}

impl HealingResult {
    pub fn failed(component_name: impl Into<String>, path: PathBuf, message: impl Into<String>) -> Self {
        Self {
            component_name: component_name.into(),
            original_path: path.clone(),
            healed_path: path,
            fixes: Vec::new(),
            healing_ok: false,
            revalidated_ok: None,
            error_message: Some(message.into()),
            regeneration_attempted: false,
        }
    }

    pub fn succeeded(component_name: impl Into<String>, path: PathBuf, fixes: Vec<Fix>) -> Self {
        Self {
            component_name: component_name.into(),
            original_path: path.clone(),
            healed_path: path,
            fixes,
            healing_ok: true,
            revalidated_ok: None,
            error_message: None,
            regeneration_attempted: false,
        }
    }
}
