//! ---
//! loom_section: "07-orchestrator"
//! loom_subsection: "writer"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Output directory layout: components/, the observability shim, and the aggregating __init__."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use std::path::{Path, PathBuf};

use crate::errors::OrchestratorError;

/// Observability shim content written before any component, per spec.md §6
/// — every generated component imports from it, so it must exist first.
const OBSERVABILITY_SHIM: &str = "\"\"\"Runtime observability shim for generated components.\"\"\"\n\nclass ComposedComponent:\n    def __init__(self, name, config):\n        self.name = name\n        self.config = config\n";

/// `<out>/<system_name>/components/`.
pub fn components_dir(out_dir: &Path, system_name: &str) -> PathBuf {
    out_dir.join(system_name).join("components")
}

pub fn component_path(out_dir: &Path, system_name: &str, component_name: &str) -> PathBuf {
    components_dir(out_dir, system_name).join(format!("{component_name}.py"))
}

/// Create the output tree and write the observability shim, per the
/// required write order.
pub fn prepare_output_tree(out_dir: &Path, system_name: &str) -> Result<(), OrchestratorError> {
    let dir = components_dir(out_dir, system_name);
    std::fs::create_dir_all(&dir).map_err(|err| OrchestratorError::OutputWrite {
        component: "<observability>".to_owned(),
        detail: err.to_string(),
    })?;
    std::fs::write(dir.join("observability.py"), OBSERVABILITY_SHIM).map_err(|err| OrchestratorError::OutputWrite {
        component: "<observability>".to_owned(),
        detail: err.to_string(),
    })
}

/// Write one component's current source (no backup bookkeeping — that's
/// [`loom_healer::backup::write_healed`]'s job once healing starts mutating
/// a file already on disk).
pub fn write_component(out_dir: &Path, system_name: &str, component_name: &str, source: &str) -> Result<(), OrchestratorError> {
    std::fs::write(component_path(out_dir, system_name, component_name), source).map_err(|err| OrchestratorError::OutputWrite {
        component: component_name.to_owned(),
        detail: err.to_string(),
    })
}

/// Write the aggregating `__init__.py` importing every generated class,
/// keyed by the stable `Generated<Type>_<name>` naming rule.
pub fn write_init(out_dir: &Path, system_name: &str, components: &[(String, String)]) -> Result<(), OrchestratorError> {
    let mut body = String::from("\"\"\"Aggregates every generated component class.\"\"\"\n\n");
    for (component_name, class_name) in components {
        body.push_str(&format!("from .{component_name} import {class_name}\n"));
    }
    std::fs::write(components_dir(out_dir, system_name).join("__init__.py"), body).map_err(|err| OrchestratorError::OutputWrite {
        component: "<init>".to_owned(),
        detail: err.to_string(),
    })
}
