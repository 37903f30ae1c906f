//! ---
//! loom_section: "06-healer"
//! loom_subsection: "crate-root"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Region-based fix engine that repairs generated component sources well enough to pass validation."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
#![warn(missing_docs)]
#![doc = "Analyzes a failing TestResult against generated component source, proposes fixes from a fixed taxonomy, and applies them in an interference-avoiding order. Per-session attempt bookkeeping and revalidation live in loom-orchestrator; this crate only knows how to fix one file at a time."]

pub mod analyzer;
pub mod backup;
pub mod class_finder;
pub mod edit;
pub mod engine;
pub mod errors;
pub mod fixes;
pub mod result;

use std::path::Path;

pub use analyzer::ComponentAstAnalyzer;
pub use class_finder::{find_component_class, ClassMatch};
pub use edit::SourceEdit;
pub use errors::HealError;
pub use fixes::{ApplicationGroup, Fix, FixType};
pub use result::HealingResult;

use loom_validator::TestResult;

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, HealError>;

/// Analyze and fix one component's source in memory, without touching disk.
/// Returns `HealError::NoFixableIssues` if analysis found nothing to try,
/// and `HealError::NoProgress` if the proposed fixes left the source
/// byte-for-byte unchanged. Callers that want the `.backup`-on-first-write
/// file discipline should follow a successful call with
/// [`backup::write_healed`]; [`heal_component`] does both in one step for
/// file-based callers.
pub fn analyze_and_fix(
    component_name: &str,
    class_name: &str,
    primary_method: &str,
    source: &str,
    test_result: &TestResult,
    fallback_skeleton: &str,
) -> Result<(String, Vec<Fix>)> {
    let analyzer = ComponentAstAnalyzer::new();
    let fixes = analyzer.analyze(class_name, source, primary_method, test_result, fallback_skeleton);
    if fixes.is_empty() {
        return Err(HealError::NoFixableIssues(component_name.to_owned()));
    }

    let healed = engine::apply_fixes(component_name, source, &fixes);
    if healed == source {
        return Err(HealError::NoProgress(component_name.to_owned()));
    }

    Ok((healed, fixes))
}

/// Analyze, fix, and write one component's source in a single call: the
/// convenience entry point for direct file-based callers (e.g. `loomctl`).
pub fn heal_component(
    path: &Path,
    component_name: &str,
    class_name: &str,
    primary_method: &str,
    source: &str,
    test_result: &TestResult,
    fallback_skeleton: &str,
) -> Result<HealingResult> {
    let (healed, fixes) = analyze_and_fix(component_name, class_name, primary_method, source, test_result, fallback_skeleton)?;
    backup::write_healed(path, source, &healed)?;
    Ok(HealingResult::succeeded(component_name.to_owned(), path.to_path_buf(), fixes))
}
