//! ---
//! loom_section: "05-validator"
//! loom_subsection: "result"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Per-component TestResult and the system/component verdict."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use std::time::Duration;

/// Per-component test outcome, per spec.md §3.
#[derive(Debug, Clone)]
pub struct TestResult {
    pub component_name: String,
    pub syntax_ok: bool,
    pub imports_ok: bool,
    pub instantiation_ok: bool,
    pub contract_ok: bool,
    pub functional_ok: bool,
    pub syntax_errors: Vec<String>,
    pub import_errors: Vec<String>,
    pub instantiation_errors: Vec<String>,
    pub contract_errors: Vec<String>,
    pub functional_errors: Vec<String>,
    pub execution_time: Duration,
}

impl TestResult {
    /// A result for a component that never made it past the load phase.
    pub fn load_failure(component_name: impl Into<String>) -> Self {
        Self {
            component_name: component_name.into(),
            syntax_ok: true,
            imports_ok: true,
            instantiation_ok: false,
            contract_ok: false,
            functional_ok: false,
            syntax_errors: Vec::new(),
            import_errors: Vec::new(),
            instantiation_errors: Vec::new(),
            contract_errors: Vec::new(),
            functional_errors: Vec::new(),
            execution_time: Duration::ZERO,
        }
    }

    /// A component passes overall iff it clears every phase, per spec.md
    /// §7: "a component fails on any category."
    pub fn passed(&self) -> bool {
        self.syntax_ok
            && self.imports_ok
            && self.instantiation_ok
            && self.contract_ok
            && self.functional_ok
    }

    /// All error text across every category, in phase order.
    pub fn all_errors(&self) -> Vec<&str> {
        self.syntax_errors
            .iter()
            .chain(self.import_errors.iter())
            .chain(self.instantiation_errors.iter())
            .chain(self.contract_errors.iter())
            .chain(self.functional_errors.iter())
            .map(String::as_str)
            .collect()
    }
}

/// System-level verdict computed from a set of per-component results.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub results: Vec<TestResult>,
    pub system_admitted: bool,
    pub pass_rate: f64,
}

impl Verdict {
    /// The component-level threshold is primary (computed first, per
    /// component); the system-level threshold is an independent admission
    /// gate over the resulting pass/fail set — never a blended average, per
    /// SPEC_FULL.md's Open Question decision.
    pub fn compute(results: Vec<TestResult>, system_threshold: f64) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed()).count();
        let pass_rate = if total == 0 {
            0.0
        } else {
            passed as f64 / total as f64
        };
        Self {
            results,
            system_admitted: total > 0 && pass_rate >= system_threshold,
            pass_rate,
        }
    }

    pub fn failing_components(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| !r.passed())
            .map(|r| r.component_name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passing(name: &str) -> TestResult {
        TestResult {
            component_name: name.to_owned(),
            syntax_ok: true,
            imports_ok: true,
            instantiation_ok: true,
            contract_ok: true,
            functional_ok: true,
            syntax_errors: vec![],
            import_errors: vec![],
            instantiation_errors: vec![],
            contract_errors: vec![],
            functional_errors: vec![],
            execution_time: Duration::from_millis(1),
        }
    }

    #[test]
    fn system_threshold_is_independent_of_blended_average() {
        let mut a = passing("a");
        a.functional_ok = false;
        let verdict = Verdict::compute(vec![a, passing("b"), passing("c")], 0.5);
        assert!((verdict.pass_rate - (2.0 / 3.0)).abs() < 1e-9);
        assert!(verdict.system_admitted);
    }

    #[test]
    fn empty_result_set_is_never_admitted() {
        let verdict = Verdict::compute(vec![], 0.0);
        assert!(!verdict.system_admitted);
    }
}
