//! ---
//! loom_section: "05-validator"
//! loom_subsection: "validator"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "The integration validator: load, contract, and functional phases over registered components."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use std::time::Instant;

use tracing::warn;

use crate::bus::{synthetic_peer_response, MessageBus};
use crate::factory::{required_lifecycle, ComponentRegistration};
use crate::result::{TestResult, Verdict};
use crate::synthetic::{is_success_response, passes_functional_threshold, synthetic_inputs};

/// Default system-level admission threshold (90%), env-overridable upstream
/// via `loom_blueprint::config::RuntimeFlags`.
pub const DEFAULT_SYSTEM_THRESHOLD: f64 = 0.9;

/// Loads emitted sources (via registered factories), drives each component
/// through load/contract/functional phases against a private in-process
/// message bus, and computes per-component and system pass rates.
#[derive(Debug, Default)]
pub struct IntegrationValidator {
    system_threshold: f64,
}

impl IntegrationValidator {
    pub fn new(system_threshold: f64) -> Self {
        Self { system_threshold }
    }

    /// Validate every registered component against one freshly constructed
    /// bus, torn down at the end of this call.
    pub fn validate_all(&self, registrations: Vec<ComponentRegistration>) -> Verdict {
        let mut bus = MessageBus::new();
        let results = registrations
            .into_iter()
            .map(|registration| self.validate_one(registration, &mut bus))
            .collect();
        Verdict::compute(results, self.system_threshold)
    }

    /// Revalidate a single component in isolation, per spec.md §4.6's
    /// single-component path used during healing.
    pub fn validate_single(&self, registration: ComponentRegistration) -> TestResult {
        let mut bus = MessageBus::new();
        self.validate_one(registration, &mut bus)
    }

    fn validate_one(&self, registration: ComponentRegistration, bus: &mut MessageBus) -> TestResult {
        let start = Instant::now();
        let component_name = registration.component_name.clone();

        let mut instance = match registration.factory.create() {
            Ok(instance) => instance,
            Err(err) => {
                warn!(component = %component_name, error = %err, "component failed to load");
                let mut result = TestResult::load_failure(component_name);
                result.instantiation_errors.push(err.to_string());
                return result;
            }
        };

        let support = instance.lifecycle_support();
        let required = required_lifecycle(registration.base_primitive);
        let mut contract_errors = Vec::new();
        if required.has_setup && !support.has_setup {
            contract_errors.push("missing required 'setup' lifecycle method".to_owned());
        }
        if required.has_primary && !support.has_primary {
            contract_errors.push("missing required primary processing method".to_owned());
        }
        if required.has_cleanup && !support.has_cleanup {
            contract_errors.push("missing required 'cleanup' lifecycle method".to_owned());
        }
        let contract_ok = contract_errors.is_empty();

        if !contract_ok {
            return TestResult {
                component_name,
                syntax_ok: true,
                imports_ok: true,
                instantiation_ok: true,
                contract_ok: false,
                functional_ok: false,
                syntax_errors: Vec::new(),
                import_errors: Vec::new(),
                instantiation_errors: Vec::new(),
                contract_errors,
                functional_errors: Vec::new(),
                execution_time: start.elapsed(),
            };
        }

        if support.has_setup {
            if let Err(err) = instance.setup() {
                contract_errors.push(format!("setup failed: {err}"));
            }
        }

        let inputs = synthetic_inputs(&registration.class_name, &registration.source_text);
        let total = inputs.len();
        let mut functional_errors = Vec::new();
        let mut successes = 0;
        for input in inputs {
            bus.send(&component_name, synthetic_peer_response(&component_name));
            match instance.process(input) {
                Ok(response) if is_success_response(&response) => successes += 1,
                Ok(response) => functional_errors.push(format!("non-success response: {response:?}")),
                Err(err) => functional_errors.push(err),
            }
        }
        let functional_ok = passes_functional_threshold(successes, total);

        if support.has_cleanup {
            if let Err(err) = instance.cleanup() {
                functional_errors.push(format!("cleanup failed: {err}"));
            }
        }

        TestResult {
            component_name,
            syntax_ok: true,
            imports_ok: true,
            instantiation_ok: true,
            contract_ok: contract_errors.is_empty(),
            functional_ok,
            syntax_errors: Vec::new(),
            import_errors: Vec::new(),
            instantiation_errors: Vec::new(),
            contract_errors,
            functional_errors,
            execution_time: start.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{ComponentFactory, GeneratedComponent, LifecycleSupport};
    use crate::errors::ValidatorError;
    use loom_recipes::BasePrimitive;
    use serde_json::{json, Value};

    struct WorkingStore;
    impl GeneratedComponent for WorkingStore {
        fn lifecycle_support(&self) -> LifecycleSupport {
            LifecycleSupport {
                has_setup: true,
                has_primary: true,
                has_cleanup: true,
            }
        }
        fn setup(&mut self) -> Result<(), String> {
            Ok(())
        }
        fn process(&mut self, input: Value) -> Result<Option<Value>, String> {
            let action = input["action"].as_str().unwrap_or("");
            Ok(Some(json!({"status": "success", "result": {"action": action}})))
        }
        fn cleanup(&mut self) -> Result<(), String> {
            Ok(())
        }
    }

    struct WorkingStoreFactory;
    impl ComponentFactory for WorkingStoreFactory {
        fn create(&self) -> Result<Box<dyn GeneratedComponent>, ValidatorError> {
            Ok(Box::new(WorkingStore))
        }
    }

    struct BrokenFactory;
    impl ComponentFactory for BrokenFactory {
        fn create(&self) -> Result<Box<dyn GeneratedComponent>, ValidatorError> {
            Err(ValidatorError::Instantiation(
                "controller".to_owned(),
                "constructor raised".to_owned(),
            ))
        }
    }

    fn registration(name: &str, factory: Box<dyn ComponentFactory>) -> ComponentRegistration {
        ComponentRegistration {
            component_name: name.to_owned(),
            class_name: format!("GeneratedStore_{name}"),
            base_primitive: BasePrimitive::Transformer,
            source_text: "if action == 'add_item': pass".to_owned(),
            factory,
        }
    }

    #[test]
    fn passing_component_clears_every_phase() {
        let validator = IntegrationValidator::new(DEFAULT_SYSTEM_THRESHOLD);
        let result = validator.validate_single(registration("orders", Box::new(WorkingStoreFactory)));
        assert!(result.passed());
    }

    #[test]
    fn load_failure_short_circuits_functional_phase() {
        let validator = IntegrationValidator::new(DEFAULT_SYSTEM_THRESHOLD);
        let result = validator.validate_single(registration("controller", Box::new(BrokenFactory)));
        assert!(!result.passed());
        assert!(!result.instantiation_ok);
        assert!(!result.instantiation_errors.is_empty());
    }

    #[test]
    fn system_verdict_uses_component_level_results() {
        let validator = IntegrationValidator::new(DEFAULT_SYSTEM_THRESHOLD);
        let verdict = validator.validate_all(vec![
            registration("a", Box::new(WorkingStoreFactory)),
            registration("b", Box::new(BrokenFactory)),
        ]);
        assert!(!verdict.system_admitted);
        assert_eq!(verdict.failing_components(), vec!["b"]);
    }
}
