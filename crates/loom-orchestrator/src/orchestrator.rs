//! ---
//! loom_section: "07-orchestrator"
//! loom_subsection: "orchestrator"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "The fixed-point healing loop: generate, validate, heal, repeat."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{info, warn};

use loom_blueprint::config::{ConfigValidator, DefaultConfigValidator, RuntimeFlags};
use loom_blueprint::{Blueprint, ConfigValue, ValidatedBlueprint};
use loom_emitter::{CodeEmitter, GenerationRequest, LlmClient};
use loom_metrics::OrchestratorMetrics;
use loom_reachability::{migrate, ReachabilityAnalyzer};
use loom_recipes::{RecipeRegistry, StaticRecipeRegistry};
use loom_validator::{ComponentRegistration, IntegrationValidator, TestResult};

use crate::bridge::TextComponentFactory;
use crate::errors::{OrchestratorError, Result};
use crate::outcome::{FailureReason, RunOutcome};
use crate::session::{HealingSession, ProgressOutcome, DEFAULT_MAX_HEALING_ATTEMPTS};
use crate::writer;

/// Drives one blueprint through generation, validation, and healing to a
/// fixed point or a stable, explained failure. Single-threaded and
/// cooperative, per spec.md §5 — C3 emission is the only internally
/// concurrent phase, and even it defaults to sequential.
pub struct Orchestrator {
    emitter: CodeEmitter,
    validator: IntegrationValidator,
    recipes: StaticRecipeRegistry,
    config_validator: DefaultConfigValidator,
    reachability: ReachabilityAnalyzer,
    metrics: Option<OrchestratorMetrics>,
    max_healing_attempts: u32,
    boundary_termination_enabled: bool,
}

impl Orchestrator {
    /// Construct an orchestrator around an externally supplied LLM client,
    /// reading its validation threshold and boundary-termination gating from
    /// process environment via [`RuntimeFlags::from_env`].
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        let flags = RuntimeFlags::from_env();
        Self {
            emitter: CodeEmitter::new(client),
            validator: IntegrationValidator::new(flags.validation_threshold),
            recipes: StaticRecipeRegistry,
            config_validator: DefaultConfigValidator,
            reachability: ReachabilityAnalyzer::new(),
            metrics: None,
            max_healing_attempts: DEFAULT_MAX_HEALING_ATTEMPTS,
            boundary_termination_enabled: flags.boundary_termination_enabled,
        }
    }

    /// Attach the orchestrator-level metric collectors.
    pub fn with_metrics(mut self, metrics: OrchestratorMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Swap in a [`ReachabilityAnalyzer`] wired to its own metrics (e.g. via
    /// [`ReachabilityAnalyzer::with_metrics`]).
    pub fn with_reachability_analyzer(mut self, analyzer: ReachabilityAnalyzer) -> Self {
        self.reachability = analyzer;
        self
    }

    /// Override the per-component healing attempt cap (default
    /// [`DEFAULT_MAX_HEALING_ATTEMPTS`]).
    pub fn with_max_healing_attempts(mut self, max: u32) -> Self {
        self.max_healing_attempts = max.max(1);
        self
    }

    /// Run one blueprint to completion against `out_dir`. Startup/config
    /// failures return `Err`; everything the loop itself can recover from or
    /// give up on is reported in the `Ok(RunOutcome)`.
    pub async fn run(&self, mut blueprint: Blueprint, out_dir: &Path) -> Result<RunOutcome> {
        migrate(&mut blueprint, false)?;
        let system_name = blueprint.name.clone();
        let validated = blueprint.validate()?;

        if self.boundary_termination_enabled {
            let verdict = self.reachability.analyze(&validated);
            if !verdict.admitted {
                return Err(OrchestratorError::Reachability(verdict.errors().len()));
            }
        }

        let healed_configs = self.heal_configs(&validated)?;
        writer::prepare_output_tree(out_dir, &system_name)?;

        let mut sources: HashMap<String, String> = HashMap::new();
        let mut session = HealingSession::new(self.max_healing_attempts);
        // Pre-heal bytes awaiting their `.backup` snapshot, keyed by component.
        // Populated when the AST healer rewrites a component's source, consumed
        // the next time that component is written to disk (the first rewrite).
        let mut pending_backups: HashMap<String, String> = HashMap::new();

        for iteration in 0..=self.max_healing_attempts {
            self.generate_missing(&validated, &healed_configs, &mut sources).await?;

            let registrations = self.build_registrations(&validated, &sources);
            let verdict = self.validator.validate_all(registrations);

            for (name, source) in &sources {
                if let Some(pre_heal) = pending_backups.remove(name) {
                    let path = writer::component_path(out_dir, &system_name, name);
                    loom_healer::backup::write_healed(&path, &pre_heal, source).map_err(|err| {
                        OrchestratorError::OutputWrite {
                            component: name.clone(),
                            detail: err.to_string(),
                        }
                    })?;
                } else {
                    writer::write_component(out_dir, &system_name, name, source)?;
                }
            }

            if let Some(metrics) = &self.metrics {
                metrics.set_components_tracked(validated.components().len());
            }

            if verdict.system_admitted {
                let aggregate: Vec<(String, String)> = validated
                    .components()
                    .iter()
                    .map(|c| (c.name.clone(), c.generated_class_name()))
                    .collect();
                writer::write_init(out_dir, &system_name, &aggregate)?;
                if let Some(metrics) = &self.metrics {
                    metrics.observe_iterations(iteration + 1);
                }
                return Ok(RunOutcome::Admitted { iterations: iteration + 1 });
            }

            let failing: Vec<String> = verdict.failing_components().into_iter().map(str::to_owned).collect();
            let results_by_name: HashMap<&str, &TestResult> =
                verdict.results.iter().map(|r| (r.component_name.as_str(), r)).collect();

            let mut reasons = Vec::new();
            for name in &failing {
                if session.circuit_broken(name) {
                    reasons.push(FailureReason::CircuitBreakerTripped { component: name.clone() });
                    if let Some(metrics) = &self.metrics {
                        metrics.record_heal_attempt(name, "circuit_broken");
                    }
                    continue;
                }
                session.record_attempt(name);

                let source = sources.get(name).cloned().unwrap_or_default();
                match session.progress_check(name, &source) {
                    ProgressOutcome::NoProgress => {
                        reasons.push(FailureReason::NoProgress { component: name.clone() });
                        continue;
                    }
                    ProgressOutcome::Oscillation => {
                        reasons.push(FailureReason::Oscillation { component: name.clone() });
                        continue;
                    }
                    ProgressOutcome::Progress => {}
                }
                session.record_history(name, &source);

                let component = validated.component(name).expect("failing component name came from the blueprint");
                let test_result = results_by_name.get(name.as_str());

                let healed = test_result.and_then(|tr| {
                    loom_healer::analyze_and_fix(
                        name,
                        &component.generated_class_name(),
                        self.recipes.get(&component.kind).map(|r| r.base_primitive.primary_method()).unwrap_or("transform"),
                        &source,
                        tr,
                        &source,
                    )
                    .ok()
                });

                match healed {
                    Some((new_source, _fixes)) => {
                        pending_backups.insert(name.clone(), source.clone());
                        sources.insert(name.clone(), new_source);
                        if let Some(metrics) = &self.metrics {
                            metrics.record_heal_attempt(name, "healed");
                        }
                    }
                    None if session.circuit_broken(name) => {
                        if let Some(regenerated) = self.regenerate(&validated, &healed_configs, name).await {
                            sources.insert(name.clone(), regenerated);
                            if let Some(metrics) = &self.metrics {
                                metrics.record_heal_attempt(name, "regenerated");
                            }
                        } else {
                            reasons.push(FailureReason::NoFixableIssues { component: name.clone() });
                        }
                    }
                    None => {
                        reasons.push(FailureReason::NoFixableIssues { component: name.clone() });
                        if let Some(metrics) = &self.metrics {
                            metrics.record_heal_attempt(name, "no_fixable_issues");
                        }
                    }
                }
            }

            if !reasons.is_empty() && reasons.len() == failing.len() {
                warn!(iteration, "no component made progress this iteration; ending run");
                if let Some(metrics) = &self.metrics {
                    metrics.observe_iterations(iteration + 1);
                }
                return Ok(RunOutcome::Failed { iterations: iteration + 1, reasons });
            }
        }

        if let Some(metrics) = &self.metrics {
            metrics.observe_iterations(self.max_healing_attempts + 1);
        }
        Ok(RunOutcome::Failed {
            iterations: self.max_healing_attempts + 1,
            reasons: vec![],
        })
    }

    fn heal_configs(&self, validated: &ValidatedBlueprint) -> Result<HashMap<String, IndexMap<String, ConfigValue>>> {
        let mut configs = HashMap::new();
        for component in validated.components() {
            let recipe = self
                .recipes
                .get(&component.kind)
                .map_err(|_| OrchestratorError::UnknownRecipe(component.kind.clone()))?;
            let healed = self
                .config_validator
                .validate_and_heal_or_fail(&component.name, &component.kind, &component.config, &recipe.config_defaults)
                .map_err(|source| OrchestratorError::Config {
                    component: component.name.clone(),
                    source,
                })?;
            configs.insert(component.name.clone(), healed);
        }
        Ok(configs)
    }

    async fn generate_missing(
        &self,
        validated: &ValidatedBlueprint,
        configs: &HashMap<String, IndexMap<String, ConfigValue>>,
        sources: &mut HashMap<String, String>,
    ) -> Result<()> {
        let mut requests = Vec::new();
        for component in validated.components() {
            if sources.contains_key(&component.name) {
                continue;
            }
            let recipe = self
                .recipes
                .get(&component.kind)
                .map_err(|_| OrchestratorError::UnknownRecipe(component.kind.clone()))?;
            let config = configs.get(&component.name).cloned().unwrap_or_default();
            let skeleton = loom_recipes::expand(&component.name, recipe, config.clone());
            requests.push(GenerationRequest::from_skeleton(
                component.name.clone(),
                component.kind.clone(),
                component.description.clone(),
                config,
                &skeleton,
            ));
        }

        if requests.is_empty() {
            return Ok(());
        }

        let outcomes = self.emitter.emit_sequential(requests).await;
        for (component_name, outcome) in outcomes {
            match outcome {
                Ok(source) => {
                    info!(component = %component_name, "component generated");
                    sources.insert(component_name, source);
                }
                Err(err) => {
                    warn!(component = %component_name, error = %err, "generation skipped for this iteration");
                    let component = validated.component(&component_name).expect("component exists");
                    let recipe = self.recipes.get(&component.kind).expect("recipe resolved earlier");
                    let config = configs.get(&component_name).cloned().unwrap_or_default();
                    let skeleton = loom_recipes::expand(&component_name, recipe, config);
                    sources.insert(component_name, skeleton.source_text);
                }
            }
        }
        Ok(())
    }

    async fn regenerate(
        &self,
        validated: &ValidatedBlueprint,
        configs: &HashMap<String, IndexMap<String, ConfigValue>>,
        component_name: &str,
    ) -> Option<String> {
        let component = validated.component(component_name)?;
        let recipe = self.recipes.get(&component.kind).ok()?;
        let config = configs.get(component_name).cloned().unwrap_or_default();
        let skeleton = loom_recipes::expand(component_name, recipe, config.clone());
        let request = GenerationRequest::from_skeleton(
            component_name.to_owned(),
            component.kind.clone(),
            component.description.clone(),
            config,
            &skeleton,
        )
        .with_enhanced_description("previous implementation failed functional validation; regenerate from scratch");
        self.emitter.emit_one(request).await.ok()
    }

    fn build_registrations(
        &self,
        validated: &ValidatedBlueprint,
        sources: &HashMap<String, String>,
    ) -> Vec<ComponentRegistration> {
        validated
            .components()
            .iter()
            .filter_map(|component| {
                let source = sources.get(&component.name)?.clone();
                let recipe = self.recipes.get(&component.kind).ok()?;
                let class_name = component.generated_class_name();
                Some(ComponentRegistration {
                    component_name: component.name.clone(),
                    class_name: class_name.clone(),
                    base_primitive: recipe.base_primitive,
                    source_text: source.clone(),
                    factory: Box::new(TextComponentFactory {
                        class_name,
                        source_text: source,
                        primary_method: recipe.base_primitive.primary_method(),
                    }),
                })
            })
            .collect()
    }
}
