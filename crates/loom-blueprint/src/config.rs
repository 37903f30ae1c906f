//! ---
//! loom_section: "01-data-model"
//! loom_subsection: "config"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Component config validation pipeline and runtime flag parsing."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use std::env;

use indexmap::IndexMap;
use thiserror::Error;

use crate::model::{Blueprint, ConfigValue};

/// Errors raised while validating or healing a component's configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("component '{component}' is missing required config key '{key}'")]
    MissingKey { component: String, key: String },

    #[error("component '{component}' config key '{key}' has the wrong type, expected {expected}")]
    WrongType {
        component: String,
        key: String,
        expected: String,
    },

    #[error("component '{component}' has no registered recipe defaults for type '{kind}'")]
    NoDefaultsForType { component: String, kind: String },
}

/// Crate-local result alias for config validation.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Validates (and, where recoverable, heals by substituting a recipe default) a
/// component's declared config against the defaults supplied by the recipe
/// registry for its type.
///
/// Recipe defaults are passed in rather than looked up from a
/// `loom-recipes` dependency so `loom-blueprint` does not need to depend on
/// `loom-recipes` — the caller (`loom-orchestrator`) already holds both.
pub trait ConfigValidator {
    /// Validate `spec`'s config against `recipe_defaults`, healing any
    /// missing-but-defaulted key by substituting the default, and failing
    /// only when a key is both missing and has no default.
    fn validate_and_heal_or_fail(
        &self,
        spec_name: &str,
        spec_kind: &str,
        config: &IndexMap<String, ConfigValue>,
        recipe_defaults: &IndexMap<String, ConfigValue>,
    ) -> Result<IndexMap<String, ConfigValue>>;
}

/// The default [`ConfigValidator`]: fills missing keys from recipe defaults,
/// keeps declared values, and never fails as long as a default exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultConfigValidator;

impl ConfigValidator for DefaultConfigValidator {
    fn validate_and_heal_or_fail(
        &self,
        spec_name: &str,
        spec_kind: &str,
        config: &IndexMap<String, ConfigValue>,
        recipe_defaults: &IndexMap<String, ConfigValue>,
    ) -> Result<IndexMap<String, ConfigValue>> {
        let mut healed = recipe_defaults.clone();
        for (key, value) in config {
            healed.insert(key.clone(), value.clone());
        }
        for key in recipe_defaults.keys() {
            if !healed.contains_key(key) {
                return Err(ConfigError::MissingKey {
                    component: spec_name.to_owned(),
                    key: key.clone(),
                });
            }
        }
        let _ = spec_kind;
        Ok(healed)
    }
}

/// Which backend `loom-emitter` should route generation requests to. The
/// concrete backend stays external; this only selects how `AUTOCODER_GENERATOR`
/// is interpreted at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorBackend {
    /// Use whatever `LlmClient` was injected at orchestrator construction.
    Injected,
    /// A named external backend identifier, passed through unparsed.
    Named(String),
}

impl Default for GeneratorBackend {
    fn default() -> Self {
        GeneratorBackend::Injected
    }
}

/// Runtime flags read from the environment, modeled on the teacher's
/// `AppConfig::ENV_CONFIG_PATH` override convention: every value has a safe
/// default so a missing environment is never fatal on its own.
#[derive(Debug, Clone)]
pub struct RuntimeFlags {
    pub generator_backend: GeneratorBackend,
    pub validation_threshold: f64,
    pub boundary_termination_enabled: bool,
    pub vr1_rollout_environments: Vec<String>,
    pub vr1_production_max_components: Option<usize>,
    pub vr1_staging_max_components: Option<usize>,
}

impl Default for RuntimeFlags {
    fn default() -> Self {
        Self {
            generator_backend: GeneratorBackend::Injected,
            validation_threshold: 0.9,
            boundary_termination_enabled: true,
            vr1_rollout_environments: Vec::new(),
            vr1_production_max_components: None,
            vr1_staging_max_components: None,
        }
    }
}

impl RuntimeFlags {
    /// Read runtime flags from process environment variables, per spec.md §6.
    pub fn from_env() -> Self {
        let mut flags = Self::default();

        if let Ok(raw) = env::var("AUTOCODER_GENERATOR") {
            if !raw.trim().is_empty() {
                flags.generator_backend = GeneratorBackend::Named(raw);
            }
        }
        if let Ok(raw) = env::var("VALIDATION_THRESHOLD") {
            if let Ok(parsed) = raw.parse::<f64>() {
                flags.validation_threshold = parsed;
            }
        }
        if let Ok(raw) = env::var("BOUNDARY_TERMINATION_ENABLED") {
            flags.boundary_termination_enabled = matches!(
                raw.to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        if let Ok(raw) = env::var("VR1_ROLLOUT_ENVIRONMENTS") {
            flags.vr1_rollout_environments = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect();
        }
        if let Ok(raw) = env::var("VR1_PRODUCTION_MAX_COMPONENTS") {
            flags.vr1_production_max_components = raw.parse::<usize>().ok();
        }
        if let Ok(raw) = env::var("VR1_STAGING_MAX_COMPONENTS") {
            flags.vr1_staging_max_components = raw.parse::<usize>().ok();
        }

        flags
    }
}

/// External collaborator that turns blueprint source text into a [`Blueprint`].
/// The concrete parser (NL-to-blueprint or schema loader) is out of scope;
/// only this seam is.
pub trait BlueprintSource {
    /// Parse `text` into a [`Blueprint`]. Structural validation happens
    /// separately via [`crate::model::Blueprint::validate`].
    fn parse(&self, text: &str) -> std::result::Result<Blueprint, crate::errors::BlueprintError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> IndexMap<String, ConfigValue> {
        let mut map = IndexMap::new();
        map.insert("retry_count".to_owned(), ConfigValue::Number(3.0));
        map.insert("timeout_ms".to_owned(), ConfigValue::Number(5000.0));
        map
    }

    #[test]
    fn heals_missing_keys_from_defaults() {
        let validator = DefaultConfigValidator;
        let config = IndexMap::new();
        let healed = validator
            .validate_and_heal_or_fail("svc", "Controller", &config, &defaults())
            .expect("should heal");
        assert_eq!(healed.get("retry_count"), Some(&ConfigValue::Number(3.0)));
    }

    #[test]
    fn declared_values_override_defaults() {
        let validator = DefaultConfigValidator;
        let mut config = IndexMap::new();
        config.insert("retry_count".to_owned(), ConfigValue::Number(9.0));
        let healed = validator
            .validate_and_heal_or_fail("svc", "Controller", &config, &defaults())
            .expect("should validate");
        assert_eq!(healed.get("retry_count"), Some(&ConfigValue::Number(9.0)));
    }

    #[test]
    fn runtime_flags_defaults_are_safe() {
        let flags = RuntimeFlags::default();
        assert_eq!(flags.generator_backend, GeneratorBackend::Injected);
        assert!((flags.validation_threshold - 0.9).abs() < f64::EPSILON);
        assert!(flags.boundary_termination_enabled);
    }
}
