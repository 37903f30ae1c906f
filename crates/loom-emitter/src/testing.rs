//! ---
//! loom_section: "04-emitter"
//! loom_subsection: "testing"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Deterministic LlmClient test doubles, alongside the real thing."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use std::collections::HashMap;

use async_trait::async_trait;

use crate::client::{GenerationRequest, LlmClient};
use crate::errors::EmitError;

/// An [`LlmClient`] that always errors — models "no working LLM configured"
/// for tests that exercise the emitter's failure path.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLlmClient;

#[async_trait]
impl LlmClient for NullLlmClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, EmitError> {
        Err(EmitError::Backend {
            component: request.component_name,
            detail: "no LLM client configured".to_owned(),
        })
    }
}

/// An [`LlmClient`] that returns pre-recorded sources keyed by component
/// name, for deterministic integration tests and `loomd --dry-run`.
#[derive(Debug, Default, Clone)]
pub struct ScriptedLlmClient {
    sources: HashMap<String, String>,
}

impl ScriptedLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the source to return for a given component name.
    pub fn record(&mut self, component_name: impl Into<String>, source: impl Into<String>) {
        self.sources.insert(component_name.into(), source.into());
    }
}

#[async_trait]
impl LlmClient for ScriptedLlmClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, EmitError> {
        self.sources
            .get(&request.component_name)
            .cloned()
            .ok_or_else(|| EmitError::Backend {
                component: request.component_name.clone(),
                detail: "no scripted source recorded for this component".to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str) -> GenerationRequest {
        GenerationRequest {
            component_name: name.to_owned(),
            kind: "Store".to_owned(),
            description: String::new(),
            enhanced_description: None,
            config: indexmap::IndexMap::new(),
            class_name: format!("GeneratedStore_{name}"),
            skeleton_source: String::new(),
        }
    }

    #[tokio::test]
    async fn scripted_client_errors_for_unrecorded_component() {
        let client = ScriptedLlmClient::new();
        let result = client.generate(request("unknown")).await;
        assert!(result.is_err());
    }
}
