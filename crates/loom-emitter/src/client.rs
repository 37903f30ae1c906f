//! ---
//! loom_section: "04-emitter"
//! loom_subsection: "client"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "The external LLM client seam and the generation request it's driven with."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use async_trait::async_trait;
use indexmap::IndexMap;
use loom_blueprint::ConfigValue;
use loom_recipes::Skeleton;

use crate::errors::EmitError;

/// Everything the LLM needs to synthesize one component's body.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub component_name: String,
    pub kind: String,
    pub description: String,
    pub enhanced_description: Option<String>,
    pub config: IndexMap<String, ConfigValue>,
    pub class_name: String,
    pub skeleton_source: String,
}

impl GenerationRequest {
    /// Build a request from a component name/description/config and the
    /// skeleton the recipe expander produced.
    pub fn from_skeleton(
        component_name: impl Into<String>,
        kind: impl Into<String>,
        description: impl Into<String>,
        config: IndexMap<String, ConfigValue>,
        skeleton: &Skeleton,
    ) -> Self {
        Self {
            component_name: component_name.into(),
            kind: kind.into(),
            description: description.into(),
            enhanced_description: None,
            config,
            class_name: skeleton.class_name.clone(),
            skeleton_source: skeleton.source_text.clone(),
        }
    }

    /// Attach an enhanced description (e.g. produced by a prompt-augmentation
    /// pass upstream of the emitter).
    pub fn with_enhanced_description(mut self, description: impl Into<String>) -> Self {
        self.enhanced_description = Some(description.into());
        self
    }
}

/// External collaborator that synthesizes a complete component implementation
/// given a [`GenerationRequest`]. The concrete backend (the actual model
/// provider) stays outside this crate, injected at construction the same way
/// an update checker is handed its backend rather than constructing one
/// inline.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Synthesize source text for the requested component.
    async fn generate(&self, request: GenerationRequest) -> Result<String, EmitError>;
}
