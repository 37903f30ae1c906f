//! ---
//! loom_section: "04-emitter"
//! loom_subsection: "emitter"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Per-component synthesis with a bounded timeout; skips rather than aborts."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::client::{GenerationRequest, LlmClient};
use crate::errors::EmitError;

/// Per-component synthesis timeout, per spec.md §4.3 (~120s).
pub const GENERATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Wraps an [`LlmClient`] and applies the emitter's observable contract:
/// bounded per-component timeout, no retries, one file per component.
pub struct CodeEmitter {
    client: Arc<dyn LlmClient>,
    timeout: Duration,
}

impl CodeEmitter {
    /// Construct an emitter around an externally supplied client. Absence of
    /// a working client is a fatal startup condition the orchestrator must
    /// enforce before constructing this type — the emitter itself assumes
    /// one has already been provided.
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            timeout: GENERATION_TIMEOUT,
        }
    }

    /// Override the per-component timeout (used by tests).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Synthesize one component's body. On timeout, returns
    /// [`EmitError::Timeout`] so the caller can skip the component and
    /// continue the run rather than aborting it.
    pub async fn emit_one(&self, request: GenerationRequest) -> Result<String, EmitError> {
        let component = request.component_name.clone();
        match tokio::time::timeout(self.timeout, self.client.generate(request)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(component = %component, "component generation timed out, skipping");
                Err(EmitError::Timeout(component))
            }
        }
    }

    /// Synthesize a batch of components sequentially, in blueprint order.
    /// This is the default per spec.md §5; callers wanting parallel emission
    /// drive `emit_one` themselves via `futures::future::join_all`.
    pub async fn emit_sequential(
        &self,
        requests: Vec<GenerationRequest>,
    ) -> Vec<(String, Result<String, EmitError>)> {
        let mut outcomes = Vec::with_capacity(requests.len());
        for request in requests {
            let component = request.component_name.clone();
            let outcome = self.emit_one(request).await;
            if outcome.is_ok() {
                info!(component = %component, "component generated");
            }
            outcomes.push((component, outcome));
        }
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{NullLlmClient, ScriptedLlmClient};
    use indexmap::IndexMap;

    fn request(name: &str) -> GenerationRequest {
        GenerationRequest {
            component_name: name.to_owned(),
            kind: "Store".to_owned(),
            description: String::new(),
            enhanced_description: None,
            config: IndexMap::new(),
            class_name: format!("GeneratedStore_{name}"),
            skeleton_source: String::new(),
        }
    }

    #[tokio::test]
    async fn null_client_always_errors() {
        let emitter = CodeEmitter::new(Arc::new(NullLlmClient));
        let result = emitter.emit_one(request("orders")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn scripted_client_returns_recorded_source() {
        let mut scripted = ScriptedLlmClient::new();
        scripted.record("orders", "class GeneratedStore_orders: ...");
        let emitter = CodeEmitter::new(Arc::new(scripted));
        let result = emitter.emit_one(request("orders")).await.unwrap();
        assert!(result.contains("GeneratedStore_orders"));
    }

    #[tokio::test]
    async fn sequential_emission_continues_past_a_timeout() {
        let mut scripted = ScriptedLlmClient::new();
        scripted.record("b", "class GeneratedStore_b: ...");
        let emitter = CodeEmitter::new(Arc::new(scripted));
        let outcomes = emitter
            .emit_sequential(vec![request("a"), request("b")])
            .await;
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].1.is_err());
        assert!(outcomes[1].1.is_ok());
    }
}
