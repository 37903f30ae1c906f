//! ---
//! loom_section: "04-emitter"
//! loom_subsection: "crate-root"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "LLM-backed code emitter: wraps an external client to synthesize component bodies and rewrite them on regeneration."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
#![warn(missing_docs)]
#![doc = "Invokes an external LLM client to synthesize a component body against its recipe-expanded skeleton; also serves as the regeneration engine the healing orchestrator calls as a last resort."]

pub mod client;
pub mod emitter;
pub mod errors;
pub mod resilience;
pub mod testing;

pub use client::{GenerationRequest, LlmClient};
pub use emitter::{CodeEmitter, GENERATION_TIMEOUT};
pub use errors::EmitError;
pub use resilience::RetryPolicy;

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, EmitError>;
