//! ---
//! loom_section: "05-validator"
//! loom_subsection: "bus"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "In-process message bus private to one validation run; constructed, populated, exercised, then torn down."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use std::collections::{HashMap, VecDeque};

use serde_json::{json, Value};

/// Routes inter-component messages by component name during one validation
/// run. Modeled on an in-memory transport: a single process-local instance,
/// private to the `IntegrationValidator` invocation that owns it, never
/// shared across runs.
#[derive(Debug, Default)]
pub struct MessageBus {
    queues: HashMap<String, VecDeque<Value>>,
}

impl MessageBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a message to `target`'s queue.
    pub fn send(&mut self, target: &str, message: Value) {
        self.queues.entry(target.to_owned()).or_default().push_back(message);
    }

    /// Pop the next message queued for `target`, if any.
    pub fn recv(&mut self, target: &str) -> Option<Value> {
        self.queues.get_mut(target).and_then(VecDeque::pop_front)
    }

    /// Number of messages currently queued for `target`.
    pub fn pending(&self, target: &str) -> usize {
        self.queues.get(target).map(VecDeque::len).unwrap_or(0)
    }
}

/// A deterministic stub used when a component under test needs to call a
/// peer: returns a shape-correct but synthetic success response, per
/// spec.md §4.4's test-double rule. No real network, no real persistence.
pub fn synthetic_peer_response(peer: &str) -> Value {
    json!({
        "status": "success",
        "source": peer,
        "result": { "synthetic": true }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_messages_by_component_name() {
        let mut bus = MessageBus::new();
        bus.send("store", json!({"action": "add_item"}));
        assert_eq!(bus.pending("store"), 1);
        let message = bus.recv("store").unwrap();
        assert_eq!(message["action"], "add_item");
        assert!(bus.recv("store").is_none());
    }

    #[test]
    fn synthetic_peer_response_is_shape_correct() {
        let response = synthetic_peer_response("validator");
        assert_eq!(response["status"], "success");
    }
}
