//! ---
//! loom_section: "05-validator"
//! loom_subsection: "synthetic"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Synthetic test-input heuristics per component type."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use serde_json::{json, Value};

/// Generate 2–3 synthetic test inputs for `kind`, adapted to known recipe
/// types and falling back to flat key/value records otherwise, per
/// spec.md §4.4.
pub fn synthetic_inputs(kind: &str, source_text: &str) -> Vec<Value> {
    match kind {
        "APIEndpoint" => vec![
            json!({"method": "POST", "path": "/items", "body": {"name": "widget"}}),
            json!({"method": "GET", "path": "/items", "body": {}}),
        ],
        "Store" => store_inputs(source_text),
        "Controller" => vec![
            json!({"action": "create", "payload": {"name": "widget"}}),
            json!({"action": "list", "payload": {}}),
            json!({"action": "unknown_action", "payload": {}}),
        ],
        _ => vec![
            json!({"value": "example"}),
            json!({"value": 42}),
        ],
    }
}

/// Store recipes handle a family of `action` values; prefer actions the
/// component's own source visibly handles (detected by scanning for literal
/// action strings), per spec.md §4.4.
fn store_inputs(source_text: &str) -> Vec<Value> {
    let candidates = ["add_item", "get_item", "list_items", "delete_item"];
    let mut detected: Vec<&str> = candidates
        .iter()
        .copied()
        .filter(|action| source_text.contains(action))
        .collect();
    if detected.is_empty() {
        detected = vec!["add_item", "list_items"];
    }
    detected
        .into_iter()
        .take(3)
        .map(|action| json!({"action": action, "payload": {}}))
        .collect()
}

/// Tolerant classification of one functional response: non-null, with a
/// success-shaped status, an HTTP-style 2xx code, or structural success
/// signals (`result`/`items`/`body`), per spec.md §4.4.
pub fn is_success_response(response: &Option<Value>) -> bool {
    let Some(response) = response else {
        return false;
    };
    if response.is_null() {
        return false;
    }
    if let Some(status) = response.get("status").and_then(Value::as_str) {
        if matches!(status, "success" | "ok" | "completed") {
            return true;
        }
    }
    if let Some(code) = response.get("status_code").and_then(Value::as_u64) {
        if (200..300).contains(&code) {
            return true;
        }
    }
    response.get("result").is_some() || response.get("items").is_some() || response.get("body").is_some()
}

/// A component passes functional testing if at least 2 of 3 synthetic cases
/// succeed (the 2-of-3 rule).
pub fn passes_functional_threshold(successes: usize, total: usize) -> bool {
    total > 0 && successes * 3 >= total * 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_prefers_actions_visible_in_source() {
        let inputs = synthetic_inputs("Store", "if action == 'list_items': ...");
        assert!(inputs.iter().any(|i| i["action"] == "list_items"));
    }

    #[test]
    fn tolerant_classifier_accepts_structural_signals() {
        assert!(is_success_response(&Some(json!({"items": []}))));
        assert!(is_success_response(&Some(json!({"status": "ok"}))));
        assert!(is_success_response(&Some(json!({"status_code": 201}))));
        assert!(!is_success_response(&Some(json!(null))));
        assert!(!is_success_response(&None));
    }

    #[test]
    fn two_of_three_rule() {
        assert!(passes_functional_threshold(2, 3));
        assert!(!passes_functional_threshold(1, 3));
        assert!(passes_functional_threshold(3, 3));
    }
}
