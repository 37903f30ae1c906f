//! ---
//! loom_section: "03-reachability"
//! loom_subsection: "coupling"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Port-faithful intra-component coupling table, keyed by component type."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use loom_blueprint::ComponentSpec;

/// Returns the output port names that `input_port` couples to within one
/// component, per the type-keyed table in spec.md §4.1.
pub fn coupled_outputs<'a>(component: &'a ComponentSpec, input_port: &str) -> Vec<&'a str> {
    match component.kind.as_str() {
        "APIEndpoint" => {
            if input_port == "request" {
                component
                    .outputs
                    .iter()
                    .filter(|p| p.name == "response")
                    .map(|p| p.name.as_str())
                    .collect()
            } else {
                Vec::new()
            }
        }
        "Store" => match input_port {
            "write" => component
                .outputs
                .iter()
                .filter(|p| p.name == "write_status")
                .map(|p| p.name.as_str())
                .collect(),
            "read" => component
                .outputs
                .iter()
                .filter(|p| p.name == "data")
                .map(|p| p.name.as_str())
                .collect(),
            _ => Vec::new(),
        },
        "WebSocket" => match input_port {
            "connection_request" => component
                .outputs
                .iter()
                .filter(|p| p.name == "connection_status")
                .map(|p| p.name.as_str())
                .collect(),
            "message_in" => component
                .outputs
                .iter()
                .filter(|p| p.name == "message_out")
                .map(|p| p.name.as_str())
                .collect(),
            _ => Vec::new(),
        },
        // Controller, Transformer, EventBus, MessageQueue, and unknown types
        // all couple conservatively: any input reaches every output.
        _ => component.outputs.iter().map(|p| p.name.as_str()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loom_blueprint::{ConfigValue, Direction, PortSpec};
    use indexmap::IndexMap;

    fn component(kind: &str, inputs: Vec<&str>, outputs: Vec<&str>) -> ComponentSpec {
        ComponentSpec {
            name: "c".to_owned(),
            kind: kind.to_owned(),
            description: String::new(),
            config: IndexMap::<String, ConfigValue>::new(),
            inputs: inputs
                .into_iter()
                .map(|n| PortSpec {
                    name: n.to_owned(),
                    schema: "S".to_owned(),
                    direction: Direction::Input,
                    boundary_ingress: false,
                    reply_required: false,
                    satisfies_reply: false,
                    observability_export: false,
                })
                .collect(),
            outputs: outputs
                .into_iter()
                .map(|n| PortSpec {
                    name: n.to_owned(),
                    schema: "S".to_owned(),
                    direction: Direction::Output,
                    boundary_ingress: false,
                    reply_required: false,
                    satisfies_reply: false,
                    observability_export: false,
                })
                .collect(),
            durable: false,
            monitored_bus_ok: false,
        }
    }

    #[test]
    fn api_endpoint_couples_request_to_response_only() {
        let c = component("APIEndpoint", vec!["request"], vec!["response", "errors"]);
        assert_eq!(coupled_outputs(&c, "request"), vec!["response"]);
    }

    #[test]
    fn store_separates_write_and_read_paths() {
        let c = component("Store", vec!["write", "read"], vec!["write_status", "data"]);
        assert_eq!(coupled_outputs(&c, "write"), vec!["write_status"]);
        assert_eq!(coupled_outputs(&c, "read"), vec!["data"]);
    }

    #[test]
    fn unknown_type_is_conservative() {
        let c = component("Mystery", vec!["in"], vec!["out_a", "out_b"]);
        assert_eq!(coupled_outputs(&c, "in"), vec!["out_a", "out_b"]);
    }
}
