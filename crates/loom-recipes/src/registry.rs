//! ---
//! loom_section: "02-recipes"
//! loom_subsection: "registry"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Static table mapping a component type to its base primitive, port layout, and config defaults."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use indexmap::IndexMap;
use once_cell::sync::Lazy;

use loom_blueprint::ConfigValue;

use crate::errors::RecipeError;

/// The five base primitive capabilities a recipe may build on, per spec.md
/// §9's discovery-protocol redesign note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasePrimitive {
    Source,
    Sink,
    Transformer,
    Splitter,
    Merger,
}

impl BasePrimitive {
    /// The primary method name a component built on this primitive exposes.
    pub fn primary_method(&self) -> &'static str {
        match self {
            BasePrimitive::Source => "generate",
            BasePrimitive::Sink => "consume",
            BasePrimitive::Transformer => "transform",
            BasePrimitive::Splitter => "split",
            BasePrimitive::Merger => "merge",
        }
    }
}

/// A declared port slot a recipe expects the component spec to provide or
/// assigns a stable default name/schema for.
#[derive(Debug, Clone)]
pub struct PortTemplate {
    pub name: &'static str,
    pub schema: &'static str,
}

/// Static, external metadata mapping a component `type` to a base primitive
/// and port layout. Recipes carry no executable behavior: structure only.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub kind: &'static str,
    pub base_primitive: BasePrimitive,
    pub description: &'static str,
    pub input_ports: Vec<PortTemplate>,
    pub output_ports: Vec<PortTemplate>,
    pub config_defaults: IndexMap<String, ConfigValue>,
}

fn defaults(pairs: &[(&str, ConfigValue)]) -> IndexMap<String, ConfigValue> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), v.clone()))
        .collect()
}

static RECIPES: Lazy<Vec<Recipe>> = Lazy::new(|| {
    vec![
        Recipe {
            kind: "Store",
            base_primitive: BasePrimitive::Transformer,
            description: "Persistent storage component with CRUD operations",
            input_ports: vec![PortTemplate {
                name: "in_commands",
                schema: "StoreCommand",
            }],
            output_ports: vec![PortTemplate {
                name: "out_responses",
                schema: "StoreResponse",
            }],
            config_defaults: defaults(&[
                ("storage_backend", ConfigValue::String("sqlite".to_owned())),
                ("checkpoint_enabled", ConfigValue::Bool(true)),
                ("idempotency_check", ConfigValue::Bool(true)),
            ]),
        },
        Recipe {
            kind: "Controller",
            base_primitive: BasePrimitive::Splitter,
            description: "Request routing controller that orchestrates operations",
            input_ports: vec![PortTemplate {
                name: "in_requests",
                schema: "Request",
            }],
            output_ports: vec![
                PortTemplate {
                    name: "out_to_store",
                    schema: "StoreCommand",
                },
                PortTemplate {
                    name: "out_to_validator",
                    schema: "ValidationRequest",
                },
                PortTemplate {
                    name: "out_responses",
                    schema: "Response",
                },
            ],
            config_defaults: defaults(&[
                ("validate_input", ConfigValue::Bool(true)),
                ("route_by_action", ConfigValue::Bool(true)),
                ("max_retries", ConfigValue::Number(3.0)),
            ]),
        },
        Recipe {
            kind: "APIEndpoint",
            base_primitive: BasePrimitive::Source,
            description: "HTTP/REST API endpoint that generates requests from external sources",
            input_ports: vec![],
            output_ports: vec![
                PortTemplate {
                    name: "out_requests",
                    schema: "Request",
                },
                PortTemplate {
                    name: "out_errors",
                    schema: "Error",
                },
            ],
            config_defaults: defaults(&[
                ("host", ConfigValue::String("localhost".to_owned())),
                ("port", ConfigValue::Number(8080.0)),
                ("auth_required", ConfigValue::Bool(false)),
                ("rate_limit", ConfigValue::Number(1000.0)),
            ]),
        },
        Recipe {
            kind: "Filter",
            base_primitive: BasePrimitive::Transformer,
            description: "Filters messages based on conditions",
            input_ports: vec![PortTemplate {
                name: "in_messages",
                schema: "Message",
            }],
            output_ports: vec![PortTemplate {
                name: "out_filtered",
                schema: "Message",
            }],
            config_defaults: defaults(&[
                ("filter_conditions", ConfigValue::List(vec![])),
                ("transformation_rules", ConfigValue::List(vec![])),
                ("drop_on_error", ConfigValue::Bool(false)),
            ]),
        },
        Recipe {
            kind: "Router",
            base_primitive: BasePrimitive::Splitter,
            description: "Routes messages to different paths based on rules",
            input_ports: vec![PortTemplate {
                name: "in_messages",
                schema: "Message",
            }],
            output_ports: vec![
                PortTemplate {
                    name: "route_a",
                    schema: "Message",
                },
                PortTemplate {
                    name: "route_b",
                    schema: "Message",
                },
                PortTemplate {
                    name: "default",
                    schema: "Message",
                },
            ],
            config_defaults: defaults(&[
                ("routing_rules", ConfigValue::List(vec![])),
                ("default_route", ConfigValue::String("default".to_owned())),
            ]),
        },
        Recipe {
            kind: "Aggregator",
            base_primitive: BasePrimitive::Merger,
            description: "Combines multiple inputs into a single output",
            input_ports: vec![
                PortTemplate {
                    name: "in_stream_1",
                    schema: "Data",
                },
                PortTemplate {
                    name: "in_stream_2",
                    schema: "Data",
                },
                PortTemplate {
                    name: "in_stream_3",
                    schema: "Data",
                },
            ],
            output_ports: vec![PortTemplate {
                name: "out_aggregated",
                schema: "AggregatedData",
            }],
            config_defaults: defaults(&[
                ("aggregation_strategy", ConfigValue::String("combine".to_owned())),
                ("buffer_size", ConfigValue::Number(10.0)),
                ("timeout_ms", ConfigValue::Number(1000.0)),
            ]),
        },
        Recipe {
            kind: "WebSocket",
            base_primitive: BasePrimitive::Source,
            description: "WebSocket connection handler for bidirectional streaming",
            input_ports: vec![],
            output_ports: vec![PortTemplate {
                name: "out_messages",
                schema: "WSMessage",
            }],
            config_defaults: defaults(&[
                ("host", ConfigValue::String("localhost".to_owned())),
                ("port", ConfigValue::Number(8081.0)),
                ("heartbeat_interval_ms", ConfigValue::Number(30_000.0)),
            ]),
        },
    ]
});

/// Looks up the recipe for a component `type`. Grounded on
/// `examples/original_source/autocoder_cc/recipes/registry.py`'s
/// `RECIPE_REGISTRY`, without carrying over any embedded method bodies.
pub trait RecipeRegistry {
    /// Retrieve the recipe registered for `kind`, or `UnknownType` naming the
    /// full set of known types.
    fn get(&self, kind: &str) -> Result<&Recipe, RecipeError>;
}

/// The static, in-process recipe registry.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticRecipeRegistry;

impl RecipeRegistry for StaticRecipeRegistry {
    fn get(&self, kind: &str) -> Result<&Recipe, RecipeError> {
        RECIPES.iter().find(|r| r.kind == kind).ok_or_else(|| {
            RecipeError::UnknownType {
                requested: kind.to_owned(),
                known: RECIPES.iter().map(|r| r.kind).collect(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_known_recipe() {
        let registry = StaticRecipeRegistry;
        let recipe = registry.get("Store").expect("Store should be known");
        assert_eq!(recipe.base_primitive, BasePrimitive::Transformer);
        assert!(recipe.config_defaults.contains_key("storage_backend"));
    }

    #[test]
    fn unknown_type_lists_known_types() {
        let registry = StaticRecipeRegistry;
        let err = registry.get("NoSuchThing").unwrap_err();
        match err {
            RecipeError::UnknownType { requested, known } => {
                assert_eq!(requested, "NoSuchThing");
                assert!(known.contains(&"Store"));
                assert!(known.contains(&"Controller"));
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn base_primitive_maps_to_stable_method_name() {
        assert_eq!(BasePrimitive::Source.primary_method(), "generate");
        assert_eq!(BasePrimitive::Sink.primary_method(), "consume");
        assert_eq!(BasePrimitive::Transformer.primary_method(), "transform");
        assert_eq!(BasePrimitive::Splitter.primary_method(), "split");
        assert_eq!(BasePrimitive::Merger.primary_method(), "merge");
    }
}
