//! ---
//! loom_section: "01-data-model"
//! loom_subsection: "module"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Blueprint, component, and port data model."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::BlueprintError;

/// Direction of a [`PortSpec`] relative to its owning component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Input,
    Output,
}

/// A scalar or structured configuration value attached to a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<ConfigValue>),
    Map(IndexMap<String, ConfigValue>),
}

/// One endpoint of a component: a named, schema-typed, directional port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortSpec {
    pub name: String,
    pub schema: String,
    pub direction: Direction,
    #[serde(default)]
    pub boundary_ingress: bool,
    #[serde(default)]
    pub reply_required: bool,
    #[serde(default)]
    pub satisfies_reply: bool,
    #[serde(default)]
    pub observability_export: bool,
}

impl PortSpec {
    /// Construct a plain input port with no boundary flags set.
    pub fn input(name: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: schema.into(),
            direction: Direction::Input,
            boundary_ingress: false,
            reply_required: false,
            satisfies_reply: false,
            observability_export: false,
        }
    }

    /// Construct a plain output port with no boundary flags set.
    pub fn output(name: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: schema.into(),
            direction: Direction::Output,
            boundary_ingress: false,
            reply_required: false,
            satisfies_reply: false,
            observability_export: false,
        }
    }

    /// Mark this input port as receiving external (boundary) traffic.
    pub fn boundary_ingress(mut self) -> Self {
        self.boundary_ingress = true;
        self
    }

    /// Mark this input port as requiring a reply for every message received.
    pub fn reply_required(mut self) -> Self {
        self.reply_required = true;
        self
    }

    /// Mark this output port as discharging a reply obligation.
    pub fn satisfies_reply(mut self) -> Self {
        self.satisfies_reply = true;
        self
    }

    /// Mark this output port as constituting observability.
    pub fn observability_export(mut self) -> Self {
        self.observability_export = true;
        self
    }

    /// Validate the direction-dependent boundary flag invariant from spec.md §3:
    /// `boundary_ingress`/`reply_required` are input-only, `satisfies_reply`/
    /// `observability_export` are output-only.
    pub fn validate_flags(&self, component: &str) -> Result<(), BlueprintError> {
        match self.direction {
            Direction::Input => {
                if self.satisfies_reply || self.observability_export {
                    return Err(BlueprintError::ConflictingPortFlags {
                        component: component.to_owned(),
                        port: self.name.clone(),
                        reason: "satisfies_reply/observability_export are output-only flags"
                            .to_owned(),
                    });
                }
            }
            Direction::Output => {
                if self.boundary_ingress || self.reply_required {
                    return Err(BlueprintError::ConflictingPortFlags {
                        component: component.to_owned(),
                        port: self.name.clone(),
                        reason: "boundary_ingress/reply_required are input-only flags".to_owned(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Declarative description of one component node in the blueprint graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub config: IndexMap<String, ConfigValue>,
    #[serde(default)]
    pub inputs: Vec<PortSpec>,
    #[serde(default)]
    pub outputs: Vec<PortSpec>,
    #[serde(default)]
    pub durable: bool,
    #[serde(default)]
    pub monitored_bus_ok: bool,
}

impl ComponentSpec {
    /// Find a declared input port by name.
    pub fn input(&self, name: &str) -> Option<&PortSpec> {
        self.inputs.iter().find(|p| p.name == name)
    }

    /// Find a declared output port by name.
    pub fn output(&self, name: &str) -> Option<&PortSpec> {
        self.outputs.iter().find(|p| p.name == name)
    }

    /// The stable generated-class name for this component, per spec.md §6:
    /// `Generated<Type>_<name>`.
    pub fn generated_class_name(&self) -> String {
        format!("Generated{}_{}", self.kind, self.name)
    }
}

/// An edge connecting one component's output port to another's input port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingSpec {
    pub source_component: String,
    pub source_port: String,
    pub target_component: String,
    pub target_port: String,
}

/// The declarative input: a named collection of components and bindings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blueprint {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub components: Vec<ComponentSpec>,
    #[serde(default)]
    pub bindings: Vec<BindingSpec>,
}

/// Flags captured for one port during index construction, decoupled from
/// the owning [`ComponentSpec`] so traversal code does not need to keep
/// re-scanning `inputs`/`outputs` per hop (see SPEC_FULL.md §3's port
/// registry supplement).
#[derive(Debug, Clone, Copy)]
pub struct PortInfo {
    pub direction: Direction,
    pub boundary_ingress: bool,
    pub reply_required: bool,
    pub satisfies_reply: bool,
    pub observability_export: bool,
}

impl From<&PortSpec> for PortInfo {
    fn from(port: &PortSpec) -> Self {
        Self {
            direction: port.direction,
            boundary_ingress: port.boundary_ingress,
            reply_required: port.reply_required,
            satisfies_reply: port.satisfies_reply,
            observability_export: port.observability_export,
        }
    }
}

/// A blueprint whose structural invariants have been checked once, with a
/// prebuilt component/port/binding index for O(1) traversal lookups.
#[derive(Debug, Clone)]
pub struct ValidatedBlueprint {
    blueprint: Blueprint,
    component_index: HashMap<String, usize>,
    port_index: HashMap<(String, String), PortInfo>,
    outgoing: HashMap<(String, String), Vec<(String, String)>>,
}

impl ValidatedBlueprint {
    /// Access the underlying blueprint.
    pub fn blueprint(&self) -> &Blueprint {
        &self.blueprint
    }

    /// Look up a component by name.
    pub fn component(&self, name: &str) -> Option<&ComponentSpec> {
        self.component_index
            .get(name)
            .map(|&idx| &self.blueprint.components[idx])
    }

    /// Look up a port's flags by `(component, port)`.
    pub fn port(&self, component: &str, port: &str) -> Option<PortInfo> {
        self.port_index
            .get(&(component.to_owned(), port.to_owned()))
            .copied()
    }

    /// All `(component, port)` targets reachable by following bindings out of
    /// the given output port.
    pub fn targets_of(&self, component: &str, port: &str) -> &[(String, String)] {
        self.outgoing
            .get(&(component.to_owned(), port.to_owned()))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Iterate all components in declaration order.
    pub fn components(&self) -> &[ComponentSpec] {
        &self.blueprint.components
    }
}

impl Blueprint {
    /// Validate structural invariants (spec.md §3) and build the traversal
    /// index, producing a [`ValidatedBlueprint`].
    pub fn validate(self) -> Result<ValidatedBlueprint, BlueprintError> {
        if self.name.trim().is_empty() {
            return Err(BlueprintError::MalformedBlueprint(
                "blueprint name must not be empty".to_owned(),
            ));
        }

        let mut component_index = HashMap::new();
        for (idx, component) in self.components.iter().enumerate() {
            if component.name.trim().is_empty() {
                return Err(BlueprintError::MissingComponentType(format!(
                    "component at index {idx} has an empty name"
                )));
            }
            if component.kind.trim().is_empty() {
                return Err(BlueprintError::MissingComponentType(component.name.clone()));
            }
            if component_index.insert(component.name.clone(), idx).is_some() {
                return Err(BlueprintError::DuplicateComponent(component.name.clone()));
            }
        }

        let mut port_index = HashMap::new();
        for component in &self.components {
            for port in component.inputs.iter().chain(component.outputs.iter()) {
                port.validate_flags(&component.name)?;
                port_index.insert(
                    (component.name.clone(), port.name.clone()),
                    PortInfo::from(port),
                );
            }
        }

        let mut outgoing: HashMap<(String, String), Vec<(String, String)>> = HashMap::new();
        for binding in &self.bindings {
            let source = self
                .components
                .get(*component_index.get(&binding.source_component).ok_or_else(|| {
                    BlueprintError::ComponentNotFound(binding.source_component.clone())
                })?)
                .expect("index built above is consistent");
            let target = self
                .components
                .get(*component_index.get(&binding.target_component).ok_or_else(|| {
                    BlueprintError::ComponentNotFound(binding.target_component.clone())
                })?)
                .expect("index built above is consistent");

            let source_port = source.output(&binding.source_port).ok_or_else(|| {
                BlueprintError::MissingOutputPort {
                    component: binding.source_component.clone(),
                    port: binding.source_port.clone(),
                }
            })?;
            if source_port.direction != Direction::Output {
                return Err(BlueprintError::PortDirectionMismatch {
                    component: binding.source_component.clone(),
                    port: binding.source_port.clone(),
                    expected: Direction::Output,
                });
            }
            let target_port = target.input(&binding.target_port).ok_or_else(|| {
                BlueprintError::MissingInputPort {
                    component: binding.target_component.clone(),
                    port: binding.target_port.clone(),
                }
            })?;
            if target_port.direction != Direction::Input {
                return Err(BlueprintError::PortDirectionMismatch {
                    component: binding.target_component.clone(),
                    port: binding.target_port.clone(),
                    expected: Direction::Input,
                });
            }

            outgoing
                .entry((binding.source_component.clone(), binding.source_port.clone()))
                .or_default()
                .push((binding.target_component.clone(), binding.target_port.clone()));
        }

        Ok(ValidatedBlueprint {
            blueprint: self,
            component_index,
            port_index,
            outgoing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_blueprint(satisfies_reply: bool) -> Blueprint {
        Blueprint {
            name: "single-api".to_owned(),
            version: "1".to_owned(),
            description: None,
            components: vec![ComponentSpec {
                name: "api".to_owned(),
                kind: "APIEndpoint".to_owned(),
                description: String::new(),
                config: IndexMap::new(),
                inputs: vec![PortSpec::input("request", "RequestSchema")
                    .boundary_ingress()
                    .reply_required()],
                outputs: vec![{
                    let mut port = PortSpec::output("response", "ResponseSchema");
                    port.satisfies_reply = satisfies_reply;
                    port
                }],
                durable: false,
                monitored_bus_ok: false,
            }],
            bindings: vec![],
        }
    }

    #[test]
    fn validates_well_formed_blueprint() {
        let validated = api_blueprint(true).validate().expect("should validate");
        assert!(validated.component("api").is_some());
        assert_eq!(
            validated.port("api", "request").unwrap().direction,
            Direction::Input
        );
    }

    #[test]
    fn rejects_conflicting_port_flags() {
        let mut bp = api_blueprint(true);
        bp.components[0].inputs[0].satisfies_reply = true;
        let err = bp.validate().unwrap_err();
        assert!(matches!(err, BlueprintError::ConflictingPortFlags { .. }));
    }

    #[test]
    fn rejects_dangling_binding_component() {
        let mut bp = api_blueprint(true);
        bp.bindings.push(BindingSpec {
            source_component: "api".to_owned(),
            source_port: "response".to_owned(),
            target_component: "missing".to_owned(),
            target_port: "in".to_owned(),
        });
        let err = bp.validate().unwrap_err();
        assert!(matches!(err, BlueprintError::ComponentNotFound(_)));
    }

    #[test]
    fn rejects_binding_into_wrong_direction_port() {
        let mut bp = api_blueprint(true);
        bp.components.push(ComponentSpec {
            name: "sink".to_owned(),
            kind: "Transformer".to_owned(),
            description: String::new(),
            config: IndexMap::new(),
            inputs: vec![],
            outputs: vec![PortSpec::output("out", "Schema")],
            durable: false,
            monitored_bus_ok: false,
        });
        bp.bindings.push(BindingSpec {
            source_component: "api".to_owned(),
            source_port: "response".to_owned(),
            target_component: "sink".to_owned(),
            target_port: "out".to_owned(),
        });
        let err = bp.validate().unwrap_err();
        assert!(matches!(err, BlueprintError::PortDirectionMismatch { .. }));
    }

    #[test]
    fn generated_class_name_follows_stable_rule() {
        let spec = api_blueprint(true).components.remove(0);
        assert_eq!(spec.generated_class_name(), "GeneratedAPIEndpoint_api");
    }
}
