//! ---
//! loom_section: "03-reachability"
//! loom_subsection: "analyzer"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Bounded BFS boundary-termination analyzer over a validated blueprint."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use std::collections::{HashSet, VecDeque};
use std::time::Instant;

use loom_blueprint::{Direction, ValidatedBlueprint};
use loom_metrics::ReachabilityMetrics;

use crate::coupling::coupled_outputs;
use crate::errors::{VrError, VrErrorFactory};
use crate::result::{BlueprintVerdict, ReachabilityResult, TerminationMode};
use crate::state::PathTraversalState;

/// Upper bound on cross-component hops during ingress traversal, per
/// spec.md §4.1. Exactly this many hops is acceptable; one more fails.
pub const MAX_INGRESS_HOPS: u32 = 10;

/// What was found while exploring the frontier reachable from one ingress.
#[derive(Debug, Default)]
struct Commitments {
    reply_path: Option<Vec<String>>,
    durable_path: Option<Vec<String>>,
    observability_path: Option<Vec<String>>,
    max_hops_seen: u32,
    hop_limit_hit: bool,
    attempted_hops: u32,
}

/// The boundary-termination static analyzer (C1).
#[derive(Default)]
pub struct ReachabilityAnalyzer {
    metrics: Option<ReachabilityMetrics>,
}

impl ReachabilityAnalyzer {
    pub fn new() -> Self {
        Self { metrics: None }
    }

    pub fn with_metrics(metrics: ReachabilityMetrics) -> Self {
        Self {
            metrics: Some(metrics),
        }
    }

    /// Analyze every boundary ingress in `blueprint`, admitting it iff every
    /// ingress reaches its required termination commitment.
    pub fn analyze(&self, blueprint: &ValidatedBlueprint) -> BlueprintVerdict {
        let start = Instant::now();
        let ingresses = self.find_ingresses(blueprint);

        let results = if ingresses.is_empty() {
            vec![ReachabilityResult::rejected(
                "<system>".to_owned(),
                Vec::new(),
                vec![VrErrorFactory::no_boundary_ingress()],
            )]
        } else {
            ingresses
                .into_iter()
                .map(|(component, port)| self.analyze_ingress(blueprint, &component, &port))
                .collect()
        };

        let verdict = BlueprintVerdict::from_results(results);

        if let Some(metrics) = &self.metrics {
            metrics.record_validation(verdict.admitted, start.elapsed().as_secs_f64());
            for error in verdict.errors() {
                metrics.record_error(error.category.as_str(), error.error_type.as_str());
            }
        }

        verdict
    }

    fn find_ingresses(&self, blueprint: &ValidatedBlueprint) -> Vec<(String, String)> {
        let mut ingresses = Vec::new();
        for component in blueprint.components() {
            for port in &component.inputs {
                if port.boundary_ingress {
                    ingresses.push((component.name.clone(), port.name.clone()));
                }
            }
        }
        ingresses
    }

    fn analyze_ingress(
        &self,
        blueprint: &ValidatedBlueprint,
        component: &str,
        port: &str,
    ) -> ReachabilityResult {
        let ingress_id = format!("{component}.{port}");
        let commitments = self.explore(blueprint, component, port);

        if let Some(metrics) = &self.metrics {
            metrics.observe_path_hops(commitments.max_hops_seen);
        }

        if commitments.hop_limit_hit
            && commitments.reply_path.is_none()
            && commitments.durable_path.is_none()
            && commitments.observability_path.is_none()
        {
            let err = VrErrorFactory::hop_limit_exceeded(
                component,
                port,
                commitments.attempted_hops,
                MAX_INGRESS_HOPS,
            );
            return ReachabilityResult::rejected(ingress_id, vec![], vec![err]);
        }

        let owning = blueprint
            .component(component)
            .expect("ingress component must exist in a validated blueprint");

        self.apply_commitment_rule(&ingress_id, component, port, owning, commitments)
    }

    /// BFS from `(component, port)`, recording every terminating commitment
    /// type encountered along any path, bounded by `MAX_INGRESS_HOPS`.
    fn explore(&self, blueprint: &ValidatedBlueprint, component: &str, port: &str) -> Commitments {
        let mut commitments = Commitments::default();
        let mut visited_keys = HashSet::new();
        let mut queue = VecDeque::new();
        queue.push_back(PathTraversalState::start(component, port));

        while let Some(state) = queue.pop_front() {
            let key = state.visited_state_key();
            if !visited_keys.insert(key) {
                continue;
            }
            commitments.max_hops_seen = commitments.max_hops_seen.max(state.hops);

            let current_component = blueprint.component(&state.component);
            let Some(current_component) = current_component else {
                continue;
            };
            let Some(port_info) = blueprint.port(&state.component, &state.port) else {
                continue;
            };

            match port_info.direction {
                Direction::Output => {
                    if port_info.satisfies_reply && commitments.reply_path.is_none() {
                        commitments.reply_path = Some(state.path_trace.clone());
                    }
                    if port_info.observability_export && commitments.observability_path.is_none() {
                        commitments.observability_path = Some(state.path_trace.clone());
                    }

                    for (target_component, target_port) in
                        blueprint.targets_of(&state.component, &state.port)
                    {
                        if state.hops >= MAX_INGRESS_HOPS {
                            commitments.hop_limit_hit = true;
                            commitments.attempted_hops = commitments.attempted_hops.max(state.hops + 1);
                            continue;
                        }
                        queue.push_back(state.step_binding(target_component, target_port));
                    }
                }
                Direction::Input => {
                    if current_component.durable && commitments.durable_path.is_none() {
                        commitments.durable_path = Some(state.path_trace.clone());
                    }
                    for output in coupled_outputs(current_component, &state.port) {
                        queue.push_back(state.step_intra_component(output));
                    }
                }
            }
        }

        commitments
    }

    fn apply_commitment_rule(
        &self,
        ingress_id: &str,
        component: &str,
        port: &str,
        owning: &loom_blueprint::ComponentSpec,
        commitments: Commitments,
    ) -> ReachabilityResult {
        let conditional_observability_ok = owning.monitored_bus_ok;

        // WebSocket handshake: strict REPLY required to connection_status.
        if owning.kind == "WebSocket" && port == "connection_request" {
            return match commitments.reply_path {
                Some(trace) => ReachabilityResult::admitted(ingress_id.to_owned(), TerminationMode::Reply, trace),
                None => ReachabilityResult::rejected(
                    ingress_id.to_owned(),
                    Vec::new(),
                    vec![VrErrorFactory::websocket_handshake_failed(component)],
                ),
            };
        }

        // WebSocket messaging: reply OR (if monitored_bus_ok) observability.
        if owning.kind == "WebSocket" && port == "message_in" {
            if let Some(trace) = commitments.reply_path {
                return ReachabilityResult::admitted(ingress_id.to_owned(), TerminationMode::Reply, trace);
            }
            if conditional_observability_ok {
                if let Some(trace) = commitments.observability_path {
                    return ReachabilityResult::admitted(
                        ingress_id.to_owned(),
                        TerminationMode::ObservabilityOk,
                        trace,
                    );
                }
            }
            return ReachabilityResult::rejected(
                ingress_id.to_owned(),
                Vec::new(),
                vec![VrErrorFactory::compound_commitment_failed(
                    component,
                    "message_in requires a reply path or a monitored observability path",
                )],
            );
        }

        // gRPC unary: strict reply required.
        if owning.kind == "GrpcUnary" {
            return match commitments.reply_path {
                Some(trace) => ReachabilityResult::admitted(ingress_id.to_owned(), TerminationMode::Reply, trace),
                None => ReachabilityResult::rejected(
                    ingress_id.to_owned(),
                    Vec::new(),
                    vec![VrErrorFactory::compound_commitment_failed(
                        component,
                        "unary request requires a reply path to a unary response",
                    )],
                ),
            };
        }

        // gRPC streaming: any reply or observability termination.
        if owning.kind == "GrpcStream" {
            if let Some(trace) = commitments.reply_path {
                return ReachabilityResult::admitted(ingress_id.to_owned(), TerminationMode::Reply, trace);
            }
            if let Some(trace) = commitments.observability_path {
                return ReachabilityResult::admitted(
                    ingress_id.to_owned(),
                    TerminationMode::ObservabilityOk,
                    trace,
                );
            }
            return ReachabilityResult::rejected(
                ingress_id.to_owned(),
                Vec::new(),
                vec![VrErrorFactory::grpc_streaming_failed(component)],
            );
        }

        // Generic ingress rule.
        let reply_required = loom_blueprint_reply_required(owning, port);
        if reply_required {
            return match commitments.reply_path {
                Some(trace) => ReachabilityResult::admitted(ingress_id.to_owned(), TerminationMode::Reply, trace),
                None => ReachabilityResult::rejected(
                    ingress_id.to_owned(),
                    Vec::new(),
                    vec![VrErrorFactory::reply_commitment_unmet(component, port, Vec::new())],
                ),
            };
        }

        if let Some(trace) = commitments.durable_path {
            return ReachabilityResult::admitted(ingress_id.to_owned(), TerminationMode::Durable, trace);
        }
        if conditional_observability_ok {
            if let Some(trace) = commitments.observability_path {
                return ReachabilityResult::admitted(
                    ingress_id.to_owned(),
                    TerminationMode::ObservabilityOk,
                    trace,
                );
            }
        }
        ReachabilityResult::rejected(
            ingress_id.to_owned(),
            Vec::new(),
            vec![VrErrorFactory::durable_commitment_unmet(component, port, Vec::new())],
        )
    }
}

fn loom_blueprint_reply_required(component: &loom_blueprint::ComponentSpec, port: &str) -> bool {
    component
        .input(port)
        .map(|p| p.reply_required)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use loom_blueprint::{BindingSpec, Blueprint, ComponentSpec, ConfigValue, PortSpec};

    fn api_blueprint(satisfies_reply: bool) -> ValidatedBlueprint {
        Blueprint {
            name: "single-api".to_owned(),
            version: "1".to_owned(),
            description: None,
            components: vec![ComponentSpec {
                name: "api".to_owned(),
                kind: "APIEndpoint".to_owned(),
                description: String::new(),
                config: IndexMap::<String, ConfigValue>::new(),
                inputs: vec![PortSpec::input("request", "RequestSchema")
                    .boundary_ingress()
                    .reply_required()],
                outputs: vec![{
                    let mut p = PortSpec::output("response", "ResponseSchema");
                    p.satisfies_reply = satisfies_reply;
                    p
                }],
                durable: false,
                monitored_bus_ok: false,
            }],
            bindings: vec![],
        }
        .validate()
        .expect("blueprint should validate")
    }

    #[test]
    fn scenario_1_reply_reachable_admits_system() {
        let bp = api_blueprint(true);
        let verdict = ReachabilityAnalyzer::new().analyze(&bp);
        assert!(verdict.admitted);
        assert_eq!(verdict.results.len(), 1);
        assert_eq!(
            verdict.results[0].termination_mode,
            Some(TerminationMode::Reply)
        );
    }

    #[test]
    fn scenario_2_reply_commitment_unmet_rejects() {
        let bp = api_blueprint(false);
        let verdict = ReachabilityAnalyzer::new().analyze(&bp);
        assert!(!verdict.admitted);
        assert_eq!(verdict.results[0].errors[0].error_type, crate::errors::VrErrorType::ReplyCommitmentUnmet);
    }

    #[test]
    fn scenario_3_websocket_handshake_and_observability_messaging() {
        let bp = Blueprint {
            name: "ws".to_owned(),
            version: "1".to_owned(),
            description: None,
            components: vec![ComponentSpec {
                name: "socket".to_owned(),
                kind: "WebSocket".to_owned(),
                description: String::new(),
                config: IndexMap::<String, ConfigValue>::new(),
                inputs: vec![
                    PortSpec::input("connection_request", "Conn").boundary_ingress(),
                    PortSpec::input("message_in", "Msg").boundary_ingress(),
                ],
                outputs: vec![
                    {
                        let mut p = PortSpec::output("connection_status", "ConnStatus");
                        p.satisfies_reply = true;
                        p
                    },
                    {
                        let mut p = PortSpec::output("message_out", "Msg");
                        p.observability_export = true;
                        p
                    },
                ],
                durable: false,
                monitored_bus_ok: true,
            }],
            bindings: vec![],
        }
        .validate()
        .unwrap();

        let verdict = ReachabilityAnalyzer::new().analyze(&bp);
        assert!(verdict.admitted);
        assert_eq!(verdict.results.len(), 2);
    }

    #[test]
    fn scenario_6_hop_limit_exceeded_over_eleven_transformers() {
        let mut components = Vec::new();
        for i in 0..12 {
            let mut inputs = vec![PortSpec::input("in", "Data")];
            if i == 0 {
                inputs[0].boundary_ingress = true;
                inputs[0].reply_required = false;
            }
            components.push(ComponentSpec {
                name: format!("t{i}"),
                kind: "Transformer".to_owned(),
                description: String::new(),
                config: IndexMap::<String, ConfigValue>::new(),
                inputs,
                outputs: vec![PortSpec::output("out", "Data")],
                durable: i == 11,
                monitored_bus_ok: false,
            });
        }
        let mut bindings = Vec::new();
        for i in 0..11 {
            bindings.push(BindingSpec {
                source_component: format!("t{i}"),
                source_port: "out".to_owned(),
                target_component: format!("t{}", i + 1),
                target_port: "in".to_owned(),
            });
        }
        let bp = Blueprint {
            name: "chain".to_owned(),
            version: "1".to_owned(),
            description: None,
            components,
            bindings,
        }
        .validate()
        .unwrap();

        let verdict = ReachabilityAnalyzer::new().analyze(&bp);
        assert!(!verdict.admitted);
        assert_eq!(
            verdict.results[0].errors[0].error_type,
            crate::errors::VrErrorType::HopLimitExceeded
        );
    }
}
