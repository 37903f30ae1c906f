//! ---
//! loom_section: "03-reachability"
//! loom_subsection: "errors"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "The VR1 error taxonomy: 27 error types across 5 categories, with remediation."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use std::fmt;

use thiserror::Error;

/// The five VR1 error categories, per spec.md §7, grounded on
/// `examples/original_source/autocoder_cc/blueprint_validation/vr1_error_taxonomy.py`'s
/// `VR1ErrorCategory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VrErrorCategory {
    Ingress,
    Reachability,
    Termination,
    Structural,
    Semantic,
}

impl VrErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            VrErrorCategory::Ingress => "ingress_issues",
            VrErrorCategory::Reachability => "reachability_issues",
            VrErrorCategory::Termination => "termination_issues",
            VrErrorCategory::Structural => "structural_issues",
            VrErrorCategory::Semantic => "semantic_issues",
        }
    }
}

impl fmt::Display for VrErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured, PII-scrubbed context attached to a [`VrError`]. Only
/// `component.port` identifiers are retained in `path_trace`; no payload
/// data is ever captured here, so there is nothing to redact later.
#[derive(Debug, Clone, Default)]
pub struct VrErrorContext {
    pub component_name: Option<String>,
    pub port_name: Option<String>,
    pub path_trace: Vec<String>,
    pub hops_traversed: Option<u32>,
    pub expected_termination: Option<String>,
    pub actual_termination: Option<String>,
    pub component_type: Option<String>,
}

/// One VR1 validation error: stable code, category, message, structured
/// context, and remediation suggestions.
#[derive(Debug, Clone, Error)]
#[error("{error_code}: {message}")]
pub struct VrError {
    pub error_type: VrErrorType,
    pub category: VrErrorCategory,
    pub error_code: String,
    pub message: String,
    pub context: VrErrorContext,
    pub suggestions: Vec<&'static str>,
}

impl VrError {
    fn new(
        error_type: VrErrorType,
        category: VrErrorCategory,
        message: String,
        context: VrErrorContext,
        suggestions: Vec<&'static str>,
    ) -> Self {
        let error_code = format!(
            "VR1-{}-{}",
            category.as_str().to_uppercase(),
            error_type.as_str().to_uppercase()
        );
        Self {
            error_type,
            category,
            error_code,
            message,
            context,
            suggestions,
        }
    }
}

/// The 27 VR1 error types, grouped into the five categories spec.md names.
/// Grounded on `VR1ErrorType` in the original taxonomy file, one-to-one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VrErrorType {
    // Ingress
    NoBoundaryIngress,
    IngressPortNotFound,
    InvalidIngressConfig,
    ConflictingIngressFlags,
    IngressWithoutComponent,
    // Reachability
    NoReachableTermination,
    HopLimitExceeded,
    DisconnectedComponent,
    InvalidConnection,
    MissingOutputPort,
    MissingInputPort,
    SccCycleDetected,
    PortCouplingViolation,
    // Termination
    ReplyCommitmentUnmet,
    DurableCommitmentUnmet,
    ObservabilityCommitmentUnmet,
    WebsocketHandshakeFailed,
    GrpcStreamingFailed,
    CompoundCommitmentFailed,
    TerminationSemanticsInvalid,
    // Structural
    ComponentNotFound,
    MalformedBlueprint,
    MissingComponentType,
    InvalidComponentType,
    // Semantic
    InconsistentBoundarySemantics,
    DurabilityInconsistency,
    MonitoredBusMisconfiguration,
}

impl VrErrorType {
    pub fn category(&self) -> VrErrorCategory {
        use VrErrorType::*;
        match self {
            NoBoundaryIngress | IngressPortNotFound | InvalidIngressConfig
            | ConflictingIngressFlags | IngressWithoutComponent => VrErrorCategory::Ingress,
            NoReachableTermination | HopLimitExceeded | DisconnectedComponent
            | InvalidConnection | MissingOutputPort | MissingInputPort | SccCycleDetected
            | PortCouplingViolation => VrErrorCategory::Reachability,
            ReplyCommitmentUnmet | DurableCommitmentUnmet | ObservabilityCommitmentUnmet
            | WebsocketHandshakeFailed | GrpcStreamingFailed | CompoundCommitmentFailed
            | TerminationSemanticsInvalid => VrErrorCategory::Termination,
            ComponentNotFound | MalformedBlueprint | MissingComponentType
            | InvalidComponentType => VrErrorCategory::Structural,
            InconsistentBoundarySemantics | DurabilityInconsistency
            | MonitoredBusMisconfiguration => VrErrorCategory::Semantic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        use VrErrorType::*;
        match self {
            NoBoundaryIngress => "no_boundary_ingress",
            IngressPortNotFound => "ingress_port_not_found",
            InvalidIngressConfig => "invalid_ingress_config",
            ConflictingIngressFlags => "conflicting_ingress_flags",
            IngressWithoutComponent => "ingress_without_component",
            NoReachableTermination => "no_reachable_termination",
            HopLimitExceeded => "hop_limit_exceeded",
            DisconnectedComponent => "disconnected_component",
            InvalidConnection => "invalid_connection",
            MissingOutputPort => "missing_output_port",
            MissingInputPort => "missing_input_port",
            SccCycleDetected => "scc_cycle_detected",
            PortCouplingViolation => "port_coupling_violation",
            ReplyCommitmentUnmet => "reply_commitment_unmet",
            DurableCommitmentUnmet => "durable_commitment_unmet",
            ObservabilityCommitmentUnmet => "observability_commitment_unmet",
            WebsocketHandshakeFailed => "websocket_handshake_failed",
            GrpcStreamingFailed => "grpc_streaming_failed",
            CompoundCommitmentFailed => "compound_commitment_failed",
            TerminationSemanticsInvalid => "termination_semantics_invalid",
            ComponentNotFound => "component_not_found",
            MalformedBlueprint => "malformed_blueprint",
            MissingComponentType => "missing_component_type",
            InvalidComponentType => "invalid_component_type",
            InconsistentBoundarySemantics => "inconsistent_boundary_semantics",
            DurabilityInconsistency => "durability_inconsistency",
            MonitoredBusMisconfiguration => "monitored_bus_misconfiguration",
        }
    }
}

/// Factory for standardized [`VrError`]s, grounded on `VR1ErrorFactory`.
pub struct VrErrorFactory;

impl VrErrorFactory {
    pub fn no_boundary_ingress() -> VrError {
        VrError::new(
            VrErrorType::NoBoundaryIngress,
            VrErrorCategory::Ingress,
            "no boundary ingress points found - blueprint has no external entry points".to_owned(),
            VrErrorContext::default(),
            vec![
                "add boundary_ingress=true to at least one input port",
                "verify component inputs are properly configured",
                "check if this is an internal-only blueprint",
            ],
        )
    }

    pub fn hop_limit_exceeded(component: &str, port: &str, hops: u32, limit: u32) -> VrError {
        VrError::new(
            VrErrorType::HopLimitExceeded,
            VrErrorCategory::Reachability,
            format!("hop limit exceeded: {component}.{port} traversed {hops} hops (limit: {limit})"),
            VrErrorContext {
                component_name: Some(component.to_owned()),
                port_name: Some(port.to_owned()),
                hops_traversed: Some(hops),
                ..Default::default()
            },
            vec![
                "simplify blueprint architecture to reduce path length",
                "check for cycles causing excessive path traversal",
            ],
        )
    }

    pub fn no_reachable_termination(component: &str, port: &str, path_trace: Vec<String>) -> VrError {
        VrError::new(
            VrErrorType::NoReachableTermination,
            VrErrorCategory::Reachability,
            format!("no reachable termination from {component}.{port}"),
            VrErrorContext {
                component_name: Some(component.to_owned()),
                port_name: Some(port.to_owned()),
                path_trace,
                ..Default::default()
            },
            vec![
                "verify bindings connect this ingress to a terminating component",
                "add a durable sink or reply-satisfying output on some reachable path",
            ],
        )
    }

    pub fn reply_commitment_unmet(component: &str, port: &str, path_trace: Vec<String>) -> VrError {
        VrError::new(
            VrErrorType::ReplyCommitmentUnmet,
            VrErrorCategory::Termination,
            format!(
                "reply commitment unmet: {component}.{port} requires reply but cannot reach satisfies_reply=true port"
            ),
            VrErrorContext {
                component_name: Some(component.to_owned()),
                port_name: Some(port.to_owned()),
                path_trace,
                expected_termination: Some("satisfies_reply=true".to_owned()),
                ..Default::default()
            },
            vec![
                "add satisfies_reply=true to an appropriate output port",
                "verify path connectivity to a response port",
            ],
        )
    }

    pub fn durable_commitment_unmet(component: &str, port: &str, path_trace: Vec<String>) -> VrError {
        VrError::new(
            VrErrorType::DurableCommitmentUnmet,
            VrErrorCategory::Termination,
            format!("durable commitment unmet: {component}.{port} cannot reach durable component input"),
            VrErrorContext {
                component_name: Some(component.to_owned()),
                port_name: Some(port.to_owned()),
                path_trace,
                expected_termination: Some("durable component input".to_owned()),
                ..Default::default()
            },
            vec![
                "add durable=true to a terminating component",
                "verify path connectivity to persistent storage",
                "check if termination should be at observability export instead",
            ],
        )
    }

    pub fn observability_commitment_unmet(component: &str, port: &str, path_trace: Vec<String>) -> VrError {
        VrError::new(
            VrErrorType::ObservabilityCommitmentUnmet,
            VrErrorCategory::Termination,
            format!("observability commitment unmet: {component}.{port} has no reachable observability path"),
            VrErrorContext {
                component_name: Some(component.to_owned()),
                port_name: Some(port.to_owned()),
                path_trace,
                expected_termination: Some("observability_export=true output".to_owned()),
                ..Default::default()
            },
            vec!["add an observability_export=true output reachable from this ingress"],
        )
    }

    pub fn websocket_handshake_failed(component: &str) -> VrError {
        VrError::new(
            VrErrorType::WebsocketHandshakeFailed,
            VrErrorCategory::Termination,
            format!("websocket handshake failed: {component}.connection_request cannot reach connection_status"),
            VrErrorContext {
                component_name: Some(component.to_owned()),
                port_name: Some("connection_request".to_owned()),
                expected_termination: Some("connection_status with satisfies_reply=true".to_owned()),
                ..Default::default()
            },
            vec!["add a connection_status output port with satisfies_reply=true"],
        )
    }

    pub fn grpc_streaming_failed(component: &str) -> VrError {
        VrError::new(
            VrErrorType::GrpcStreamingFailed,
            VrErrorCategory::Termination,
            format!("gRPC streaming termination failed for {component}"),
            VrErrorContext {
                component_name: Some(component.to_owned()),
                ..Default::default()
            },
            vec!["ensure the stream input can reach a reply or observability termination"],
        )
    }

    pub fn compound_commitment_failed(component: &str, detail: &str) -> VrError {
        VrError::new(
            VrErrorType::CompoundCommitmentFailed,
            VrErrorCategory::Termination,
            format!("compound commitment failed for {component}: {detail}"),
            VrErrorContext {
                component_name: Some(component.to_owned()),
                ..Default::default()
            },
            vec!["review the multi-path predicate this component type imposes"],
        )
    }

    pub fn disconnected_component(component: &str) -> VrError {
        VrError::new(
            VrErrorType::DisconnectedComponent,
            VrErrorCategory::Reachability,
            format!("component '{component}' is not connected to the blueprint graph"),
            VrErrorContext {
                component_name: Some(component.to_owned()),
                ..Default::default()
            },
            vec!["add a binding connecting this component to the rest of the graph"],
        )
    }

    pub fn scc_cycle_detected(components: Vec<String>) -> VrError {
        VrError::new(
            VrErrorType::SccCycleDetected,
            VrErrorCategory::Reachability,
            format!("strongly connected cycle detected among: {}", components.join(", ")),
            VrErrorContext {
                path_trace: components,
                ..Default::default()
            },
            vec!["break the cycle with a terminating component or remove the circular binding"],
        )
    }

    pub fn port_coupling_violation(component: &str, input_port: &str) -> VrError {
        VrError::new(
            VrErrorType::PortCouplingViolation,
            VrErrorCategory::Reachability,
            format!("port coupling violation: {component}.{input_port} does not couple to any declared output"),
            VrErrorContext {
                component_name: Some(component.to_owned()),
                port_name: Some(input_port.to_owned()),
                ..Default::default()
            },
            vec!["check the component type's coupling rule in the reachability analyzer"],
        )
    }

    pub fn missing_output_port(component: &str, port: &str) -> VrError {
        VrError::new(
            VrErrorType::MissingOutputPort,
            VrErrorCategory::Reachability,
            format!("expected output port '{component}.{port}' not found"),
            VrErrorContext {
                component_name: Some(component.to_owned()),
                port_name: Some(port.to_owned()),
                ..Default::default()
            },
            vec!["declare the missing output port on the component"],
        )
    }

    pub fn missing_input_port(component: &str, port: &str) -> VrError {
        VrError::new(
            VrErrorType::MissingInputPort,
            VrErrorCategory::Reachability,
            format!("expected input port '{component}.{port}' not found"),
            VrErrorContext {
                component_name: Some(component.to_owned()),
                port_name: Some(port.to_owned()),
                ..Default::default()
            },
            vec!["declare the missing input port on the component"],
        )
    }

    pub fn component_not_found(component: &str) -> VrError {
        VrError::new(
            VrErrorType::ComponentNotFound,
            VrErrorCategory::Structural,
            format!("referenced component '{component}' not found in blueprint"),
            VrErrorContext {
                component_name: Some(component.to_owned()),
                ..Default::default()
            },
            vec!["check the component name for typos", "ensure the component is declared"],
        )
    }

    pub fn malformed_blueprint(detail: &str) -> VrError {
        VrError::new(
            VrErrorType::MalformedBlueprint,
            VrErrorCategory::Structural,
            format!("blueprint structure invalid: {detail}"),
            VrErrorContext::default(),
            vec!["validate the blueprint document against its schema before analysis"],
        )
    }

    pub fn inconsistent_boundary_semantics(component: &str, port: &str, reason: &str) -> VrError {
        VrError::new(
            VrErrorType::InconsistentBoundarySemantics,
            VrErrorCategory::Semantic,
            format!("inconsistent boundary semantics on {component}.{port}: {reason}"),
            VrErrorContext {
                component_name: Some(component.to_owned()),
                port_name: Some(port.to_owned()),
                ..Default::default()
            },
            vec!["remove the contradictory boundary flag combination"],
        )
    }

    pub fn durability_inconsistency(component: &str, reason: &str) -> VrError {
        VrError::new(
            VrErrorType::DurabilityInconsistency,
            VrErrorCategory::Semantic,
            format!("durability inconsistency on '{component}': {reason}"),
            VrErrorContext {
                component_name: Some(component.to_owned()),
                ..Default::default()
            },
            vec!["align the durable flag with this component's actual persistence behavior"],
        )
    }

    pub fn monitored_bus_misconfiguration(component: &str, reason: &str) -> VrError {
        VrError::new(
            VrErrorType::MonitoredBusMisconfiguration,
            VrErrorCategory::Semantic,
            format!("monitored_bus_ok misconfiguration on '{component}': {reason}"),
            VrErrorContext {
                component_name: Some(component.to_owned()),
                ..Default::default()
            },
            vec!["only set monitored_bus_ok=true when an observability_export output exists"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_follows_category_type_convention() {
        let err = VrErrorFactory::hop_limit_exceeded("svc", "in", 11, 10);
        assert_eq!(err.error_code, "VR1-REACHABILITY_ISSUES-HOP_LIMIT_EXCEEDED");
        assert_eq!(err.category, VrErrorCategory::Reachability);
    }

    #[test]
    fn all_27_types_map_to_exactly_five_categories() {
        use VrErrorType::*;
        let all = [
            NoBoundaryIngress,
            IngressPortNotFound,
            InvalidIngressConfig,
            ConflictingIngressFlags,
            IngressWithoutComponent,
            NoReachableTermination,
            HopLimitExceeded,
            DisconnectedComponent,
            InvalidConnection,
            MissingOutputPort,
            MissingInputPort,
            SccCycleDetected,
            PortCouplingViolation,
            ReplyCommitmentUnmet,
            DurableCommitmentUnmet,
            ObservabilityCommitmentUnmet,
            WebsocketHandshakeFailed,
            GrpcStreamingFailed,
            CompoundCommitmentFailed,
            TerminationSemanticsInvalid,
            ComponentNotFound,
            MalformedBlueprint,
            MissingComponentType,
            InvalidComponentType,
            InconsistentBoundarySemantics,
            DurabilityInconsistency,
            MonitoredBusMisconfiguration,
        ];
        assert_eq!(all.len(), 27);
        for t in all {
            let _ = t.category();
            assert!(!t.as_str().is_empty());
        }
    }
}
