//! ---
//! loom_section: "09-testing"
//! loom_subsection: "reachability-integration"
//! loom_type: "test"
//! loom_scope: "test"
//! loom_description: "End-to-end migration + structural validation + reachability analysis over hand-built blueprints."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use indexmap::IndexMap;
use loom_blueprint::{BindingSpec, Blueprint, ComponentSpec, ConfigValue, PortSpec};
use loom_reachability::{migrate, ReachabilityAnalyzer, TerminationMode};

fn empty_config() -> IndexMap<String, ConfigValue> {
    IndexMap::new()
}

/// A two-component chain whose ingress carries no reply obligation; the
/// downstream component is durable, so the ingress should terminate via
/// `TerminationMode::Durable` without ever reaching a reply-satisfying port.
#[test]
fn ingress_terminates_on_a_downstream_durable_component() {
    let controller = ComponentSpec {
        name: "controller".to_owned(),
        kind: "Controller".to_owned(),
        description: String::new(),
        config: empty_config(),
        inputs: vec![PortSpec::input("command", "Command").boundary_ingress()],
        outputs: vec![PortSpec::output("to_store", "Command")],
        durable: false,
        monitored_bus_ok: false,
    };
    let store = ComponentSpec {
        name: "store".to_owned(),
        kind: "Store".to_owned(),
        description: String::new(),
        config: empty_config(),
        inputs: vec![PortSpec::input("write", "Command")],
        outputs: vec![PortSpec::output("write_status", "Status")],
        durable: true,
        monitored_bus_ok: false,
    };
    let blueprint = Blueprint {
        name: "durable-chain".to_owned(),
        version: "1".to_owned(),
        description: None,
        components: vec![controller, store],
        bindings: vec![BindingSpec {
            source_component: "controller".to_owned(),
            source_port: "to_store".to_owned(),
            target_component: "store".to_owned(),
            target_port: "write".to_owned(),
        }],
    }
    .validate()
    .expect("well-formed two-component chain should validate");

    let verdict = ReachabilityAnalyzer::new().analyze(&blueprint);
    assert!(verdict.admitted);
    assert_eq!(verdict.results.len(), 1);
    assert_eq!(verdict.results[0].termination_mode, Some(TerminationMode::Durable));
}

/// A Transformer ingress with no reply obligation and no durable component
/// downstream, but `monitored_bus_ok` set and an observability-exporting
/// output reachable: admitted via `ObservabilityOk`, distinct from the
/// WebSocket-specific observability rule the analyzer's own unit tests cover.
#[test]
fn generic_ingress_accepts_conditional_observability_termination() {
    let transformer = ComponentSpec {
        name: "enrich".to_owned(),
        kind: "Transformer".to_owned(),
        description: String::new(),
        config: empty_config(),
        inputs: vec![PortSpec::input("in", "Event").boundary_ingress()],
        outputs: vec![{
            let mut port = PortSpec::output("audit", "Event");
            port.observability_export = true;
            port
        }],
        durable: false,
        monitored_bus_ok: true,
    };
    let blueprint = Blueprint {
        name: "audited".to_owned(),
        version: "1".to_owned(),
        description: None,
        components: vec![transformer],
        bindings: vec![],
    }
    .validate()
    .expect("single-component blueprint should validate");

    let verdict = ReachabilityAnalyzer::new().analyze(&blueprint);
    assert!(verdict.admitted);
    assert_eq!(
        verdict.results[0].termination_mode,
        Some(TerminationMode::ObservabilityOk)
    );
}

/// A legacy (pre-boundary-flags) blueprint is migrated in place, then clears
/// reachability without any further manual annotation — the migration
/// pre-pass and the analyzer composed end-to-end, not just unit-tested in
/// isolation.
#[test]
fn migrated_legacy_blueprint_clears_reachability() {
    let api = ComponentSpec {
        name: "api".to_owned(),
        kind: "APIEndpoint".to_owned(),
        description: String::new(),
        config: empty_config(),
        inputs: vec![PortSpec::input("request", "Req")],
        outputs: vec![PortSpec::output("response", "Resp")],
        durable: false,
        monitored_bus_ok: false,
    };
    let mut blueprint = Blueprint {
        name: "legacy-api".to_owned(),
        version: "0.1".to_owned(),
        description: None,
        components: vec![api],
        bindings: vec![],
    };

    let report = migrate(&mut blueprint, false).expect("APIEndpoint migration confidence clears the threshold");
    assert!(report.migration_needed);
    assert_eq!(report.components_migrated, vec!["api".to_owned()]);

    let validated = blueprint.validate().expect("migrated blueprint should validate");
    let verdict = ReachabilityAnalyzer::new().analyze(&validated);
    assert!(verdict.admitted);
    assert_eq!(verdict.results[0].termination_mode, Some(TerminationMode::Reply));

    // Idempotent: re-running migration against the now-migrated document is a no-op.
    let second = migrate(&mut blueprint, false).expect("already-migrated blueprint should not error");
    assert!(!second.migration_needed);
}

/// A blueprint with zero boundary ingresses is rejected outright — there is
/// nothing for any termination commitment to attach to.
#[test]
fn blueprint_with_no_boundary_ingress_is_rejected() {
    let transformer = ComponentSpec {
        name: "lonely".to_owned(),
        kind: "Transformer".to_owned(),
        description: String::new(),
        config: empty_config(),
        inputs: vec![PortSpec::input("in", "Event")],
        outputs: vec![PortSpec::output("out", "Event")],
        durable: false,
        monitored_bus_ok: false,
    };
    let blueprint = Blueprint {
        name: "no-ingress".to_owned(),
        version: "1".to_owned(),
        description: None,
        components: vec![transformer],
        bindings: vec![],
    }
    .validate()
    .expect("single-component blueprint should validate");

    let verdict = ReachabilityAnalyzer::new().analyze(&blueprint);
    assert!(!verdict.admitted);
}
