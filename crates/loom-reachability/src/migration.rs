//! ---
//! loom_section: "03-reachability"
//! loom_subsection: "migration"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Pre-pass that infers boundary flags on blueprints predating them."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use loom_blueprint::Blueprint;
use thiserror::Error;

/// Confidence threshold below which inferred flags are rejected unless the
/// caller forces migration, per spec.md §4.1.
pub const MIGRATION_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Errors raised by the migration pre-pass.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("inferred boundary flags have confidence {confidence:.2}, below the {MIGRATION_CONFIDENCE_THRESHOLD:.2} threshold; pass force=true to apply anyway")]
    LowConfidence { confidence: f64 },
}

/// Outcome of running the migration pre-pass over a blueprint.
#[derive(Debug, Clone)]
pub struct MigrationReport {
    pub migration_needed: bool,
    pub confidence: f64,
    pub components_migrated: Vec<String>,
}

/// True if the blueprint predates boundary flags: the absence-of-flags
/// heuristic from spec.md §4.1 — no port anywhere declares a boundary flag.
fn needs_migration(blueprint: &Blueprint) -> bool {
    !blueprint.components.iter().any(|c| {
        c.inputs
            .iter()
            .any(|p| p.boundary_ingress || p.reply_required)
            || c.outputs
                .iter()
                .any(|p| p.satisfies_reply || p.observability_export)
    })
}

/// Per component-type confidence for the type-based flag inference rule.
fn inference_confidence(kind: &str) -> f64 {
    match kind {
        "APIEndpoint" | "Store" | "WebSocket" => 0.9,
        _ => 0.5,
    }
}

/// Run the migration pre-pass. If the blueprint already declares boundary
/// flags, this is a no-op (`migration_needed = false`) — migrating an
/// already-migrated blueprint is idempotent, per spec.md §8.
pub fn migrate(blueprint: &mut Blueprint, force: bool) -> Result<MigrationReport, MigrationError> {
    if !needs_migration(blueprint) {
        return Ok(MigrationReport {
            migration_needed: false,
            confidence: 1.0,
            components_migrated: Vec::new(),
        });
    }

    let eligible: Vec<&str> = blueprint
        .components
        .iter()
        .map(|c| c.kind.as_str())
        .collect();
    let overall_confidence = eligible
        .iter()
        .map(|kind| inference_confidence(kind))
        .fold(f64::INFINITY, f64::min)
        .min(1.0);
    let overall_confidence = if overall_confidence.is_finite() {
        overall_confidence
    } else {
        1.0
    };

    if overall_confidence < MIGRATION_CONFIDENCE_THRESHOLD && !force {
        return Err(MigrationError::LowConfidence {
            confidence: overall_confidence,
        });
    }

    let mut migrated = Vec::new();
    for component in &mut blueprint.components {
        match component.kind.as_str() {
            "APIEndpoint" => {
                for port in component.inputs.iter_mut().filter(|p| p.name == "request") {
                    port.boundary_ingress = true;
                    port.reply_required = true;
                }
                for port in component.outputs.iter_mut().filter(|p| p.name == "response") {
                    port.satisfies_reply = true;
                }
                migrated.push(component.name.clone());
            }
            "Store" => {
                component.durable = true;
                migrated.push(component.name.clone());
            }
            "WebSocket" => {
                for port in component
                    .inputs
                    .iter_mut()
                    .filter(|p| p.name == "connection_request" || p.name == "message_in")
                {
                    port.boundary_ingress = true;
                }
                for port in component
                    .outputs
                    .iter_mut()
                    .filter(|p| p.name == "connection_status")
                {
                    port.satisfies_reply = true;
                }
                migrated.push(component.name.clone());
            }
            _ => {}
        }
    }

    Ok(MigrationReport {
        migration_needed: true,
        confidence: overall_confidence,
        components_migrated: migrated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use loom_blueprint::{ComponentSpec, ConfigValue, Direction, PortSpec};

    fn legacy_api_blueprint() -> Blueprint {
        Blueprint {
            name: "legacy".to_owned(),
            version: "0.1".to_owned(),
            description: None,
            components: vec![ComponentSpec {
                name: "api".to_owned(),
                kind: "APIEndpoint".to_owned(),
                description: String::new(),
                config: IndexMap::<String, ConfigValue>::new(),
                inputs: vec![PortSpec {
                    name: "request".to_owned(),
                    schema: "Req".to_owned(),
                    direction: Direction::Input,
                    boundary_ingress: false,
                    reply_required: false,
                    satisfies_reply: false,
                    observability_export: false,
                }],
                outputs: vec![PortSpec {
                    name: "response".to_owned(),
                    schema: "Resp".to_owned(),
                    direction: Direction::Output,
                    boundary_ingress: false,
                    reply_required: false,
                    satisfies_reply: false,
                    observability_export: false,
                }],
                durable: false,
                monitored_bus_ok: false,
            }],
            bindings: vec![],
        }
    }

    #[test]
    fn infers_flags_for_api_endpoint_above_threshold() {
        let mut bp = legacy_api_blueprint();
        let report = migrate(&mut bp, false).expect("should migrate");
        assert!(report.migration_needed);
        assert!(report.confidence >= MIGRATION_CONFIDENCE_THRESHOLD);
        let api = &bp.components[0];
        assert!(api.inputs[0].boundary_ingress);
        assert!(api.inputs[0].reply_required);
        assert!(api.outputs[0].satisfies_reply);
    }

    #[test]
    fn already_migrated_blueprint_is_a_no_op() {
        let mut bp = legacy_api_blueprint();
        migrate(&mut bp, false).unwrap();
        let second = migrate(&mut bp, false).unwrap();
        assert!(!second.migration_needed);
    }

    #[test]
    fn low_confidence_unknown_type_requires_force() {
        let mut bp = legacy_api_blueprint();
        bp.components[0].kind = "Mystery".to_owned();
        let err = migrate(&mut bp, false).unwrap_err();
        assert!(matches!(err, MigrationError::LowConfidence { .. }));
        let forced = migrate(&mut bp, true).unwrap();
        assert!(forced.migration_needed);
    }
}
