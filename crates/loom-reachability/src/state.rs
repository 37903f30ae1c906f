//! ---
//! loom_section: "03-reachability"
//! loom_subsection: "state"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Bounded BFS bookkeeping for one ingress traversal."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use std::collections::BTreeSet;

/// Analyzer bookkeeping for one frontier state during the bounded BFS from
/// an ingress point, per spec.md §3.
#[derive(Debug, Clone)]
pub struct PathTraversalState {
    pub component: String,
    pub port: String,
    pub hops: u32,
    pub visited_components: BTreeSet<String>,
    pub visited_edges: BTreeSet<(String, String, String, String)>,
    pub path_trace: Vec<String>,
}

impl PathTraversalState {
    /// Start a fresh traversal at an ingress `(component, port)`.
    pub fn start(component: impl Into<String>, port: impl Into<String>) -> Self {
        let component = component.into();
        let port = port.into();
        let mut visited_components = BTreeSet::new();
        visited_components.insert(component.clone());
        let path_trace = vec![format!("{component}.{port}")];
        Self {
            component,
            port,
            hops: 0,
            visited_components,
            visited_edges: BTreeSet::new(),
            path_trace,
        }
    }

    /// The visited-state key used to suppress cycles: `(component, port,
    /// sorted_visited_components)`, per spec.md §4.1.
    pub fn visited_state_key(&self) -> (String, String, Vec<String>) {
        (
            self.component.clone(),
            self.port.clone(),
            self.visited_components.iter().cloned().collect(),
        )
    }

    /// Step within the same component (zero hop cost, intra-component
    /// coupling) to a new output port.
    pub fn step_intra_component(&self, to_port: &str) -> Self {
        let mut next = self.clone();
        next.port = to_port.to_owned();
        next.path_trace.push(format!("{}.{}", next.component, to_port));
        next
    }

    /// Step across a binding from this (output) port to a connected
    /// (component, input port), incrementing the hop counter.
    pub fn step_binding(&self, to_component: &str, to_port: &str) -> Self {
        let mut next = self.clone();
        next.visited_edges.insert((
            self.component.clone(),
            self.port.clone(),
            to_component.to_owned(),
            to_port.to_owned(),
        ));
        next.component = to_component.to_owned();
        next.port = to_port.to_owned();
        next.hops += 1;
        next.visited_components.insert(to_component.to_owned());
        next.path_trace.push(format!("{to_component}.{to_port}"));
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_seeds_path_trace_with_ingress() {
        let state = PathTraversalState::start("api", "request");
        assert_eq!(state.path_trace, vec!["api.request".to_owned()]);
        assert_eq!(state.hops, 0);
    }

    #[test]
    fn step_binding_increments_hops_and_records_edge() {
        let state = PathTraversalState::start("api", "request");
        let intra = state.step_intra_component("response");
        let next = intra.step_binding("store", "write");
        assert_eq!(next.hops, 1);
        assert_eq!(next.component, "store");
        assert!(next.visited_components.contains("store"));
        assert_eq!(next.path_trace.last().unwrap(), "store.write");
    }
}
