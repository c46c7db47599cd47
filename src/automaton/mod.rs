//! Automaton module - Build state graphs and run input through them

use crate::Result;

pub mod analyzer;
pub mod descriptor;
pub mod graph;
pub mod state;
pub mod transition;

// Re-export key types
pub use analyzer::{AnalysisReport, MissingTransition, analyze};
pub use descriptor::Descriptor;
pub use graph::{GraphStats, StateGraph};
pub use state::{State, StateId, Symbol};
pub use transition::Run;

/// Build a state graph from descriptors
pub fn build_graph(descriptors: &[Descriptor]) -> Result<StateGraph> {
    StateGraph::build(descriptors)
}

/// Run `input` from `start` through `graph` and return the state reached
pub fn transition<'g>(graph: &'g StateGraph, start: StateId, input: &str) -> Result<&'g State> {
    graph.transition(start, input)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Binary strings with no two consecutive 1's
    pub(crate) fn no_consecutive_ones() -> Vec<Descriptor> {
        vec![
            Descriptor::new("A", true).on('0', "A").on('1', "B"),
            Descriptor::new("B", true).on('0', "A").on('1', "dead"),
            Descriptor::new("dead", false).on('0', "dead").on('1', "dead"),
        ]
    }

    #[test]
    fn test_free_functions() {
        let graph = build_graph(&no_consecutive_ones()).unwrap();
        let a = graph.state_id("A").unwrap();
        assert_eq!(transition(&graph, a, "11").unwrap().name(), "dead");
    }
}
