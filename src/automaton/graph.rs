use crate::automaton::{Descriptor, State, StateId, Symbol};
use crate::config::ExportConfig;
use crate::{Error, Result};
use petgraph::stable_graph::{NodeIndex, StableGraph};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Index;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

/// A directed graph holding every state of one automaton.
///
/// The graph is the arena that owns all [`State`]s. Each state's transition
/// table stores [`StateId`] handles into this arena, and every table entry is
/// mirrored as an edge labelled with its symbol so petgraph's algorithms can run
/// over the automaton.
///
/// A `StateGraph` is immutable once built. It is `Send + Sync`, so any number of
/// threads may evaluate input against it at the same time.
#[derive(Debug, Clone)]
pub struct StateGraph {
    /// Process-unique id stamped into every handle this graph hands out.
    id: u64,

    /// Nodes are states, edges are transitions labelled by their input symbol.
    graph: StableGraph<State, Symbol>,

    /// Lookup table from state name to its handle.
    ///
    /// Used for O(1) access by name and for resolving forward references while
    /// the transition tables are filled in.
    state_index: HashMap<String, StateId>,
}

impl StateGraph {
    fn new() -> Self {
        Self {
            id: NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed),
            graph: StableGraph::new(),
            state_index: HashMap::new(),
        }
    }

    /// Build a graph from state descriptors.
    ///
    /// Runs in two passes so transitions may reference states declared later in
    /// the list, including self-loops and cycles:
    /// 1. allocate every state with an empty transition table
    /// 2. resolve each `(symbol, target_name)` pair to a handle
    ///
    /// Fails with [`Error::DuplicateState`] when two descriptors share a name and
    /// with [`Error::UnknownState`] when a target name is not declared. On failure
    /// no graph is returned.
    pub fn build(descriptors: &[Descriptor]) -> Result<Self> {
        let mut graph = Self::new();

        let mut ids = Vec::with_capacity(descriptors.len());
        for desc in descriptors {
            if graph.state_index.contains_key(&desc.name) {
                return Err(Error::DuplicateState {
                    name: desc.name.clone(),
                });
            }
            ids.push(graph.add_state(&desc.name, desc.accepting));
        }

        for (desc, &from) in descriptors.iter().zip(&ids) {
            for (&symbol, target) in &desc.transitions {
                let to = graph
                    .state_index
                    .get(target)
                    .copied()
                    .ok_or_else(|| Error::UnknownState {
                        state: desc.name.clone(),
                        symbol,
                        target: target.clone(),
                    })?;
                graph.add_transition(from, symbol, to);
            }
        }

        tracing::debug!(
            states = graph.graph.node_count(),
            transitions = graph.graph.edge_count(),
            "Built state graph"
        );

        Ok(graph)
    }

    fn add_state(&mut self, name: &str, accepting: bool) -> StateId {
        // The handle is only known once the node is placed; patched right after.
        let idx = self
            .graph
            .add_node(State::new(
                StateId::new(self.id, NodeIndex::end()),
                name.to_string(),
                accepting,
            ));
        let id = StateId::new(self.id, idx);
        self.graph[idx].id = id;
        self.state_index.insert(name.to_string(), id);
        id
    }

    fn add_transition(&mut self, from: StateId, symbol: Symbol, to: StateId) {
        self.graph[from.node].transitions.insert(symbol, to);
        self.graph.add_edge(from.node, to.node, symbol);
    }

    /// Get a state by name
    pub fn get(&self, name: &str) -> Option<&State> {
        self.state_id(name).and_then(|id| self.state(id))
    }

    /// Get the handle of a state by name
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.state_index.get(name).copied()
    }

    /// Resolve a handle, `None` if it does not belong to this graph
    pub fn state(&self, id: StateId) -> Option<&State> {
        if id.graph != self.id {
            return None;
        }
        self.graph.node_weight(id.node)
    }

    /// All states in declaration order
    pub fn states(&self) -> impl Iterator<Item = &State> + '_ {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph.node_weight(idx))
    }

    pub fn accepting_states(&self) -> Vec<&State> {
        self.states().filter(|s| s.is_accepting()).collect()
    }

    /// Union of all symbols used by any transition
    pub fn alphabet(&self) -> BTreeSet<Symbol> {
        self.states()
            .flat_map(|s| s.transitions.keys().copied())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Read-only access to the underlying petgraph arena
    pub fn graph(&self) -> &StableGraph<State, Symbol> {
        &self.graph
    }

    /// Export to DOT format for Graphviz
    ///
    /// Transitions between the same pair of states are merged into one edge
    /// labelled with all of their symbols.
    pub fn to_dot(&self, config: &ExportConfig) -> String {
        let mut dot = "digraph StateGraph {\n".to_string();
        dot.push_str(&format!("  rankdir={};\n", config.rankdir));
        dot.push('\n');

        for state in self.states() {
            let shape = if state.is_accepting() {
                "doublecircle"
            } else {
                "circle"
            };
            dot.push_str(&format!(
                "  \"{}\" [shape={}];\n",
                escape(state.name()),
                shape
            ));
        }

        dot.push('\n');

        let mut edges: BTreeMap<(StateId, StateId), Vec<Symbol>> = BTreeMap::new();
        for state in self.states() {
            for (symbol, target) in state.transitions() {
                edges.entry((state.id(), target)).or_default().push(symbol);
            }
        }

        for ((from, to), symbols) in edges {
            if let (Some(from_state), Some(to_state)) = (self.state(from), self.state(to)) {
                let label = symbols
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                dot.push_str(&format!(
                    "  \"{}\" -> \"{}\" [label=\"{}\"];\n",
                    escape(from_state.name()),
                    escape(to_state.name()),
                    escape(&label)
                ));
            }
        }

        dot.push_str("}\n");
        dot
    }

    /// Get graph statistics
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            total_states: self.graph.node_count(),
            total_transitions: self.graph.edge_count(),
            accepting_states: self.accepting_states().len(),
            alphabet_size: self.alphabet().len(),
        }
    }
}

impl Index<StateId> for StateGraph {
    type Output = State;

    /// # Panics
    ///
    /// Panics if `id` was handed out by a different graph. Use
    /// [`StateGraph::state`] for a checked lookup.
    fn index(&self, id: StateId) -> &State {
        self.state(id)
            .unwrap_or_else(|| panic!("state handle {id:?} does not belong to this graph"))
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphStats {
    pub total_states: usize,
    pub total_transitions: usize,
    pub accepting_states: usize,
    pub alphabet_size: usize,
}
