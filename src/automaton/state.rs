//! State representation

use petgraph::stable_graph::NodeIndex;
use std::collections::BTreeMap;
use std::fmt;

/// An input symbol
pub type Symbol = char;

/// Handle to a state inside the graph that owns it.
///
/// Carries the id of the owning graph, so a handle used with any other graph is
/// rejected instead of resolving to whatever state shares its index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId {
    pub(crate) graph: u64,
    pub(crate) node: NodeIndex,
}

impl StateId {
    pub(crate) fn new(graph: u64, node: NodeIndex) -> Self {
        Self { graph, node }
    }

    pub fn index(&self) -> usize {
        self.node.index()
    }
}

/// One automaton state.
///
/// States are created by [`StateGraph::build`](super::StateGraph::build) and
/// never change afterwards, so only getters are exposed. Transition targets are
/// handles into the same graph rather than owned states, which lets tables hold
/// self-loops and cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub(crate) id: StateId,
    pub(crate) name: String,
    pub(crate) accepting: bool,
    pub(crate) transitions: BTreeMap<Symbol, StateId>,
}

impl State {
    pub(crate) fn new(id: StateId, name: String, accepting: bool) -> Self {
        Self {
            id,
            name,
            accepting,
            transitions: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Successor on `symbol`, if this state defines one
    pub fn next(&self, symbol: Symbol) -> Option<StateId> {
        self.transitions.get(&symbol).copied()
    }

    /// Outgoing transitions ordered by symbol
    pub fn transitions(&self) -> impl Iterator<Item = (Symbol, StateId)> + '_ {
        self.transitions.iter().map(|(&symbol, &target)| (symbol, target))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Capitalised flag keeps output identical to existing fixtures
        let accepting = if self.accepting { "True" } else { "False" };
        write!(f, "<State name={} accepting={}>", self.name, accepting)
    }
}
