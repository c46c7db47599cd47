//! Transition evaluation
//!
//! Walks input symbol by symbol through a built [`StateGraph`]. Exactly one
//! table lookup happens per symbol; there is no backtracking and no implicit
//! reject state, so a missing entry surfaces as
//! [`Error::UndefinedTransition`].

use crate::automaton::{State, StateGraph, StateId, Symbol};
use crate::{Error, Result};

/// The states visited while consuming an input, start state included
#[derive(Debug, Clone)]
pub struct Run<'g> {
    graph: &'g StateGraph,
    path: Vec<StateId>,
}

impl<'g> Run<'g> {
    /// Handles in visiting order; one longer than the input
    pub fn path(&self) -> &[StateId] {
        &self.path
    }

    pub fn states(&self) -> impl Iterator<Item = &'g State> + '_ {
        self.path.iter().map(|&id| &self.graph[id])
    }

    pub fn final_state(&self) -> &'g State {
        // path always holds at least the start state
        let last = self.path[self.path.len() - 1];
        &self.graph[last]
    }

    pub fn accepted(&self) -> bool {
        self.final_state().is_accepting()
    }
}

impl StateGraph {
    /// Run `input` from `start` and return the state reached.
    ///
    /// Empty input returns `start` itself.
    pub fn transition(&self, start: StateId, input: &str) -> Result<&State> {
        let id = self.transition_symbols(start, input.chars())?;
        Ok(&self[id])
    }

    /// Same as [`transition`](Self::transition) over any symbol sequence
    pub fn transition_symbols<I>(&self, start: StateId, input: I) -> Result<StateId>
    where
        I: IntoIterator<Item = Symbol>,
    {
        self.walk(start, input, |_| {})
    }

    /// Whether the automaton started at `start` accepts `input`
    pub fn accepts(&self, start: StateId, input: &str) -> Result<bool> {
        Ok(self.transition(start, input)?.is_accepting())
    }

    /// Like [`transition`](Self::transition), but keeps every visited state
    pub fn trace(&self, start: StateId, input: &str) -> Result<Run<'_>> {
        let mut path = vec![start];
        self.walk(start, input.chars(), |id| path.push(id))?;
        Ok(Run { graph: self, path })
    }

    fn walk<I, F>(&self, start: StateId, input: I, mut visit: F) -> Result<StateId>
    where
        I: IntoIterator<Item = Symbol>,
        F: FnMut(StateId),
    {
        let mut current = self.state(start).ok_or(Error::ForeignState(start))?;

        for (position, symbol) in input.into_iter().enumerate() {
            let next = current
                .next(symbol)
                .ok_or_else(|| Error::UndefinedTransition {
                    state: current.name().to_string(),
                    symbol,
                    position,
                })?;
            tracing::trace!(from = current.name(), %symbol, position, "step");
            current = &self[next];
            visit(next);
        }

        Ok(current.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::Descriptor;
    use crate::automaton::tests::no_consecutive_ones;

    fn graph() -> StateGraph {
        StateGraph::build(&no_consecutive_ones()).unwrap()
    }

    #[test]
    fn test_acceptance_scenarios() {
        let g = graph();
        let a = g.state_id("A").unwrap();

        let end = g.transition(a, "0000100111000").unwrap();
        assert_eq!(end.to_string(), "<State name=dead accepting=False>");

        let end = g.transition(a, "1000000").unwrap();
        assert_eq!(end.to_string(), "<State name=A accepting=True>");

        let end = g.transition(a, "1000001").unwrap();
        assert_eq!(end.to_string(), "<State name=B accepting=True>");

        let end = g.transition(a, "").unwrap();
        assert_eq!(end.id(), a);
        assert!(end.is_accepting());
    }

    #[test]
    fn test_empty_input_is_identity() {
        let g = graph();
        for state in g.states() {
            assert_eq!(g.transition(state.id(), "").unwrap(), state);
        }
    }

    #[test]
    fn test_deterministic() {
        let g = graph();
        let b = g.state_id("B").unwrap();
        let first = g.transition(b, "0101001").unwrap();
        let second = g.transition(b, "0101001").unwrap();
        assert_eq!(first.id(), second.id());
    }

    #[test]
    fn test_concatenation_law() {
        let g = graph();
        let inputs = ["", "0", "1", "01", "10", "0110", "1010101"];
        for state in g.states() {
            for w1 in inputs {
                for w2 in inputs {
                    let whole = g.transition(state.id(), &format!("{w1}{w2}")).unwrap();
                    let mid = g.transition(state.id(), w1).unwrap();
                    let split = g.transition(mid.id(), w2).unwrap();
                    assert_eq!(whole.id(), split.id(), "from {} on {w1}+{w2}", state.name());
                }
            }
        }
    }

    #[test]
    fn test_undefined_transition() {
        let g = graph();
        let a = g.state_id("A").unwrap();
        let err = g.transition(a, "0102").unwrap_err();
        match err {
            Error::UndefinedTransition {
                state,
                symbol,
                position,
            } => {
                assert_eq!(state, "A");
                assert_eq!(symbol, '2');
                assert_eq!(position, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_partial_automaton_fails_without_sink() {
        let descriptors = vec![
            Descriptor::new("even", true).on('a', "odd"),
            Descriptor::new("odd", false).on('a', "even"),
        ];
        let g = StateGraph::build(&descriptors).unwrap();
        let even = g.state_id("even").unwrap();
        assert!(g.accepts(even, "aaaa").unwrap());
        assert!(!g.accepts(even, "aaa").unwrap());
        assert!(g.transition(even, "ab").unwrap_err().is_evaluation_error());
    }

    #[test]
    fn test_foreign_state_handle() {
        let g = graph();
        let small = StateGraph::build(&[Descriptor::new("only", true)]).unwrap();
        let dead = g.state_id("dead").unwrap();
        let err = small.transition(dead, "").unwrap_err();
        assert!(matches!(err, Error::ForeignState(id) if id == dead));
    }

    #[test]
    fn test_foreign_handle_with_overlapping_index() {
        let g = StateGraph::build(&[Descriptor::new("x", true).on('1', "x")]).unwrap();
        let small = StateGraph::build(&[Descriptor::new("only", true)]).unwrap();
        let only = small.state_id("only").unwrap();
        assert_eq!(only.index(), g.state_id("x").unwrap().index());

        let err = g.transition(only, "0").unwrap_err();
        assert!(matches!(err, Error::ForeignState(id) if id == only));
        assert!(matches!(g.accepts(only, "1"), Err(Error::ForeignState(_))));
        assert!(matches!(g.trace(only, ""), Err(Error::ForeignState(_))));
    }

    #[test]
    fn test_trace_records_path() {
        let g = graph();
        let a = g.state_id("A").unwrap();
        let run = g.trace(a, "0110").unwrap();

        let names: Vec<&str> = run.states().map(|s| s.name()).collect();
        assert_eq!(names, vec!["A", "A", "B", "dead", "dead"]);
        assert_eq!(run.path().len(), 5);
        assert_eq!(run.final_state().name(), "dead");
        assert!(!run.accepted());

        let run = g.trace(a, "").unwrap();
        assert_eq!(run.path(), &[a]);
        assert!(run.accepted());
    }

    #[test]
    fn test_symbol_iterator_input() {
        let g = graph();
        let a = g.state_id("A").unwrap();
        let b = g.state_id("B").unwrap();
        let end = g.transition_symbols(a, vec!['0', '0', '1']).unwrap();
        assert_eq!(end, b);
    }
}
