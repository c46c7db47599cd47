//! Structural analysis
//!
//! Checks an automaton for totality over its alphabet, finds states that can
//! never be reached from the start state, and spots sink states.

use super::{StateGraph, StateId, Symbol};
use crate::config::AnalysisConfig;
use crate::{Error, Result};
use petgraph::visit::Bfs;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// A `(state, symbol)` pair with no outgoing transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingTransition {
    pub state: String,
    pub symbol: Symbol,
}

/// Analysis report for one automaton and start state
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub start: String,
    pub alphabet: BTreeSet<Symbol>,
    /// Empty when every state defines every alphabet symbol
    pub missing: Vec<MissingTransition>,
    pub unreachable: Vec<String>,
    /// Non-accepting states that loop to themselves on every symbol
    pub sink_states: Vec<String>,
    pub has_cycles: bool,
}

impl AnalysisReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Write the report as pretty-printed JSON
    pub fn write_json(&self, w: &mut impl std::io::Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *w, self)?;
        writeln!(w)?;
        Ok(())
    }
}

/// Analyze `graph` as an automaton started at `start`
pub fn analyze(graph: &StateGraph, start: StateId, config: &AnalysisConfig) -> Result<AnalysisReport> {
    let start_state = graph.state(start).ok_or(Error::ForeignState(start))?;

    let alphabet: BTreeSet<Symbol> = match &config.alphabet {
        Some(symbols) => symbols.chars().collect(),
        None => graph.alphabet(),
    };

    let mut missing = Vec::new();
    let mut sink_states = Vec::new();
    for state in graph.states() {
        for &symbol in &alphabet {
            if state.next(symbol).is_none() {
                missing.push(MissingTransition {
                    state: state.name().to_string(),
                    symbol,
                });
            }
        }

        let loops_on_everything = !alphabet.is_empty()
            && alphabet.iter().all(|&s| state.next(s) == Some(state.id()));
        if !state.is_accepting() && loops_on_everything {
            sink_states.push(state.name().to_string());
        }
    }

    let mut reachable = HashSet::new();
    let mut bfs = Bfs::new(graph.graph(), start.node);
    while let Some(idx) = bfs.next(graph.graph()) {
        reachable.insert(StateId::new(start.graph, idx));
    }
    let unreachable = graph
        .states()
        .filter(|s| !reachable.contains(&s.id()))
        .map(|s| s.name().to_string())
        .collect();

    let has_cycles = petgraph::algo::is_cyclic_directed(graph.graph());

    let report = AnalysisReport {
        start: start_state.name().to_string(),
        alphabet,
        missing,
        unreachable,
        sink_states,
        has_cycles,
    };

    tracing::debug!(
        start = %report.start,
        complete = report.is_complete(),
        unreachable = report.unreachable.len(),
        "Analyzed state graph"
    );

    Ok(report)
}
