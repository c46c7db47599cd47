//! Input descriptors consumed by the graph builder

use super::Symbol;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flat description of one state, referencing successors by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    pub name: String,
    pub accepting: bool,
    #[serde(default)]
    pub transitions: BTreeMap<Symbol, String>,
}

impl Descriptor {
    pub fn new(name: impl Into<String>, accepting: bool) -> Self {
        Self {
            name: name.into(),
            accepting,
            transitions: BTreeMap::new(),
        }
    }

    /// Add (or replace) the transition on `symbol`
    pub fn on(mut self, symbol: Symbol, target: impl Into<String>) -> Self {
        self.transitions.insert(symbol, target.into());
        self
    }
}
