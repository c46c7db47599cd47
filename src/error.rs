//! This module defines all error types used throughout the crate.

use crate::automaton::{StateId, Symbol};
use std::io;
use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    /// Two descriptors share the same state name
    #[error("Duplicate state: '{name}' is declared more than once")]
    DuplicateState { name: String },

    /// A transition points at a state name no descriptor declares
    #[error("Unknown state: '{state}' has a transition on {symbol:?} to undeclared state '{target}'")]
    UnknownState {
        state: String,
        symbol: Symbol,
        target: String,
    },

    /// Evaluation reached a symbol the current state has no transition for
    #[error("Undefined transition: state '{state}' has no transition on {symbol:?} (input position {position})")]
    UndefinedTransition {
        state: String,
        symbol: Symbol,
        position: usize,
    },

    /// A state handle that does not resolve in the graph it was used with
    #[error("State handle {0:?} does not belong to this graph")]
    ForeignState(StateId),

    /// IO errors (config file not readable, writer failures)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Errors raised while building a graph from descriptors
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            Error::DuplicateState { .. } | Error::UnknownState { .. }
        )
    }

    /// Errors raised while walking input through a built graph
    pub fn is_evaluation_error(&self) -> bool {
        matches!(
            self,
            Error::UndefinedTransition { .. } | Error::ForeignState(_)
        )
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(format!("JSON error: {}", err))
    }
}
