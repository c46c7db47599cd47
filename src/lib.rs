//! Deterministic Finite Automaton Simulator
//!
//! Builds an in-memory transition graph from named state descriptors and runs
//! input strings through it.
//!
//! This library provides functionality for:
//! - Building state graphs from descriptors, resolving forward references
//! - Deterministic, symbol-by-symbol transition evaluation
//! - Structural analysis (totality, reachability, sink states)
//! - Graphviz DOT rendering
//!
//! ```
//! use dfa_sim::automaton::{Descriptor, build_graph};
//!
//! let graph = build_graph(&[
//!     Descriptor::new("A", true).on('0', "A").on('1', "B"),
//!     Descriptor::new("B", true).on('0', "A").on('1', "dead"),
//!     Descriptor::new("dead", false).on('0', "dead").on('1', "dead"),
//! ])?;
//!
//! let start = graph.state_id("A").unwrap();
//! let end = graph.transition(start, "1000001")?;
//! assert_eq!(end.to_string(), "<State name=B accepting=True>");
//! # Ok::<(), dfa_sim::Error>(())
//! ```

pub mod automaton;
pub mod config;
pub mod error;

pub use config::Config;
pub use error::{Error, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Install the global `tracing` subscriber at `level`.
///
/// `RUST_LOG` takes precedence over `level` when set. Library code only emits
/// events, so callers decide whether to install a subscriber at all. Fails if a
/// global subscriber is already installed.
pub fn init_logging(level: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| Error::config(format!("Failed to initialize logging: {}", e)))
}
