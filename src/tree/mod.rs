//! Disposable search structures.
//!
//! - `tree`: the UCT search [`Tree`], an arena of [`Node`]s joined by transitions
//! - `cache`: per-decision memo of successor states, keyed by state identifier
mod cache;
mod node;
mod tree;

pub use cache::*;
pub use node::*;
pub use tree::*;
