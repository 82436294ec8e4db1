//! The contract every concrete game satisfies.
//!
//! - `state`: the [`Game`] trait and the marker traits for its associated types
//! - `aleatory`: pending random variables and their distributions
//! - `transition`: complete assignments of actions and haps, enumerated or sampled
mod aleatory;
mod state;
mod transition;

pub use aleatory::*;
pub use state::*;
pub use transition::*;
