//! Automatic players.
//!
//! Every agent implements [`Agent`], the evaluation base: states are turned into
//! a scalar desirability for one role, actions into the average desirability of
//! the states they may lead to, and a decision picks among the best actions at
//! random.
//!
//! - [`RandomAgent`] and [`HeuristicAgent`]: baselines
//! - [`Minimax`], [`AlphaBeta`], [`MaxN`]: depth-bounded recursive search
//! - [`MonteCarlo`]: flat playout averaging
//! - [`Uct`]: tree search guided by UCB1
mod agent;
mod alphabeta;
mod greedy;
mod heuristic;
mod maxn;
mod minimax;
mod montecarlo;
mod random;
mod recursion;
mod uct;

pub use agent::*;
pub use alphabeta::*;
pub use greedy::*;
pub use heuristic::*;
pub use maxn::*;
pub use minimax::*;
pub use montecarlo::*;
pub use random::*;
pub use uct::*;
