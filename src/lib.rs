//! Turn-based games and the agents that search them.
//!
//! A game is any type implementing [`Game`]: an immutable state that knows its
//! roles, the actions open to its active roles, the random variables
//! ([`Aleatory`]) still blocking its next transition, and its result once
//! finished. On top of that contract this crate provides:
//!
//! - `game`: the contract itself plus [`Transition`] enumeration and sampling
//! - `play`: the asynchronous [`Match`] controller and the [`Player`] interface
//! - `agents`: the [`Agent`] evaluation base and the search algorithms built on
//!   it ([`Minimax`], [`AlphaBeta`], [`MaxN`], [`MonteCarlo`], [`Uct`])
//! - `tree`: the disposable UCT search [`Tree`] and the per-decision [`Cache`]
//! - `games`: small reference games used by tests, benches and the arena binary
mod agents;
mod error;
mod game;
mod games;
mod id;
mod play;
mod tree;

pub use agents::*;
pub use error::*;
pub use game::*;
pub use games::*;
pub use id::*;
pub use play::*;
pub use tree::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Results, heuristic values and rewards.
pub type Utility = f64;
/// Aleatory weights and transition likelihoods.
pub type Probability = f64;

// ============================================================================
// DECISION
// ============================================================================
/// Two evaluations closer than this are treated as a tie.
pub const TIE_EPSILON: Utility = 1e-15;
/// Tolerance when checking that a zero-sum result adds up to nothing.
pub const ZERO_SUM_TOLERANCE: Utility = 1e-9;
/// Half-width of the default noise heuristic, which draws from [-0.5, 0.5).
pub const NOISE_AMPLITUDE: Utility = 0.5;

// ============================================================================
// MINIMAX FAMILY
// ============================================================================
/// Default search depth for Minimax, Alpha-Beta and MaxN.
pub const MINIMAX_HORIZON: usize = 4;

// ============================================================================
// MONTE CARLO
// ============================================================================
/// Default number of playouts per candidate action in flat Monte Carlo.
pub const MONTECARLO_SIMULATIONS: usize = 30;
/// Default playout length before the heuristic replaces the real result.
pub const MONTECARLO_HORIZON: usize = 500;

// ============================================================================
// UCT
// ============================================================================
/// Default number of tree iterations per UCT decision.
pub const UCT_SIMULATIONS: usize = 30;
/// Default UCB1 exploration constant.
pub const UCT_EXPLORATION: Utility = std::f64::consts::SQRT_2;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize terminal logging at the given level.
#[cfg(feature = "cli")]
pub fn log(level: log::LevelFilter) {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let term = simplelog::TermLogger::new(
        level,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term]).expect("initialize logger");
}
