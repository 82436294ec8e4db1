//! Reference games.
//!
//! Small enough to search exhaustively, each one exercises a different corner
//! of the [`Game`](crate::Game) contract:
//!
//! - [`Predefined`]: fixed depth and width, any number of roles taking turns
//! - [`DiceBet`]: one role betting on a die that rolls with every action
//! - [`Rps`]: two roles acting simultaneously
//! - [`Guess`]: hidden information exposed through `view`
#[cfg(test)]
mod broken;
mod dice;
mod guess;
mod predefined;
mod rps;

#[cfg(test)]
pub use broken::*;
pub use dice::*;
pub use guess::*;
pub use predefined::*;
pub use rps::*;
