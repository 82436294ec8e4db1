//! Asynchronous match orchestration.
//!
//! - [`Match`]: drives one game from its initial state to the end
//! - [`Actor`]: runs one [`Player`] in its own task, answering decision requests
//! - [`Table`]: the match's channels to every seated actor
//! - [`Event`]: what the match tells players and spectators
//! - [`Resolver`]: optional external source for aleatory values
//! - [`Quitter`]: handle that aborts a running match
mod actor;
mod event;
mod matches;
mod phase;
mod player;
mod ply;
mod quitter;
mod resolver;
mod table;

pub use actor::*;
pub use event::*;
pub use matches::*;
pub use phase::*;
pub use player::*;
pub use ply::*;
pub use quitter::*;
pub use resolver::*;
pub use table::*;
