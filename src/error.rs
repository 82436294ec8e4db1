/// Everything that can abort a match or a search.
///
/// None of these are recoverable: they propagate out of the [`Match`](crate::Match)
/// or the decision request that triggered them. Payloads are rendered to strings
/// so the error stays `Clone + Send` and can cross actor channels.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A transition was given an incomplete or illegal assignment.
    #[error("invalid transition: {0}")]
    InvalidTransition(String),
    /// An agent (or aleatory resolver) answered with something it was not offered.
    #[error("invalid decision by {who}: {choice}")]
    InvalidDecision { who: String, choice: String },
    /// A non-terminal state offers an active role nothing to do.
    #[error("no legal actions at {0}")]
    NoLegalActions(String),
    /// A pending random variable could not be resolved by sampling.
    #[error("unresolved aleatory {0}")]
    UnresolvedAleatory(String),
    /// A match was created without an agent for some role.
    #[error("no player for role {0}")]
    MissingPlayer(String),
    /// The match was quit while waiting on decisions or resolvers.
    #[error("match aborted at ply {ply}")]
    Aborted { ply: usize },
    /// A player task went away before answering.
    #[error("player for role {0} disconnected")]
    Disconnected(String),
}

impl Error {
    pub fn decision<W, C>(who: W, choice: C) -> Self
    where
        W: std::fmt::Display,
        C: std::fmt::Debug,
    {
        Self::InvalidDecision {
            who: who.to_string(),
            choice: format!("{:?}", choice),
        }
    }
}
