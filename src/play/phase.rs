/// Where a [`Match`](crate::Match) is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingAleatories,
    AwaitingDecisions,
    Advancing,
    Finished,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::AwaitingAleatories => write!(f, "awaiting aleatories"),
            Self::AwaitingDecisions => write!(f, "awaiting decisions"),
            Self::Advancing => write!(f, "advancing"),
            Self::Finished => write!(f, "finished"),
        }
    }
}
