use crate::*;

/// Messages from a match to its players and spectators.
///
/// Every per-ply event carries the ply number it belongs to, so answers to a
/// stale decision request can be told apart from current ones.
#[derive(Clone, Debug)]
pub enum Event<G>
where
    G: Game,
{
    /// The match is about to start from this state.
    Begin { game: G },
    /// It is this role's turn. Sent only to the role's player, with its view.
    Decision { ply: usize, role: G::R, view: G },
    /// The match advanced to `game` under these actions and haps.
    Advance {
        ply: usize,
        game: G,
        actions: Actions<G>,
        haps: Haps<G>,
    },
    /// The match reached a terminal state.
    End { game: G, result: Payoff<G> },
    /// The match was aborted.
    Abort { ply: usize, error: Error },
}

impl<G> Event<G>
where
    G: Game,
{
    pub fn ply(&self) -> Option<usize> {
        match self {
            Self::Decision { ply, .. } | Self::Advance { ply, .. } | Self::Abort { ply, .. } => Some(*ply),
            _ => None,
        }
    }
    pub fn is_final(&self) -> bool {
        matches!(self, Self::End { .. } | Self::Abort { .. })
    }
}

impl<G> std::fmt::Display for Event<G>
where
    G: Game,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Begin { game } => write!(f, "begin at {}", game.identifier()),
            Self::Decision { ply, role, .. } => write!(f, "#{} {} to act", ply, role),
            Self::Advance {
                ply, actions, haps, ..
            } => {
                let s = actions
                    .iter()
                    .map(|(r, a)| format!("{} plays {:?}", r, a))
                    .chain(haps.iter().map(|(n, h)| format!("{} is {:?}", n, h)))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "#{} {}", ply, s)
            }
            Self::End { result, .. } => {
                let s = result
                    .iter()
                    .map(|(r, u)| format!("{} {:+}", r, u))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "end: {}", s)
            }
            Self::Abort { ply, error } => write!(f, "#{} aborted: {}", ply, error),
        }
    }
}
