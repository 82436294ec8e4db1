use crate::*;

/// One state in a UCT search tree.
///
/// Rewards are accumulated from the searching role's perspective, already
/// mapped into [0, 1]. Transitions not yet expanded into children wait in
/// `pending`.
#[derive(Debug, Clone)]
pub struct Node<G>
where
    G: Game,
{
    state: G,
    visits: usize,
    rewards: Utility,
    pending: Vec<Move<G>>,
}

impl<G> Node<G>
where
    G: Game,
{
    pub fn new(state: G) -> Result<Self, Error> {
        let pending = Transition::enumerate(&state)?
            .into_iter()
            .map(|(t, _)| t)
            .collect();
        Ok(Self {
            state,
            visits: 0,
            rewards: 0.,
            pending,
        })
    }
    pub fn state(&self) -> &G {
        &self.state
    }
    pub fn visits(&self) -> usize {
        self.visits
    }
    pub fn rewards(&self) -> Utility {
        self.rewards
    }
    pub fn pending(&self) -> &[Move<G>] {
        &self.pending
    }
    /// Average reward, zero before the first visit.
    pub fn mean(&self) -> Utility {
        match self.visits {
            0 => 0.,
            n => self.rewards / n as Utility,
        }
    }
    /// Every transition has a child.
    pub fn is_expanded(&self) -> bool {
        self.pending.is_empty()
    }
    pub(crate) fn visit(&mut self, reward: Utility) {
        self.visits += 1;
        self.rewards += reward;
    }
    pub(crate) fn take(&mut self, index: usize) -> Move<G> {
        self.pending.swap_remove(index)
    }
}

impl<G> std::fmt::Display for Node<G>
where
    G: Game,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({:.3} over {})",
            self.state.identifier(),
            self.mean(),
            self.visits
        )
    }
}
