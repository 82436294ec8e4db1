use crate::*;
use std::collections::BTreeMap;

/// One entry of a match history: a state and the assignment that produced it.
///
/// The first entry holds the initial state with nothing applied.
#[derive(Debug, Clone)]
pub struct Ply<G>
where
    G: Game,
{
    state: G,
    actions: Actions<G>,
    haps: Haps<G>,
}

impl<G> Ply<G>
where
    G: Game,
{
    pub fn root(state: G) -> Self {
        Self {
            state,
            actions: BTreeMap::new(),
            haps: BTreeMap::new(),
        }
    }
    pub fn new(state: G, actions: Actions<G>, haps: Haps<G>) -> Self {
        Self {
            state,
            actions,
            haps,
        }
    }
    pub fn state(&self) -> &G {
        &self.state
    }
    pub fn actions(&self) -> &Actions<G> {
        &self.actions
    }
    pub fn haps(&self) -> &Haps<G> {
        &self.haps
    }
}
