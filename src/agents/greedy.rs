use crate::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// One-step lookahead: terminal successors score their result, every other
/// successor scores the heuristic.
pub struct HeuristicAgent<H> {
    heuristic: H,
    rng: SmallRng,
}

impl<H> HeuristicAgent<H> {
    pub fn new(heuristic: H) -> Self {
        Self {
            heuristic,
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }
}

impl<G, H> Agent<G> for HeuristicAgent<H>
where
    G: Game,
    H: Heuristic<G>,
{
    fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
    fn state_evaluation(&mut self, game: &G, role: G::R) -> Result<Utility, Error> {
        Ok(quiescent(game, role, &self.heuristic))
    }
    fn name(&self) -> String {
        "heuristic".to_string()
    }
}
