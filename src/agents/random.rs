use crate::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

/// Picks a legal action uniformly at random.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: SmallRng,
}

impl RandomAgent {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }
}

impl<G> Agent<G> for RandomAgent
where
    G: Game,
{
    fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
    fn state_evaluation(&mut self, _: &G, _: G::R) -> Result<Utility, Error> {
        Ok(0.)
    }
    fn name(&self) -> String {
        "random".to_string()
    }
    fn decision(&mut self, game: &G, role: G::R) -> Result<G::A, Error> {
        options(game, role)?
            .choose(&mut self.rng)
            .cloned()
            .ok_or_else(|| Error::NoLegalActions(game.identifier()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn covers_every_legal_action() {
        let game = Predefined::constant(vec![0., 0.], 1, 3);
        let mut agent = RandomAgent::seeded(11);
        let picks = (0..100)
            .map(|_| agent.decision(&game, 'A').unwrap())
            .collect::<std::collections::BTreeSet<_>>();
        assert_eq!(picks, [1, 2, 3].into_iter().collect());
    }
    #[test]
    fn terminal_states_have_no_decision() {
        let done = Predefined::constant(vec![0., 0.], 0, 3);
        let mut agent = RandomAgent::seeded(11);
        assert!(agent.decision(&done, 'A').is_err());
    }
}
