use super::recursion::vector;
use crate::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Max^n: every role maximizes its own coordinate of a value vector.
///
/// Generalizes [`Minimax`] past two roles and past zero-sum. The heuristic is
/// asked once per role at the horizon.
pub struct MaxN<G, H>
where
    G: Game,
{
    heuristic: H,
    horizon: usize,
    cached: bool,
    cache: Option<Cache<G>>,
    rng: SmallRng,
}

impl<G, H> MaxN<G, H>
where
    G: Game,
    H: Heuristic<G>,
{
    pub fn new(heuristic: H) -> Self {
        Self {
            heuristic,
            horizon: MINIMAX_HORIZON,
            cached: false,
            cache: None,
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }
    pub fn horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }
    pub fn cached(mut self, cached: bool) -> Self {
        self.cached = cached;
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }
    /// Value vector of `game` searched from `depth` down to the horizon.
    pub fn vector(&mut self, game: &G, depth: usize) -> Result<Payoff<G>, Error> {
        let heuristic = &self.heuristic;
        let leaf = |g: &G| heuristic.vector(g);
        vector(game, depth, self.horizon, &mut self.cache, &leaf)
    }
}

impl<G> Default for MaxN<G, Noise>
where
    G: Game,
{
    fn default() -> Self {
        Self::new(Noise)
    }
}

impl<G, H> Agent<G> for MaxN<G, H>
where
    G: Game,
    H: Heuristic<G>,
{
    fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
    fn name(&self) -> String {
        format!("maxn({})", self.horizon)
    }
    fn state_evaluation(&mut self, game: &G, role: G::R) -> Result<Utility, Error> {
        Ok(self.vector(game, 1)?.get(&role).copied().unwrap_or_default())
    }
    fn evaluate(&mut self, game: &G, role: G::R) -> Result<Vec<(G::A, Utility)>, Error> {
        self.cache = self.cached.then(Cache::new);
        let evaluated = options(game, role)?
            .into_iter()
            .map(|a| self.action_evaluation(game, role, &a).map(|u| (a, u)))
            .collect::<Result<Vec<_>, _>>();
        if let Some(cache) = self.cache.take() {
            log::trace!("[maxn] {} states cached, {} hits", cache.len(), cache.hits());
        }
        evaluated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    /// Each role scores the actions it took, the last role's count double.
    fn selfish(p: &[u8]) -> Vec<Utility> {
        (0..3)
            .map(|r| {
                let own = p.iter().skip(r).step_by(3).map(|a| *a as Utility).sum::<Utility>();
                if r == 2 { own * 2. } else { own }
            })
            .collect()
    }
    #[test]
    fn movers_maximize_their_own_coordinate() {
        let game = Predefined::scored(3, 3, 2, selfish);
        let mut agent = MaxN::new(Noise).horizon(5);
        let root = agent.vector(&game, 0).unwrap();
        assert_eq!(root, Payoff::<Predefined>::from([('A', 2.), ('B', 2.), ('C', 4.)]));
    }
    #[test]
    fn values_are_self_consistent() {
        let game = Predefined::scored(3, 4, 3, |p| {
            let total = p.iter().map(|a| *a as Utility).sum::<Utility>();
            vec![total, 10. - total, (p[0] as Utility) * (p[3] as Utility)]
        });
        let mut agent = MaxN::new(Noise).horizon(4);
        let root = agent.vector(&game, 0).unwrap();
        let children = game
            .legal('A')
            .into_iter()
            .map(|a| {
                let child = game
                    .next(&Actions::<Predefined>::from([('A', a)]), &Haps::<Predefined>::new())
                    .unwrap();
                agent.vector(&child, 1).unwrap()
            })
            .collect::<Vec<_>>();
        let best = children
            .iter()
            .map(|v| v[&'A'])
            .fold(Utility::NEG_INFINITY, Utility::max);
        assert_eq!(root[&'A'], best);
        assert!(children.contains(&root));
    }
    #[test]
    fn agent_follows_the_vector() {
        let game = Predefined::scored(3, 3, 2, selfish);
        let mut agent = MaxN::new(Noise).horizon(5).seed(9);
        assert_eq!(agent.decision(&game, 'A'), Ok(2));
    }
}
