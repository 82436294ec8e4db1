use super::recursion::vector;
use crate::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Depth-bounded Minimax for two-role zero-sum games.
///
/// At the horizon the heuristic is taken as the searcher's value and its
/// negation as everybody else's. Each mover maximizes its own coordinate,
/// which in a zero-sum game is the same as minimizing the searcher's.
pub struct Minimax<G, H>
where
    G: Game,
{
    heuristic: H,
    horizon: usize,
    cached: bool,
    cache: Option<Cache<G>>,
    rng: SmallRng,
}

impl<G, H> Minimax<G, H>
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
    /// Memoize successors within each decision.
    pub fn cached(mut self, cached: bool) -> Self {
        self.cached = cached;
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }
}

impl<G> Default for Minimax<G, Noise>
where
    G: Game,
{
    fn default() -> Self {
        Self::new(Noise)
    }
}

impl<G, H> Agent<G> for Minimax<G, H>
where
    G: Game,
    H: Heuristic<G>,
{
    fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
    fn name(&self) -> String {
        format!("minimax({})", self.horizon)
    }
    fn state_evaluation(&mut self, game: &G, role: G::R) -> Result<Utility, Error> {
        let heuristic = &self.heuristic;
        let leaf = |g: &G| -> Payoff<G> {
            let h = heuristic.evaluate(g, role);
            g.roles()
                .into_iter()
                .map(|r| (r, if r == role { h } else { -h }))
                .collect()
        };
        let value = vector(game, 1, self.horizon, &mut self.cache, &leaf)?;
        Ok(value.get(&role).copied().unwrap_or_default())
    }
    fn evaluate(&mut self, game: &G, role: G::R) -> Result<Vec<(G::A, Utility)>, Error> {
        self.cache = self.cached.then(Cache::new);
        let evaluated = options(game, role)?
            .into_iter()
            .map(|a| self.action_evaluation(game, role, &a).map(|u| (a, u)))
            .collect::<Result<Vec<_>, _>>();
        if let Some(cache) = self.cache.take() {
            log::trace!("[minimax] {} states cached, {} hits", cache.len(), cache.hits());
        }
        evaluated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn full_depth_reaches_the_result() {
        let game = Predefined::constant(vec![1., -1.], 5, 2);
        let mut agent = Minimax::new(Noise).horizon(5).seed(1);
        for (_, u) in agent.evaluate(&game, 'A').unwrap() {
            assert_eq!(u, 1.);
        }
        let reply = game
            .next(&Actions::<Predefined>::from([('A', 1)]), &Haps::<Predefined>::new())
            .unwrap();
        for (_, u) in agent.evaluate(&reply, 'B').unwrap() {
            assert_eq!(u, -1.);
        }
    }
    #[test]
    fn avoids_refutable_lines() {
        // A wins only by playing 2 then 2, but B moves in between and can
        // always refute a first move of 1.
        let game = Predefined::scored(2, 3, 2, |p| match p {
            [2, _, 2] => vec![1., -1.],
            [1, 1, _] => vec![1., -1.],
            _ => vec![-1., 1.],
        });
        let mut agent = Minimax::new(Noise).horizon(3).seed(7);
        for _ in 0..10 {
            assert_eq!(agent.decision(&game, 'A'), Ok(2));
        }
    }
    #[test]
    fn caching_is_transparent() {
        let game = Predefined::scored(2, 4, 3, |p| {
            let u = p.iter().map(|a| *a as Utility).sum::<Utility>() - 8.;
            vec![u, -u]
        });
        let zero = |_: &Predefined, _: char| 0.;
        let plain = Minimax::new(zero).horizon(4).evaluate(&game, 'A').unwrap();
        let cached = Minimax::new(zero)
            .horizon(4)
            .cached(true)
            .evaluate(&game, 'A')
            .unwrap();
        assert_eq!(plain, cached);
    }
    #[test]
    fn shallow_search_still_decides() {
        let game = Predefined::constant(vec![1., -1.], 8, 3);
        for horizon in [0, 1, 2] {
            let mut agent = Minimax::default().horizon(horizon);
            assert!(game.legal('A').contains(&agent.decision(&game, 'A').unwrap()));
        }
    }
}
