use super::recursion::bounded;
use crate::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Minimax with alpha-beta pruning.
///
/// Returns the same evaluations as [`Minimax`] with the same heuristic and
/// horizon while visiting fewer states. Every root action is searched with a
/// full window, so ties among root actions survive and are broken at random.
pub struct AlphaBeta<G, H>
where
    G: Game,
{
    heuristic: H,
    horizon: usize,
    cached: bool,
    cache: Option<Cache<G>>,
    rng: SmallRng,
}

impl<G, H> AlphaBeta<G, H>
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
}

impl<G> Default for AlphaBeta<G, Noise>
where
    G: Game,
{
    fn default() -> Self {
        Self::new(Noise)
    }
}

impl<G, H> Agent<G> for AlphaBeta<G, H>
where
    G: Game,
    H: Heuristic<G>,
{
    fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
    fn name(&self) -> String {
        format!("alphabeta({})", self.horizon)
    }
    fn state_evaluation(&mut self, game: &G, role: G::R) -> Result<Utility, Error> {
        bounded(
            game,
            role,
            1,
            self.horizon,
            Utility::NEG_INFINITY,
            Utility::INFINITY,
            &mut self.cache,
            &self.heuristic,
        )
    }
    fn evaluate(&mut self, game: &G, role: G::R) -> Result<Vec<(G::A, Utility)>, Error> {
        self.cache = self.cached.then(Cache::new);
        let evaluated = options(game, role)?
            .into_iter()
            .map(|a| self.action_evaluation(game, role, &a).map(|u| (a, u)))
            .collect::<Result<Vec<_>, _>>();
        if let Some(cache) = self.cache.take() {
            log::trace!("[alphabeta] {} states cached, {} hits", cache.len(), cache.hits());
        }
        evaluated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn weighted(p: &[u8]) -> Vec<Utility> {
        let u = p
            .iter()
            .enumerate()
            .map(|(i, a)| {
                let sign = if i % 2 == 0 { 1. } else { -1. };
                sign * (*a as Utility) * (i as Utility + 1.)
            })
            .sum::<Utility>();
        vec![u, -u]
    }
    fn depth(g: &Predefined, r: char) -> Utility {
        let sign = if r == 'A' { 1. } else { -1. };
        sign * g.path().iter().map(|a| *a as Utility).sum::<Utility>() / 10.
    }
    #[test]
    fn agrees_with_minimax() {
        let game = Predefined::scored(2, 5, 3, weighted);
        for horizon in 1..=5 {
            let mut minimax = Minimax::new(depth).horizon(horizon);
            let mut alphabeta = AlphaBeta::new(depth).horizon(horizon);
            assert_eq!(
                minimax.evaluate(&game, 'A').unwrap(),
                alphabeta.evaluate(&game, 'A').unwrap(),
                "horizon {}",
                horizon
            );
        }
    }
    #[test]
    fn agrees_under_chance() {
        let game = DiceBet::loaded(2, [0.3, 0.3, 0.1, 0.1, 0.1, 0.1]);
        let zero = |_: &DiceBet, _: Bettor| 0.;
        let mut minimax = Minimax::new(zero).horizon(3);
        let mut alphabeta = AlphaBeta::new(zero).horizon(3).cached(true);
        let a = minimax.evaluate(&game, Bettor).unwrap();
        let b = alphabeta.evaluate(&game, Bettor).unwrap();
        for ((x, u), (y, v)) in a.into_iter().zip(b) {
            assert_eq!(x, y);
            assert!((u - v).abs() < 1e-12);
        }
    }
    #[test]
    fn simultaneous_moves_average() {
        let game = Rps::default();
        let mut agent = AlphaBeta::new(|_: &Rps, _: Hand| 0.).horizon(2).seed(4);
        let evaluated = agent.evaluate(&game, Hand::First).unwrap();
        // rock: draw, -1, -2 / paper: +1, draw, -2 / scissors: +2, +2, draw
        let expected = [(Throw::Rock, -1.), (Throw::Paper, -1. / 3.), (Throw::Scissors, 4. / 3.)];
        for ((a, u), (b, v)) in evaluated.into_iter().zip(expected) {
            assert_eq!(a, b);
            assert!((u - v).abs() < 1e-12);
        }
        assert_eq!(agent.decision(&game, Hand::First), Ok(Throw::Scissors));
    }
}
