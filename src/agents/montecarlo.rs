use crate::*;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::collections::BTreeMap;
use std::time::Duration;
use std::time::Instant;

/// Flat Monte Carlo: each legal action is scored by the average result of
/// playouts starting with it.
///
/// Every action gets the configured number of playouts, run in rounds over
/// the actions so a timecap leaves them with about as many each. Playouts
/// pick uniformly random transitions, or ask a guide agent for each active
/// role's action when one is set. A playout still running at the horizon is
/// scored by the heuristic.
pub struct MonteCarlo<G, H>
where
    G: Game,
{
    heuristic: H,
    simulations: usize,
    horizon: usize,
    timecap: Option<Duration>,
    guide: Option<Box<dyn Agent<G>>>,
    rng: SmallRng,
}

impl<G, H> MonteCarlo<G, H>
where
    G: Game,
    H: Heuristic<G>,
{
    pub fn new(heuristic: H) -> Self {
        Self {
            heuristic,
            simulations: MONTECARLO_SIMULATIONS,
            horizon: MONTECARLO_HORIZON,
            timecap: None,
            guide: None,
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }
    /// Playouts per candidate action, or per state in
    /// [`state_evaluation`](Agent::state_evaluation). At least one is run.
    pub fn simulations(mut self, simulations: usize) -> Self {
        self.simulations = simulations;
        self
    }
    pub fn horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }
    /// Stop simulating once this much time has passed, as long as every
    /// action has had one playout.
    pub fn timecap(mut self, timecap: Duration) -> Self {
        self.timecap = Some(timecap);
        self
    }
    /// Let another agent choose actions during playouts.
    pub fn guide(mut self, guide: Box<dyn Agent<G>>) -> Self {
        self.guide = Some(guide);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Play `game` out and return its result, or the heuristic vector if the
    /// horizon comes first.
    pub fn simulation(&mut self, game: &G) -> Result<Payoff<G>, Error> {
        let mut game = game.clone();
        for _ in 0..self.horizon {
            if let Some(result) = game.result() {
                return Ok(result);
            }
            let transition = match self.guide.as_mut() {
                None => Transition::sample(&game, &mut self.rng)?,
                Some(guide) => {
                    let mut actions = BTreeMap::new();
                    for role in game.active() {
                        actions.insert(role, guide.decision(&game.view(role), role)?);
                    }
                    let haps = Transition::realize(&game, &mut self.rng)?;
                    Transition::from((actions, haps))
                }
            };
            game = transition.apply(&game)?;
        }
        Ok(game.result().unwrap_or_else(|| self.heuristic.vector(&game)))
    }
}

impl<G> Default for MonteCarlo<G, Noise>
where
    G: Game,
{
    fn default() -> Self {
        Self::new(Noise)
    }
}

impl<G, H> Agent<G> for MonteCarlo<G, H>
where
    G: Game,
    H: Heuristic<G>,
{
    fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
    fn name(&self) -> String {
        format!("montecarlo({})", self.simulations)
    }
    /// Average result of `role` over the configured number of playouts.
    fn state_evaluation(&mut self, game: &G, role: G::R) -> Result<Utility, Error> {
        let n = self.simulations.max(1);
        let mut total = 0.;
        for _ in 0..n {
            total += self.simulation(game)?.get(&role).copied().unwrap_or_default();
        }
        Ok(total / n as Utility)
    }
    fn evaluate(&mut self, game: &G, role: G::R) -> Result<Vec<(G::A, Utility)>, Error> {
        let options = options(game, role)?;
        let n = options.len();
        let deadline = self.timecap.map(|cap| Instant::now() + cap);
        let mut sums = vec![(0., 0usize); n];
        'rounds: for round in 0..self.simulations.max(1) {
            for (k, action) in options.iter().enumerate() {
                if round > 0 && deadline.is_some_and(|d| Instant::now() >= d) {
                    break 'rounds;
                }
                let transition = Transition::sample_fixing(game, role, action, &mut self.rng)?;
                let next = transition.apply(game)?;
                sums[k].0 += self.simulation(&next)?.get(&role).copied().unwrap_or_default();
                sums[k].1 += 1;
            }
        }
        log::trace!(
            "[montecarlo] {} playouts over {} actions",
            sums.iter().map(|(_, c)| c).sum::<usize>(),
            n
        );
        Ok(options
            .into_iter()
            .zip(sums)
            .map(|(a, (total, count))| (a, total / count as Utility))
            .collect())
    }
}

/// Random transitions from `game` until it ends or `horizon` plies pass.
pub(crate) fn playout<G, X>(game: &G, horizon: usize, rng: &mut X) -> Result<G, Error>
where
    G: Game,
    X: Rng + ?Sized,
{
    let mut game = game.clone();
    for _ in 0..horizon {
        if game.is_terminal() {
            break;
        }
        game = Transition::sample(&game, rng)?.apply(&game)?;
    }
    Ok(game)
}
