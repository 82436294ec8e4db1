use super::montecarlo::playout;
use crate::*;
use petgraph::graph::NodeIndex;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::collections::BTreeMap;
use std::time::Duration;
use std::time::Instant;

/// Upper Confidence bounds applied to Trees.
///
/// Each decision grows a fresh [`Tree`] for a fixed number of iterations:
/// 1. descend from the root through fully expanded nodes, picking children by UCB1
/// 2. a node visited before gets one pending transition expanded into a child
/// 3. a random playout from there is scored for the searcher into [0, 1]
/// 4. the score is credited to every node on the way back up
///
/// The chosen action is the one whose root children collected the most visits.
///
/// Rewards are kept from the searcher's perspective. Where only the opponent
/// of a two-role game moves, UCB1 looks at `1 - mean` instead; with more roles
/// every mover is assumed to share the searcher's interest.
pub struct Uct<H> {
    heuristic: H,
    simulations: usize,
    horizon: usize,
    exploration: Utility,
    timecap: Option<Duration>,
    rng: SmallRng,
}

impl<H> Uct<H> {
    pub fn new(heuristic: H) -> Self {
        Self {
            heuristic,
            simulations: UCT_SIMULATIONS,
            horizon: MONTECARLO_HORIZON,
            exploration: UCT_EXPLORATION,
            timecap: None,
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }
    pub fn simulations(mut self, simulations: usize) -> Self {
        self.simulations = simulations;
        self
    }
    pub fn horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }
    pub fn exploration(mut self, exploration: Utility) -> Self {
        self.exploration = exploration;
        self
    }
    pub fn timecap(mut self, timecap: Duration) -> Self {
        self.timecap = Some(timecap);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Grow a search tree rooted at `game` on behalf of `role`.
    pub fn search<G>(&mut self, game: &G, role: G::R) -> Result<Tree<G>, Error>
    where
        G: Game,
        H: Heuristic<G>,
    {
        let deadline = self.timecap.map(|cap| Instant::now() + cap);
        let mut tree = Tree::new(game.clone())?;
        for _ in 0..self.simulations {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                break;
            }
            let mut index = self.selection(&tree, role)?;
            if tree.at(index).visits() > 0 && !tree.at(index).is_expanded() {
                index = tree.expand(index, &mut self.rng)?;
            }
            let reward = self.simulation(tree.at(index).state(), role)?;
            tree.backpropagate(index, (reward + 1.) / 2.);
        }
        log::trace!(
            "[uct] {} nodes, {} root visits",
            tree.len(),
            tree.at(tree.root()).visits()
        );
        Ok(tree)
    }

    /// Visits and mean reward per root action of `role`, summed over every
    /// child that action leads to.
    pub fn statistics<G>(tree: &Tree<G>, role: G::R) -> BTreeMap<G::A, (usize, Utility)>
    where
        G: Game,
    {
        let mut stats = BTreeMap::<G::A, (usize, Utility)>::new();
        for (child, transition) in tree.children(tree.root()) {
            if let Some(action) = transition.action(role) {
                let entry = stats.entry(action.clone()).or_default();
                entry.0 += tree.at(child).visits();
                entry.1 += tree.at(child).rewards();
            }
        }
        stats
            .into_iter()
            .map(|(a, (n, r))| (a, (n, if n > 0 { r / n as Utility } else { 0. })))
            .collect()
    }

    fn selection<G>(&mut self, tree: &Tree<G>, role: G::R) -> Result<NodeIndex, Error>
    where
        G: Game,
    {
        let mut index = tree.root();
        loop {
            let node = tree.at(index);
            if node.visits() == 0 || !node.is_expanded() || node.state().is_terminal() {
                return Ok(index);
            }
            match self.choose(tree, index, role)? {
                Some(child) => index = child,
                None => return Ok(index),
            }
        }
    }

    /// UCB1 among the children of a fully expanded node. Pending aleatories
    /// are sampled first and only children matching the sampled haps compete.
    fn choose<G>(&mut self, tree: &Tree<G>, index: NodeIndex, role: G::R) -> Result<Option<NodeIndex>, Error>
    where
        G: Game,
    {
        let node = tree.at(index);
        let state = node.state();
        let haps = Transition::realize(state, &mut self.rng)?;
        let children = tree.children(index);
        let matching = children
            .iter()
            .filter(|(_, t)| t.haps() == &haps)
            .map(|(child, _)| *child)
            .collect::<Vec<_>>();
        let candidates = match matching.is_empty() {
            true => children.iter().map(|(child, _)| *child).collect(),
            false => matching,
        };
        let flip = match state.active().as_slice() {
            [mover] => *mover != role && state.roles().len() == 2,
            _ => false,
        };
        let ln = (node.visits() as Utility).ln();
        let scored = candidates
            .into_iter()
            .map(|child| {
                let child_node = tree.at(child);
                let mean = child_node.mean();
                let exploit = if flip { 1. - mean } else { mean };
                let explore = self.exploration * (ln / child_node.visits().max(1) as Utility).sqrt();
                (child, exploit + explore)
            })
            .collect::<Vec<_>>();
        Ok(best(scored, &mut self.rng))
    }

    /// Searcher's payoff at the end of a random playout, in [-1, +1].
    fn simulation<G>(&mut self, game: &G, role: G::R) -> Result<Utility, Error>
    where
        G: Game,
        H: Heuristic<G>,
    {
        let end = playout(game, self.horizon, &mut self.rng)?;
        Ok(match end.normalized() {
            Some(result) => result.get(&role).copied().unwrap_or_default(),
            None => self.heuristic.evaluate(&end, role).clamp(-1., 1.),
        })
    }
}

impl Default for Uct<Noise> {
    fn default() -> Self {
        Self::new(Noise)
    }
}

impl<G, H> Agent<G> for Uct<H>
where
    G: Game,
    H: Heuristic<G>,
{
    fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
    fn name(&self) -> String {
        format!("uct({})", self.simulations)
    }
    /// Mean reward at the root, mapped back onto [-1, +1].
    fn state_evaluation(&mut self, game: &G, role: G::R) -> Result<Utility, Error> {
        if let Some(result) = game.normalized() {
            return Ok(result.get(&role).copied().unwrap_or_default());
        }
        let tree = self.search(game, role)?;
        Ok(tree.at(tree.root()).mean() * 2. - 1.)
    }
    /// Mean reward of each legal action over the root children it leads to.
    fn evaluate(&mut self, game: &G, role: G::R) -> Result<Vec<(G::A, Utility)>, Error> {
        let options = options(game, role)?;
        let tree = self.search(game, role)?;
        let stats = Self::statistics(&tree, role);
        Ok(options
            .into_iter()
            .map(|a| {
                let mean = stats.get(&a).map(|(_, m)| *m).unwrap_or(0.5);
                (a, mean * 2. - 1.)
            })
            .collect())
    }
    /// The legal action with the most root visits.
    fn decision(&mut self, game: &G, role: G::R) -> Result<G::A, Error> {
        let options = options(game, role)?;
        let tree = self.search(game, role)?;
        let stats = Self::statistics(&tree, role);
        let visited = options
            .into_iter()
            .map(|a| {
                let n = stats.get(&a).map(|(n, _)| *n).unwrap_or(0);
                (a, n as Utility)
            })
            .collect::<Vec<_>>();
        best(visited, &mut self.rng).ok_or_else(|| Error::NoLegalActions(game.identifier()))
    }
}
