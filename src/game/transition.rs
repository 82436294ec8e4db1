use crate::*;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::BTreeMap;

/// A complete assignment for one transition: an action for every active role
/// and a realized value for every pending aleatory.
///
/// Ordered and hashable so it can key children in search trees.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transition<R, A, H>
where
    R: Role,
    A: Action,
    H: Hap,
{
    actions: BTreeMap<R, A>,
    haps: BTreeMap<String, H>,
}

impl<R, A, H> From<(BTreeMap<R, A>, BTreeMap<String, H>)> for Transition<R, A, H>
where
    R: Role,
    A: Action,
    H: Hap,
{
    fn from((actions, haps): (BTreeMap<R, A>, BTreeMap<String, H>)) -> Self {
        Self { actions, haps }
    }
}

impl<R, A, H> Transition<R, A, H>
where
    R: Role,
    A: Action,
    H: Hap,
{
    pub fn actions(&self) -> &BTreeMap<R, A> {
        &self.actions
    }
    pub fn haps(&self) -> &BTreeMap<String, H> {
        &self.haps
    }
    pub fn action(&self, role: R) -> Option<&A> {
        self.actions.get(&role)
    }
    /// Successor of `game` under this assignment.
    pub fn apply<G>(&self, game: &G) -> Result<G, Error>
    where
        G: Game<R = R, A = A, H = H>,
    {
        game.next(&self.actions, &self.haps)
    }
}

impl<R, A, H> Transition<R, A, H>
where
    R: Role,
    A: Action,
    H: Hap,
{
    /// Every complete assignment of a state, each weighted by the probability
    /// of its haps. Action combinations are choices, not chance, so they do not
    /// enter the weight. Terminal states have none.
    pub fn enumerate<G>(game: &G) -> Result<Vec<(Self, Probability)>, Error>
    where
        G: Game<R = R, A = A, H = H>,
    {
        if game.is_terminal() {
            return Ok(vec![]);
        }
        let joint = Self::joint(game)?;
        let haps = Self::chances(game)?;
        Ok(cross(&joint, &haps, 1.))
    }
    /// Every complete assignment in which `role` plays `action`.
    ///
    /// Weights average uniformly over the other roles' action combinations and
    /// by probability over the haps, so they add up to one.
    pub fn fixing<G>(game: &G, role: R, action: &A) -> Result<Vec<(Self, Probability)>, Error>
    where
        G: Game<R = R, A = A, H = H>,
    {
        if !game.legal(role).contains(action) {
            return Err(Error::decision(role, action));
        }
        let joint = Self::joint(game)?
            .into_iter()
            .filter(|actions| actions.get(&role) == Some(action))
            .collect::<Vec<_>>();
        let haps = Self::chances(game)?;
        let share = 1. / joint.len() as Probability;
        Ok(cross(&joint, &haps, share))
    }
    /// One assignment drawn at random: uniform legal actions, weighted haps.
    pub fn sample<G, X>(game: &G, rng: &mut X) -> Result<Self, Error>
    where
        G: Game<R = R, A = A, H = H>,
        X: Rng + ?Sized,
    {
        let mut actions = BTreeMap::new();
        for (role, legal) in game.actions().unwrap_or_default() {
            let action = legal
                .choose(rng)
                .cloned()
                .ok_or_else(|| Error::NoLegalActions(game.identifier()))?;
            actions.insert(role, action);
        }
        let haps = Self::realize(game, rng)?;
        Ok(Self { actions, haps })
    }
    /// Like [`sample`](Self::sample), with `role` held to `action`.
    pub fn sample_fixing<G, X>(game: &G, role: R, action: &A, rng: &mut X) -> Result<Self, Error>
    where
        G: Game<R = R, A = A, H = H>,
        X: Rng + ?Sized,
    {
        if !game.legal(role).contains(action) {
            return Err(Error::decision(role, action));
        }
        let mut sampled = Self::sample(game, rng)?;
        sampled.actions.insert(role, action.clone());
        Ok(sampled)
    }
    /// Realize every pending aleatory by sampling its distribution.
    pub fn realize<G, X>(game: &G, rng: &mut X) -> Result<BTreeMap<String, H>, Error>
    where
        G: Game<R = R, A = A, H = H>,
        X: Rng + ?Sized,
    {
        game.aleatories()
            .unwrap_or_default()
            .into_iter()
            .map(|(name, aleatory)| aleatory.sample(&name, rng).map(|h| (name, h)))
            .collect()
    }
    /// Every combination of actions of the active roles.
    pub fn joint<G>(game: &G) -> Result<Vec<BTreeMap<R, A>>, Error>
    where
        G: Game<R = R, A = A, H = H>,
    {
        let mut joint = vec![BTreeMap::new()];
        for (role, legal) in game.actions().unwrap_or_default() {
            if legal.is_empty() {
                return Err(Error::NoLegalActions(game.identifier()));
            }
            let mut grown = Vec::with_capacity(joint.len() * legal.len());
            for partial in joint.iter() {
                for action in legal.iter() {
                    let mut actions = partial.clone();
                    actions.insert(role, action.clone());
                    grown.push(actions);
                }
            }
            joint = grown;
        }
        if joint.first().is_some_and(BTreeMap::is_empty) && !game.is_contingent() {
            return Err(Error::NoLegalActions(game.identifier()));
        }
        Ok(joint)
    }
    /// Every combination of aleatory values, with its joint probability.
    pub fn chances<G>(game: &G) -> Result<Vec<(BTreeMap<String, H>, Probability)>, Error>
    where
        G: Game<R = R, A = A, H = H>,
    {
        let mut chances = vec![(BTreeMap::new(), 1.)];
        for (name, aleatory) in game.aleatories().unwrap_or_default() {
            aleatory.validate(&name)?;
            let mut grown = Vec::with_capacity(chances.len() * aleatory.distribution().len());
            for (partial, p) in chances.iter() {
                for (h, q) in aleatory.distribution() {
                    let mut haps = partial.clone();
                    haps.insert(name.clone(), h.clone());
                    grown.push((haps, p * q));
                }
            }
            chances = grown;
        }
        Ok(chances)
    }
}

fn cross<R, A, H>(
    joint: &[BTreeMap<R, A>],
    chances: &[(BTreeMap<String, H>, Probability)],
    share: Probability,
) -> Vec<(Transition<R, A, H>, Probability)>
where
    R: Role,
    A: Action,
    H: Hap,
{
    joint
        .iter()
        .flat_map(|actions| {
            chances.iter().map(move |(haps, p)| {
                let transition = Transition::from((actions.clone(), haps.clone()));
                (transition, p * share)
            })
        })
        .collect()
}
