use crate::*;
use rand::Rng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

/// The evaluation base every automatic player builds on.
///
/// Implementors only have to say how desirable a state is for a role. Actions
/// are worth the weighted average of the states they may lead to, averaging
/// uniformly over what the other active roles might do and by probability
/// over pending aleatories. The decision is drawn uniformly among the actions
/// tied for the best evaluation.
///
/// Search algorithms override [`evaluate`](Agent::evaluate) or
/// [`decision`](Agent::decision) when they can do better than one state
/// evaluation per successor.
pub trait Agent<G>: Send
where
    G: Game,
{
    /// Source of tie-breaking and sampling randomness.
    fn rng(&mut self) -> &mut SmallRng;

    /// Desirability of `game` for `role`.
    fn state_evaluation(&mut self, game: &G, role: G::R) -> Result<Utility, Error>;

    /// Short human readable name for logs and tallies.
    fn name(&self) -> String {
        let path = std::any::type_name::<Self>();
        let path = path.split('<').next().unwrap_or(path);
        path.rsplit("::").next().unwrap_or(path).to_string()
    }

    /// Weighted average of the evaluations of every successor in which `role`
    /// plays `action`.
    fn action_evaluation(&mut self, game: &G, role: G::R, action: &G::A) -> Result<Utility, Error> {
        let mut value = 0.;
        for (transition, weight) in Transition::fixing(game, role, action)? {
            let next = transition.apply(game)?;
            value += weight * self.state_evaluation(&next, role)?;
        }
        Ok(value)
    }

    /// Every legal action of `role`, paired with its evaluation.
    fn evaluate(&mut self, game: &G, role: G::R) -> Result<Vec<(G::A, Utility)>, Error> {
        options(game, role)?
            .into_iter()
            .map(|a| self.action_evaluation(game, role, &a).map(|u| (a, u)))
            .collect()
    }

    /// One of the best evaluated actions, ties broken at random.
    fn decision(&mut self, game: &G, role: G::R) -> Result<G::A, Error> {
        let evaluated = self.evaluate(game, role)?;
        best(evaluated, self.rng()).ok_or_else(|| Error::NoLegalActions(game.identifier()))
    }
}

/// Legal actions of `role`, failing when it has none.
pub fn options<G>(game: &G, role: G::R) -> Result<Vec<G::A>, Error>
where
    G: Game,
{
    match game.legal(role) {
        legal if legal.is_empty() => Err(Error::NoLegalActions(game.identifier())),
        legal => Ok(legal),
    }
}

/// Every entry tied with the maximum within [`TIE_EPSILON`].
pub fn maximal<A>(evaluated: Vec<(A, Utility)>) -> Vec<(A, Utility)> {
    let max = evaluated
        .iter()
        .map(|(_, u)| *u)
        .fold(Utility::NEG_INFINITY, Utility::max);
    evaluated
        .into_iter()
        .filter(|(_, u)| max - u <= TIE_EPSILON)
        .collect()
}

/// A uniformly random entry among the maximal ones.
pub fn best<A, X>(evaluated: Vec<(A, Utility)>, rng: &mut X) -> Option<A>
where
    A: Clone,
    X: Rng + ?Sized,
{
    maximal(evaluated).choose(rng).map(|(a, _)| a.clone())
}
