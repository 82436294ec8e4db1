use crate::*;
use std::collections::BTreeMap;

/// Branches grouped by the action assignment they share, each group holding
/// the probability weighted successors its haps lead to.
fn grouped<G>(branches: &[Branch<G>]) -> Vec<(&Actions<G>, Vec<(Probability, &G)>)>
where
    G: Game,
{
    let mut groups = BTreeMap::<&Actions<G>, Vec<(Probability, &G)>>::new();
    for (transition, p, next) in branches.iter() {
        groups
            .entry(transition.actions())
            .or_default()
            .push((*p, next));
    }
    groups.into_iter().collect()
}

/// Depth reached by the successors of `game`. Pure chance nodes are free.
fn deeper<G>(game: &G, depth: usize) -> usize
where
    G: Game,
{
    if game.active().is_empty() {
        depth
    } else {
        depth + 1
    }
}

fn accumulate<G>(total: &mut Payoff<G>, value: &Payoff<G>, weight: Probability)
where
    G: Game,
{
    for (role, u) in value.iter() {
        *total.entry(*role).or_default() += weight * u;
    }
}

/// Depth-bounded value of `game`, one coordinate per role.
///
/// Terminal states are worth their result and states at the horizon whatever
/// `leaf` says. Below that:
/// - aleatories are expectation nodes weighted by hap probability
/// - a single active role picks the child maximizing its own coordinate,
///   keeping the first among equals
/// - several active roles average uniformly over their joint assignments
pub(crate) fn vector<G, L>(
    game: &G,
    depth: usize,
    horizon: usize,
    cache: &mut Option<Cache<G>>,
    leaf: &L,
) -> Result<Payoff<G>, Error>
where
    G: Game,
    L: Fn(&G) -> Payoff<G>,
{
    if let Some(result) = game.result() {
        return Ok(result);
    }
    if depth >= horizon {
        return Ok(leaf(game));
    }
    let next = deeper(game, depth);
    let branches = expand(game, cache)?;
    let mut values = Vec::new();
    for (_, outcomes) in grouped(&branches) {
        let mut value = Payoff::<G>::new();
        for (p, child) in outcomes {
            accumulate::<G>(&mut value, &vector(child, next, horizon, cache, leaf)?, p);
        }
        values.push(value);
    }
    match game.active().as_slice() {
        [mover] => {
            let mut chosen: Option<Payoff<G>> = None;
            for value in values {
                let u = value.get(mover).copied().unwrap_or_default();
                match chosen.as_ref() {
                    Some(best) if best.get(mover).copied().unwrap_or_default() >= u => {}
                    _ => chosen = Some(value),
                }
            }
            chosen.ok_or_else(|| Error::NoLegalActions(game.identifier()))
        }
        _ => {
            let share = 1. / values.len() as Probability;
            let mut total = Payoff::<G>::new();
            for value in values.iter() {
                accumulate::<G>(&mut total, value, share);
            }
            Ok(total)
        }
    }
}

/// Depth-bounded value of `game` for `me`, pruned with an `(alpha, beta)`
/// window.
///
/// Only nodes with a single active role prune: `me` maximizes, anybody else
/// minimizes. Chance and simultaneous nodes average their children, each
/// searched with the full window.
#[allow(clippy::too_many_arguments)]
pub(crate) fn bounded<G, H>(
    game: &G,
    me: G::R,
    depth: usize,
    horizon: usize,
    mut alpha: Utility,
    mut beta: Utility,
    cache: &mut Option<Cache<G>>,
    heuristic: &H,
) -> Result<Utility, Error>
where
    G: Game,
    H: Heuristic<G>,
{
    if let Some(result) = game.result() {
        return Ok(result.get(&me).copied().unwrap_or_default());
    }
    if depth >= horizon {
        return Ok(heuristic.evaluate(game, me));
    }
    let next = deeper(game, depth);
    let branches = expand(game, cache)?;
    let groups = grouped(&branches);
    match game.active().as_slice() {
        [mover] => {
            let maximizing = *mover == me;
            let mut value = if maximizing {
                Utility::NEG_INFINITY
            } else {
                Utility::INFINITY
            };
            for (_, outcomes) in groups {
                let u = match outcomes.as_slice() {
                    [(_, child)] => bounded(*child, me, next, horizon, alpha, beta, cache, heuristic)?,
                    _ => expectation(&outcomes, me, next, horizon, cache, heuristic)?,
                };
                if maximizing {
                    value = value.max(u);
                    alpha = alpha.max(value);
                } else {
                    value = value.min(u);
                    beta = beta.min(value);
                }
                if beta <= alpha {
                    break;
                }
            }
            Ok(value)
        }
        _ => {
            let share = 1. / groups.len() as Probability;
            let mut total = 0.;
            for (_, outcomes) in groups.iter() {
                total += share * expectation(outcomes, me, next, horizon, cache, heuristic)?;
            }
            Ok(total)
        }
    }
}

fn expectation<G, H>(
    outcomes: &[(Probability, &G)],
    me: G::R,
    depth: usize,
    horizon: usize,
    cache: &mut Option<Cache<G>>,
    heuristic: &H,
) -> Result<Utility, Error>
where
    G: Game,
    H: Heuristic<G>,
{
    let mut total = 0.;
    for (p, child) in outcomes.iter() {
        total += p * bounded(*child, me, depth, horizon, Utility::NEG_INFINITY, Utility::INFINITY, cache, heuristic)?;
    }
    Ok(total)
}
