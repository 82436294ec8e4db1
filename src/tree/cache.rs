use crate::*;
use std::collections::HashMap;
use std::sync::Arc;

/// A complete assignment out of a state, the probability of its haps, and the
/// state it leads to.
pub type Branch<G> = (Move<G>, Probability, G);

/// Every branch out of `game`, in enumeration order.
pub fn branches<G>(game: &G) -> Result<Vec<Branch<G>>, Error>
where
    G: Game,
{
    Transition::enumerate(game)?
        .into_iter()
        .map(|(t, p)| t.apply(game).map(|next| (t, p, next)))
        .collect()
}

/// Successors already computed during one decision, keyed by the identifier
/// of the state they come out of.
///
/// Transpositions reached along different paths share one entry. Built fresh
/// for each decision and dropped when it is made.
#[derive(Debug)]
pub struct Cache<G>
where
    G: Game,
{
    entries: HashMap<String, Arc<Vec<Branch<G>>>>,
    hits: usize,
}

impl<G> Default for Cache<G>
where
    G: Game,
{
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
        }
    }
}

impl<G> Cache<G>
where
    G: Game,
{
    pub fn new() -> Self {
        Self::default()
    }
    /// Branches out of `game`, computed once per identifier.
    pub fn branches(&mut self, game: &G) -> Result<Arc<Vec<Branch<G>>>, Error> {
        let id = game.identifier();
        if let Some(hit) = self.entries.get(&id) {
            self.hits += 1;
            return Ok(hit.clone());
        }
        let computed = Arc::new(branches(game)?);
        self.entries.insert(id, computed.clone());
        Ok(computed)
    }
    pub fn contains(&self, game: &G) -> bool {
        self.entries.contains_key(&game.identifier())
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn hits(&self) -> usize {
        self.hits
    }
}

/// Branches out of `game`, through the cache when there is one.
pub fn expand<G>(game: &G, cache: &mut Option<Cache<G>>) -> Result<Arc<Vec<Branch<G>>>, Error>
where
    G: Game,
{
    match cache {
        Some(cache) => cache.branches(game),
        None => branches(game).map(Arc::new),
    }
}
