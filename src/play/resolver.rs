use crate::*;

/// External source for the value of a named aleatory.
///
/// Aleatories without a resolver are sampled by the match itself. Answers
/// outside the aleatory's support abort the match.
#[async_trait::async_trait]
pub trait Resolver<G>: Send
where
    G: Game,
{
    async fn resolve(&mut self, game: &G, name: &str, aleatory: &Aleatory<G::H>) -> Result<G::H, Error>;
}

#[async_trait::async_trait]
impl<G, F> Resolver<G> for F
where
    G: Game,
    F: FnMut(&G, &Aleatory<G::H>) -> G::H + Send,
{
    async fn resolve(&mut self, game: &G, _: &str, aleatory: &Aleatory<G::H>) -> Result<G::H, Error> {
        Ok(self(game, aleatory))
    }
}
