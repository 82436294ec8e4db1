use crate::*;

/// Anything that can occupy a role in a [`Match`].
///
/// The match never hands a player the true state, only the role's
/// [`view`](Game::view) of it. Answers come back asynchronously, so players
/// may think in another thread, wait on a human or call out to the network.
///
/// Every [`Agent`] is a player.
#[async_trait::async_trait]
pub trait Player<G>: Send
where
    G: Game,
{
    /// Choose one of the legal actions of `role` in `view`.
    async fn decide(&mut self, view: &G, role: G::R) -> Result<G::A, Error>;

    /// Observe match events. Not needed to decide.
    async fn notify(&mut self, _: &Event<G>) {}

    /// Called once before the match identified by `id` begins from `root`.
    /// A player may prepare itself here, or hand its seat over to a
    /// substitute by returning one.
    fn participate(&mut self, _: ID<Match<G>>, _: &G, _: G::R) -> Option<Box<dyn Player<G>>> {
        None
    }
}

#[async_trait::async_trait]
impl<G, T> Player<G> for T
where
    G: Game,
    T: Agent<G>,
{
    async fn decide(&mut self, view: &G, role: G::R) -> Result<G::A, Error> {
        self.decision(view, role)
    }
}
