use crate::*;
use tokio::sync::mpsc::error::SendError;
use tokio::sync::mpsc::*;

/// A player's answer to one decision request.
#[derive(Debug)]
pub struct Answer<G>
where
    G: Game,
{
    pub role: G::R,
    pub ply: usize,
    pub action: Result<G::A, Error>,
}

/// Runs a [`Player`] in its own task.
///
/// - the match unicasts [`Event::Decision`] when the role has to act
/// - the actor calls [`Player::decide`] and sends an [`Answer`] back
/// - every event, decisions included, is forwarded to [`Player::notify`]
///
/// The task ends when the match drops its side of the channel. If it ends
/// any other way while a decision is pending, say the player panicked, the
/// match still gets an answer for that ply: [`Error::Disconnected`].
pub struct Actor<G>
where
    G: Game,
{
    role: G::R,
    player: Box<dyn Player<G>>,
    getter: UnboundedReceiver<Event<G>>,
    sender: UnboundedSender<Answer<G>>,
    pending: Option<usize>,
}

impl<G> Actor<G>
where
    G: Game,
{
    pub fn spawn(
        role: G::R,
        player: Box<dyn Player<G>>,
        sender: UnboundedSender<Answer<G>>,
    ) -> UnboundedSender<Event<G>> {
        let (tx, rx) = unbounded_channel();
        let actor = Self {
            role,
            player,
            sender,
            getter: rx,
            pending: None,
        };
        tokio::spawn(actor.run());
        tx
    }
    async fn run(mut self) {
        while let Some(event) = self.getter.recv().await {
            log::trace!("[actor {}] received {}", self.role, event);
            self.player.notify(&event).await;
            if let Event::Decision { ply, role, view } = event {
                if self.act(ply, role, &view).await.is_err() {
                    log::debug!("[actor {}] match is gone", self.role);
                    break;
                }
            }
        }
    }
    async fn act(&mut self, ply: usize, role: G::R, view: &G) -> Result<(), SendError<Answer<G>>> {
        log::trace!("[actor {}] deciding ply {}", self.role, ply);
        self.pending = Some(ply);
        let action = self.player.decide(view, role).await;
        self.pending = None;
        match action {
            Ok(ref a) => log::debug!("[actor {}] decided {:?}", self.role, a),
            Err(ref e) => log::warn!("[actor {}] failed to decide: {}", self.role, e),
        }
        self.sender.send(Answer { role, ply, action })
    }
}

impl<G> Drop for Actor<G>
where
    G: Game,
{
    fn drop(&mut self) {
        if let Some(ply) = self.pending.take() {
            log::warn!("[actor {}] player disconnected at ply {}", self.role, ply);
            let _ = self.sender.send(Answer {
                role: self.role,
                ply,
                action: Err(Error::Disconnected(self.role.to_string())),
            });
        }
    }
}
