use crate::*;
use std::collections::BTreeMap;
use tokio::sync::mpsc::UnboundedSender;

/// Channels from a match to the actors seated at it and to its spectators.
#[derive(Debug)]
pub struct Table<G>
where
    G: Game,
{
    seats: BTreeMap<G::R, UnboundedSender<Event<G>>>,
    spectators: Vec<UnboundedSender<Event<G>>>,
}

impl<G> Default for Table<G>
where
    G: Game,
{
    fn default() -> Self {
        Self {
            seats: BTreeMap::new(),
            spectators: Vec::new(),
        }
    }
}

impl<G> Table<G>
where
    G: Game,
{
    pub fn sit(&mut self, role: G::R, sender: UnboundedSender<Event<G>>) {
        self.seats.insert(role, sender);
    }
    pub fn watch(&mut self, sender: UnboundedSender<Event<G>>) {
        self.spectators.push(sender);
    }
    pub fn seats(&self) -> usize {
        self.seats.len()
    }
    pub fn is_seated(&self, role: G::R) -> bool {
        self.seats.contains_key(&role)
    }
    /// Close every channel to the actors, ending their tasks.
    pub fn clear(&mut self) {
        self.seats.clear();
    }
    /// Send an event to one role's actor. Fails if the actor is gone.
    pub fn unicast(&self, role: G::R, event: Event<G>) -> Result<(), Error> {
        log::trace!("[table] unicast to {}: {}", role, event);
        match self.seats.get(&role).map(|inbox| inbox.send(event)) {
            Some(Ok(())) => Ok(()),
            Some(Err(_)) => Err(Error::Disconnected(role.to_string())),
            None => Err(Error::Disconnected(role.to_string())),
        }
    }
    /// Send an event to every actor and spectator. Spectators that went away
    /// are dropped.
    pub fn broadcast(&mut self, event: Event<G>) {
        log::trace!("[table] broadcast: {}", event);
        for (role, inbox) in self.seats.iter() {
            if inbox.send(event.clone()).is_err() {
                log::warn!("[table] broadcast to {} failed", role);
            }
        }
        self.spectators
            .retain(|inbox| inbox.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;
    #[test]
    fn unicast_reaches_one_seat() {
        let mut table = Table::<Predefined>::default();
        let (a, mut ra) = unbounded_channel();
        let (b, mut rb) = unbounded_channel();
        table.sit('A', a);
        table.sit('B', b);
        assert_eq!(table.seats(), 2);
        let event = Event::Abort { ply: 0, error: Error::Aborted { ply: 0 } };
        assert_eq!(table.unicast('B', event.clone()), Ok(()));
        assert!(ra.try_recv().is_err());
        assert!(rb.try_recv().is_ok());
        drop(rb);
        assert_eq!(table.unicast('B', event.clone()), Err(Error::Disconnected("B".into())));
        assert_eq!(table.unicast('C', event), Err(Error::Disconnected("C".into())));
    }
    #[test]
    fn broadcast_drops_gone_spectators() {
        let mut table = Table::<Predefined>::default();
        let (a, mut ra) = unbounded_channel();
        let (s, rs) = unbounded_channel();
        table.sit('A', a);
        table.watch(s);
        drop(rs);
        table.broadcast(Event::Begin { game: Predefined::constant(vec![0.], 1, 1) });
        assert!(ra.try_recv().is_ok());
        assert!(table.spectators.is_empty());
        table.clear();
        assert!(!table.is_seated('A'));
    }
}
