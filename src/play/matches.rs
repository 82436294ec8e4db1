use crate::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::sync::mpsc::*;

/// One game played from an initial state to the end.
///
/// Each ply the match first realizes pending aleatories, through a
/// registered [`Resolver`] or by sampling, then stops if the state is terminal,
/// and otherwise asks every active role's player for a decision on that
/// role's view. Decisions are requested concurrently and gathered as they
/// arrive; once all are in and legal, the successor is computed and appended
/// to the history.
///
/// Any failure aborts the match. The history recorded up to that point stays
/// available.
pub struct Match<G>
where
    G: Game,
{
    id: ID<Self>,
    phase: Phase,
    history: Vec<Ply<G>>,
    players: BTreeMap<G::R, Box<dyn Player<G>>>,
    resolvers: BTreeMap<String, Box<dyn Resolver<G>>>,
    table: Table<G>,
    quit: Arc<Notify>,
    rng: SmallRng,
}

impl<G> Match<G>
where
    G: Game,
{
    /// Fails with [`Error::MissingPlayer`] unless every role has a player.
    pub fn new<I>(game: G, players: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (G::R, Box<dyn Player<G>>)>,
    {
        let players = players.into_iter().collect::<BTreeMap<_, _>>();
        if let Some(role) = game.roles().into_iter().find(|r| !players.contains_key(r)) {
            return Err(Error::MissingPlayer(role.to_string()));
        }
        Ok(Self {
            id: ID::default(),
            phase: Phase::Idle,
            history: vec![Ply::root(game)],
            players,
            resolvers: BTreeMap::new(),
            table: Table::default(),
            quit: Arc::new(Notify::new()),
            rng: SmallRng::from_rng(&mut rand::rng()),
        })
    }
    /// Sample unresolved aleatories from a seeded generator.
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }
    /// Ask `resolver` for the value of every aleatory called `name`.
    pub fn resolve_with<S>(mut self, name: S, resolver: Box<dyn Resolver<G>>) -> Self
    where
        S: Into<String>,
    {
        self.resolvers.insert(name.into(), resolver);
        self
    }
    /// A stream of every broadcast event of this match.
    pub fn spectate(&mut self) -> UnboundedReceiver<Event<G>> {
        let (tx, rx) = unbounded_channel();
        self.table.watch(tx);
        rx
    }
    pub fn quitter(&self) -> Quitter {
        Quitter::from(self.quit.clone())
    }

    pub fn id(&self) -> ID<Self> {
        self.id
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn history(&self) -> &[Ply<G>] {
        &self.history
    }
    /// Number of transitions applied so far.
    pub fn ply(&self) -> usize {
        self.history.len() - 1
    }
    pub fn state(&self) -> &G {
        self.history
            .last()
            .map(Ply::state)
            .unwrap_or_else(|| unreachable!("history starts with the initial state"))
    }
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }
    /// Result of the final state, once the match is over.
    pub fn result(&self) -> Option<Payoff<G>> {
        self.state().result()
    }
}

impl<G> Match<G>
where
    G: Game,
{
    /// Play until the game ends and return its result.
    pub async fn run(&mut self) -> Result<Payoff<G>, Error> {
        if let Some(result) = self.is_finished().then(|| self.result()).flatten() {
            return Ok(result);
        }
        let (tx, mut rx) = unbounded_channel();
        self.seat(tx);
        log::info!("[match {}] begin with {} players", self.id, self.table.seats());
        self.table.broadcast(Event::Begin {
            game: self.state().clone(),
        });
        let outcome = self.play(&mut rx).await;
        match outcome {
            Ok(ref result) => {
                log::info!("[match {}] over after {} plies", self.id, self.ply());
                self.table.broadcast(Event::End {
                    game: self.state().clone(),
                    result: result.clone(),
                });
            }
            Err(ref error) => {
                log::warn!("[match {}] aborted at ply {}: {}", self.id, self.ply(), error);
                self.table.broadcast(Event::Abort {
                    ply: self.ply(),
                    error: error.clone(),
                });
            }
        }
        self.table.clear();
        outcome
    }

    fn seat(&mut self, tx: UnboundedSender<Answer<G>>) {
        let root = self.state().clone();
        for (role, mut player) in std::mem::take(&mut self.players) {
            if let Some(substitute) = player.participate(self.id, &root, role) {
                log::debug!("[match {}] {} handed over its seat", self.id, role);
                player = substitute;
            }
            self.table.sit(role, Actor::spawn(role, player, tx.clone()));
        }
    }

    async fn play(&mut self, rx: &mut UnboundedReceiver<Answer<G>>) -> Result<Payoff<G>, Error> {
        loop {
            let state = self.state().clone();
            let haps = match state.is_contingent() {
                true => {
                    self.phase = Phase::AwaitingAleatories;
                    self.resolve(&state).await?
                }
                false => BTreeMap::new(),
            };
            if let Some(result) = state.result() {
                self.phase = Phase::Finished;
                return Ok(result);
            }
            self.phase = Phase::AwaitingDecisions;
            let actions = self.decisions(&state, rx).await?;
            self.phase = Phase::Advancing;
            let next = state.next(&actions, &haps)?;
            self.history.push(Ply::new(next.clone(), actions.clone(), haps.clone()));
            log::debug!("[match {}] ply {} reached {}", self.id, self.ply(), next.identifier());
            self.table.broadcast(Event::Advance {
                ply: self.ply(),
                game: next,
                actions,
                haps,
            });
        }
    }

    async fn resolve(&mut self, state: &G) -> Result<Haps<G>, Error> {
        let ply = self.ply();
        let quit = self.quit.clone();
        let mut haps = BTreeMap::new();
        for (name, aleatory) in state.aleatories().unwrap_or_default() {
            let value = match self.resolvers.get_mut(&name) {
                None => aleatory.sample(&name, &mut self.rng)?,
                Some(resolver) => {
                    let value = tokio::select! {
                        biased;
                        _ = quit.notified() => return Err(Error::Aborted { ply }),
                        value = resolver.resolve(state, &name, &aleatory) => value?,
                    };
                    if aleatory.probability(&value) <= 0. {
                        return Err(Error::decision(&name, &value));
                    }
                    value
                }
            };
            log::trace!("[match {}] {} resolved to {:?}", self.id, name, value);
            haps.insert(name, value);
        }
        Ok(haps)
    }

    async fn decisions(
        &mut self,
        state: &G,
        rx: &mut UnboundedReceiver<Answer<G>>,
    ) -> Result<Actions<G>, Error> {
        let ply = self.ply();
        let active = state.active();
        let stuck = active.is_empty() && !state.is_contingent();
        if stuck || active.iter().any(|r| state.legal(*r).is_empty()) {
            return Err(Error::NoLegalActions(state.identifier()));
        }
        for role in active.iter().copied() {
            self.table.unicast(
                role,
                Event::Decision {
                    ply,
                    role,
                    view: state.view(role),
                },
            )?;
        }
        let quit = self.quit.clone();
        let mut actions = BTreeMap::new();
        while actions.len() < active.len() {
            let answer = tokio::select! {
                biased;
                _ = quit.notified() => return Err(Error::Aborted { ply }),
                answer = rx.recv() => answer,
            };
            let Some(answer) = answer else {
                return Err(Error::Disconnected(format!("{:?}", active)));
            };
            if answer.ply != ply || !active.contains(&answer.role) {
                log::debug!("[match {}] discarding stale answer of {}", self.id, answer.role);
                continue;
            }
            let action = answer.action?;
            if !state.legal(answer.role).contains(&action) {
                return Err(Error::decision(answer.role, &action));
            }
            actions.insert(answer.role, action);
        }
        Ok(actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn seated<G, A>(game: &G, agent: impl Fn() -> A) -> Vec<(G::R, Box<dyn Player<G>>)>
    where
        G: Game,
        A: Agent<G> + 'static,
    {
        game.roles()
            .into_iter()
            .map(|r| (r, Box::new(agent()) as Box<dyn Player<G>>))
            .collect()
    }

    /// Always answers with the same action, legal or not.
    struct Stubborn(u8, SmallRng);
    impl Agent<Predefined> for Stubborn {
        fn rng(&mut self) -> &mut SmallRng {
            &mut self.1
        }
        fn state_evaluation(&mut self, _: &Predefined, _: char) -> Result<Utility, Error> {
            Ok(0.)
        }
        fn decision(&mut self, _: &Predefined, _: char) -> Result<u8, Error> {
            Ok(self.0)
        }
    }

    /// Never answers.
    struct Stalling;
    #[async_trait::async_trait]
    impl Player<Predefined> for Stalling {
        async fn decide(&mut self, _: &Predefined, _: char) -> Result<u8, Error> {
            std::future::pending().await
        }
    }

    /// Panics when asked to decide.
    struct Panicking;
    #[async_trait::async_trait]
    impl Player<Predefined> for Panicking {
        async fn decide(&mut self, _: &Predefined, _: char) -> Result<u8, Error> {
            panic!("player crashed")
        }
    }

    /// Never resolves the aleatory it is asked about.
    struct Silent;
    #[async_trait::async_trait]
    impl Resolver<Guess> for Silent {
        async fn resolve(&mut self, _: &Guess, _: &str, _: &Aleatory<u8>) -> Result<u8, Error> {
            std::future::pending().await
        }
    }

    /// Remembers the match it was invited to and sends a random agent instead.
    struct Absent(Arc<Mutex<Option<ID<Match<Predefined>>>>>);
    #[async_trait::async_trait]
    impl Player<Predefined> for Absent {
        async fn decide(&mut self, _: &Predefined, _: char) -> Result<u8, Error> {
            std::future::pending().await
        }
        fn participate(
            &mut self,
            id: ID<Match<Predefined>>,
            root: &Predefined,
            _: char,
        ) -> Option<Box<dyn Player<Predefined>>> {
            assert!(root.path().is_empty());
            *self.0.lock().unwrap() = Some(id);
            Some(Box::new(RandomAgent::seeded(9)))
        }
    }

    /// Records whether the secret was visible when asked to guess.
    struct Peeking(Arc<Mutex<Vec<Option<u8>>>>, SmallRng);
    impl Agent<Guess> for Peeking {
        fn rng(&mut self) -> &mut SmallRng {
            &mut self.1
        }
        fn state_evaluation(&mut self, _: &Guess, _: Side) -> Result<Utility, Error> {
            Ok(0.)
        }
        fn decision(&mut self, view: &Guess, role: Side) -> Result<u8, Error> {
            if role == Side::Seeker {
                self.0.lock().unwrap().push(view.secret());
            }
            Ok(1)
        }
    }

    #[tokio::test]
    async fn plays_to_the_end() {
        let game = DiceBet::new(5);
        let mut m = Match::new(game.clone(), seated(&game, RandomAgent::default))
            .unwrap()
            .seed(3);
        let result = m.run().await.unwrap();
        assert!(m.is_finished());
        assert_eq!(m.phase(), Phase::Finished);
        assert_eq!(m.history().len(), 6);
        assert_eq!(Some(result.clone()), m.result());
        assert_eq!(result[&Bettor], m.state().points() as Utility);
        for pair in m.history().windows(2) {
            let replayed = pair[0].state().next(pair[1].actions(), pair[1].haps()).unwrap();
            assert_eq!(&replayed, pair[1].state());
        }
        assert_eq!(m.run().await, Ok(result));
    }
    #[tokio::test]
    async fn missing_players_are_rejected() {
        let game = Predefined::constant(vec![1., -1.], 2, 2);
        let only = vec![('A', Box::new(RandomAgent::default()) as Box<dyn Player<Predefined>>)];
        assert_eq!(
            Match::new(game, only).err(),
            Some(Error::MissingPlayer("B".into()))
        );
    }
    #[tokio::test]
    async fn illegal_decisions_abort_with_history_intact() {
        let game = Predefined::constant(vec![1., -1.], 4, 2);
        let players: Vec<(char, Box<dyn Player<Predefined>>)> = vec![
            ('A', Box::new(RandomAgent::seeded(1))),
            ('B', Box::new(Stubborn(7, SmallRng::seed_from_u64(0)))),
        ];
        let mut m = Match::new(game, players).unwrap();
        let mut events = m.spectate();
        let outcome = m.run().await;
        assert!(matches!(outcome, Err(Error::InvalidDecision { .. })));
        assert_eq!(m.history().len(), 2);
        assert_eq!(m.phase(), Phase::AwaitingDecisions);
        assert!(m.result().is_none());
        let mut last = None;
        while let Ok(event) = events.try_recv() {
            last = Some(event);
        }
        assert!(matches!(last, Some(Event::Abort { ply: 1, .. })));
    }
    #[tokio::test]
    async fn spectators_see_every_ply() {
        let game = Predefined::constant(vec![1., -1.], 3, 2);
        let mut m = Match::new(game.clone(), seated(&game, RandomAgent::default)).unwrap();
        let mut events = m.spectate();
        m.run().await.unwrap();
        let mut seen = Vec::new();
        while let Ok(event) = events.try_recv() {
            seen.push(event);
        }
        assert_eq!(seen.len(), 5);
        assert!(matches!(seen[0], Event::Begin { .. }));
        assert!(seen[1..4].iter().all(|e| matches!(e, Event::Advance { .. })));
        assert_eq!(seen.iter().filter_map(Event::ply).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(seen[4].is_final());
    }
    #[tokio::test]
    async fn resolvers_override_sampling() {
        let game = Guess::drawn([0.2, 0.3, 0.5]);
        let mut m = Match::new(game.clone(), seated(&game, RandomAgent::default))
            .unwrap()
            .resolve_with(Guess::SECRET, Box::new(|_: &Guess, _: &Aleatory<u8>| 2u8));
        m.run().await.unwrap();
        assert_eq!(m.history()[1].haps()[Guess::SECRET], 2);
        assert_eq!(m.history()[1].state().secret(), Some(2));
    }
    #[tokio::test]
    async fn unsupported_resolutions_abort() {
        let game = Guess::drawn([0.5, 0.5, 0.]);
        let mut m = Match::new(game.clone(), seated(&game, RandomAgent::default))
            .unwrap()
            .resolve_with(Guess::SECRET, Box::new(|_: &Guess, _: &Aleatory<u8>| 3u8));
        assert!(matches!(m.run().await, Err(Error::InvalidDecision { .. })));
        assert_eq!(m.phase(), Phase::AwaitingAleatories);
        assert_eq!(m.history().len(), 1);
    }
    #[tokio::test]
    async fn seekers_only_see_their_view() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let game = Guess::hidden();
        let mut m = Match::new(
            game.clone(),
            seated(&game, || Peeking(seen.clone(), SmallRng::seed_from_u64(0))),
        )
        .unwrap();
        let result = m.run().await.unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![None]);
        assert_eq!(result[&Side::Seeker], 1.);
        assert_eq!(m.state().secret(), Some(1));
    }
    #[tokio::test]
    async fn quitting_aborts_pending_decisions() {
        let game = Predefined::constant(vec![1., -1.], 2, 2);
        let players: Vec<(char, Box<dyn Player<Predefined>>)> =
            vec![('A', Box::new(Stalling)), ('B', Box::new(Stalling))];
        let mut m = Match::new(game, players).unwrap();
        m.quitter().quit();
        assert_eq!(m.run().await, Err(Error::Aborted { ply: 0 }));
        assert_eq!(m.history().len(), 1);
    }
    #[tokio::test]
    async fn simultaneous_decisions_are_gathered() {
        let game = Rps::default();
        let mut m = Match::new(game.clone(), seated(&game, RandomAgent::default)).unwrap();
        let result = m.run().await.unwrap();
        assert_eq!(m.history().len(), 2);
        assert_eq!(m.history()[1].actions().len(), 2);
        assert!(m.state().is_zero_sum());
        assert_eq!(result[&Hand::First], -result[&Hand::Second]);
    }
    #[tokio::test]
    async fn quitting_aborts_pending_resolvers() {
        let game = Guess::drawn([0.2, 0.3, 0.5]);
        let mut m = Match::new(game.clone(), seated(&game, RandomAgent::default))
            .unwrap()
            .resolve_with(Guess::SECRET, Box::new(Silent));
        m.quitter().quit();
        assert_eq!(m.run().await, Err(Error::Aborted { ply: 0 }));
        assert_eq!(m.phase(), Phase::AwaitingAleatories);
        assert_eq!(m.history().len(), 1);
    }
    #[tokio::test]
    async fn crashed_players_disconnect() {
        let game = Predefined::constant(vec![1., -1.], 2, 2);
        let players: Vec<(char, Box<dyn Player<Predefined>>)> = vec![
            ('A', Box::new(Panicking)),
            ('B', Box::new(RandomAgent::seeded(2))),
        ];
        let mut m = Match::new(game, players).unwrap();
        assert_eq!(m.run().await, Err(Error::Disconnected("A".into())));
        assert_eq!(m.phase(), Phase::AwaitingDecisions);
        assert_eq!(m.history().len(), 1);
    }
    #[tokio::test]
    async fn malformed_states_abort_with_no_legal_actions() {
        let game = Broken::empty(1);
        let mut m = Match::new(game.clone(), seated(&game, RandomAgent::default)).unwrap();
        assert!(matches!(m.run().await, Err(Error::NoLegalActions(_))));
        assert_eq!(m.phase(), Phase::AwaitingDecisions);
        assert_eq!(m.history().len(), 2);
        assert!(m.result().is_none());
    }
    #[tokio::test]
    async fn failed_transitions_abort_with_history_intact() {
        let game = Broken::rejecting(2);
        let mut m = Match::new(game.clone(), seated(&game, RandomAgent::default)).unwrap();
        let mut events = m.spectate();
        assert!(matches!(m.run().await, Err(Error::InvalidTransition(_))));
        assert_eq!(m.phase(), Phase::Advancing);
        assert_eq!(m.history().len(), 3);
        for pair in m.history().windows(2) {
            let replayed = pair[0].state().next(pair[1].actions(), pair[1].haps()).unwrap();
            assert_eq!(replayed.identifier(), pair[1].state().identifier());
        }
        let mut last = None;
        while let Ok(event) = events.try_recv() {
            last = Some(event);
        }
        assert!(matches!(last, Some(Event::Abort { ply: 2, .. })));
    }
    #[tokio::test]
    async fn participants_may_hand_over_their_seat() {
        let invited = Arc::new(Mutex::new(None));
        let game = Predefined::constant(vec![1., -1.], 2, 2);
        let players: Vec<(char, Box<dyn Player<Predefined>>)> = vec![
            ('A', Box::new(Absent(invited.clone()))),
            ('B', Box::new(RandomAgent::seeded(3))),
        ];
        let mut m = Match::new(game, players).unwrap();
        let result = m.run().await.unwrap();
        assert_eq!(result[&'A'], 1.);
        assert_eq!(*invited.lock().unwrap(), Some(m.id()));
    }
}
