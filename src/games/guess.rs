use crate::*;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    Hider,
    Seeker,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A secret number in `1..=3`, then a guess at it.
///
/// The secret is either picked by the hider or drawn by chance. The seeker's
/// [`view`](Game::view) never contains it: the secret turns back into an
/// aleatory over every value the seeker cannot rule out, so the seeker acts
/// and the secret resolves in one and the same transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Guess {
    drawn: Option<[Probability; 3]>,
    secret: Option<u8>,
    guess: Option<u8>,
    masked: bool,
}

impl Guess {
    pub const SECRET: &'static str = "secret";

    /// The hider chooses the secret.
    pub fn hidden() -> Self {
        Self {
            drawn: None,
            secret: None,
            guess: None,
            masked: false,
        }
    }
    /// Chance draws the secret with the given weights; the hider only watches.
    pub fn drawn(weights: [Probability; 3]) -> Self {
        Self {
            drawn: Some(weights),
            ..Self::hidden()
        }
    }
    pub fn secret(&self) -> Option<u8> {
        self.secret
    }
    pub fn is_masked(&self) -> bool {
        self.masked
    }
    fn numbers() -> Vec<u8> {
        vec![1, 2, 3]
    }
    fn prior(&self) -> Aleatory<u8> {
        match self.drawn {
            Some(weights) => Aleatory::from(Self::numbers().into_iter().zip(weights).collect::<Vec<_>>()),
            None => Aleatory::uniform(Self::numbers()),
        }
    }
    fn pending(&self) -> bool {
        self.secret.is_none() && (self.masked || self.drawn.is_some())
    }
    fn mover(&self) -> Option<Side> {
        match (self.secret, self.guess) {
            (_, Some(_)) => None,
            (None, None) if self.masked => Some(Side::Seeker),
            (None, None) if self.drawn.is_some() => None,
            (None, None) => Some(Side::Hider),
            (Some(_), None) => Some(Side::Seeker),
        }
    }
    fn within(n: Option<&u8>) -> Option<u8> {
        n.copied().filter(|n| (1..=3).contains(n))
    }
}

impl Game for Guess {
    type R = Side;
    type A = u8;
    type H = u8;

    fn roles(&self) -> Vec<Side> {
        vec![Side::Hider, Side::Seeker]
    }
    fn actions(&self) -> Option<BTreeMap<Side, Vec<u8>>> {
        match (self.guess, self.mover()) {
            (Some(_), _) => None,
            (None, Some(side)) => Some(BTreeMap::from([(side, Self::numbers())])),
            (None, None) => Some(BTreeMap::new()),
        }
    }
    fn aleatories(&self) -> Option<BTreeMap<String, Aleatory<u8>>> {
        self.pending()
            .then(|| BTreeMap::from([(Self::SECRET.to_string(), self.prior())]))
    }
    fn result(&self) -> Option<BTreeMap<Side, Utility>> {
        self.guess.map(|g| {
            let u = if Some(g) == self.secret { 1. } else { -1. };
            BTreeMap::from([(Side::Hider, -u), (Side::Seeker, u)])
        })
    }
    fn next(&self, actions: &Actions<Self>, haps: &Haps<Self>) -> Result<Self, Error> {
        let invalid = || Error::InvalidTransition(format!("{:?} with {:?} {:?}", self, actions, haps));
        let mut next = self.clone();
        if self.pending() {
            next.secret = Some(Self::within(haps.get(Self::SECRET)).ok_or_else(invalid)?);
        }
        match self.mover() {
            Some(Side::Hider) if actions.len() == 1 => {
                next.secret = Some(Self::within(actions.get(&Side::Hider)).ok_or_else(invalid)?);
            }
            Some(Side::Seeker) if actions.len() == 1 => {
                next.guess = Some(Self::within(actions.get(&Side::Seeker)).ok_or_else(invalid)?);
                next.masked = false;
            }
            None if actions.is_empty() && self.pending() => {}
            _ => return Err(invalid()),
        }
        Ok(next)
    }
    fn identifier(&self) -> String {
        let show = |n: Option<u8>| n.map(|n| n.to_string()).unwrap_or("_".into());
        let mask = if self.masked { "?" } else { "" };
        format!("{}{}/{}", mask, show(self.secret), show(self.guess))
    }
    fn view(&self, role: Side) -> Self {
        match (role, self.secret, self.guess) {
            (Side::Seeker, Some(_), None) => Self {
                secret: None,
                masked: true,
                ..self.clone()
            },
            _ => self.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn act(game: &Guess, side: Side, n: u8) -> Guess {
        game.next(&BTreeMap::from([(side, n)]), &BTreeMap::new())
            .unwrap()
    }
    #[test]
    fn seeker_never_sees_the_secret() {
        let hid = act(&Guess::hidden(), Side::Hider, 2);
        assert_eq!(hid.secret(), Some(2));
        let view = hid.view(Side::Seeker);
        assert_eq!(view.secret(), None);
        assert!(view.is_masked());
        assert!(view.is_contingent());
        assert_eq!(view.active(), vec![Side::Seeker]);
        assert_eq!(hid.view(Side::Hider), hid);
    }
    #[test]
    fn masked_view_resolves_with_the_guess() {
        let view = act(&Guess::hidden(), Side::Hider, 2).view(Side::Seeker);
        let haps = BTreeMap::from([(Guess::SECRET.to_string(), 3)]);
        let done = view
            .next(&BTreeMap::from([(Side::Seeker, 3)]), &haps)
            .unwrap();
        assert_eq!(done.result().unwrap()[&Side::Seeker], 1.);
        assert!(done.is_zero_sum());
    }
    #[test]
    fn drawn_secret_is_a_chance_node() {
        let root = Guess::drawn([0.2, 0.3, 0.5]);
        assert!(root.active().is_empty());
        assert!(root.is_contingent());
        assert!(!root.is_terminal());
        let haps = BTreeMap::from([(Guess::SECRET.to_string(), 1)]);
        let drawn = root.next(&BTreeMap::new(), &haps).unwrap();
        assert_eq!(drawn.active(), vec![Side::Seeker]);
        assert!(!drawn.is_contingent());
        let done = act(&drawn, Side::Seeker, 2);
        assert_eq!(done.result().unwrap()[&Side::Seeker], -1.);
    }
}
