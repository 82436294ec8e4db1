use crate::*;
use std::collections::BTreeMap;

/// Scissors wins pay this many times a normal win.
pub const SCISSORS_PREMIUM: Utility = 2.;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Hand {
    First,
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Throw {
    Rock,
    Paper,
    Scissors,
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::First => write!(f, "P1"),
            Self::Second => write!(f, "P2"),
        }
    }
}

/// One round of rock-paper-scissors, both hands thrown at once.
///
/// Winning with scissors pays double, so the equilibrium is not uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rps {
    thrown: Option<(Throw, Throw)>,
}

impl Rps {
    const THROWS: [Throw; 3] = [Throw::Rock, Throw::Paper, Throw::Scissors];

    /// Payoff of the first hand.
    fn payoff(a: Throw, b: Throw) -> Utility {
        match (a, b) {
            (Throw::Paper, Throw::Rock) => 1.,
            (Throw::Rock, Throw::Paper) => -1.,
            (Throw::Rock, Throw::Scissors) => -SCISSORS_PREMIUM,
            (Throw::Scissors, Throw::Rock) => SCISSORS_PREMIUM,
            (Throw::Scissors, Throw::Paper) => SCISSORS_PREMIUM,
            (Throw::Paper, Throw::Scissors) => -SCISSORS_PREMIUM,
            _ => 0.,
        }
    }
}

impl Game for Rps {
    type R = Hand;
    type A = Throw;
    type H = u8;

    fn roles(&self) -> Vec<Hand> {
        vec![Hand::First, Hand::Second]
    }
    fn actions(&self) -> Option<BTreeMap<Hand, Vec<Throw>>> {
        self.thrown.is_none().then(|| {
            BTreeMap::from([
                (Hand::First, Self::THROWS.to_vec()),
                (Hand::Second, Self::THROWS.to_vec()),
            ])
        })
    }
    fn result(&self) -> Option<BTreeMap<Hand, Utility>> {
        self.thrown.map(|(a, b)| {
            let u = Self::payoff(a, b);
            BTreeMap::from([(Hand::First, u), (Hand::Second, -u)])
        })
    }
    fn next(&self, actions: &Actions<Self>, _: &Haps<Self>) -> Result<Self, Error> {
        match (self.thrown, actions.get(&Hand::First), actions.get(&Hand::Second)) {
            (None, Some(a), Some(b)) if actions.len() == 2 => Ok(Self {
                thrown: Some((*a, *b)),
            }),
            (Some(_), _, _) => Err(Error::InvalidTransition("round is over".into())),
            _ => Err(Error::InvalidTransition(format!(
                "both hands must throw, got {:?}",
                actions
            ))),
        }
    }
    fn identifier(&self) -> String {
        match self.thrown {
            None => "-".to_string(),
            Some((a, b)) => format!("{:?}/{:?}", a, b),
        }
    }
    fn bounds(&self) -> (Utility, Utility) {
        (-SCISSORS_PREMIUM, SCISSORS_PREMIUM)
    }
}
