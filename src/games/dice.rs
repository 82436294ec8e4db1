use crate::*;
use std::collections::BTreeMap;

/// The only role of [`DiceBet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bettor;

impl std::fmt::Display for Bettor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bettor")
    }
}

/// Bet on the next roll of a six-sided die, for a fixed number of rounds.
///
/// Each round the bettor names a face while the die is still pending; the
/// transition needs both the bet and the roll. A correct bet earns a point,
/// any other bet loses one. With a loaded die the best bet is the heaviest face.
#[derive(Debug, Clone, PartialEq)]
pub struct DiceBet {
    points: i32,
    remaining: u8,
    rounds: u8,
    weights: [Probability; 6],
}

impl DiceBet {
    pub const ROLL: &'static str = "roll";

    /// A fair die.
    pub fn new(rounds: u8) -> Self {
        Self::loaded(rounds, [1. / 6.; 6])
    }
    /// A die whose faces `1..=6` come up with the given probabilities.
    pub fn loaded(rounds: u8, weights: [Probability; 6]) -> Self {
        Self {
            points: 0,
            remaining: rounds,
            rounds,
            weights,
        }
    }
    pub fn points(&self) -> i32 {
        self.points
    }
    pub fn remaining(&self) -> u8 {
        self.remaining
    }
    fn die(&self) -> Aleatory<u8> {
        Aleatory::from((1..=6).zip(self.weights).collect::<Vec<_>>())
    }
}

impl Game for DiceBet {
    type R = Bettor;
    type A = u8;
    type H = u8;

    fn roles(&self) -> Vec<Bettor> {
        vec![Bettor]
    }
    fn actions(&self) -> Option<BTreeMap<Bettor, Vec<u8>>> {
        (self.remaining > 0).then(|| BTreeMap::from([(Bettor, (1..=6).collect())]))
    }
    fn aleatories(&self) -> Option<BTreeMap<String, Aleatory<u8>>> {
        (self.remaining > 0).then(|| BTreeMap::from([(Self::ROLL.to_string(), self.die())]))
    }
    fn result(&self) -> Option<BTreeMap<Bettor, Utility>> {
        (self.remaining == 0).then(|| BTreeMap::from([(Bettor, self.points as Utility)]))
    }
    fn next(&self, actions: &Actions<Self>, haps: &Haps<Self>) -> Result<Self, Error> {
        if self.remaining == 0 {
            return Err(Error::InvalidTransition("no rounds left".into()));
        }
        let bet = actions
            .get(&Bettor)
            .filter(|b| (1..=6).contains(*b))
            .ok_or_else(|| Error::InvalidTransition(format!("bad bet in {:?}", actions)))?;
        let roll = haps
            .get(Self::ROLL)
            .filter(|r| self.die().probability(r) > 0.)
            .ok_or_else(|| Error::InvalidTransition(format!("bad roll in {:?}", haps)))?;
        let mut next = self.clone();
        next.remaining -= 1;
        next.points += if bet == roll { 1 } else { -1 };
        Ok(next)
    }
    fn identifier(&self) -> String {
        format!("{}@{}", self.points, self.remaining)
    }
    fn bounds(&self) -> (Utility, Utility) {
        (-(self.rounds as Utility), self.rounds as Utility)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn winning_and_losing_bets() {
        let game = DiceBet::new(2);
        assert!(game.is_contingent());
        let roll = BTreeMap::from([(DiceBet::ROLL.to_string(), 4)]);
        let won = game.next(&BTreeMap::from([(Bettor, 4)]), &roll).unwrap();
        assert_eq!(won.points(), 1);
        let lost = won.next(&BTreeMap::from([(Bettor, 1)]), &roll).unwrap();
        assert_eq!(lost.points(), 0);
        assert!(lost.is_terminal());
        assert!(!lost.is_contingent());
        assert_eq!(lost.result().unwrap()[&Bettor], 0.);
    }
    #[test]
    fn roll_is_required() {
        let game = DiceBet::new(1);
        let bet = BTreeMap::from([(Bettor, 4)]);
        assert!(game.next(&bet, &BTreeMap::new()).is_err());
        let impossible = BTreeMap::from([(DiceBet::ROLL.to_string(), 9)]);
        assert!(game.next(&bet, &impossible).is_err());
    }
}
