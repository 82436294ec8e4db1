use crate::*;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

/// A random variable blocking a transition.
///
/// Holds a finite distribution of `(value, probability)` pairs. Iterating the
/// distribution always starts over from the first outcome, so it can be walked
/// as many times as a search needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Aleatory<H> {
    outcomes: Vec<(H, Probability)>,
}

impl<H> From<Vec<(H, Probability)>> for Aleatory<H> {
    fn from(outcomes: Vec<(H, Probability)>) -> Self {
        Self { outcomes }
    }
}

impl<H> Aleatory<H>
where
    H: Hap,
{
    /// Every value equally likely.
    pub fn uniform<I>(values: I) -> Self
    where
        I: IntoIterator<Item = H>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        let p = 1. / values.len() as Probability;
        Self::from(values.into_iter().map(|h| (h, p)).collect::<Vec<_>>())
    }
    pub fn distribution(&self) -> &[(H, Probability)] {
        &self.outcomes
    }
    pub fn values(&self) -> impl Iterator<Item = &H> {
        self.outcomes.iter().map(|(h, _)| h)
    }
    /// Probability of a value, zero when it is not an outcome at all.
    pub fn probability(&self, value: &H) -> Probability {
        self.outcomes
            .iter()
            .filter(|(h, _)| h == value)
            .map(|(_, p)| p)
            .sum()
    }
    /// Check that the distribution is a proper one: non-empty, non-negative,
    /// summing to one.
    pub fn validate(&self, name: &str) -> Result<(), Error> {
        let total = self.outcomes.iter().map(|(_, p)| p).sum::<Probability>();
        let negative = self.outcomes.iter().any(|(_, p)| *p < 0.);
        if self.outcomes.is_empty() || negative || (total - 1.).abs() > ZERO_SUM_TOLERANCE {
            Err(Error::UnresolvedAleatory(name.to_string()))
        } else {
            Ok(())
        }
    }
    /// Draw one value according to the distribution.
    pub fn sample<R>(&self, name: &str, rng: &mut R) -> Result<H, Error>
    where
        R: Rng + ?Sized,
    {
        self.validate(name)?;
        WeightedIndex::new(self.outcomes.iter().map(|(_, p)| *p))
            .map(|index| self.outcomes[index.sample(rng)].0.clone())
            .map_err(|_| Error::UnresolvedAleatory(name.to_string()))
    }
}

impl Aleatory<u8> {
    /// A fair die numbered `1..=sides`.
    pub fn dice(sides: u8) -> Self {
        Self::uniform(1..=sides)
    }
}
