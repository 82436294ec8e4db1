use crate::*;
use rand::Rng;

/// Estimated desirability of a non-terminal state for a role.
///
/// Values are expected to stay within [-1, +1], the range of normalized results.
pub trait Heuristic<G>: Send
where
    G: Game,
{
    fn evaluate(&self, game: &G, role: G::R) -> Utility;

    /// One estimate per role.
    fn vector(&self, game: &G) -> Payoff<G> {
        game.roles()
            .into_iter()
            .map(|r| (r, self.evaluate(game, r)))
            .collect()
    }
}

impl<G, F> Heuristic<G> for F
where
    G: Game,
    F: Fn(&G, G::R) -> Utility + Send,
{
    fn evaluate(&self, game: &G, role: G::R) -> Utility {
        self(game, role)
    }
}

/// Uniform noise in [-0.5, 0.5). Only useful for testing search machinery.
#[derive(Debug, Clone, Copy, Default)]
pub struct Noise;

impl<G> Heuristic<G> for Noise
where
    G: Game,
{
    fn evaluate(&self, _: &G, _: G::R) -> Utility {
        rand::rng().random_range(-NOISE_AMPLITUDE..NOISE_AMPLITUDE)
    }
}

/// The role's result on terminal states, the heuristic everywhere else.
pub fn quiescent<G, H>(game: &G, role: G::R, heuristic: &H) -> Utility
where
    G: Game,
    H: Heuristic<G>,
{
    match game.result() {
        Some(result) => result.get(&role).copied().unwrap_or_default(),
        None => heuristic.evaluate(game, role),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn noise_stays_in_range() {
        let game = Predefined::constant(vec![1., -1.], 3, 2);
        for _ in 0..1_000 {
            let u = Heuristic::<Predefined>::evaluate(&Noise, &game, 'A');
            assert!((-0.5..0.5).contains(&u));
        }
    }
    #[test]
    fn closures_are_heuristics() {
        let game = Predefined::constant(vec![1., -1.], 3, 2);
        let h = |g: &Predefined, r: char| if r == 'A' { 0.25 } else { g.path().len() as Utility };
        assert_eq!(h.vector(&game), Payoff::<Predefined>::from([('A', 0.25), ('B', 0.)]));
    }
    #[test]
    fn terminal_states_use_results() {
        let done = Predefined::constant(vec![1., -1.], 0, 2);
        assert_eq!(quiescent(&done, 'B', &Noise), -1.);
    }
}
