use crate::*;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::fmt::Display;
use std::hash::Hash;

/// A named seat in a game. Distinct from whoever occupies it.
pub trait Role: Copy + Eq + Ord + Hash + Debug + Display + Send + Sync + 'static {}
impl<T> Role for T where T: Copy + Eq + Ord + Hash + Debug + Display + Send + Sync + 'static {}

/// Something an active role may do.
pub trait Action: Clone + Eq + Ord + Hash + Debug + Send + Sync + 'static {}
impl<T> Action for T where T: Clone + Eq + Ord + Hash + Debug + Send + Sync + 'static {}

/// A realized value of an aleatory.
pub trait Hap: Clone + Eq + Ord + Hash + Debug + Send + Sync + 'static {}
impl<T> Hap for T where T: Clone + Eq + Ord + Hash + Debug + Send + Sync + 'static {}

/// One action per active role.
pub type Actions<G> = BTreeMap<<G as Game>::R, <G as Game>::A>;
/// One realized value per pending aleatory, keyed by aleatory name.
pub type Haps<G> = BTreeMap<String, <G as Game>::H>;
/// A scalar per role: results, heuristic vectors, search values.
pub type Payoff<G> = BTreeMap<<G as Game>::R, Utility>;
/// The transition type of a game.
pub type Move<G> = Transition<<G as Game>::R, <G as Game>::A, <G as Game>::H>;

/// An immutable point in a match.
///
/// Search only ever needs the local properties below; how a game stores its
/// board, deck or history is its own business. The state is never mutated:
/// [`next`](Game::next) returns a fresh successor.
///
/// Invariants an implementation must keep:
/// - terminal ⇔ `result()` is `Some` ⇔ `actions()` is `None`
/// - a non-terminal state without aleatories has at least one active role,
///   and every active role has at least one action
/// - `next` is deterministic: the same assignment always yields the same state
pub trait Game: Clone + Debug + Send + Sync + 'static {
    type R: Role;
    type A: Action;
    type H: Hap;

    /// Every role of the game, in a fixed order.
    fn roles(&self) -> Vec<Self::R>;
    /// Legal actions per active role, or `None` once the game is over.
    fn actions(&self) -> Option<BTreeMap<Self::R, Vec<Self::A>>>;
    /// Per-role result, present only on terminal states.
    fn result(&self) -> Option<BTreeMap<Self::R, Utility>>;
    /// Successor after every active role acts and every aleatory is realized.
    ///
    /// Fails with [`Error::InvalidTransition`] when the assignment is
    /// incomplete or illegal.
    fn next(&self, actions: &Actions<Self>, haps: &Haps<Self>) -> Result<Self, Error>;
    /// Opaque, stable key for this state.
    fn identifier(&self) -> String;

    /// Random variables that must be realized before the next transition.
    fn aleatories(&self) -> Option<BTreeMap<String, Aleatory<Self::H>>> {
        None
    }
    /// Range of possible results, used to normalize them into [-1, +1].
    fn bounds(&self) -> (Utility, Utility) {
        (-1., 1.)
    }
    /// The state as `role` is allowed to see it.
    ///
    /// Hidden information is replaced by aleatories ranging over whatever the
    /// role cannot rule out, so a searching agent never touches ground truth.
    fn view(&self, _: Self::R) -> Self {
        self.clone()
    }

    /// Roles allowed to act.
    fn active(&self) -> Vec<Self::R> {
        self.actions()
            .map(|actions| actions.into_keys().collect())
            .unwrap_or_default()
    }
    /// Legal actions of one role, empty when it is not active.
    fn legal(&self, role: Self::R) -> Vec<Self::A> {
        self.actions()
            .and_then(|mut actions| actions.remove(&role))
            .unwrap_or_default()
    }
    fn is_terminal(&self) -> bool {
        self.result().is_some()
    }
    /// Whether some aleatory is still pending.
    fn is_contingent(&self) -> bool {
        self.aleatories().is_some_and(|a| !a.is_empty())
    }
    /// Result mapped linearly from [`bounds`](Game::bounds) onto [-1, +1].
    fn normalized(&self) -> Option<BTreeMap<Self::R, Utility>> {
        let (lo, hi) = self.bounds();
        self.result().map(|result| {
            result
                .into_iter()
                .map(|(r, u)| (r, normalize(u, lo, hi)))
                .collect()
        })
    }
    /// Whether the result of a terminal state adds up to zero.
    fn is_zero_sum(&self) -> bool {
        self.result()
            .map(|result| result.values().sum::<Utility>().abs() < ZERO_SUM_TOLERANCE)
            .unwrap_or(false)
    }
    /// Every role but the given one.
    fn opponents(&self, role: Self::R) -> Vec<Self::R> {
        self.roles().into_iter().filter(|r| *r != role).collect()
    }
}

/// Map `u` from [lo, hi] to [-1, +1]. Degenerate bounds map everything to 0.
pub fn normalize(u: Utility, lo: Utility, hi: Utility) -> Utility {
    if hi > lo {
        ((u - lo) / (hi - lo)) * 2. - 1.
    } else {
        0.
    }
}
