use crate::*;
use std::collections::BTreeMap;
use std::sync::Arc;

type Scoring = Arc<dyn Fn(&[u8]) -> Vec<Utility> + Send + Sync>;

/// A game tree of fixed height and width.
///
/// Roles are named `'A'`, `'B'`, ... and take turns in that order, each
/// picking a number in `1..=width`. After `height` plies the game ends and the
/// scoring function turns the path taken into one result per role.
#[derive(Clone)]
pub struct Predefined {
    roles: usize,
    width: u8,
    height: usize,
    bounds: (Utility, Utility),
    path: Vec<u8>,
    scoring: Scoring,
}

impl Predefined {
    /// Every path ends with the same result.
    pub fn constant(result: Vec<Utility>, height: usize, width: u8) -> Self {
        let roles = result.len();
        let reach = result.iter().fold(1., |m: Utility, u| m.max(u.abs()));
        Self::scored(roles, height, width, move |_| result.clone()).bounded(-reach, reach)
    }
    /// Results depend on the path taken.
    pub fn scored<F>(roles: usize, height: usize, width: u8, scoring: F) -> Self
    where
        F: Fn(&[u8]) -> Vec<Utility> + Send + Sync + 'static,
    {
        assert!(roles > 0, "a game needs at least one role");
        Self {
            roles,
            width,
            height,
            bounds: (-1., 1.),
            path: Vec::new(),
            scoring: Arc::new(scoring),
        }
    }
    pub fn bounded(mut self, lo: Utility, hi: Utility) -> Self {
        self.bounds = (lo, hi);
        self
    }
    pub fn path(&self) -> &[u8] {
        &self.path
    }
    pub fn role(index: usize) -> char {
        (b'A' + index as u8) as char
    }
    fn mover(&self) -> char {
        Self::role(self.path.len() % self.roles)
    }
}

impl Game for Predefined {
    type R = char;
    type A = u8;
    type H = u8;

    fn roles(&self) -> Vec<char> {
        (0..self.roles).map(Self::role).collect()
    }
    fn actions(&self) -> Option<BTreeMap<char, Vec<u8>>> {
        (self.path.len() < self.height)
            .then(|| BTreeMap::from([(self.mover(), (1..=self.width).collect())]))
    }
    fn result(&self) -> Option<BTreeMap<char, Utility>> {
        (self.path.len() >= self.height).then(|| {
            self.roles()
                .into_iter()
                .zip((self.scoring)(&self.path))
                .collect()
        })
    }
    fn next(&self, actions: &Actions<Self>, _: &Haps<Self>) -> Result<Self, Error> {
        let mover = self.mover();
        match actions.get(&mover) {
            _ if self.is_terminal() => Err(Error::InvalidTransition(format!(
                "{} is finished",
                self.identifier()
            ))),
            _ if actions.len() != 1 => Err(Error::InvalidTransition(format!(
                "expected only {} to act, got {:?}",
                mover, actions
            ))),
            Some(a) if (1..=self.width).contains(a) => {
                let mut next = self.clone();
                next.path.push(*a);
                Ok(next)
            }
            other => Err(Error::InvalidTransition(format!(
                "{} cannot play {:?}",
                mover, other
            ))),
        }
    }
    fn identifier(&self) -> String {
        self.path.iter().map(|a| a.to_string()).collect::<Vec<_>>().join(".")
    }
    fn bounds(&self) -> (Utility, Utility) {
        self.bounds
    }
}

impl std::fmt::Debug for Predefined {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predefined")
            .field("roles", &self.roles)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("path", &self.path)
            .finish()
    }
}
