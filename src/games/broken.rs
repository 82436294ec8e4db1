use crate::*;
use std::collections::BTreeMap;

/// Where a [`Broken`] game goes wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// The mover is offered no action at all.
    Empty,
    /// Every action is offered, but none can be applied.
    Rejecting,
}

/// A three-ply game for 'A' and 'B' with a fault at one ply.
///
/// Plies before the fault offer `1` and `2` and behave; reaching the end
/// scores A +1 and B -1.
#[derive(Debug, Clone)]
pub struct Broken {
    at: usize,
    fault: Fault,
    path: Vec<u8>,
}

impl Broken {
    pub const HEIGHT: usize = 3;

    pub fn empty(at: usize) -> Self {
        Self {
            at,
            fault: Fault::Empty,
            path: Vec::new(),
        }
    }
    pub fn rejecting(at: usize) -> Self {
        Self {
            at,
            fault: Fault::Rejecting,
            path: Vec::new(),
        }
    }
    fn mover(&self) -> char {
        if self.path.len() % 2 == 0 { 'A' } else { 'B' }
    }
    fn is_faulty(&self, fault: Fault) -> bool {
        self.fault == fault && self.path.len() == self.at
    }
}

impl Game for Broken {
    type R = char;
    type A = u8;
    type H = u8;

    fn roles(&self) -> Vec<char> {
        vec!['A', 'B']
    }
    fn actions(&self) -> Option<BTreeMap<char, Vec<u8>>> {
        (self.path.len() < Self::HEIGHT).then(|| match self.is_faulty(Fault::Empty) {
            true => BTreeMap::from([(self.mover(), vec![])]),
            false => BTreeMap::from([(self.mover(), vec![1, 2])]),
        })
    }
    fn result(&self) -> Option<BTreeMap<char, Utility>> {
        (self.path.len() >= Self::HEIGHT).then(|| BTreeMap::from([('A', 1.), ('B', -1.)]))
    }
    fn next(&self, actions: &Actions<Self>, _: &Haps<Self>) -> Result<Self, Error> {
        if self.is_faulty(Fault::Rejecting) {
            return Err(Error::InvalidTransition(format!("no rule at ply {}", self.at)));
        }
        match actions.get(&self.mover()) {
            Some(a) if self.legal(self.mover()).contains(a) => {
                let mut next = self.clone();
                next.path.push(*a);
                Ok(next)
            }
            other => Err(Error::InvalidTransition(format!(
                "{} cannot play {:?}",
                self.mover(),
                other
            ))),
        }
    }
    fn identifier(&self) -> String {
        self.path.iter().map(|a| a.to_string()).collect::<Vec<_>>().join(".")
    }
}
