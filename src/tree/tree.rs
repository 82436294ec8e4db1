use crate::*;
use petgraph::Direction;
use petgraph::graph::DiGraph;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use rand::Rng;
use std::fmt::Formatter;

/// A UCT search tree, built for one decision and thrown away after it.
///
/// Nodes own their state and statistics; edges carry the transition that
/// leads from parent to child. The root always sits at index zero.
#[derive(Debug)]
pub struct Tree<G>(DiGraph<Node<G>, Move<G>>)
where
    G: Game;

impl<G> Tree<G>
where
    G: Game,
{
    pub fn new(root: G) -> Result<Self, Error> {
        let mut graph = DiGraph::new();
        graph.add_node(Node::new(root)?);
        Ok(Self(graph))
    }
    pub fn root(&self) -> NodeIndex {
        NodeIndex::new(0)
    }
    pub fn at(&self, index: NodeIndex) -> &Node<G> {
        &self.0[index]
    }
    pub fn len(&self) -> usize {
        self.0.node_count()
    }
    pub fn is_empty(&self) -> bool {
        self.0.node_count() == 0
    }
    pub fn graph(&self) -> &DiGraph<Node<G>, Move<G>> {
        &self.0
    }
    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.0
            .neighbors_directed(index, Direction::Incoming)
            .next()
    }
    /// Children in insertion order, with the transition leading to each.
    pub fn children(&self, index: NodeIndex) -> Vec<(NodeIndex, &Move<G>)> {
        let mut children = self
            .0
            .edges_directed(index, Direction::Outgoing)
            .map(|e| (e.target(), e.weight()))
            .collect::<Vec<_>>();
        children.sort_by_key(|(child, _)| *child);
        children
    }
    /// Turn one pending transition of `index`, picked at random, into a child.
    pub fn expand<X>(&mut self, index: NodeIndex, rng: &mut X) -> Result<NodeIndex, Error>
    where
        X: Rng + ?Sized,
    {
        let n = self.0[index].pending().len();
        if n == 0 {
            return Err(Error::InvalidTransition(format!(
                "{} is fully expanded",
                self.0[index].state().identifier()
            )));
        }
        let transition = self.0[index].take(rng.random_range(0..n));
        let state = transition.apply(self.0[index].state())?;
        let child = self.0.add_node(Node::new(state)?);
        self.0.add_edge(index, child, transition);
        Ok(child)
    }
    /// Credit `reward` to `index` and every ancestor up to the root.
    pub fn backpropagate(&mut self, index: NodeIndex, reward: Utility) {
        let mut current = Some(index);
        while let Some(index) = current {
            self.0[index].visit(reward);
            current = self.parent(index);
        }
    }

    fn draw(&self, f: &mut Formatter, index: NodeIndex, prefix: &str) -> std::fmt::Result {
        if index == self.root() {
            writeln!(f, "ROOT   {}", self.at(index))?;
        }
        let children = self.children(index);
        let n = children.len();
        for (i, (child, edge)) in children.into_iter().enumerate() {
            let last = i == n - 1;
            let stem = if last { "└" } else { "├" };
            let gaps = if last { "    " } else { "│   " };
            writeln!(f, "{}{}──{} → {}", prefix, stem, label(edge), self.at(child))?;
            self.draw(f, child, &format!("{}{}", prefix, gaps))?;
        }
        Ok(())
    }
}

fn label<R, A, H>(transition: &Transition<R, A, H>) -> String
where
    R: Role,
    A: Action,
    H: Hap,
{
    transition
        .actions()
        .iter()
        .map(|(r, a)| format!("{}:{:?}", r, a))
        .chain(transition.haps().iter().map(|(n, h)| format!("{}={:?}", n, h)))
        .collect::<Vec<_>>()
        .join(" ")
}

impl<G> std::fmt::Display for Tree<G>
where
    G: Game,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.draw(f, self.root(), "")
    }
}
