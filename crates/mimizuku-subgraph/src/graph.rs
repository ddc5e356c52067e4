//! Individual graph traversal and class hierarchy closure

use mimizuku_core::{Class, Individual};
use mimizuku_store::{Edge, Ontology};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use tracing::debug;

use crate::config::TraversalDirection;

/// View of an ontology as a graph whose nodes are individuals and whose
/// edges are object property assertions.
#[derive(Debug, Clone, Copy)]
pub struct IndividualGraph<'a> {
    ontology: &'a Ontology,
    direction: TraversalDirection,
}

impl<'a> IndividualGraph<'a> {
    pub fn new(ontology: &'a Ontology, direction: TraversalDirection) -> Self {
        Self {
            ontology,
            direction,
        }
    }

    pub fn contains(&self, node: &Individual) -> bool {
        self.ontology.contains_entity(&node.to_entity())
    }

    /// Adjacent nodes in discovery order: outgoing edges in insertion order,
    /// then incoming edges in insertion order.
    pub fn neighbors(&self, node: &Individual) -> Vec<(&'a Edge, &'a Individual)> {
        let mut out = Vec::new();
        if self.direction.follows_outgoing() {
            out.extend(self.ontology.outgoing_edges(node).iter().map(|e| (e, e.other(node))));
        }
        if self.direction.follows_incoming() {
            out.extend(self.ontology.incoming_edges(node).iter().map(|e| (e, e.other(node))));
        }
        out
    }

    /// Nodes within `depth` hops of `seed`, in BFS discovery order. An
    /// unknown seed yields nothing.
    pub fn bfs(&self, seed: &Individual, depth: usize) -> Vec<Individual> {
        if !self.contains(seed) {
            return Vec::new();
        }
        let mut visited: HashSet<&Individual> = HashSet::new();
        let mut order = vec![seed.clone()];
        let mut queue = VecDeque::new();
        visited.insert(seed);
        queue.push_back((seed.clone(), 0usize));

        while let Some((node, dist)) = queue.pop_front() {
            if dist == depth {
                continue;
            }
            for (_, next) in self.neighbors(&node) {
                if visited.insert(next) {
                    order.push(next.clone());
                    queue.push_back((next.clone(), dist + 1));
                }
            }
        }

        debug!(seed = %seed, depth, reached = order.len(), "bfs finished");
        order
    }

    /// Shortest path from `source` to `target` as (nodes, edges). Among
    /// paths of equal length the one found first in discovery order wins.
    pub fn shortest_path(&self, source: &Individual, target: &Individual) -> Option<(Vec<Individual>, Vec<Edge>)> {
        if !self.contains(source) || !self.contains(target) {
            return None;
        }
        if source == target {
            return Some((vec![source.clone()], Vec::new()));
        }

        let mut predecessor: HashMap<&Individual, (&Individual, &Edge)> = HashMap::new();
        let mut visited: HashSet<&Individual> = HashSet::new();
        let mut queue: VecDeque<&Individual> = VecDeque::new();
        visited.insert(source);
        queue.push_back(source);

        'search: while let Some(node) = queue.pop_front() {
            for (edge, next) in self.neighbors(node) {
                if !visited.insert(next) {
                    continue;
                }
                predecessor.insert(next, (node, edge));
                if next == target {
                    break 'search;
                }
                queue.push_back(next);
            }
        }

        let mut nodes = vec![target.clone()];
        let mut edges = Vec::new();
        let mut current = predecessor.get(target)?;
        loop {
            let (prev, edge) = *current;
            edges.push(edge.clone());
            nodes.push(prev.clone());
            if prev == source {
                break;
            }
            current = predecessor.get(prev)?;
        }
        nodes.reverse();
        edges.reverse();
        Some((nodes, edges))
    }
}

/// `classes` plus every class reachable through asserted named SubClassOf
/// edges upwards.
pub fn superclass_closure(ontology: &Ontology, classes: &BTreeSet<Class>) -> BTreeSet<Class> {
    hierarchy_closure(classes, |c| ontology.get_direct_superclasses(c))
}

/// `classes` plus every class reachable through asserted named SubClassOf
/// edges downwards.
pub fn subclass_closure(ontology: &Ontology, classes: &BTreeSet<Class>) -> BTreeSet<Class> {
    hierarchy_closure(classes, |c| ontology.get_direct_subclasses(c))
}

fn hierarchy_closure<F>(classes: &BTreeSet<Class>, step: F) -> BTreeSet<Class>
where
    F: Fn(&Class) -> Vec<Class>,
{
    let mut closure = classes.clone();
    let mut stack: Vec<Class> = classes.iter().cloned().collect();
    // SubClassOf cycles are legal, the visited set stops them.
    while let Some(class) = stack.pop() {
        for next in step(&class) {
            if closure.insert(next.clone()) {
                stack.push(next);
            }
        }
    }
    closure
}
