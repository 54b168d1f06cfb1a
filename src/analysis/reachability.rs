//! Bayes-Ball reachability.
//!
//! A trail is followed as a sequence of `(node, direction)` visits, where
//! `Up` means the node was entered from one of its children (or is the start
//! node) and `Down` means it was entered from one of its parents. The
//! blocking rules for chains, forks and colliders are all expressed through
//! which neighbours a visit may push:
//!
//! | arrived | node unobserved            | node observed   | node above Z (not in Z) |
//! |---------|----------------------------|-----------------|-------------------------|
//! | `Up`    | parents `Up`, children `Down` | blocked      | (as unobserved)         |
//! | `Down`  | children `Down`            | parents `Up`    | children `Down`, parents `Up` |
//!
//! Every `(node, direction)` pair is expanded at most once, so a traversal is
//! linear in the size of the graph.

use super::ancestors::ancestors_of;
use crate::graph::{Graph, NodeId};
use smallvec::SmallVec;
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::ops::ControlFlow;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Entered from a child: moving toward parents.
    Up,
    /// Entered from a parent: moving toward children.
    Down,
}

/// The conditioning set `Z`, resolved against one graph.
///
/// Holds dense masks for `Z` and for `Z ∪ ancestors(Z)` so one observation
/// can be shared by every `(x, y)` pair of a query.
#[derive(Debug, Clone)]
pub struct Observation {
    observed: Vec<bool>,
    activating: Vec<bool>,
}

impl Observation {
    pub fn new(graph: &Graph, observed: &[NodeId]) -> Self {
        let count = graph.node_count();
        let mut mask = vec![false; count];
        for &id in observed {
            mask[id.index()] = true;
        }

        // A collider is activated by observing it or any of its descendants.
        let mut activating = mask.clone();
        for id in ancestors_of(graph, observed) {
            activating[id.index()] = true;
        }

        Self { observed: mask, activating }
    }

    #[inline]
    pub fn is_observed(&self, id: NodeId) -> bool { self.observed[id.index()] }

    /// True when `id` is in `Z` or has a descendant in `Z`.
    #[inline]
    pub fn activates_collider(&self, id: NodeId) -> bool { self.activating[id.index()] }

    /// Whether an active trail connects `start` and `end` under this observation.
    pub fn is_d_connected(&self, graph: &Graph, start: NodeId, end: NodeId) -> bool {
        let found = self
            .traverse(graph, start, |node| {
                if node == end { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
            })
            .is_break();
        trace!(start = start.label(), end = end.label(), connected = found, "d-connection check");
        found
    }

    /// Every node with an active trail from `start`. Observed nodes are never
    /// included; `start` is included unless it is observed.
    pub fn reachable(&self, graph: &Graph, start: NodeId) -> BTreeSet<NodeId> {
        let mut reached = BTreeSet::new();
        let flow = self.traverse(graph, start, |node| {
            reached.insert(node);
            ControlFlow::<Infallible>::Continue(())
        });
        match flow {
            ControlFlow::Continue(()) => reached,
            ControlFlow::Break(never) => match never {},
        }
    }

    /// Core Bayes-Ball walk. `on_reach` fires once per unobserved node per
    /// direction it is entered from; breaking stops the walk.
    fn traverse<B>(
        &self,
        graph: &Graph,
        start: NodeId,
        mut on_reach: impl FnMut(NodeId) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        let mut visited = Visited::new(graph.node_count());
        let mut frontier: SmallVec<[(NodeId, Direction); 32]> = SmallVec::new();
        frontier.push((start, Direction::Up));

        while let Some((node, direction)) = frontier.pop() {
            if !visited.insert(node, direction) {
                continue;
            }

            let observed = self.is_observed(node);
            if !observed {
                if let ControlFlow::Break(b) = on_reach(node) {
                    return ControlFlow::Break(b);
                }
            }

            match direction {
                Direction::Up if !observed => {
                    frontier.extend(graph.parents(node).iter().map(|&p| (p, Direction::Up)));
                    frontier.extend(graph.children(node).iter().map(|&c| (c, Direction::Down)));
                }
                // Observed node on a chain or fork: blocked.
                Direction::Up => {}
                Direction::Down => {
                    if !observed {
                        frontier.extend(graph.children(node).iter().map(|&c| (c, Direction::Down)));
                    }
                    if self.activates_collider(node) {
                        frontier.extend(graph.parents(node).iter().map(|&p| (p, Direction::Up)));
                    }
                }
            }
        }
        ControlFlow::Continue(())
    }
}

/// `(node, direction)` pairs already expanded.
struct Visited {
    up: Vec<bool>,
    down: Vec<bool>,
}

impl Visited {
    fn new(count: usize) -> Self {
        Self { up: vec![false; count], down: vec![false; count] }
    }

    /// Returns false if the pair was already present.
    fn insert(&mut self, node: NodeId, direction: Direction) -> bool {
        let slot = match direction {
            Direction::Up => &mut self.up[node.index()],
            Direction::Down => &mut self.down[node.index()],
        };
        !std::mem::replace(slot, true)
    }
}

/// Whether an active trail connects `start` and `end` given `observed`.
pub fn is_d_connected(graph: &Graph, start: NodeId, end: NodeId, observed: &[NodeId]) -> bool {
    Observation::new(graph, observed).is_d_connected(graph, start, end)
}

pub fn is_d_separated(graph: &Graph, start: NodeId, end: NodeId, observed: &[NodeId]) -> bool {
    !is_d_connected(graph, start, end, observed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn n(graph: &Graph, label: i64) -> NodeId {
        graph.node(label).unwrap()
    }

    fn connected(graph: &Graph, a: i64, b: i64, z: &[i64]) -> bool {
        is_d_connected(graph, n(graph, a), n(graph, b), &graph.nodes(z).unwrap())
    }

    #[rstest]
    // Chain 1 -> 2 -> 3
    #[case(vec![(1, 2), (2, 3)], 1, 3, vec![], true)]
    #[case(vec![(1, 2), (2, 3)], 1, 3, vec![2], false)]
    #[case(vec![(1, 2), (2, 3)], 3, 1, vec![2], false)]
    // Fork 2 <- 1 -> 3
    #[case(vec![(1, 2), (1, 3)], 2, 3, vec![], true)]
    #[case(vec![(1, 2), (1, 3)], 2, 3, vec![1], false)]
    // Collider 1 -> 3 <- 2
    #[case(vec![(1, 3), (2, 3)], 1, 2, vec![], false)]
    #[case(vec![(1, 3), (2, 3)], 1, 2, vec![3], true)]
    // Collider with a descendant: 1 -> 3 <- 2, 3 -> 4
    #[case(vec![(1, 3), (2, 3), (3, 4)], 1, 2, vec![4], true)]
    #[case(vec![(1, 3), (2, 3), (3, 4)], 1, 2, vec![], false)]
    fn test_classic_shapes(
        #[case] edges: Vec<(i64, i64)>,
        #[case] a: i64,
        #[case] b: i64,
        #[case] z: Vec<i64>,
        #[case] expected: bool,
    ) {
        let node_count = edges.iter().map(|&(p, c)| p.max(c)).max().unwrap() as usize;
        let g = Graph::from_edges(node_count, edges).unwrap();
        assert_eq!(connected(&g, a, b, &z), expected);
        assert_eq!(connected(&g, b, a, &z), expected, "reverse direction");
    }

    #[test]
    fn test_node_is_connected_to_itself_unless_observed() {
        let g = Graph::from_edges(2, [(1, 2)]).unwrap();
        assert!(connected(&g, 1, 1, &[]));
        assert!(!connected(&g, 1, 1, &[1]));
    }

    #[test]
    fn test_observed_end_is_never_reached() {
        let g = Graph::from_edges(2, [(1, 2)]).unwrap();
        assert!(!connected(&g, 1, 2, &[2]));
    }

    #[test]
    fn test_disconnected_components() {
        let g = Graph::from_edges(4, [(1, 2), (3, 4)]).unwrap();
        assert!(!connected(&g, 1, 4, &[]));
        assert!(!connected(&g, 2, 3, &[]));
    }

    #[test]
    fn test_observed_collider_opens_a_longer_trail() {
        // 1 -> 2 -> 4 <- 3 <- 5 ; observing 4 connects 1 and 5,
        // observing 2 as well blocks it again.
        let g = Graph::from_edges(5, [(1, 2), (2, 4), (3, 4), (5, 3)]).unwrap();
        assert!(!connected(&g, 1, 5, &[]));
        assert!(connected(&g, 1, 5, &[4]));
        assert!(!connected(&g, 1, 5, &[4, 2]));
    }

    #[test]
    fn test_reachable_set() {
        // Collider 1 -> 3 <- 2, 3 -> 4
        let g = Graph::from_edges(4, [(1, 3), (2, 3), (3, 4)]).unwrap();
        let one = n(&g, 1);

        let none = Observation::new(&g, &[]);
        let expected: BTreeSet<_> = g.nodes(&[1, 3, 4]).unwrap().into_iter().collect();
        assert_eq!(none.reachable(&g, one), expected);

        let given_4 = Observation::new(&g, &[n(&g, 4)]);
        let expected: BTreeSet<_> = g.nodes(&[1, 2, 3]).unwrap().into_iter().collect();
        assert_eq!(given_4.reachable(&g, one), expected);

        let given_1 = Observation::new(&g, &[one]);
        assert!(given_1.reachable(&g, one).is_empty());
    }

    #[test]
    fn test_observation_masks() {
        let g = Graph::from_edges(4, [(1, 3), (2, 3), (3, 4)]).unwrap();
        let obs = Observation::new(&g, &[n(&g, 4)]);
        assert!(obs.is_observed(n(&g, 4)));
        assert!(!obs.is_observed(n(&g, 3)));
        for label in 1..=4 {
            assert!(obs.activates_collider(n(&g, label)));
        }
    }
}
