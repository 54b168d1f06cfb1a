use crate::graph::{Graph, NodeId};
use std::collections::HashSet;

/// Identifies every ancestor of the observed nodes.
///
/// Walks parent edges from each node in `observed`. The observed nodes
/// themselves are only part of the result when one of them is an ancestor of
/// another; callers that need "in Z or above Z" combine the two explicitly.
///
/// Each node is pushed at most once, so this also terminates on graphs that
/// violate the acyclicity precondition.
pub fn ancestors_of(graph: &Graph, observed: &[NodeId]) -> HashSet<NodeId> {
    let mut ancestors = HashSet::new();
    let mut stack: Vec<NodeId> = observed.to_vec();

    while let Some(node) = stack.pop() {
        for &parent in graph.parents(node) {
            if ancestors.insert(parent) {
                stack.push(parent);
            }
        }
    }
    ancestors
}
