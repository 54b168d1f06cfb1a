//! Set-level independence queries built on pairwise d-connection.
use super::reachability::Observation;
use crate::graph::{Graph, GraphError, NodeId};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

/// One `X ⫫ Y | Z` question.
///
/// The sets may overlap and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub x: Vec<NodeId>,
    pub y: Vec<NodeId>,
    pub z: Vec<NodeId>,
}

impl Query {
    pub fn new(x: Vec<NodeId>, y: Vec<NodeId>, z: Vec<NodeId>) -> Self {
        Self { x, y, z }
    }

    /// Resolves 1-based labels; any label outside the graph is rejected.
    pub fn from_labels(graph: &Graph, x: &[i64], y: &[i64], z: &[i64]) -> Result<Self, GraphError> {
        Ok(Self::new(graph.nodes(x)?, graph.nodes(y)?, graph.nodes(z)?))
    }

    /// The same question with `X` and `Y` exchanged.
    pub fn swapped(&self) -> Self {
        Self::new(self.y.clone(), self.x.clone(), self.z.clone())
    }
}

/// True when every `x` in `X` is d-separated from every `y` in `Y` given `Z`.
///
/// Vacuously true if `X` or `Y` is empty. Stops at the first d-connected
/// pair; since each pair check is pure, the verdict does not depend on the
/// order in which pairs are visited.
pub fn is_independent(graph: &Graph, x: &[NodeId], y: &[NodeId], z: &[NodeId]) -> bool {
    if x.is_empty() || y.is_empty() {
        return true;
    }
    let observation = Observation::new(graph, z);
    x.iter()
        .all(|&start| y.iter().all(|&end| !observation.is_d_connected(graph, start, end)))
}

pub fn evaluate(graph: &Graph, query: &Query) -> bool {
    is_independent(graph, &query.x, &query.y, &query.z)
}

/// Evaluates queries on the rayon pool. Results keep the input order.
pub fn evaluate_batch(graph: &Graph, queries: &[Query]) -> Vec<bool> {
    let started = Instant::now();
    let verdicts: Vec<bool> = queries.par_iter().map(|q| evaluate(graph, q)).collect();
    debug!(
        queries = queries.len(),
        independent = verdicts.iter().filter(|&&v| v).count(),
        elapsed = ?started.elapsed(),
        "evaluated query batch"
    );
    verdicts
}

pub fn evaluate_batch_sequential(graph: &Graph, queries: &[Query]) -> Vec<bool> {
    queries.iter().map(|q| evaluate(graph, q)).collect()
}
