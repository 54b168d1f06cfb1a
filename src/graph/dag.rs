//! dag.rs
//! Wraps the low-level AdjacencyStore with label resolution and export helpers.
//!
//! The graph is immutable once built, so the reverse (parent) index computed
//! by the store never goes stale.

use super::error::GraphError;
use super::storage::{AdjacencyStore, NodeId, MAX_NODES};
use petgraph::dot::{Config, Dot};
use petgraph::graph::DiGraph;
use serde::{Deserialize, Serialize};

/// A directed graph over nodes `1..=node_count`, assumed acyclic.
///
/// Acyclicity is a precondition of every query and is never checked here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "GraphRepr", try_from = "GraphRepr")]
pub struct Graph {
    store: AdjacencyStore,
}

/// Wire form: the same shape as the text graph source (count + 1-based edges).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphRepr {
    pub node_count: usize,
    pub edges: Vec<(i64, i64)>,
}

impl Graph {
    /// Builds a graph from 1-based `(parent, child)` labels.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        check_node_count(node_count)?;
        let resolved = edges
            .into_iter()
            .map(|(parent, child)| {
                Ok((resolve(node_count, parent)?, resolve(node_count, child)?))
            })
            .collect::<Result<Vec<_>, GraphError>>()?;
        Ok(Self::from_checked(node_count, &resolved))
    }

    /// Builds a graph from zero-based ids.
    pub fn from_id_edges<I>(node_count: usize, edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        check_node_count(node_count)?;
        let edges: Vec<_> = edges.into_iter().collect();
        if let Some(bad) = edges
            .iter()
            .flat_map(|&(p, c)| [p, c])
            .find(|id| id.index() >= node_count)
        {
            return Err(GraphError::MalformedGraph { label: i64::from(bad.label()), node_count });
        }
        Ok(Self::from_checked(node_count, &edges))
    }

    /// Builds from ids already known to be `< node_count`, with `node_count`
    /// already checked against `MAX_NODES`.
    pub(crate) fn from_checked(node_count: usize, edges: &[(NodeId, NodeId)]) -> Self {
        Self { store: AdjacencyStore::build(node_count, edges) }
    }

    pub fn node_count(&self) -> usize { self.store.count() }

    pub fn edge_count(&self) -> usize { self.store.children_flat.len() }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.node_count()).map(NodeId::new)
    }

    /// Resolves an external 1-based label.
    pub fn node(&self, label: i64) -> Result<NodeId, GraphError> {
        resolve(self.node_count(), label)
    }

    pub fn nodes(&self, labels: &[i64]) -> Result<Vec<NodeId>, GraphError> {
        labels.iter().map(|&label| self.node(label)).collect()
    }

    /// Direct successors, in the order the edges were given.
    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] { self.store.get_children(id) }

    /// Direct predecessors, sorted and unique.
    #[inline]
    pub fn parents(&self, id: NodeId) -> &[NodeId] { self.store.get_parents(id) }

    /// All edges as zero-based ids, grouped by parent.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.node_ids()
            .flat_map(move |parent| self.children(parent).iter().map(move |&child| (parent, child)))
    }

    /// Mirrors the graph into petgraph. Node index `i` carries label `i + 1`;
    /// edges carry an empty weight so the graph renders through `Dot`.
    pub fn to_petgraph(&self) -> DiGraph<u32, &'static str> {
        let mut graph = DiGraph::with_capacity(self.node_count(), self.edge_count());
        let indices: Vec<_> = self.node_ids().map(|id| graph.add_node(id.label())).collect();
        for (parent, child) in self.edges() {
            graph.add_edge(indices[parent.index()], indices[child.index()], "");
        }
        graph
    }

    /// Graphviz rendering, labelled with the 1-based node numbers.
    pub fn to_dot(&self) -> String {
        let graph = self.to_petgraph();
        format!("{}", Dot::with_config(&graph, &[Config::EdgeNoLabel]))
    }
}

/// Rejects node counts that do not fit the dense id space.
pub fn check_node_count(node_count: usize) -> Result<(), GraphError> {
    if node_count > MAX_NODES {
        return Err(GraphError::TooManyNodes { node_count, max: MAX_NODES });
    }
    Ok(())
}

/// Checks a 1-based label against `1..=node_count`.
pub fn resolve(node_count: usize, label: i64) -> Result<NodeId, GraphError> {
    match usize::try_from(label) {
        Ok(idx) if (1..=node_count).contains(&idx) => Ok(NodeId::new(idx - 1)),
        _ => Err(GraphError::MalformedGraph { label, node_count }),
    }
}

impl From<Graph> for GraphRepr {
    fn from(graph: Graph) -> Self {
        let edges = graph
            .edges()
            .map(|(p, c)| (i64::from(p.label()), i64::from(c.label())))
            .collect();
        Self { node_count: graph.node_count(), edges }
    }
}

impl TryFrom<GraphRepr> for Graph {
    type Error = GraphError;

    fn try_from(repr: GraphRepr) -> Result<Self, Self::Error> {
        Graph::from_edges(repr.node_count, repr.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Graph {
        Graph::from_edges(3, [(1, 2), (2, 3)]).unwrap()
    }

    #[test]
    fn test_labels_map_to_dense_ids() {
        let g = chain();
        assert_eq!(g.node(1).unwrap(), NodeId(0));
        assert_eq!(g.node(3).unwrap(), NodeId(2));
        assert_eq!(g.children(NodeId(0)), &[NodeId(1)]);
        assert_eq!(g.parents(NodeId(2)), &[NodeId(1)]);
    }

    #[test]
    fn test_edge_outside_range_is_rejected() {
        let err = Graph::from_edges(3, [(1, 2), (2, 4)]).unwrap_err();
        assert_eq!(err, GraphError::MalformedGraph { label: 4, node_count: 3 });

        let err = Graph::from_edges(3, [(0, 2)]).unwrap_err();
        assert_eq!(err, GraphError::MalformedGraph { label: 0, node_count: 3 });
    }

    #[test]
    fn test_id_edges_outside_range_are_rejected() {
        let err = Graph::from_id_edges(2, [(NodeId(0), NodeId(2))]).unwrap_err();
        assert_eq!(err, GraphError::MalformedGraph { label: 3, node_count: 2 });
    }

    #[test]
    fn test_query_label_outside_range_is_rejected() {
        let g = chain();
        assert!(g.node(-1).is_err());
        assert!(g.nodes(&[1, 2, 7]).is_err());
        assert_eq!(g.nodes(&[3, 1]).unwrap(), vec![NodeId(2), NodeId(0)]);
    }

    #[test]
    fn test_parents_match_a_full_scan() {
        let g = Graph::from_edges(5, [(1, 3), (2, 3), (3, 4), (1, 4), (5, 4)]).unwrap();
        for node in g.node_ids() {
            let scanned: Vec<NodeId> = g
                .node_ids()
                .filter(|&candidate| g.children(candidate).contains(&node))
                .collect();
            assert_eq!(g.parents(node), scanned.as_slice());
        }
    }

    #[test]
    fn test_dot_uses_labels() {
        let dot = chain().to_dot();
        assert!(dot.starts_with("digraph"));
        assert!(dot.contains("label = \"3\""), "{}", dot);
        assert!(dot.contains("0 -> 1"), "{}", dot);
        assert_eq!(dot.matches("->").count(), 2);
    }

    #[test]
    fn test_petgraph_mirror_keeps_every_edge() {
        let g = Graph::from_edges(4, [(1, 2), (1, 3), (3, 4)]).unwrap();
        let pg = g.to_petgraph();
        assert_eq!(pg.node_count(), 4);
        assert_eq!(pg.edge_count(), 3);
        assert_eq!(pg[petgraph::graph::NodeIndex::new(3)], 4);
    }

    #[test]
    fn test_node_count_beyond_id_space_is_rejected() {
        let too_many = MAX_NODES + 1;
        let expected = GraphError::TooManyNodes { node_count: too_many, max: MAX_NODES };
        assert_eq!(Graph::from_edges(too_many, [(1, 2)]).unwrap_err(), expected);
        assert_eq!(Graph::from_id_edges(too_many, Vec::new()).unwrap_err(), expected);
    }

    #[test]
    fn test_json_form_matches_text_format() {
        let g = chain();
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, r#"{"node_count":3,"edges":[[1,2],[2,3]]}"#);
        let back: Graph = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn test_json_with_bad_label_fails() {
        let res: Result<Graph, _> = serde_json::from_str(r#"{"node_count":2,"edges":[[1,3]]}"#);
        assert!(res.is_err());
    }
}
