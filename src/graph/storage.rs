//! storage.rs
//! Dense Columnar Layout: CSR children + CSR parents, built in one pass.

use serde::{Deserialize, Serialize};

/// Largest node count a graph may declare. The last node's 1-based label is
/// `u32::MAX`.
pub const MAX_NODES: usize = u32::MAX as usize;

/// Dense, zero-based node identifier.
///
/// The graph and query sources number nodes from 1; `label()` gives that
/// external form back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline(always)]
    pub fn index(&self) -> usize { self.0 as usize }

    /// Panics if `idx` does not fit in a `u32`. Ids handed out by a `Graph`
    /// always fit, since its node count is capped at `MAX_NODES`.
    pub fn new(idx: usize) -> Self {
        match u32::try_from(idx) {
            Ok(raw) => Self(raw),
            Err(_) => panic!("node index {idx} does not fit in a u32"),
        }
    }

    /// 1-based label as used by the text formats.
    pub fn label(&self) -> u32 { self.0 + 1 }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyStore {
    // Children in edge-insertion order.
    pub children_flat: Vec<NodeId>,
    pub children_ranges: Vec<(u32, u32)>, // (start, count)

    // Reverse index: sorted, de-duplicated parents.
    pub parents_flat: Vec<NodeId>,
    pub parents_ranges: Vec<(u32, u32)>,
}

impl AdjacencyStore {
    /// Builds both columns from a validated edge list.
    ///
    /// Every id in `edges` must be `< node_count`.
    pub fn build(node_count: usize, edges: &[(NodeId, NodeId)]) -> Self {
        // 1. Children (counting sort keyed by parent, stable => insertion order kept)
        let children_ranges = Self::ranges(node_count, edges.iter().map(|&(p, _)| p));
        let mut cursor: Vec<u32> = children_ranges.iter().map(|&(start, _)| start).collect();
        let mut children_flat = vec![NodeId::default(); edges.len()];
        for &(parent, child) in edges {
            let slot = &mut cursor[parent.index()];
            children_flat[*slot as usize] = child;
            *slot += 1;
        }

        // 2. Parents (bucket by child, then sort + dedup each bucket)
        let mut buckets: Vec<Vec<NodeId>> = vec![Vec::new(); node_count];
        for &(parent, child) in edges {
            buckets[child.index()].push(parent);
        }
        let mut parents_flat = Vec::with_capacity(edges.len());
        let mut parents_ranges = Vec::with_capacity(node_count);
        for mut bucket in buckets {
            bucket.sort_unstable();
            bucket.dedup();
            let start = parents_flat.len() as u32;
            parents_ranges.push((start, bucket.len() as u32));
            parents_flat.extend(bucket);
        }

        Self { children_flat, children_ranges, parents_flat, parents_ranges }
    }

    fn ranges(node_count: usize, keys: impl Iterator<Item = NodeId>) -> Vec<(u32, u32)> {
        let mut counts = vec![0u32; node_count];
        for key in keys {
            counts[key.index()] += 1;
        }
        let mut start = 0u32;
        counts
            .into_iter()
            .map(|count| {
                let range = (start, count);
                start += count;
                range
            })
            .collect()
    }

    pub fn count(&self) -> usize { self.children_ranges.len() }

    #[inline(always)]
    pub fn get_children(&self, id: NodeId) -> &[NodeId] {
        let (start, count) = self.children_ranges[id.index()];
        &self.children_flat[start as usize..(start + count) as usize]
    }

    #[inline(always)]
    pub fn get_parents(&self, id: NodeId) -> &[NodeId] {
        let (start, count) = self.parents_ranges[id.index()];
        &self.parents_flat[start as usize..(start + count) as usize]
    }
}
