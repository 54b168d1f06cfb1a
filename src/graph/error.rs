//! Defines the error types for the graph module.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An edge or a query references a node outside `1..=node_count`.
    #[error("node {label} is outside the declared node range 1..={node_count}")]
    MalformedGraph { label: i64, node_count: usize },

    /// The declared node count does not fit the dense `u32` id space.
    #[error("node count {node_count} exceeds the supported maximum of {max}")]
    TooManyNodes { node_count: usize, max: usize },
}
