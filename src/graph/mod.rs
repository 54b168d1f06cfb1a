//! Defines the core data structures for the Bayesian network DAG.
pub mod dag;
pub mod error;
pub mod storage;

// Re-export key types for convenient access
pub use dag::Graph;
pub use error::GraphError;
pub use storage::{NodeId, MAX_NODES};
