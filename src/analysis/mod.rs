//! d-separation analysis over a [`Graph`](crate::graph::Graph).
//!
//! Leaf-first: `ancestors` marks `Z` and everything above it, `reachability`
//! runs the Bayes-Ball walk, `independence` lifts pairs to sets and batches.
pub mod ancestors;
pub mod independence;
pub mod reachability;

pub use ancestors::ancestors_of;
pub use independence::{evaluate, evaluate_batch, evaluate_batch_sequential, is_independent, Query};
pub use reachability::{is_d_connected, is_d_separated, Direction, Observation};
