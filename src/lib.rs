//! d-separation over Bayesian network DAGs.
//!
//! Build a [`Graph`], then ask whether `X` is conditionally independent of
//! `Y` given `Z`:
//!
//! ```
//! use dsep::{is_independent, Graph};
//!
//! // Collider: 1 -> 3 <- 2, with 3 -> 4
//! let g = Graph::from_edges(4, [(1, 3), (2, 3), (3, 4)]).unwrap();
//! let n = |l| g.nodes(&[l]).unwrap();
//!
//! assert!(is_independent(&g, &n(1), &n(2), &[]));
//! assert!(!is_independent(&g, &n(1), &n(2), &n(4)));
//! ```

pub mod analysis;
pub mod cli;
pub mod graph;
pub mod io;
pub mod logging;

#[cfg(feature = "python")]
pub mod bindings;

pub use analysis::{
    ancestors_of, evaluate, evaluate_batch, is_d_connected, is_d_separated, is_independent,
    Observation, Query,
};
pub use graph::{Graph, GraphError, NodeId};
pub use io::ParseError;

#[cfg(feature = "python")]
mod python_module {
    use pyo3::prelude::*;

    /// Version of the compiled core.
    #[pyfunction]
    fn rust_core_version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Defines the `dsep._core` Python module.
    #[pymodule]
    fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(rust_core_version, m)?)?;
        m.add_class::<crate::bindings::python::PyGraph>()?;
        Ok(())
    }
}
