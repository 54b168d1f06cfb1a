use crate::analysis::{self, ancestors_of, Observation, Query};
use crate::graph::{Graph, NodeId};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

fn to_py_err(e: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn labels(ids: impl IntoIterator<Item = NodeId>) -> Vec<u32> {
    ids.into_iter().map(|id| id.label()).collect()
}

/// A Bayesian network structure with 1-based node labels.
#[pyclass(name = "DSeparationGraph", module = "dsep._core")]
#[derive(Debug, Clone, Default)]
pub struct PyGraph {
    inner: Graph,
}

impl PyGraph {
    fn query(&self, x: &[i64], y: &[i64], z: &[i64]) -> PyResult<Query> {
        Query::from_labels(&self.inner, x, y, z).map_err(to_py_err)
    }
}

#[pymethods]
impl PyGraph {
    #[new]
    #[pyo3(signature = (node_count = 0, edges = Vec::new()))]
    pub fn new(node_count: usize, edges: Vec<(i64, i64)>) -> PyResult<Self> {
        let inner = Graph::from_edges(node_count, edges).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    pub fn node_count(&self) -> usize { self.inner.node_count() }

    pub fn edge_count(&self) -> usize { self.inner.edge_count() }

    pub fn is_independent(&self, x: Vec<i64>, y: Vec<i64>, z: Vec<i64>) -> PyResult<bool> {
        Ok(analysis::evaluate(&self.inner, &self.query(&x, &y, &z)?))
    }

    pub fn is_d_connected(&self, a: i64, b: i64, z: Vec<i64>) -> PyResult<bool> {
        let q = self.query(&[a], &[b], &z)?;
        Ok(analysis::is_d_connected(&self.inner, q.x[0], q.y[0], &q.z))
    }

    pub fn ancestors_of(&self, z: Vec<i64>) -> PyResult<Vec<u32>> {
        let observed = self.inner.nodes(&z).map_err(to_py_err)?;
        let mut found = labels(ancestors_of(&self.inner, &observed));
        found.sort_unstable();
        Ok(found)
    }

    pub fn reachable(&self, start: i64, z: Vec<i64>) -> PyResult<Vec<u32>> {
        let start = self.inner.node(start).map_err(to_py_err)?;
        let observed = self.inner.nodes(&z).map_err(to_py_err)?;
        Ok(labels(Observation::new(&self.inner, &observed).reachable(&self.inner, start)))
    }

    /// Evaluates `[(x, y, z), ...]` in parallel; verdicts keep the input order.
    pub fn evaluate_batch(&self, queries: Vec<(Vec<i64>, Vec<i64>, Vec<i64>)>) -> PyResult<Vec<bool>> {
        let queries = queries
            .iter()
            .map(|(x, y, z)| self.query(x, y, z))
            .collect::<PyResult<Vec<_>>>()?;
        Ok(analysis::evaluate_batch(&self.inner, &queries))
    }

    pub fn to_dot(&self) -> String { self.inner.to_dot() }

    pub fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner).map_err(to_py_err)
    }

    #[staticmethod]
    pub fn from_json(json: &str) -> PyResult<Self> {
        let inner = serde_json::from_str(json).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    // Pickle support
    pub fn __getstate__(&self) -> PyResult<String> { self.to_json() }

    pub fn __setstate__(&mut self, state: &str) -> PyResult<()> {
        *self = Self::from_json(state)?;
        Ok(())
    }
}
