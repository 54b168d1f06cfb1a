//! Python bindings (`python` feature).
pub mod python;
