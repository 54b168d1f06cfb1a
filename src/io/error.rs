//! Errors raised while reading the graph and query sources.
use crate::graph::GraphError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("graph source is empty: expected the node count on the first line")]
    MissingNodeCount,
    #[error("line {line}: invalid integer {token:?}")]
    InvalidInteger { line: usize, token: String },
    #[error("line {line}: expected {expected} fields, found {found}")]
    WrongArity { line: usize, expected: usize, found: usize },
    #[error("line {line}: {token:?} is not a node set such as {{1,2}} or {{}}")]
    InvalidSet { line: usize, token: String },
    #[error("line {line}: {source}")]
    Graph {
        line: usize,
        #[source]
        source: GraphError,
    },
}

impl ParseError {
    /// Line the error was found on, when it refers to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::InvalidInteger { line, .. }
            | Self::WrongArity { line, .. }
            | Self::InvalidSet { line, .. }
            | Self::Graph { line, .. } => Some(*line),
            Self::Io { .. } | Self::MissingNodeCount => None,
        }
    }
}

pub(crate) fn parse_int<T: std::str::FromStr>(token: &str, line: usize) -> Result<T, ParseError> {
    token
        .parse()
        .map_err(|_| ParseError::InvalidInteger { line, token: token.to_string() })
}

pub(crate) fn read_source(path: &std::path::Path) -> Result<String, ParseError> {
    std::fs::read_to_string(path).map_err(|source| ParseError::Io { path: path.to_path_buf(), source })
}
