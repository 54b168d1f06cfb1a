//! Reads the graph source: a node count `K`, then one `parent child` pair per line.
//!
//! ```text
//! 4
//! 1 3
//! 2 3
//! 3 4
//! ```
use super::error::{parse_int, read_source, ParseError};
use crate::graph::dag::{check_node_count, resolve};
use crate::graph::{Graph, NodeId};
use std::path::Path;
use tracing::debug;

pub fn parse_graph(text: &str) -> Result<Graph, ParseError> {
    let mut lines = numbered_lines(text);

    let (line, header) = lines.next().ok_or(ParseError::MissingNodeCount)?;
    let node_count = match header.as_slice() {
        [count] => parse_int::<usize>(count, line)?,
        other => return Err(ParseError::WrongArity { line, expected: 1, found: other.len() }),
    };
    check_node_count(node_count).map_err(|source| ParseError::Graph { line, source })?;

    let mut edges: Vec<(NodeId, NodeId)> = Vec::new();
    for (line, tokens) in lines {
        let [parent, child] = tokens.as_slice() else {
            return Err(ParseError::WrongArity { line, expected: 2, found: tokens.len() });
        };
        let parent = parse_int::<i64>(parent, line)?;
        let child = parse_int::<i64>(child, line)?;
        let edge = resolve(node_count, parent)
            .and_then(|p| Ok((p, resolve(node_count, child)?)))
            .map_err(|source| ParseError::Graph { line, source })?;
        edges.push(edge);
    }

    debug!(nodes = node_count, edges = edges.len(), "parsed graph source");
    Ok(Graph::from_checked(node_count, &edges))
}

pub fn read_graph(path: impl AsRef<Path>) -> Result<Graph, ParseError> {
    parse_graph(&read_source(path.as_ref())?)
}

/// Non-blank lines, 1-based, split on whitespace.
pub(crate) fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> + '_ {
    text.lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.split_whitespace().collect::<Vec<_>>()))
        .filter(|(_, tokens)| !tokens.is_empty())
}
