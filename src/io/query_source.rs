//! Reads the query source: one `X Y Z` triple per line, each a `{a,b,c}` set.
//!
//! ```text
//! {1} {2} {}
//! {1} {2} {4}
//! {1,2} {} {3}
//! ```
use super::error::{parse_int, read_source, ParseError};
use super::graph_source::numbered_lines;
use crate::analysis::Query;
use crate::graph::{Graph, NodeId};
use std::path::Path;
use tracing::debug;

pub fn parse_queries(text: &str, graph: &Graph) -> Result<Vec<Query>, ParseError> {
    let queries = numbered_lines(text)
        .map(|(line, tokens)| {
            let [x, y, z] = tokens.as_slice() else {
                return Err(ParseError::WrongArity { line, expected: 3, found: tokens.len() });
            };
            Ok(Query::new(
                parse_node_set(x, line, graph)?,
                parse_node_set(y, line, graph)?,
                parse_node_set(z, line, graph)?,
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!(queries = queries.len(), "parsed query source");
    Ok(queries)
}

pub fn read_queries(path: impl AsRef<Path>, graph: &Graph) -> Result<Vec<Query>, ParseError> {
    parse_queries(&read_source(path.as_ref())?, graph)
}

/// Parses `{a,b,c}` into labels. Empty elements (`{1,,2}`, `{}`) are skipped.
pub fn parse_set(token: &str, line: usize) -> Result<Vec<i64>, ParseError> {
    let inner = token
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or_else(|| ParseError::InvalidSet { line, token: token.to_string() })?;
    inner
        .split(',')
        .map(str::trim)
        .filter(|element| !element.is_empty())
        .map(|element| parse_int::<i64>(element, line))
        .collect()
}

fn parse_node_set(token: &str, line: usize, graph: &Graph) -> Result<Vec<NodeId>, ParseError> {
    let labels = parse_set(token, line)?;
    graph.nodes(&labels).map_err(|source| ParseError::Graph { line, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn graph() -> Graph {
        Graph::from_edges(4, [(1, 3), (2, 3), (3, 4)]).unwrap()
    }

    #[rstest]
    #[case("{}", vec![])]
    #[case("{1}", vec![1])]
    #[case("{1,2,3}", vec![1, 2, 3])]
    #[case("{3,1}", vec![3, 1])]
    #[case("{1,,2,}", vec![1, 2])]
    fn test_parse_set(#[case] token: &str, #[case] expected: Vec<i64>) {
        assert_eq!(parse_set(token, 1).unwrap(), expected);
    }

    #[rstest]
    #[case("1,2")]
    #[case("{1,2")]
    #[case("(1,2)")]
    #[case("")]
    fn test_parse_set_requires_braces(#[case] token: &str) {
        assert!(matches!(parse_set(token, 7), Err(ParseError::InvalidSet { line: 7, .. })));
    }

    #[test]
    fn test_parse_set_rejects_non_integers() {
        let err = parse_set("{1,a}", 2).unwrap_err();
        assert!(matches!(err, ParseError::InvalidInteger { line: 2, ref token } if token == "a"));
    }

    #[test]
    fn test_parses_queries_in_order() {
        let g = graph();
        let queries = parse_queries("{1} {2} {}\n\n{1} {2} {4}\n{} {1,2} {3}\n", &g).unwrap();
        assert_eq!(queries.len(), 3);
        assert_eq!(queries[0], Query::from_labels(&g, &[1], &[2], &[]).unwrap());
        assert_eq!(queries[1].z, g.nodes(&[4]).unwrap());
        assert!(queries[2].x.is_empty());
        assert_eq!(queries[2].y, g.nodes(&[1, 2]).unwrap());
    }

    #[test]
    fn test_query_outside_range_is_malformed() {
        let err = parse_queries("{1} {2} {}\n{1} {9} {}\n", &graph()).unwrap_err();
        assert!(matches!(err, ParseError::Graph { line: 2, .. }));
    }

    #[test]
    fn test_query_needs_three_sets() {
        let err = parse_queries("{1} {2}\n", &graph()).unwrap_err();
        assert!(matches!(err, ParseError::WrongArity { line: 1, expected: 3, found: 2 }));
    }
}
