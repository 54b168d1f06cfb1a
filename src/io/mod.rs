//! Text formats around the analysis core: graph source, query source, verdict output.
pub mod error;
pub mod graph_source;
pub mod output;
pub mod query_source;

pub use error::ParseError;
pub use graph_source::{parse_graph, read_graph};
pub use output::{write_verdicts, OutputFormat, VerdictRecord};
pub use query_source::{parse_queries, parse_set, read_queries};
