//! Renders verdicts. `Plain` is the canonical format: one `1`/`0` per query.
use crate::analysis::Query;
use crate::graph::NodeId;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// `1` if independent, `0` otherwise; one line per query.
    #[default]
    Plain,
    /// A JSON array of per-query records with 1-based labels.
    Json,
}

/// JSON record for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerdictRecord {
    pub query: usize,
    pub x: Vec<u32>,
    pub y: Vec<u32>,
    pub z: Vec<u32>,
    pub independent: bool,
}

impl VerdictRecord {
    pub fn new(index: usize, query: &Query, independent: bool) -> Self {
        let labels = |ids: &[NodeId]| -> Vec<u32> { ids.iter().map(NodeId::label).collect() };
        Self {
            query: index + 1,
            x: labels(&query.x),
            y: labels(&query.y),
            z: labels(&query.z),
            independent,
        }
    }
}

pub fn write_verdicts<W: Write>(
    out: &mut W,
    format: OutputFormat,
    queries: &[Query],
    verdicts: &[bool],
) -> io::Result<()> {
    match format {
        OutputFormat::Plain => {
            for &independent in verdicts {
                writeln!(out, "{}", u8::from(independent))?;
            }
        }
        OutputFormat::Json => {
            let records: Vec<VerdictRecord> = queries
                .iter()
                .zip(verdicts)
                .enumerate()
                .map(|(i, (query, &independent))| VerdictRecord::new(i, query, independent))
                .collect();
            serde_json::to_writer_pretty(&mut *out, &records)?;
            writeln!(out)?;
        }
    }
    out.flush()
}
