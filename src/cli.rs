//! Command-line surface of the `dsep` binary.
//!
//! Without a subcommand `dsep` behaves like `dsep check`: it reads
//! `graph.txt` and `queries.txt` from the working directory and prints one
//! verdict per query.

use crate::analysis::{evaluate_batch, Observation};
use crate::io::{read_graph, read_queries, write_verdicts, OutputFormat};
use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Conditional independence queries on a Bayesian network via d-separation
#[derive(Parser, Debug)]
#[command(name = "dsep", version, about)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv); overridden by DSEP_LOG
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Worker threads for query batches (defaults to one per core)
    #[arg(short, long, global = true)]
    pub jobs: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub check: CheckArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Answer every query in the query file (default)
    Check(CheckArgs),
    /// List the nodes d-connected to one node given an observed set
    Reachable(ReachableArgs),
    /// Print the graph in Graphviz DOT format
    Dot(GraphArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Graph source: node count, then one `parent child` pair per line
    #[arg(short, long, default_value = "graph.txt")]
    pub graph: PathBuf,

    /// Query source: one `{X} {Y} {Z}` triple per line
    #[arg(short, long, default_value = "queries.txt")]
    pub queries: PathBuf,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    #[arg(short, long, default_value = "graph.txt")]
    pub graph: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ReachableArgs {
    #[command(flatten)]
    pub source: GraphArgs,

    /// Start node (1-based)
    #[arg(long)]
    pub from: i64,

    /// Observed nodes, comma separated
    #[arg(long, value_delimiter = ',')]
    pub given: Vec<i64>,
}

/// Sizes the global rayon pool. Must run before the first batch.
pub fn configure_threads(jobs: Option<usize>) -> Result<()> {
    if let Some(jobs) = jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("failed to configure the worker pool")?;
    }
    Ok(())
}

/// Runs the selected command, writing results to `out`.
pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    match cli.command {
        None => check(&cli.check, out),
        Some(Command::Check(args)) => check(&args, out),
        Some(Command::Reachable(args)) => reachable(&args, out),
        Some(Command::Dot(args)) => {
            let graph = load_graph(&args.graph)?;
            write!(out, "{}", graph.to_dot())?;
            Ok(())
        }
    }
}

fn load_graph(path: &std::path::Path) -> Result<crate::graph::Graph> {
    read_graph(path).with_context(|| format!("invalid graph source {}", path.display()))
}

fn check<W: Write>(args: &CheckArgs, out: &mut W) -> Result<()> {
    let graph = load_graph(&args.graph)?;
    let queries = read_queries(&args.queries, &graph)
        .with_context(|| format!("invalid query source {}", args.queries.display()))?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        queries = queries.len(),
        "loaded inputs"
    );

    let verdicts = evaluate_batch(&graph, &queries);
    write_verdicts(out, args.format, &queries, &verdicts).context("failed to write verdicts")?;
    Ok(())
}

fn reachable<W: Write>(args: &ReachableArgs, out: &mut W) -> Result<()> {
    let graph = load_graph(&args.source.graph)?;
    let start = graph.node(args.from).context("invalid --from")?;
    let observed = graph.nodes(&args.given).context("invalid --given")?;

    let reached = Observation::new(&graph, &observed).reachable(&graph, start);
    let labels: Vec<String> = reached.iter().map(|id| id.label().to_string()).collect();
    writeln!(out, "{}", labels.join(" "))?;
    Ok(())
}
