use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "MotifNet Developers",
    version,
    about = "MotifNet CLI - A command-line interface for building molecular factor graphs from quantum-chemistry datasets and running message-passing update layers over them.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build labeled factor graphs for every record of a dataset and apply update layers.
    Prepare(PrepareArgs),
    /// Show the graph, relation, and label shapes of a single dataset record.
    Inspect(InspectArgs),
}

/// Arguments for the `prepare` subcommand.
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Path to the dataset file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub dataset: PathBuf,

    /// Number of factor-update layers to apply to each graph.
    #[arg(short, long, default_value_t = 1, value_name = "INT")]
    pub layers: usize,

    /// Representation width written by each update layer.
    #[arg(long, default_value_t = 10, value_name = "INT")]
    pub updated_dim: usize,

    /// Seed for network weight initialization.
    #[arg(long, default_value_t = 2025, value_name = "INT")]
    pub seed: u64,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the dataset file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub dataset: PathBuf,

    /// Name of the record to inspect.
    #[arg(short, long, required = true, value_name = "NAME")]
    pub record: String,
}
