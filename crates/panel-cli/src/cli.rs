//! CLI argument definitions for the dataset linker.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use panel_cli::inputs::{DatasetArg, parse_dataset_arg};
use panel_model::SampleSize;

#[derive(Parser)]
#[command(
    name = "panel-link",
    version,
    about = "Link datasets by drawing rows with a target rank correlation",
    long_about = "Link independent datasets into one synthetic panel.\n\n\
                  One column per dataset is the linking variable. Rows are drawn\n\
                  through a Gaussian copula so the linking variables follow the\n\
                  requested correlation while every dataset keeps its own marginal."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Draw correlated rows from two or more CSV files and join them.
    Link(LinkArgs),

    /// Build the Cartesian product of two or more CSV files.
    Cross(CrossArgs),
}

#[derive(Parser)]
pub struct LinkArgs {
    /// Dataset and its linking column, as `<CSV>:<COLUMN>`. Repeat per dataset.
    #[arg(
        long = "data",
        value_name = "CSV:COLUMN",
        value_parser = parse_dataset_arg,
        required = true
    )]
    pub data: Vec<DatasetArg>,

    /// Number of joint draws (rows in the joined output).
    #[arg(short = 'n', long = "sample-size", value_name = "N")]
    pub sample_size: SampleSize,

    /// Common correlation between every pair of linking variables.
    #[arg(long = "rho", value_name = "R", allow_hyphen_values = true)]
    pub rho: Option<f64>,

    /// Full correlation matrix, rows separated by `;` and entries by `,`.
    ///
    /// Takes precedence over `--rho`.
    #[arg(long = "sigma", value_name = "MATRIX", allow_hyphen_values = true)]
    pub sigma: Option<String>,

    /// Seed for reproducible draws.
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// Always use the pivoted Cholesky sampler.
    #[arg(long = "no-fast")]
    pub no_fast: bool,

    /// Thread count for the parallel sampler.
    #[arg(long = "cores", value_name = "K")]
    pub cores: Option<usize>,

    /// Write the joined rows to this CSV file.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write the drawn row indices as JSON.
    #[arg(long = "indices-out", value_name = "PATH")]
    pub indices_out: Option<PathBuf>,

    /// Rows to preview when no output file is given.
    #[arg(long = "head", value_name = "ROWS", default_value_t = 10)]
    pub head: usize,
}

#[derive(Parser)]
pub struct CrossArgs {
    /// CSV files to combine; the first varies slowest.
    #[arg(value_name = "CSV", num_args = 2.., required = true)]
    pub inputs: Vec<PathBuf>,

    /// Write the product to this CSV file.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Rows to preview when no output file is given.
    #[arg(long = "head", value_name = "ROWS", default_value_t = 10)]
    pub head: usize,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
