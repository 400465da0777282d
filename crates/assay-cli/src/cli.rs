//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Assay: statistical profiling and grounded facts for tabular data
#[derive(Parser)]
#[command(name = "assay")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Profile a data file and write the full JSON report
    Analyze {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Data dictionary to carry with the report (.json, .csv, .txt, .md)
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// JSON file with profiling threshold overrides
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output path for the report (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the grounded fact list for a data file
    Facts {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// JSON file with profiling threshold overrides
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show a human-readable profile summary
    Summary {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// JSON file with profiling threshold overrides
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
