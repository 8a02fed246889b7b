use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing.
    #[arg(short, long, global = true)]
    pub trace: Option<TraceLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download every 10-K financial statement workbook for the companies
    /// listed in the roster csv.
    Download {
        /// Roster csv; display name at column 1, CIK at column 6.
        #[arg(short, long, default_value = "sp500.csv")]
        roster: String,

        /// Output root; one subdirectory per company. Must not already
        /// exist.
        #[arg(short, long, default_value = "Output")]
        output: PathBuf,
    },
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
#[clap(rename_all = "UPPERCASE")]
pub enum TraceLevel {
    DEBUG,
    ERROR,
    INFO,
    TRACE,
    WARN,
}
