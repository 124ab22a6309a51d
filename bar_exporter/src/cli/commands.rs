use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::config::Preset;

#[derive(Parser)]
#[command(author, version, about = "Export Polygon.io minute bars to CSV")]
pub struct Cli {
    /// Path to the config file (bar_exporter.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch minute bars for each symbol and write them as CSV
    Export(ExportArgs),

    /// List every ticker on a U.S. stock exchange, one per line
    Tickers,
}

#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Starting point the config file and flags are layered onto
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Comma-separated list of symbols (e.g. "AMD,META")
    #[arg(long, value_delimiter = ',', conflicts_with = "discover")]
    pub symbols: Vec<String>,

    /// Discover every U.S. stock ticker instead of using a fixed list
    #[arg(long)]
    pub discover: bool,

    /// First day of the range (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day of the range (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Write one file per symbol into this directory
    #[arg(long, value_name = "DIR", conflicts_with = "output_file")]
    pub output_dir: Option<PathBuf>,

    /// Append every symbol to this single file
    #[arg(long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,
}
