use std::path::PathBuf;

use snafu::{Backtrace, Snafu};

use crate::models::table::BarTable;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// The output directory could not be created.
    #[snafu(display("Failed to create directory {}: {source}", path.display()))]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// The output file could not be opened or written.
    #[snafu(display("Failed to write {}: {source}", path.display()))]
    Write {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// The CSV encoder rejected a record.
    #[snafu(display("Failed to encode CSV for {}: {source}", path.display()))]
    Encode {
        path: PathBuf,
        source: csv::Error,
        backtrace: Backtrace,
    },
}

pub trait DataSink {
    /// The type of output returned after a successful write operation.
    ///
    /// The CSV sinks return the path they wrote to.
    type Output;

    /// Writes one symbol's table to the destination.
    fn write(&self, table: &BarTable) -> Result<Self::Output, SinkError>;
}
