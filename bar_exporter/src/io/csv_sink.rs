//! Comma-separated output.
//!
//! Two targets are supported:
//! - [`CumulativeCsvSink`]: one file shared by every symbol. The header is written
//!   only when the file is missing or empty; otherwise rows are appended. Running
//!   the same export twice therefore appends the same rows twice.
//! - [`PerSymbolCsvSink`]: one `{symbol}_{start}_to_{end}_data.csv` per symbol in a
//!   directory, truncated and rewritten (with header) on every run.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use snafu::ResultExt;

use crate::config::OutputTarget;
use crate::io::sink::{CreateDirSnafu, DataSink, EncodeSnafu, SinkError, WriteSnafu};
use crate::models::{request_params::DateRange, table::BarTable};

/// Appends every symbol's rows to a single file.
#[derive(Debug, Clone)]
pub struct CumulativeCsvSink {
    path: PathBuf,
}

impl CumulativeCsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSink for CumulativeCsvSink {
    type Output = PathBuf;

    fn write(&self, table: &BarTable) -> Result<PathBuf, SinkError> {
        let write_header = fs::metadata(&self.path).map_or(true, |m| m.len() == 0);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).context(CreateDirSnafu { path: parent })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .context(WriteSnafu { path: &self.path })?;

        write_table(file, table, write_header, &self.path)?;
        Ok(self.path.clone())
    }
}

/// Writes one file per symbol and date range.
#[derive(Debug, Clone)]
pub struct PerSymbolCsvSink {
    dir: PathBuf,
    range: DateRange,
}

impl PerSymbolCsvSink {
    pub fn new(dir: impl Into<PathBuf>, range: DateRange) -> Self {
        Self {
            dir: dir.into(),
            range,
        }
    }

    /// Target file for `symbol`, e.g. `New_Stock_data/AMD_2024-01-01_to_2024-04-16_data.csv`.
    pub fn file_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!(
            "{symbol}_{}_to_{}_data.csv",
            self.range.start, self.range.end
        ))
    }
}

impl DataSink for PerSymbolCsvSink {
    type Output = PathBuf;

    fn write(&self, table: &BarTable) -> Result<PathBuf, SinkError> {
        fs::create_dir_all(&self.dir).context(CreateDirSnafu { path: &self.dir })?;

        let path = self.file_for(table.symbol());
        let file = File::create(&path).context(WriteSnafu { path: &path })?;
        write_table(file, table, true, &path)?;
        Ok(path)
    }
}

/// Either CSV target, chosen at runtime from configuration.
#[derive(Debug, Clone)]
pub enum CsvSink {
    Cumulative(CumulativeCsvSink),
    PerSymbol(PerSymbolCsvSink),
}

impl CsvSink {
    pub fn for_target(target: &OutputTarget, range: DateRange) -> Self {
        match target {
            OutputTarget::Cumulative { path } => CsvSink::Cumulative(CumulativeCsvSink::new(path)),
            OutputTarget::PerSymbol { dir } => CsvSink::PerSymbol(PerSymbolCsvSink::new(dir, range)),
        }
    }
}

impl DataSink for CsvSink {
    type Output = PathBuf;

    fn write(&self, table: &BarTable) -> Result<PathBuf, SinkError> {
        match self {
            CsvSink::Cumulative(sink) => sink.write(table),
            CsvSink::PerSymbol(sink) => sink.write(table),
        }
    }
}

fn write_table<W: Write>(
    writer: W,
    table: &BarTable,
    header: bool,
    path: &Path,
) -> Result<(), SinkError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    if header {
        wtr.write_record(table.header())
            .context(EncodeSnafu { path })?;
    }
    for row in table.rows() {
        wtr.write_record(row).context(EncodeSnafu { path })?;
    }
    wtr.flush().context(WriteSnafu { path })
}
