//! The export loop: resolve symbols, then fetch → transform → persist each one.
//!
//! Symbols are processed strictly one after another. A symbol that fails to fetch,
//! has no data, or fails to write is logged and skipped; the loop always runs to
//! the end. Only symbol discovery can abort a run.

use std::path::PathBuf;

use indexmap::IndexSet;
use tracing::{info, warn};

use crate::config::SymbolSource;
use crate::discovery::discover_us_stock_tickers;
use crate::io::sink::DataSink;
use crate::models::{
    request_params::{BarsRequestParams, DateRange},
    table::{BarTable, TableLayout},
};
use crate::providers::{DataProvider, NoDataSnafu, ProviderError, ReferenceDataProvider};
use crate::transform::to_table;

/// Turns the configured source into the list of symbols to export.
///
/// Discovery errors are returned unchanged; the caller is expected to stop.
pub async fn resolve_symbols(
    source: &SymbolSource,
    reference: &dyn ReferenceDataProvider,
) -> Result<Vec<String>, ProviderError> {
    match source {
        SymbolSource::List { tickers } => Ok(tickers.clone()),
        SymbolSource::Discover => Ok(discover_us_stock_tickers(reference)
            .await?
            .into_iter()
            .collect()),
    }
}

/// Fetches one symbol and builds its table.
pub async fn try_fetch_table(
    provider: &dyn DataProvider,
    symbol: &str,
    range: DateRange,
    layout: &TableLayout,
) -> Result<BarTable, ProviderError> {
    let series = provider
        .fetch_bars(&BarsRequestParams::new(symbol, range))
        .await?;
    if series.bars.is_empty() {
        return NoDataSnafu {
            reason: crate::errors::NoDataReason::EmptyResults,
        }
        .fail();
    }
    to_table(&series, layout).map_err(|reason| ProviderError::NoData { reason })
}

/// Fetches one symbol and builds its table, or logs why not and returns `None`.
pub async fn fetch_table(
    provider: &dyn DataProvider,
    symbol: &str,
    range: DateRange,
    layout: &TableLayout,
) -> Option<BarTable> {
    match try_fetch_table(provider, symbol, range, layout).await {
        Ok(table) => Some(table),
        Err(e) if e.is_no_data() => {
            warn!(%symbol, reason = %e, "No data available for {symbol}.");
            None
        }
        Err(e) => {
            warn!(%symbol, error = %e, "An error occurred while fetching data for {symbol}");
            None
        }
    }
}

/// Outcome counts of an export run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub total: usize,
    pub written: usize,
    /// Symbols that fetched nothing (any fetch failure or "no data" outcome).
    pub skipped: Vec<String>,
    /// Symbols whose table could not be written.
    pub write_failed: Vec<String>,
    /// Distinct files written, in first-write order.
    pub files: IndexSet<PathBuf>,
}

impl ExportSummary {
    pub fn all_written(&self) -> bool {
        self.written == self.total
    }
}

/// Runs the export loop over `symbols`.
pub async fn run_export<S>(
    provider: &dyn DataProvider,
    sink: &S,
    symbols: &[String],
    range: DateRange,
    layout: &TableLayout,
) -> ExportSummary
where
    S: DataSink<Output = PathBuf>,
{
    let mut summary = ExportSummary {
        total: symbols.len(),
        ..Default::default()
    };

    for (i, symbol) in symbols.iter().enumerate() {
        info!(
            "[{}/{}] Fetching {symbol} {range}",
            i + 1,
            summary.total
        );

        let Some(table) = fetch_table(provider, symbol, range, layout).await else {
            summary.skipped.push(symbol.clone());
            continue;
        };

        match sink.write(&table) {
            Ok(path) => {
                info!(rows = table.len(), "Data for {symbol} saved to {}", path.display());
                summary.written += 1;
                summary.files.insert(path);
            }
            Err(e) => {
                warn!(%symbol, error = %e, "An error occurred while saving data for {symbol}");
                summary.write_failed.push(symbol.clone());
            }
        }
    }

    info!(
        written = summary.written,
        skipped = summary.skipped.len(),
        write_failed = summary.write_failed.len(),
        "Export complete: {}/{} symbols written",
        summary.written,
        summary.total
    );
    summary
}
