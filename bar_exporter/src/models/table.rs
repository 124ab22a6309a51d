//! Tabular, export-ready view of a [`BarSeries`](crate::models::bar_series::BarSeries).
//!
//! A [`BarTable`] is what the sinks write: an ordered column list with descriptive
//! labels and one row of rendered cells per bar. The shape is controlled by a
//! [`TableLayout`], which picks the column set and how the datetime column is rendered.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// One output column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    Symbol,
    Datetime,
    Open,
    High,
    Low,
    Close,
    Volume,
    Vwap,
    TradeCount,
}

impl Column {
    /// Header label written to the output file.
    pub fn label(self) -> &'static str {
        match self {
            Column::Symbol => "Symbol",
            Column::Datetime => "Datetime",
            Column::Open => "Open",
            Column::High => "High",
            Column::Low => "Low",
            Column::Close => "Close",
            Column::Volume => "Volume",
            Column::Vwap => "Volume Weighted Average Price",
            Column::TradeCount => "Number of Transactions",
        }
    }
}

/// Which columns to export.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnSet {
    /// Symbol, Datetime, Open, High, Low, Close, Volume.
    #[default]
    Basic,
    /// The basic set plus VWAP and transaction count.
    Extended,
}

impl ColumnSet {
    /// Columns in output order.
    pub fn columns(self) -> &'static [Column] {
        const BASIC: &[Column] = &[
            Column::Symbol,
            Column::Datetime,
            Column::Open,
            Column::High,
            Column::Low,
            Column::Close,
            Column::Volume,
        ];
        const EXTENDED: &[Column] = &[
            Column::Symbol,
            Column::Datetime,
            Column::Open,
            Column::High,
            Column::Low,
            Column::Close,
            Column::Volume,
            Column::Vwap,
            Column::TradeCount,
        ];
        match self {
            ColumnSet::Basic => BASIC,
            ColumnSet::Extended => EXTENDED,
        }
    }
}

/// How the `Datetime` column is rendered from the epoch-millisecond timestamp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DatetimeMode {
    /// UTC wall clock, no offset suffix.
    #[default]
    NaiveUtc,
    /// Converted to the given zone, rendered as wall clock without an offset suffix.
    Zoned(Tz),
}

/// Column set plus datetime rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableLayout {
    pub columns: ColumnSet,
    pub datetime: DatetimeMode,
}

/// Rows for one symbol, ready to be written.
#[derive(Clone, Debug, PartialEq)]
pub struct BarTable {
    symbol: String,
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl BarTable {
    /// Builds a table. Every row must have one cell per column.
    pub(crate) fn new(symbol: String, columns: Vec<Column>, rows: Vec<Vec<String>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self {
            symbol,
            columns,
            rows,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Descriptive header labels in column order.
    pub fn header(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.label()).collect()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_sets_share_a_prefix() {
        let basic = ColumnSet::Basic.columns();
        let extended = ColumnSet::Extended.columns();
        assert_eq!(basic.len(), 7);
        assert_eq!(&extended[..basic.len()], basic);
        assert_eq!(extended[7..], [Column::Vwap, Column::TradeCount]);
    }
}
