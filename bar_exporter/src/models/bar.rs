//! Canonical in-memory representation of a time-series bar (OHLCV).
//!
//! This struct is the standard output of every [`DataProvider`](crate::providers::DataProvider)
//! implementation. Prices and volumes are kept as [`serde_json::Number`]: integers stay
//! integers and floats are re-rendered in their shortest round-trip form (`138.50` is
//! written as `138.5`, `800.0` stays `800.0`). Floats go through `f64`, so digits beyond
//! its precision are lost; no other rounding or unit conversion is applied.

use chrono::{DateTime, Utc};
use serde_json::Number;

/// A single one-minute bar for a given timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Start of the bar interval, milliseconds since the Unix epoch (UTC).
    pub timestamp_ms: i64,

    /// Opening price.
    pub open: Number,

    /// Highest price during the bar interval.
    pub high: Number,

    /// Lowest price during the bar interval.
    pub low: Number,

    /// Closing price.
    pub close: Number,

    /// Volume traded during the bar interval.
    pub volume: Number,

    /// Volume-weighted average price. Not every bar carries it.
    pub vwap: Option<Number>,

    /// Number of transactions in the bar. Not every bar carries it.
    pub trade_count: Option<Number>,
}

impl Bar {
    /// The bar's timestamp as a UTC datetime, or `None` if the epoch value is out of range.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp_ms)
    }
}
