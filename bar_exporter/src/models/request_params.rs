use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive calendar-date range used both in the request URL and in per-symbol filenames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day requested (inclusive).
    pub start: NaiveDate,
    /// Last day requested (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range, returning `None` when `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Parameters for one aggregates request: a single symbol over a date range.
///
/// The bar size is fixed to one minute; only the adjustment flag is exposed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BarsRequestParams {
    /// Symbol to request (e.g. `"AMD"`).
    pub symbol: String,

    /// Date range to request.
    pub range: DateRange,

    /// When `false` (the default) the provider returns split-adjusted bars.
    pub unadjusted: bool,
}

impl BarsRequestParams {
    pub fn new(symbol: impl Into<String>, range: DateRange) -> Self {
        Self {
            symbol: symbol.into(),
            range,
            unadjusted: false,
        }
    }
}
