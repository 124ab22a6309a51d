//! A collection of bars for a specific symbol.

use crate::models::bar::Bar;

/// Represents the complete set of bars a provider returned for one symbol.
///
/// Bars keep the provider's order; nothing downstream re-sorts or de-duplicates them.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    /// The symbol this data represents (e.g., "AMD").
    pub symbol: String,
    /// The collection of OHLCV bars.
    pub bars: Vec<Bar>,
}
