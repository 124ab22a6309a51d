//! Ticker discovery across all U.S. stock exchanges.
//!
//! Unlike the per-symbol fetch loop, nothing here is caught: an error while listing
//! exchanges or tickers is returned to the caller, which aborts the run.

use indexmap::IndexSet;
use tracing::{debug, info};

use crate::providers::{
    ProviderError, ReferenceDataProvider,
    polygon_rest::params::{ExchangeQuery, TickerQuery},
};

/// Distinct, non-null Market Identifier Codes of U.S. stock exchanges,
/// in the order the provider listed them.
pub async fn us_stock_exchange_mics(
    provider: &dyn ReferenceDataProvider,
) -> Result<IndexSet<String>, ProviderError> {
    let exchanges = provider.list_exchanges(&ExchangeQuery::us_stocks()).await?;
    Ok(exchanges.into_iter().filter_map(|e| e.mic).collect())
}

/// Every distinct ticker (active or inactive) listed on a U.S. stock exchange.
///
/// One page of up to 1000 tickers is requested per exchange. Symbols keep the
/// order of their first appearance.
pub async fn discover_us_stock_tickers(
    provider: &dyn ReferenceDataProvider,
) -> Result<IndexSet<String>, ProviderError> {
    let mics = us_stock_exchange_mics(provider).await?;
    debug!(exchanges = mics.len(), "listing tickers per exchange");

    let mut tickers = IndexSet::new();
    for mic in &mics {
        let listed = provider.list_tickers(&TickerQuery::stocks_on(mic.as_str())).await?;
        debug!(exchange = %mic, count = listed.len(), "tickers listed");
        tickers.extend(listed);
    }

    info!("Total number of Tickers {}", tickers.len());
    Ok(tickers)
}
