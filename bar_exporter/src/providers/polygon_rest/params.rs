use serde::Serialize;

use crate::models::request_params::BarsRequestParams;

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.polygon.io";

/// Environment variable the API key is read from.
pub const API_KEY_ENV: &str = "POLYGON_API_KEY";

/// Page size requested per exchange during ticker discovery.
pub const TICKER_PAGE_LIMIT: u32 = 1000;

/// Path of the one-minute aggregates endpoint for a request.
pub fn aggregates_path(params: &BarsRequestParams) -> String {
    format!(
        "/v2/aggs/ticker/{}/range/1/minute/{}/{}",
        params.symbol, params.range.start, params.range.end
    )
}

/// Query parameters for the aggregates endpoint, excluding the API key.
pub fn aggregates_query(params: &BarsRequestParams) -> Vec<(String, String)> {
    vec![("unadjusted".to_string(), params.unadjusted.to_string())]
}

/// Filter for `/v3/reference/exchanges`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ExchangeQuery {
    pub asset_class: String,
    pub locale: String,
}

impl ExchangeQuery {
    /// All U.S. stock exchanges.
    pub fn us_stocks() -> Self {
        Self {
            asset_class: "stocks".into(),
            locale: "us".into(),
        }
    }
}

/// Filter for `/v3/reference/tickers`.
///
/// `active = false` asks for tickers regardless of listing status.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct TickerQuery {
    pub market: String,
    pub exchange: String,
    pub active: bool,
    pub limit: u32,
}

impl TickerQuery {
    /// Stock tickers on one exchange, one page of [`TICKER_PAGE_LIMIT`].
    pub fn stocks_on(exchange: impl Into<String>) -> Self {
        Self {
            market: "stocks".into(),
            exchange: exchange.into(),
            active: false,
            limit: TICKER_PAGE_LIMIT,
        }
    }
}
