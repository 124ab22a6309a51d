//! Response decoding for the Polygon endpoints.
//!
//! The aggregates body is first parsed as a generic JSON value so that the
//! "missing `results`", "empty `results`" and "row without `t`" cases can be told
//! apart and reported individually; only then are rows decoded into [`AggregateBar`].

use serde::Deserialize;
use serde_json::{Number, Value};
use snafu::ResultExt;

use crate::errors::{NoDataReason, excerpt};
use crate::models::bar::Bar;
use crate::providers::{DecodeSnafu, ExchangeRef, NoDataSnafu, ProviderError};

/// One row of `results` in an aggregates response.
#[derive(Deserialize, Debug)]
pub struct AggregateBar {
    #[serde(rename = "t")]
    pub timestamp_ms: i64,
    #[serde(rename = "o")]
    pub open: Number,
    #[serde(rename = "h")]
    pub high: Number,
    #[serde(rename = "l")]
    pub low: Number,
    #[serde(rename = "c")]
    pub close: Number,
    #[serde(rename = "v")]
    pub volume: Number,
    #[serde(rename = "vw", default)]
    pub vwap: Option<Number>,
    #[serde(rename = "n", default)]
    pub trade_count: Option<Number>,
}

impl From<AggregateBar> for Bar {
    fn from(ab: AggregateBar) -> Self {
        Bar {
            timestamp_ms: ab.timestamp_ms,
            open: ab.open,
            high: ab.high,
            low: ab.low,
            close: ab.close,
            volume: ab.volume,
            vwap: ab.vwap,
            trade_count: ab.trade_count,
        }
    }
}

/// Decode an aggregates response body into bars.
pub fn parse_aggregates(body: &str) -> Result<Vec<Bar>, ProviderError> {
    let value: Value = serde_json::from_str(body).context(DecodeSnafu {
        body: excerpt(body),
    })?;

    let rows = match value.get("results") {
        None => {
            return NoDataSnafu {
                reason: NoDataReason::MissingResults {
                    body: excerpt(body),
                },
            }
            .fail();
        }
        Some(Value::Array(rows)) if !rows.is_empty() => rows,
        Some(_) => {
            return NoDataSnafu {
                reason: NoDataReason::EmptyResults,
            }
            .fail();
        }
    };

    if let Some(row) = rows
        .iter()
        .position(|r| r.get("t").is_none_or(Value::is_null))
    {
        return NoDataSnafu {
            reason: NoDataReason::MissingTimestamp { row },
        }
        .fail();
    }

    rows.iter()
        .map(|row| {
            AggregateBar::deserialize(row)
                .map(Bar::from)
                .context(DecodeSnafu {
                    body: excerpt(&row.to_string()),
                })
        })
        .collect()
}

#[derive(Deserialize, Debug)]
pub struct ExchangesResponse {
    #[serde(default)]
    pub results: Vec<ExchangeRow>,
}

#[derive(Deserialize, Debug)]
pub struct ExchangeRow {
    #[serde(default)]
    pub mic: Option<String>,
}

impl From<ExchangeRow> for ExchangeRef {
    fn from(row: ExchangeRow) -> Self {
        ExchangeRef {
            mic: row.mic,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct TickersResponse {
    #[serde(default)]
    pub results: Vec<TickerRow>,
    #[serde(default)]
    pub next_url: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct TickerRow {
    pub ticker: String,
}
