//! Provider abstraction for market data sources.
//!
//! This module defines two traits that sit between the export pipeline and the HTTP API:
//!
//! - [`DataProvider`] fetches the minute bars for one symbol and date range.
//! - [`ReferenceDataProvider`] lists exchanges and the tickers traded on them; it is
//!   only needed when the symbol list is discovered instead of configured.
//!
//! [`polygon_rest::PolygonProvider`] implements both. Tests substitute in-memory fakes.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use bar_exporter::models::{bar_series::BarSeries, request_params::BarsRequestParams};
//! use bar_exporter::providers::{DataProvider, ProviderError};
//!
//! struct NoBars;
//!
//! #[async_trait]
//! impl DataProvider for NoBars {
//!     async fn fetch_bars(
//!         &self,
//!         params: &BarsRequestParams,
//!     ) -> Result<BarSeries, ProviderError> {
//!         Ok(BarSeries { symbol: params.symbol.clone(), bars: vec![] })
//!     }
//! }
//! ```

pub mod polygon_rest;

use async_trait::async_trait;
use shared_utils::env::MissingEnvVarError;
use snafu::{Backtrace, Snafu};

use crate::errors::NoDataReason;
use crate::models::{bar_series::BarSeries, request_params::BarsRequestParams};
use crate::providers::polygon_rest::params::{ExchangeQuery, TickerQuery};

/// Trait for fetching minute bars from a market data provider.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetches the bars for one symbol over the requested date range.
    ///
    /// # Returns
    ///
    /// * `Ok(BarSeries)` - Bars in provider order; never empty.
    /// * `Err(ProviderError)` - Transport, status, decoding, or "no data" outcomes.
    async fn fetch_bars(&self, params: &BarsRequestParams) -> Result<BarSeries, ProviderError>;
}

/// An exchange as reported by the reference-data endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRef {
    /// Market Identifier Code. Some entries (e.g. TRF venues) carry none.
    pub mic: Option<String>,
}

/// Trait for enumerating exchanges and the tickers listed on them.
#[async_trait]
pub trait ReferenceDataProvider: Send + Sync {
    /// Lists exchanges matching the query.
    async fn list_exchanges(&self, query: &ExchangeQuery)
    -> Result<Vec<ExchangeRef>, ProviderError>;

    /// Lists ticker strings matching the query (a single page, at most `query.limit`).
    async fn list_tickers(&self, query: &TickerQuery) -> Result<Vec<String>, ProviderError>;
}

/// Errors that can occur during the creation of a provider instance.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// missed environment variable.
    #[snafu(display("Missing environment variable: {source}"))]
    MissingEnvVar {
        source: MissingEnvVarError,
        backtrace: Backtrace,
    },

    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// base url is not an absolute http(s) url
    #[snafu(display("Invalid base URL: {url}"))]
    InvalidBaseUrl { url: String, backtrace: Backtrace },
}

/// Errors that can occur within a provider implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The API answered with a non-success status.
    #[snafu(display("API error: {status} {reason}"))]
    Status {
        status: u16,
        reason: String,
        body: String,
        backtrace: Backtrace,
    },

    /// The body is not valid JSON, or a row does not have the expected field types.
    #[snafu(display("Error parsing JSON response: {source}; response content: {body}"))]
    Decode {
        source: serde_json::Error,
        body: String,
        backtrace: Backtrace,
    },

    /// The response was well formed but holds nothing to export.
    #[snafu(display("{reason}"))]
    NoData { reason: NoDataReason },
}

impl ProviderError {
    /// `true` for outcomes that mean "this symbol has nothing to export".
    pub fn is_no_data(&self) -> bool {
        matches!(self, ProviderError::NoData { .. })
    }
}
