use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared_utils::env::get_env_var;
use snafu::{ResultExt, ensure};
use tracing::debug;

use crate::errors::excerpt;
use crate::models::{bar_series::BarSeries, request_params::BarsRequestParams};
use crate::providers::{
    ClientBuildSnafu, DataProvider, DecodeSnafu, ExchangeRef, InvalidBaseUrlSnafu,
    MissingEnvVarSnafu, ProviderError, ProviderInitError, ReferenceDataProvider, ReqwestSnafu,
    StatusSnafu,
    polygon_rest::{
        params::{
            API_KEY_ENV, DEFAULT_BASE_URL, ExchangeQuery, TickerQuery, aggregates_path,
            aggregates_query,
        },
        response::{ExchangesResponse, TickersResponse, parse_aggregates},
    },
};

/// Client for the Polygon.io REST API.
///
/// The API key travels as the `apiKey` query parameter. It is kept in a
/// [`SecretString`] and request URLs are never logged.
pub struct PolygonProvider {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

impl PolygonProvider {
    /// Creates a provider against `base_url` (e.g. [`DEFAULT_BASE_URL`]).
    ///
    /// `timeout` of `None` keeps the HTTP client's default behaviour.
    pub fn new(
        api_key: SecretString,
        base_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, ProviderInitError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url).ok();
        ensure!(
            parsed.is_some_and(|u| matches!(u.scheme(), "http" | "https")),
            InvalidBaseUrlSnafu { url: base_url }
        );

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    /// Creates a provider against the production API.
    ///
    /// Reads the API key from the `POLYGON_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, ProviderInitError> {
        let api_key = get_env_var(API_KEY_ENV).context(MissingEnvVarSnafu)?;
        let api_key = SecretString::new(api_key.into());
        Self::new(api_key, DEFAULT_BASE_URL, None)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a GET and returns the body of a successful response.
    async fn get_text<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<String, ProviderError> {
        debug!(path, "GET");
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .query(&[("apiKey", self.api_key.expose_secret())])
            .send()
            .await
            .map_err(|e| e.without_url())
            .context(ReqwestSnafu)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return StatusSnafu {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown"),
                body: excerpt(&body),
            }
            .fail();
        }

        response
            .text()
            .await
            .map_err(|e| e.without_url())
            .context(ReqwestSnafu)
    }

    async fn get_json<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ProviderError> {
        let body = self.get_text(path, query).await?;
        serde_json::from_str(&body).context(DecodeSnafu {
            body: excerpt(&body),
        })
    }
}

#[async_trait]
impl DataProvider for PolygonProvider {
    async fn fetch_bars(&self, params: &BarsRequestParams) -> Result<BarSeries, ProviderError> {
        let body = self
            .get_text(&aggregates_path(params), &aggregates_query(params))
            .await?;
        let bars = parse_aggregates(&body)?;

        Ok(BarSeries {
            symbol: params.symbol.clone(),
            bars,
        })
    }
}

#[async_trait]
impl ReferenceDataProvider for PolygonProvider {
    async fn list_exchanges(
        &self,
        query: &ExchangeQuery,
    ) -> Result<Vec<ExchangeRef>, ProviderError> {
        let response: ExchangesResponse = self.get_json("/v3/reference/exchanges", query).await?;
        Ok(response.results.into_iter().map(ExchangeRef::from).collect())
    }

    async fn list_tickers(&self, query: &TickerQuery) -> Result<Vec<String>, ProviderError> {
        let response: TickersResponse = self.get_json("/v3/reference/tickers", query).await?;
        if response.next_url.is_some() {
            debug!(
                exchange = %query.exchange,
                limit = query.limit,
                "more tickers available beyond the first page; not followed"
            );
        }
        Ok(response.results.into_iter().map(|t| t.ticker).collect())
    }
}
