//! Export configuration: presets, TOML file, and command-line overrides.
//!
//! Settings are layered, later layers winning:
//! 1. a [`Preset`] (`watchlist` by default),
//! 2. an optional TOML [`ConfigFile`],
//! 3. [`ConfigOverrides`] from the command line.
//!
//! The API key is taken from `POLYGON_API_KEY` if set, otherwise from the file's
//! `api_key`. It is held as a [`SecretString`] from then on.
//!
//! ```toml
//! start = "2024-01-01"
//! end = "2024-04-16"
//!
//! [symbols]
//! source = "list"
//! tickers = ["AMD", "META"]
//!
//! [output]
//! mode = "per_symbol"
//! dir = "New_Stock_data"
//!
//! [layout]
//! columns = "basic"
//! timezone = "US/Eastern"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use indexmap::IndexSet;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use shared_utils::env::{MissingEnvVarError, lookup_env_var};
use thiserror::Error;

use crate::models::request_params::DateRange;
use crate::models::table::{ColumnSet, DatetimeMode, TableLayout};
use crate::providers::polygon_rest::params::{API_KEY_ENV, DEFAULT_BASE_URL};
use crate::tz::{US_EASTERN, UnknownTimeZone, parse_tz};

/// Default file of the cumulative output mode.
pub const CUMULATIVE_DEFAULT_FILE: &str = "final_all_tickers_historic_data.csv";

/// Default directory of the per-symbol output mode.
pub const PER_SYMBOL_DEFAULT_DIR: &str = "New_Stock_data";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("no API key: set POLYGON_API_KEY or `api_key` in the config file")]
    MissingCredential(#[source] MissingEnvVarError),

    #[error("start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("symbol list is empty")]
    EmptySymbolList,

    #[error(transparent)]
    TimeZone(#[from] UnknownTimeZone),
}

/// Where the symbols to export come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum SymbolSource {
    /// Every ticker listed on a U.S. stock exchange.
    Discover,
    /// A fixed list.
    List { tickers: Vec<String> },
}

/// Where the tables are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum OutputTarget {
    /// One shared file, header written once.
    Cumulative { path: PathBuf },
    /// One file per symbol and date range inside `dir`.
    PerSymbol { dir: PathBuf },
}

/// Named starting points matching the two classic export runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Preset {
    /// Discover all U.S. tickers; extended columns in naive UTC; one cumulative file.
    AllTickers,
    /// AMD and META; basic columns in U.S. Eastern time; one file per symbol.
    #[default]
    Watchlist,
}

/// Everything except the connection settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPlan {
    pub symbols: SymbolSource,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub output: OutputTarget,
    pub layout: TableLayout,
}

impl Preset {
    pub fn plan(self) -> ExportPlan {
        // Both dates are valid calendar days.
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
        match self {
            Preset::AllTickers => ExportPlan {
                symbols: SymbolSource::Discover,
                start: date(1990, 1, 1),
                end: date(2024, 4, 16),
                output: OutputTarget::Cumulative {
                    path: PathBuf::from(CUMULATIVE_DEFAULT_FILE),
                },
                layout: TableLayout {
                    columns: ColumnSet::Extended,
                    datetime: DatetimeMode::NaiveUtc,
                },
            },
            Preset::Watchlist => ExportPlan {
                symbols: SymbolSource::List {
                    tickers: vec!["AMD".into(), "META".into()],
                },
                start: date(2024, 1, 1),
                end: date(2024, 4, 16),
                output: OutputTarget::PerSymbol {
                    dir: PathBuf::from(PER_SYMBOL_DEFAULT_DIR),
                },
                layout: TableLayout {
                    columns: ColumnSet::Basic,
                    datetime: DatetimeMode::Zoned(US_EASTERN),
                },
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutFile {
    pub columns: Option<ColumnSet>,
    /// IANA zone name; `"UTC"` renders the same as naive UTC.
    pub timezone: Option<String>,
}

/// On-disk TOML configuration. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub symbols: Option<SymbolSource>,
    pub output: Option<OutputTarget>,
    pub layout: Option<LayoutFile>,
}

impl ConfigFile {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

/// Values supplied on the command line.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub symbols: Option<SymbolSource>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub output: Option<OutputTarget>,
}

/// API access settings: everything a provider needs, nothing about what to export.
#[derive(Debug)]
pub struct ConnectionConfig {
    pub credential: SecretString,
    pub base_url: String,
    pub request_timeout: Option<Duration>,
}

impl ConnectionConfig {
    /// Reads the API key from `POLYGON_API_KEY` when set, otherwise from the file.
    pub fn from_env(file: Option<&ConfigFile>) -> Result<Self, ConfigError> {
        let empty = ConfigFile::default();
        Self::resolve(file.unwrap_or(&empty), lookup_env_var(API_KEY_ENV))
    }

    pub fn resolve(file: &ConfigFile, env_api_key: Option<String>) -> Result<Self, ConfigError> {
        let credential = env_api_key
            .or_else(|| file.api_key.clone())
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                ConfigError::MissingCredential(MissingEnvVarError(API_KEY_ENV.to_string()))
            })?;

        Ok(Self {
            credential: SecretString::new(credential.into()),
            base_url: file
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            request_timeout: file
                .request_timeout_secs
                .filter(|s| *s > 0)
                .map(Duration::from_secs),
        })
    }
}

/// Fully resolved settings for one run.
#[derive(Debug)]
pub struct ExportConfig {
    pub credential: SecretString,
    pub base_url: String,
    pub request_timeout: Option<Duration>,
    pub symbols: SymbolSource,
    pub range: DateRange,
    pub output: OutputTarget,
    pub layout: TableLayout,
}

impl ExportConfig {
    /// Resolves the layers, reading the API key from `POLYGON_API_KEY` when set.
    pub fn from_env(
        preset: Preset,
        file: Option<ConfigFile>,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        Self::resolve(preset, file, overrides, lookup_env_var(API_KEY_ENV))
    }

    /// Resolves the layers with an explicit environment API key.
    pub fn resolve(
        preset: Preset,
        file: Option<ConfigFile>,
        overrides: ConfigOverrides,
        env_api_key: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut plan = preset.plan();
        let file = file.unwrap_or_default();
        let connection = ConnectionConfig::resolve(&file, env_api_key)?;

        if let Some(symbols) = file.symbols {
            plan.symbols = symbols;
        }
        if let Some(start) = file.start {
            plan.start = start;
        }
        if let Some(end) = file.end {
            plan.end = end;
        }
        if let Some(output) = file.output {
            plan.output = output;
        }
        if let Some(layout) = file.layout {
            if let Some(columns) = layout.columns {
                plan.layout.columns = columns;
            }
            if let Some(name) = layout.timezone {
                plan.layout.datetime = DatetimeMode::Zoned(parse_tz(&name)?);
            }
        }

        if let Some(symbols) = overrides.symbols {
            plan.symbols = symbols;
        }
        if let Some(start) = overrides.start {
            plan.start = start;
        }
        if let Some(end) = overrides.end {
            plan.end = end;
        }
        if let Some(output) = overrides.output {
            plan.output = output;
        }

        let range = DateRange::new(plan.start, plan.end).ok_or(ConfigError::InvalidRange {
            start: plan.start,
            end: plan.end,
        })?;

        let symbols = match plan.symbols {
            SymbolSource::Discover => SymbolSource::Discover,
            SymbolSource::List { tickers } => {
                let tickers = normalize_tickers(tickers);
                if tickers.is_empty() {
                    return Err(ConfigError::EmptySymbolList);
                }
                SymbolSource::List { tickers }
            }
        };

        Ok(Self {
            credential: connection.credential,
            base_url: connection.base_url,
            request_timeout: connection.request_timeout,
            symbols,
            range,
            output: plan.output,
            layout: plan.layout,
        })
    }
}

/// Trims, drops blanks, and removes duplicates while keeping first-seen order.
pub fn normalize_tickers<I, S>(tickers: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tickers
        .into_iter()
        .map(|t| t.as_ref().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}
