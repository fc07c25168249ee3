//! Configuration loading from environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use beers_repo::StorageKind;
use exchange_rates::CurrencyLayerConfig;
use exchange_rates::currency_layer::DEFAULT_BASE_URL;

/// Where exchange rate quotes come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyProvider {
    /// Built-in quote table.
    Static,
    CurrencyLayer,
}

impl FromStr for CurrencyProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "static" => Ok(CurrencyProvider::Static),
            "currencylayer" => Ok(CurrencyProvider::CurrencyLayer),
            other => anyhow::bail!(
                "unknown currency provider '{other}' (expected static or currencylayer)"
            ),
        }
    }
}

/// Log line encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            other => anyhow::bail!("unknown log format '{other}' (expected json or pretty)"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub storage: StorageKind,
    pub database_url: Option<String>,
    pub currency_provider: CurrencyProvider,
    /// Set when `currency_provider` is [`CurrencyProvider::CurrencyLayer`].
    pub currency_layer: Option<CurrencyLayerConfig>,
    pub request_timeout: Duration,
    pub log_level: String,
    pub log_format: LogFormat,
    /// OTLP collector; span export is off when unset.
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Blank values count as
    /// unset; malformed values are errors rather than silent defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = var("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(var("SERVER_PORT"), "SERVER_PORT", 8080u16)?;

        let storage = match var("DB_TYPE") {
            Some(raw) => raw
                .parse::<StorageKind>()
                .map_err(|e| anyhow::anyhow!("DB_TYPE: {e}"))?,
            None => StorageKind::InMemory,
        };
        let database_url = var("DATABASE_URL");
        if storage != StorageKind::InMemory && database_url.is_none() {
            anyhow::bail!("DATABASE_URL environment variable is required for {storage} storage");
        }

        let currency_provider = match var("CURRENCY_PROVIDER") {
            Some(raw) => raw.parse::<CurrencyProvider>().context("CURRENCY_PROVIDER")?,
            None => CurrencyProvider::Static,
        };
        let currency_timeout = parse_or(var("CURRENCY_TIMEOUT"), "CURRENCY_TIMEOUT", 10u64)?;
        let currency_layer = match currency_provider {
            CurrencyProvider::Static => None,
            CurrencyProvider::CurrencyLayer => {
                let api_key = var("CURRENCY_API_KEY").ok_or_else(|| {
                    anyhow::anyhow!("CURRENCY_API_KEY is required for the currencylayer provider")
                })?;
                let mut layer = CurrencyLayerConfig::new(api_key);
                layer.base_url =
                    var("CURRENCY_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
                layer.timeout = Duration::from_secs(currency_timeout);
                Some(layer)
            }
        };

        let request_timeout = parse_or(var("REQUEST_TIMEOUT"), "REQUEST_TIMEOUT", 30u64)?;

        let log_level = var("LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let log_format = match var("LOG_FORMAT") {
            Some(raw) => raw.parse::<LogFormat>().context("LOG_FORMAT")?,
            None => LogFormat::Json,
        };

        Ok(Self {
            host,
            port,
            storage,
            database_url,
            currency_provider,
            currency_layer,
            request_timeout: Duration::from_secs(request_timeout),
            log_level,
            log_format,
            otlp_endpoint: var("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }

    /// Address the HTTP listener binds to.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("{key} has invalid value '{raw}': {e}")),
        None => Ok(default),
    }
}
