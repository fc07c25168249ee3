//! CurrencyLayer live quote source.
//!
//! CurrencyLayer quotes every currency against USD under keys such as
//! `"USDEUR"`, which is exactly what [`QuoteSource`] needs.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use beers_types::ExchangeError;
use reqwest::Client;
use serde::Deserialize;

use crate::{CurrencyCode, QuoteSource};

/// Default CurrencyLayer endpoint.
pub const DEFAULT_BASE_URL: &str = "http://api.currencylayer.com";

/// Connection settings for [`CurrencyLayerClient`].
#[derive(Debug, Clone)]
pub struct CurrencyLayerConfig {
    pub api_key: String,
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl CurrencyLayerConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Body of a `/live` response.
#[derive(Debug, Deserialize)]
struct LiveResponse {
    success: bool,
    #[serde(default)]
    quotes: HashMap<String, f64>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: i64,
    info: String,
}

/// HTTP client for the CurrencyLayer `/live` endpoint.
pub struct CurrencyLayerClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl CurrencyLayerClient {
    pub fn new(config: CurrencyLayerConfig) -> Result<Self, ExchangeError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ExchangeError::ServiceUnavailable(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }
}

fn extract_quote(body: LiveResponse, code: CurrencyCode) -> Result<f64, ExchangeError> {
    if !body.success {
        return Err(match body.error {
            Some(e) => ExchangeError::Provider {
                code: e.code,
                info: e.info,
            },
            None => ExchangeError::ServiceUnavailable("API request failed".into()),
        });
    }

    let key = format!("USD{}", code.code());
    body.quotes
        .get(&key)
        .copied()
        .ok_or_else(|| ExchangeError::InvalidResponse(format!("rate not found for {key}")))
}

#[async_trait]
impl QuoteSource for CurrencyLayerClient {
    #[tracing::instrument(skip(self), fields(currency = %code))]
    async fn usd_quote(&self, code: CurrencyCode) -> Result<f64, ExchangeError> {
        let resp = self
            .http
            .get(format!("{}/live", self.base_url))
            .query(&[("access_key", self.api_key.as_str()), ("currencies", code.code())])
            .send()
            .await
            .map_err(|e| ExchangeError::ServiceUnavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ExchangeError::ServiceUnavailable(format!(
                "API returned status {}",
                status.as_u16()
            )));
        }

        let body: LiveResponse = resp
            .json()
            .await
            .map_err(|e| ExchangeError::InvalidResponse(e.to_string()))?;

        extract_quote(body, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> LiveResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_extract_quote() {
        let body = parse(r#"{"success":true,"source":"USD","quotes":{"USDCLP":940.5}}"#);
        assert_eq!(extract_quote(body, CurrencyCode::CLP).unwrap(), 940.5);
    }

    #[test]
    fn test_extract_missing_quote() {
        let body = parse(r#"{"success":true,"quotes":{"USDEUR":0.92}}"#);
        let err = extract_quote(body, CurrencyCode::CLP).unwrap_err();
        assert!(matches!(err, ExchangeError::InvalidResponse(msg) if msg.contains("USDCLP")));
    }

    #[test]
    fn test_extract_provider_error() {
        let body = parse(
            r#"{"success":false,"error":{"code":101,"info":"You have not supplied an API Access Key."}}"#,
        );
        let err = extract_quote(body, CurrencyCode::EUR).unwrap_err();
        assert_eq!(
            err,
            ExchangeError::Provider {
                code: 101,
                info: "You have not supplied an API Access Key.".into()
            }
        );
    }

    #[test]
    fn test_extract_failure_without_error_object() {
        let body = parse(r#"{"success":false}"#);
        assert!(matches!(
            extract_quote(body, CurrencyCode::EUR),
            Err(ExchangeError::ServiceUnavailable(_))
        ));
    }

    #[test]
    fn test_base_url_is_normalized() {
        let mut config = CurrencyLayerConfig::new("key");
        config.base_url = "http://localhost:9000/".into();
        let client = CurrencyLayerClient::new(config).unwrap();
        assert_eq!(client.base_url, "http://localhost:9000");
    }
}
