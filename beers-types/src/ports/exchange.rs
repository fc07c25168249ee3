//! Currency conversion port.
//!
//! This trait defines the interface for exchange rate services.
//! Implementations can be HTTP clients, static tables, test doubles, etc.

/// Error type for currency operations.
///
/// Callers treat every variant as the same failure kind and only propagate
/// the message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExchangeError {
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Invalid response from rate provider: {0}")]
    InvalidResponse(String),

    #[error("Rate provider error {code}: {info}")]
    Provider { code: i64, info: String },

    #[error("Rate not available for {from} -> {to}: {reason}")]
    RateNotAvailable {
        from: String,
        to: String,
        reason: String,
    },
}

/// Port trait for currency conversion gateways.
#[async_trait::async_trait]
pub trait CurrencyService: Send + Sync + 'static {
    /// Multiplicative factor converting one unit of `from` into `to`.
    /// Returns exactly `1.0` when both codes are equal.
    async fn get_exchange_rate(&self, from: &str, to: &str) -> Result<f64, ExchangeError>;

    /// Whether `code` is a currency this gateway can convert.
    async fn is_valid_currency(&self, code: &str) -> Result<bool, ExchangeError>;

    /// All currency codes this gateway can convert.
    async fn get_supported_currencies(&self) -> Result<Vec<String>, ExchangeError>;
}
