//! USD-pivot conversion gateway.

use async_trait::async_trait;
use beers_types::{CurrencyService, ExchangeError};

use crate::CurrencyCode;

/// A source of "units per 1 USD" quotes.
#[async_trait]
pub trait QuoteSource: Send + Sync + 'static {
    /// Units of `code` obtained for one US dollar.
    async fn usd_quote(&self, code: CurrencyCode) -> Result<f64, ExchangeError>;
}

/// Cross rate from two USD quotes: `(1 / usd_to_from) * usd_to_to`.
pub fn cross_rate(usd_to_from: f64, usd_to_to: f64) -> Result<f64, ExchangeError> {
    for quote in [usd_to_from, usd_to_to] {
        if !(quote > 0.0) || !quote.is_finite() {
            return Err(ExchangeError::InvalidResponse(format!(
                "quote must be a positive number, got {quote}"
            )));
        }
    }
    Ok(usd_to_to / usd_to_from)
}

/// [`CurrencyService`] that derives every rate through USD.
///
/// This is the single owner of pivot arithmetic: callers always make one
/// `get_exchange_rate(from, to)` call.
pub struct PivotCurrencyService<S: QuoteSource> {
    source: S,
}

impl<S: QuoteSource> PivotCurrencyService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Returns a reference to the underlying quote source.
    pub fn source(&self) -> &S {
        &self.source
    }

    async fn leg(&self, code: CurrencyCode) -> Result<f64, ExchangeError> {
        if code == CurrencyCode::USD {
            return Ok(1.0);
        }
        self.source.usd_quote(code).await
    }
}

#[async_trait]
impl<S: QuoteSource> CurrencyService for PivotCurrencyService<S> {
    #[tracing::instrument(skip(self))]
    async fn get_exchange_rate(&self, from: &str, to: &str) -> Result<f64, ExchangeError> {
        if from == to {
            return Ok(1.0);
        }

        let from_code: CurrencyCode = from.parse()?;
        let to_code: CurrencyCode = to.parse()?;
        if from_code == to_code {
            return Ok(1.0);
        }

        // Both legs are resolved together; either failing fails the pair.
        let (from_quote, to_quote) = tokio::try_join!(self.leg(from_code), self.leg(to_code))
            .map_err(|e| ExchangeError::RateNotAvailable {
                from: from_code.to_string(),
                to: to_code.to_string(),
                reason: e.to_string(),
            })?;

        let rate = cross_rate(from_quote, to_quote)?;
        tracing::debug!(%from_code, %to_code, rate, "exchange rate resolved");
        Ok(rate)
    }

    async fn is_valid_currency(&self, code: &str) -> Result<bool, ExchangeError> {
        Ok(code.parse::<CurrencyCode>().is_ok())
    }

    async fn get_supported_currencies(&self) -> Result<Vec<String>, ExchangeError> {
        Ok(CurrencyCode::all()
            .iter()
            .map(|c| c.code().to_string())
            .collect())
    }
}
