//! Built-in quote table for development and testing.

use std::collections::HashMap;

use async_trait::async_trait;
use beers_types::ExchangeError;

use crate::{CurrencyCode, QuoteSource};

/// Serves the table from `define_currencies!`, with optional per-currency
/// overrides.
#[derive(Debug, Clone, Default)]
pub struct StaticQuotes {
    overrides: HashMap<CurrencyCode, f64>,
}

impl StaticQuotes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the "units per USD" quote for one currency.
    pub fn with_quote(mut self, code: CurrencyCode, units_per_usd: f64) -> Self {
        self.overrides.insert(code, units_per_usd);
        self
    }
}

#[async_trait]
impl QuoteSource for StaticQuotes {
    async fn usd_quote(&self, code: CurrencyCode) -> Result<f64, ExchangeError> {
        Ok(self
            .overrides
            .get(&code)
            .copied()
            .unwrap_or_else(|| code.base_usd_quote()))
    }
}
