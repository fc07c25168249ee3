//! Currency Table and USD-Pivot Exchange Rates
//!
//! Supported currencies are declared once with the `define_currencies!` macro,
//! which generates the [`CurrencyCode`] enum and its lookup tables.
//!
//! Every rate is derived from "units per 1 USD" quotes: the rate from `A` to
//! `B` is `quote(B) / quote(A)`. [`PivotCurrencyService`] owns that arithmetic
//! and implements the [`beers_types::CurrencyService`] port over any
//! [`QuoteSource`]:
//! - [`StaticQuotes`] - built-in table, for development and testing
//! - [`CurrencyLayerClient`] - live quotes from the CurrencyLayer HTTP API
//!
//! # Adding a New Currency
//! Add a line to the `define_currencies!` invocation:
//! ```ignore
//! define_currencies! {
//!     // ... existing currencies ...
//!     PLN => ("PLN", "zł", 3.95),
//! }
//! ```
//!
//! # Example
//! ```
//! use exchange_rates::{CurrencyCode, PivotCurrencyService, StaticQuotes, cross_rate};
//!
//! let _gateway = PivotCurrencyService::new(StaticQuotes::new());
//!
//! // 0.92 EUR per USD: one EUR buys 1/0.92 USD
//! let eur = CurrencyCode::EUR.base_usd_quote();
//! let rate = cross_rate(eur, 1.0).unwrap();
//! assert!((rate - 1.0 / 0.92).abs() < 1e-12);
//! ```

use std::fmt;

use async_trait::async_trait;
use beers_types::ExchangeError;

pub mod currency_layer;
pub mod pivot;
pub mod static_quotes;

pub use currency_layer::{CurrencyLayerClient, CurrencyLayerConfig};
pub use pivot::{PivotCurrencyService, QuoteSource, cross_rate};
pub use static_quotes::StaticQuotes;

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines the CurrencyCode enum and its lookup tables
// ─────────────────────────────────────────────────────────────────────────────

/// Defines the supported currencies.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     Name => ("CODE", "SYMBOL", units_per_usd),
/// }
/// ```
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($code:literal, $symbol:literal, $usd_quote:expr)
        ),* $(,)?
    ) => {
        /// Currency codes supported by the gateway.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
        #[serde(rename_all = "UPPERCASE")]
        pub enum CurrencyCode {
            $($name),*
        }

        impl CurrencyCode {
            pub fn code(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $code),*
                }
            }

            pub fn symbol(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $symbol),*
                }
            }

            /// Units of this currency per 1 USD in the built-in table.
            pub fn base_usd_quote(&self) -> f64 {
                match self {
                    $(CurrencyCode::$name => $usd_quote),*
                }
            }

            pub fn all() -> &'static [CurrencyCode] {
                &[$(CurrencyCode::$name),*]
            }
        }

        impl std::str::FromStr for CurrencyCode {
            type Err = ExchangeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_uppercase().as_str() {
                    $($code => Ok(CurrencyCode::$name),)*
                    _ => Err(ExchangeError::UnsupportedCurrency(s.to_string())),
                }
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS - Add new currencies here!
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    USD => ("USD", "$", 1.0),
    EUR => ("EUR", "€", 0.92),
    GBP => ("GBP", "£", 0.79),
    JPY => ("JPY", "¥", 149.5),
    AUD => ("AUD", "A$", 1.52),
    CAD => ("CAD", "C$", 1.36),
    CHF => ("CHF", "CHF", 0.88),
    CNY => ("CNY", "¥", 7.24),
    SEK => ("SEK", "kr", 10.45),
    NZD => ("NZD", "NZ$", 1.64),
    MXN => ("MXN", "MX$", 17.1),
    SGD => ("SGD", "S$", 1.34),
    HKD => ("HKD", "HK$", 7.82),
    NOK => ("NOK", "kr", 10.6),
    TRY => ("TRY", "₺", 32.2),
    ZAR => ("ZAR", "R", 18.6),
    BRL => ("BRL", "R$", 5.0),
    INR => ("INR", "₹", 83.12),
    RUB => ("RUB", "₽", 91.5),
    KRW => ("KRW", "₩", 1330.0),
    CLP => ("CLP", "$", 940.0),
    ARS => ("ARS", "$", 870.0),
    COP => ("COP", "$", 3900.0),
    PEN => ("PEN", "S/", 3.75),
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Runtime-selected quote source
// ─────────────────────────────────────────────────────────────────────────────

/// Quote source chosen from configuration at startup.
pub enum QuoteProvider {
    Static(StaticQuotes),
    CurrencyLayer(CurrencyLayerClient),
}

#[async_trait]
impl QuoteSource for QuoteProvider {
    async fn usd_quote(&self, code: CurrencyCode) -> Result<f64, ExchangeError> {
        match self {
            QuoteProvider::Static(source) => source.usd_quote(code).await,
            QuoteProvider::CurrencyLayer(source) => source.usd_quote(code).await,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
