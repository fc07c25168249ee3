//! # Beers Hex
//!
//! Application service layer and HTTP adapter for the beer catalog.
//!
//! ## Architecture
//!
//! - `service` - Application service (orchestrates domain operations)
//! - `pricing` - Box price calculator (currency conversion + arithmetic)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi` - OpenAPI document served by Swagger UI
//!
//! The service is generic over `R: BeerRepository` and `C: CurrencyService`,
//! allowing different adapters to be injected.

pub mod inbound;
pub mod openapi;
pub mod pricing;
pub mod service;


pub use pricing::{BoxPriceCalculator, BoxQuote};
pub use service::BeerService;
