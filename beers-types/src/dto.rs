//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::BeerId;

/// Largest quantity accepted for a single box price calculation.
pub const MAX_BOX_QUANTITY: i64 = 1000;

// ─────────────────────────────────────────────────────────────────────────────
// Beer DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a new beer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateBeerRequest {
    /// Caller-assigned beer ID (must be positive and unused)
    #[schema(value_type = i64, example = 1)]
    pub id: BeerId,
    #[schema(example = "Golden")]
    pub name: String,
    #[schema(example = "Kross")]
    pub brewery: String,
    #[schema(example = "Chile")]
    pub country: String,
    /// Unit price in `currency`
    #[schema(example = 10.5)]
    pub price: f64,
    /// 3-letter currency code
    #[schema(example = "EUR")]
    pub currency: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Box price DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to price a box of beers in a target currency.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BoxPriceRequest {
    #[schema(value_type = i64, example = 1)]
    pub beer_id: BeerId,
    /// Number of units in the box (1 to 1000)
    #[schema(example = 6)]
    pub quantity: i64,
    /// Target currency code
    #[schema(example = "USD")]
    pub currency: String,
}

/// Result of a box price calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BoxPriceResponse {
    #[schema(value_type = i64, example = 1)]
    pub beer_id: BeerId,
    #[schema(example = "Golden")]
    pub beer_name: String,
    #[schema(example = 6)]
    pub quantity: i64,
    /// Unit price converted to `currency`
    #[schema(example = 12.39)]
    pub unit_price: f64,
    #[schema(example = 74.34)]
    pub total_price: f64,
    #[schema(example = "USD")]
    pub currency: String,
    /// Rate applied; absent when no conversion was needed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 1.18)]
    pub exchange_rate: Option<f64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Error body
// ─────────────────────────────────────────────────────────────────────────────

/// JSON body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable code, e.g. `BEER_NOT_FOUND`
    #[schema(example = "BEER_NOT_FOUND")]
    pub error: String,
    #[schema(example = "Beer not found: 1")]
    pub message: String,
    /// HTTP status code
    #[schema(example = 404)]
    pub code: u16,
}
