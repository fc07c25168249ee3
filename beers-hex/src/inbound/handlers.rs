//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use beers_types::{
    AppError, BeerId, BeerRepository, BoxPriceRequest, CreateBeerRequest, CurrencyService,
    DomainError, ErrorResponse,
};

use crate::BeerService;

/// Default `quantity` for `GET /beers/{id}/boxprice`.
pub const DEFAULT_BOX_QUANTITY: i64 = 1;
/// Default `currency` for `GET /beers/{id}/boxprice`.
pub const DEFAULT_BOX_CURRENCY: &str = "USD";

/// Application state shared across handlers.
pub struct AppState<R: BeerRepository, C: CurrencyService> {
    pub service: BeerService<R, C>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Error mapping
// ─────────────────────────────────────────────────────────────────────────────

/// Error returned by every handler.
#[derive(Debug)]
pub enum ApiError {
    /// Failure raised by the application service.
    App(AppError),
    /// Request rejected before reaching the service.
    BadRequest {
        code: &'static str,
        message: String,
    },
}

impl ApiError {
    fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            code,
            message: message.into(),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError::App(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            ApiError::App(AppError::Validation(e)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            ApiError::App(AppError::Domain(e)) => {
                let status = match &e {
                    DomainError::BeerNotFound(_) => StatusCode::NOT_FOUND,
                    DomainError::BeerAlreadyExists(_) => StatusCode::CONFLICT,
                    DomainError::InvalidCurrency(_) => StatusCode::BAD_REQUEST,
                };
                (status, e.code(), e.to_string())
            }
            ApiError::App(err) => {
                // Collaborator details stay in the logs.
                tracing::error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            message,
            code: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

fn parse_beer_id(raw: &str) -> Result<BeerId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("INVALID_ID", format!("invalid beer id: {raw}")))
}

// ─────────────────────────────────────────────────────────────────────────────
// Response bodies
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CurrenciesResponse {
    /// Supported 3-letter currency codes
    #[schema(example = json!(["USD", "EUR", "CLP"]))]
    pub currencies: Vec<String>,
}

/// Query string of `GET /beers/{id}/boxprice`.
///
/// Kept as raw strings so a malformed value maps to `INVALID_QUANTITY`
/// instead of a generic extractor rejection.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BoxPriceParams {
    /// Number of units (default 1)
    #[param(value_type = Option<i64>, example = 6)]
    pub quantity: Option<String>,
    /// Target currency (default USD)
    #[param(example = "USD")]
    pub currency: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".into(),
    })
}

/// Create a beer.
#[tracing::instrument(skip_all)]
pub async fn create_beer<R: BeerRepository, C: CurrencyService>(
    State(state): State<Arc<AppState<R, C>>>,
    payload: Result<Json<CreateBeerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) =
        payload.map_err(|e| ApiError::bad_request("INVALID_REQUEST", e.body_text()))?;
    let beer = state.service.create_beer(req).await?;
    Ok((StatusCode::CREATED, Json(beer)))
}

/// List all beers.
#[tracing::instrument(skip(state))]
pub async fn list_beers<R: BeerRepository, C: CurrencyService>(
    State(state): State<Arc<AppState<R, C>>>,
) -> Result<impl IntoResponse, ApiError> {
    let beers = state.service.find_all_beers().await?;
    Ok(Json(beers))
}

/// Get beer by ID.
#[tracing::instrument(skip(state), fields(beer_id = %id))]
pub async fn get_beer<R: BeerRepository, C: CurrencyService>(
    State(state): State<Arc<AppState<R, C>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let beer_id = parse_beer_id(&id)?;
    let beer = state.service.find_beer_by_id(beer_id).await?;
    Ok(Json(beer))
}

/// Price a box of beers.
#[tracing::instrument(skip(state), fields(beer_id = %id))]
pub async fn box_price<R: BeerRepository, C: CurrencyService>(
    State(state): State<Arc<AppState<R, C>>>,
    Path(id): Path<String>,
    Query(params): Query<BoxPriceParams>,
) -> Result<impl IntoResponse, ApiError> {
    let beer_id = parse_beer_id(&id)?;

    let quantity = match params.quantity.as_deref().map(str::trim) {
        None | Some("") => DEFAULT_BOX_QUANTITY,
        Some(raw) => raw.parse().map_err(|_| {
            ApiError::bad_request("INVALID_QUANTITY", format!("invalid quantity: {raw}"))
        })?,
    };

    let currency = match params.currency.as_deref().map(str::trim) {
        None | Some("") => DEFAULT_BOX_CURRENCY.to_string(),
        Some(code) => code.to_string(),
    };

    let resp = state
        .service
        .calculate_box_price(BoxPriceRequest {
            beer_id,
            quantity,
            currency,
        })
        .await?;
    Ok(Json(resp))
}

/// List supported currency codes.
#[tracing::instrument(skip(state))]
pub async fn currencies<R: BeerRepository, C: CurrencyService>(
    State(state): State<Arc<AppState<R, C>>>,
) -> Result<impl IntoResponse, ApiError> {
    let currencies = state.service.supported_currencies().await?;
    Ok(Json(CurrenciesResponse { currencies }))
}
