//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use beers_types::domain::{Beer, BeerId};
use beers_types::dto::{BoxPriceResponse, CreateBeerRequest, ErrorResponse};
use utoipa::OpenApi;

use crate::inbound::handlers::{BoxPriceParams, CurrenciesResponse, HealthResponse};

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
async fn health() {}

/// Create a beer
///
/// Also served at `/api/v1/beers`.
#[utoipa::path(
    post,
    path = "/beers",
    tag = "beers",
    request_body = CreateBeerRequest,
    responses(
        (status = 201, description = "Beer created", body = Beer),
        (status = 400, description = "Invalid fields, malformed body or unsupported currency", body = ErrorResponse),
        (status = 409, description = "A beer with this ID already exists", body = ErrorResponse),
        (status = 500, description = "Storage or rate provider failure", body = ErrorResponse)
    )
)]
async fn create_beer() {}

/// List all beers, ordered by ID
#[utoipa::path(
    get,
    path = "/beers",
    tag = "beers",
    responses(
        (status = 200, description = "List of beers", body = Vec<Beer>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn list_beers() {}

/// Get beer by ID
#[utoipa::path(
    get,
    path = "/beers/{id}",
    tag = "beers",
    params(
        ("id" = i64, Path, description = "Beer ID")
    ),
    responses(
        (status = 200, description = "Beer details", body = Beer),
        (status = 400, description = "Malformed or non-positive ID", body = ErrorResponse),
        (status = 404, description = "Beer not found", body = ErrorResponse)
    )
)]
async fn get_beer() {}

/// Price a box of beers in a target currency
#[utoipa::path(
    get,
    path = "/beers/{id}/boxprice",
    tag = "pricing",
    params(
        ("id" = i64, Path, description = "Beer ID"),
        BoxPriceParams
    ),
    responses(
        (status = 200, description = "Box price", body = BoxPriceResponse),
        (status = 400, description = "Invalid ID, quantity or currency", body = ErrorResponse),
        (status = 404, description = "Beer not found", body = ErrorResponse),
        (status = 500, description = "Rate provider failure", body = ErrorResponse)
    )
)]
async fn box_price() {}

/// List supported currency codes
#[utoipa::path(
    get,
    path = "/currencies",
    tag = "pricing",
    responses(
        (status = 200, description = "Supported currencies", body = CurrenciesResponse)
    )
)]
async fn currencies() {}

/// OpenAPI documentation for the Beers API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Beer Catalog API",
        version = "1.0.0",
        description = "Beer catalog with box pricing in any supported currency.\n\nEvery `/beers` and `/currencies` route is also available under `/api/v1`. Errors share one body:\n\n```\n{\"error\": \"BEER_NOT_FOUND\", \"message\": \"Beer not found: 1\", \"code\": 404}\n```",
        license(name = "MIT"),
    ),
    paths(
        health,
        create_beer,
        list_beers,
        get_beer,
        box_price,
        currencies,
    ),
    components(
        schemas(
            Beer,
            BeerId,
            CreateBeerRequest,
            BoxPriceResponse,
            ErrorResponse,
            HealthResponse,
            CurrenciesResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "beers", description = "Beer catalog operations"),
        (name = "pricing", description = "Box prices and currencies"),
    )
)]
pub struct ApiDoc;
