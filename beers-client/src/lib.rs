//! # Beers Client SDK
//!
//! A typed Rust client for the Beer Catalog API.

use beers_types::{Beer, BeerId, BoxPriceResponse, CreateBeerRequest, ErrorResponse};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with an error body.
    #[error("API error: {status} {error} - {message}")]
    Api {
        status: u16,
        /// Machine-readable code such as `BEER_NOT_FOUND`.
        error: String,
        message: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Machine-readable API error code, if the server sent one.
    pub fn code(&self) -> Option<&str> {
        match self {
            ClientError::Api { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct CurrenciesBody {
    currencies: Vec<String>,
}

/// Beer Catalog API client.
pub struct BeersClient {
    base_url: String,
    http: Client,
}

impl BeersClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Creates a new beer.
    pub async fn create_beer(&self, req: &CreateBeerRequest) -> Result<Beer, ClientError> {
        let resp = self
            .http
            .post(format!("{}/api/v1/beers", self.base_url))
            .json(req)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    /// Gets a beer by ID.
    pub async fn get_beer(&self, id: BeerId) -> Result<Beer, ClientError> {
        self.get(&format!("/api/v1/beers/{}", id), &[]).await
    }

    /// Lists all beers.
    pub async fn list_beers(&self) -> Result<Vec<Beer>, ClientError> {
        self.get("/api/v1/beers", &[]).await
    }

    /// Prices a box of beers. The server defaults to 1 unit in USD.
    pub async fn box_price(
        &self,
        id: BeerId,
        quantity: Option<i64>,
        currency: Option<&str>,
    ) -> Result<BoxPriceResponse, ClientError> {
        let mut query = Vec::new();
        if let Some(quantity) = quantity {
            query.push(("quantity", quantity.to_string()));
        }
        if let Some(currency) = currency {
            query.push(("currency", currency.to_string()));
        }
        self.get(&format!("/api/v1/beers/{}/boxprice", id), &query)
            .await
    }

    /// Lists supported currency codes.
    pub async fn currencies(&self) -> Result<Vec<String>, ClientError> {
        let body: CurrenciesBody = self.get("/api/v1/currencies", &[]).await?;
        Ok(body.currencies)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        let body = resp.text().await?;
        if status.is_success() {
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(api_error(status.as_u16(), body))
        }
    }
}

/// Decodes an error body, falling back to the raw text for non-JSON replies.
fn api_error(status: u16, body: String) -> ClientError {
    match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(e) => ClientError::Api {
            status,
            error: e.error,
            message: e.message,
        },
        Err(_) => ClientError::Api {
            status,
            error: "UNKNOWN".to_string(),
            message: body,
        },
    }
}
