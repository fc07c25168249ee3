//! Beer Application Service
//!
//! Orchestrates domain operations through the repository and currency ports.
//! Contains NO infrastructure logic - pure business orchestration.

use std::sync::Arc;

use beers_types::{
    AppError, Beer, BeerId, BeerRepository, BoxPriceRequest, BoxPriceResponse, CreateBeerRequest,
    CurrencyService, DomainError, MAX_BOX_QUANTITY, ValidationError, validate_beer_id,
};

use crate::pricing::BoxPriceCalculator;

/// Application service for the beer catalog.
///
/// Generic over `R: BeerRepository` and `C: CurrencyService` - adapters are
/// injected at compile time, so tests can swap in mocks.
pub struct BeerService<R: BeerRepository, C: CurrencyService> {
    repo: Arc<R>,
    currency: Arc<C>,
    calculator: BoxPriceCalculator<R, C>,
}

impl<R: BeerRepository, C: CurrencyService> BeerService<R, C> {
    /// Creates a new service with the given adapters.
    pub fn new(repo: R, currency: C) -> Self {
        let repo = Arc::new(repo);
        let currency = Arc::new(currency);
        Self {
            calculator: BoxPriceCalculator::new(Arc::clone(&repo), Arc::clone(&currency)),
            repo,
            currency,
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Returns a reference to the currency gateway.
    pub fn currency(&self) -> &C {
        &self.currency
    }

    /// Returns the box price calculator sharing this service's adapters.
    pub fn calculator(&self) -> &BoxPriceCalculator<R, C> {
        &self.calculator
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Catalog Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Adds a beer to the catalog.
    ///
    /// Nothing is written unless every check passes. A concurrent create of
    /// the same id loses at `save` and reports `BEER_ALREADY_EXISTS`.
    #[tracing::instrument(skip(self, req), fields(beer_id = %req.id))]
    pub async fn create_beer(&self, req: CreateBeerRequest) -> Result<Beer, AppError> {
        let exists = self
            .repo
            .exists_by_id(req.id)
            .await
            .map_err(|e| AppError::repository("failed to check beer existence", e))?;
        if exists {
            tracing::warn!("beer already exists");
            return Err(DomainError::BeerAlreadyExists(req.id).into());
        }

        let currency = req.currency.trim();
        let supported = self
            .currency
            .is_valid_currency(currency)
            .await
            .map_err(|e| AppError::exchange("failed to validate currency", e))?;
        if !supported {
            tracing::warn!(currency, "unsupported currency");
            return Err(DomainError::InvalidCurrency(currency.to_string()).into());
        }

        let beer = Beer::new(
            req.id,
            &req.name,
            &req.brewery,
            &req.country,
            req.price,
            currency,
        )?;

        self.repo
            .save(&beer)
            .await
            .map_err(|e| AppError::repository("failed to save beer", e))?;

        tracing::info!(name = beer.name(), currency = beer.currency(), "beer created");
        Ok(beer)
    }

    /// Gets a beer by ID.
    #[tracing::instrument(skip(self), fields(beer_id = %id))]
    pub async fn find_beer_by_id(&self, id: BeerId) -> Result<Beer, AppError> {
        validate_beer_id(id)?;
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| AppError::repository("failed to find beer", e))
    }

    /// Lists every beer, ordered by ID.
    #[tracing::instrument(skip(self))]
    pub async fn find_all_beers(&self) -> Result<Vec<Beer>, AppError> {
        let beers = self
            .repo
            .find_all()
            .await
            .map_err(|e| AppError::repository("failed to find all beers", e))?;
        tracing::debug!(count = beers.len(), "beers listed");
        Ok(beers)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Pricing
    // ─────────────────────────────────────────────────────────────────────────────

    /// Prices a box of `req.quantity` units in `req.currency`.
    #[tracing::instrument(skip(self, req), fields(beer_id = %req.beer_id, quantity = req.quantity, currency = %req.currency))]
    pub async fn calculate_box_price(
        &self,
        req: BoxPriceRequest,
    ) -> Result<BoxPriceResponse, AppError> {
        if !(1..=MAX_BOX_QUANTITY).contains(&req.quantity) {
            return Err(ValidationError::new(
                "quantity",
                format!("quantity must be between 1 and {MAX_BOX_QUANTITY}"),
            )
            .into());
        }

        let currency = req.currency.trim().to_uppercase();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(
                ValidationError::new("currency", "currency must be a 3-letter code").into(),
            );
        }

        let beer = self.find_beer_by_id(req.beer_id).await?;
        let quote = self.calculator.quote(&beer, req.quantity, &currency).await?;

        tracing::info!(total_price = quote.total_price, "box price calculated");
        Ok(BoxPriceResponse {
            beer_id: beer.id(),
            beer_name: beer.name().to_string(),
            quantity: req.quantity,
            unit_price: quote.unit_price,
            total_price: quote.total_price,
            currency,
            exchange_rate: quote.exchange_rate,
        })
    }

    /// Currency codes accepted for pricing and beer creation.
    #[tracing::instrument(skip(self))]
    pub async fn supported_currencies(&self) -> Result<Vec<String>, AppError> {
        self.currency
            .get_supported_currencies()
            .await
            .map_err(|e| AppError::exchange("failed to list currencies", e))
    }
}
