//! Box price calculation.

use std::sync::Arc;

use beers_types::{
    AppError, Beer, BeerId, BeerRepository, CurrencyService, ExchangeError, ValidationError,
    validate_beer_id,
};

/// Priced box in the target currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxQuote {
    pub unit_price: f64,
    pub total_price: f64,
    /// `None` when the beer is already priced in the target currency.
    pub exchange_rate: Option<f64>,
}

/// Prices a quantity of one beer in a target currency.
///
/// Makes at most one `get_exchange_rate` call per calculation and never
/// rounds: the result is plain `f64` arithmetic.
pub struct BoxPriceCalculator<R: BeerRepository, C: CurrencyService> {
    repo: Arc<R>,
    currency: Arc<C>,
}

impl<R: BeerRepository, C: CurrencyService> BoxPriceCalculator<R, C> {
    pub fn new(repo: Arc<R>, currency: Arc<C>) -> Self {
        Self { repo, currency }
    }

    /// Looks the beer up and returns the total box price in `target_currency`.
    #[tracing::instrument(skip(self), fields(beer_id = %beer_id))]
    pub async fn execute(
        &self,
        beer_id: BeerId,
        quantity: i64,
        target_currency: &str,
    ) -> Result<f64, AppError> {
        validate_beer_id(beer_id)?;
        if quantity < 1 {
            return Err(ValidationError::new("quantity", "invalid quantity").into());
        }

        let beer = self
            .repo
            .find_by_id(beer_id)
            .await
            .map_err(|e| AppError::repository("failed to find beer", e))?;

        Ok(self.quote(&beer, quantity, target_currency).await?.total_price)
    }

    /// Prices an already loaded beer.
    pub async fn quote(
        &self,
        beer: &Beer,
        quantity: i64,
        target_currency: &str,
    ) -> Result<BoxQuote, AppError> {
        let target = target_currency.trim().to_uppercase();

        let exchange_rate = if beer.currency() == target {
            tracing::debug!(currency = %target, "no conversion applied");
            None
        } else {
            let rate = self
                .currency
                .get_exchange_rate(beer.currency(), &target)
                .await
                .map_err(|e| AppError::exchange("failed to get exchange rate", e))?;
            // Rates must be positive and finite
            if !(rate > 0.0) || !rate.is_finite() {
                return Err(AppError::exchange(
                    "failed to calculate box price",
                    ExchangeError::InvalidResponse(format!(
                        "rate {rate} for {} -> {target}",
                        beer.currency()
                    )),
                ));
            }
            tracing::debug!(from = beer.currency(), to = %target, rate, "conversion applied");
            Some(rate)
        };

        let rate = exchange_rate.unwrap_or(1.0);
        let total_price = beer.calculate_box_price(quantity, rate)?;

        Ok(BoxQuote {
            unit_price: beer.price() * rate,
            total_price,
            exchange_rate,
        })
    }
}
