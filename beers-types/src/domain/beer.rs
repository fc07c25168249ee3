//! Beer domain model.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::error::ValidationError;

/// Maximum number of characters allowed in `name`, `brewery` and `country`.
pub const MAX_TEXT_LEN: usize = 100;

/// Current time at microsecond precision, the finest every store keeps.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Caller-assigned identifier for a Beer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct BeerId(i64);

impl BeerId {
    /// Wraps a raw identifier. Positivity is checked by [`validate_beer_id`].
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for BeerId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for BeerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BeerId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Fails unless `id >= 1`.
pub fn validate_beer_id(id: BeerId) -> Result<(), ValidationError> {
    if id.0 < 1 {
        return Err(ValidationError::new("id", "id must be greater than 0"));
    }
    Ok(())
}

/// A catalog item.
///
/// Fields are private: every path that produces a `Beer` (construction,
/// reconstruction from storage, deserialization, [`Beer::update`]) runs the
/// full validation, so an instance is never observable in an invalid state.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Beer {
    /// Caller-assigned unique identifier
    id: BeerId,
    /// Beer name
    #[schema(example = "Golden")]
    name: String,
    /// Brewery that produces it
    #[schema(example = "Kross")]
    brewery: String,
    /// Country of origin
    #[schema(example = "Chile")]
    country: String,
    /// Unit price, denominated in `currency`
    #[schema(example = 10.5)]
    price: f64,
    /// ISO 4217-like currency code
    #[schema(example = "EUR")]
    currency: String,
    /// When the beer was created
    created_at: DateTime<Utc>,
    /// When the beer was last modified
    updated_at: DateTime<Utc>,
}

/// New field values applied by [`Beer::update`].
#[derive(Debug, Clone, PartialEq)]
pub struct BeerChanges {
    pub name: String,
    pub brewery: String,
    pub country: String,
    pub price: f64,
    pub currency: String,
}

impl Beer {
    /// Creates a new beer, trimming text fields and normalizing the currency.
    ///
    /// # Validation
    /// Checked in order, the first failure wins:
    /// id, name, brewery, country, price, currency.
    pub fn new(
        id: BeerId,
        name: &str,
        brewery: &str,
        country: &str,
        price: f64,
        currency: &str,
    ) -> Result<Self, ValidationError> {
        let now = now();
        Self::normalized(id, name, brewery, country, price, currency, now, now)
    }

    /// Rebuilds a beer with all fields specified (for database reconstruction
    /// and deserialized input). Runs the same normalization and validation.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: BeerId,
        name: &str,
        brewery: &str,
        country: &str,
        price: f64,
        currency: &str,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Self::normalized(
            id, name, brewery, country, price, currency, created_at, updated_at,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn normalized(
        id: BeerId,
        name: &str,
        brewery: &str,
        country: &str,
        price: f64,
        currency: &str,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let beer = Self {
            id,
            name: name.trim().to_string(),
            brewery: brewery.trim().to_string(),
            country: country.trim().to_string(),
            price,
            currency: currency.trim().to_uppercase(),
            created_at,
            updated_at,
        };
        beer.validate()?;
        Ok(beer)
    }

    /// Re-runs every field check on this instance.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_beer_id(self.id)?;
        check_text("name", &self.name)?;
        check_text("brewery", &self.brewery)?;
        check_text("country", &self.country)?;
        if !(self.price >= 0.0) || !self.price.is_finite() {
            return Err(ValidationError::new(
                "price",
                "price must be greater than or equal to 0",
            ));
        }
        if self.currency.chars().count() != 3
            || !self.currency.chars().all(|c| c.is_ascii_uppercase())
        {
            return Err(ValidationError::new(
                "currency",
                "currency must be a 3-letter code",
            ));
        }
        Ok(())
    }

    /// Replaces the mutable fields. The beer is left untouched if any of the
    /// new values is invalid; on success `updated_at` is refreshed.
    pub fn update(&mut self, changes: BeerChanges) -> Result<(), ValidationError> {
        let updated = Self::normalized(
            self.id,
            &changes.name,
            &changes.brewery,
            &changes.country,
            changes.price,
            &changes.currency,
            self.created_at,
            now(),
        )?;
        *self = updated;
        Ok(())
    }

    /// Total price of `quantity` units converted with `exchange_rate`.
    pub fn calculate_box_price(
        &self,
        quantity: i64,
        exchange_rate: f64,
    ) -> Result<f64, ValidationError> {
        if quantity < 1 {
            return Err(ValidationError::new(
                "quantity",
                "quantity must be greater than 0",
            ));
        }
        if !(exchange_rate > 0.0) {
            return Err(ValidationError::new(
                "exchange_rate",
                "exchange_rate must be greater than 0",
            ));
        }
        Ok(self.price * quantity as f64 * exchange_rate)
    }

    pub fn id(&self) -> BeerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brewery(&self) -> &str {
        &self.brewery
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

fn check_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(field, format!("{field} cannot be empty")));
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::new(
            field,
            format!("{field} must not exceed {MAX_TEXT_LEN} characters"),
        ));
    }
    Ok(())
}

/// Wire shape accepted when deserializing a `Beer`.
#[derive(Deserialize)]
struct BeerRecord {
    id: BeerId,
    name: String,
    brewery: String,
    country: String,
    price: f64,
    currency: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<'de> Deserialize<'de> for Beer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let r = BeerRecord::deserialize(deserializer)?;
        Beer::from_parts(
            r.id,
            &r.name,
            &r.brewery,
            &r.country,
            r.price,
            &r.currency,
            r.created_at,
            r.updated_at,
        )
        .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn golden() -> Beer {
        Beer::new(BeerId::new(1), "Golden", "Kross", "Chile", 10.5, "EUR").unwrap()
    }

    fn field_of(result: Result<Beer, ValidationError>) -> &'static str {
        result.unwrap_err().field
    }

    #[test]
    fn test_beer_creation() {
        let beer = golden();
        assert_eq!(beer.id(), BeerId::new(1));
        assert_eq!(beer.name(), "Golden");
        assert_eq!(beer.brewery(), "Kross");
        assert_eq!(beer.country(), "Chile");
        assert_eq!(beer.price(), 10.5);
        assert_eq!(beer.currency(), "EUR");
        assert_eq!(beer.created_at(), beer.updated_at());
    }

    #[test]
    fn test_beer_creation_normalizes_input() {
        let beer = Beer::new(BeerId::new(7), "  Golden ", "\tKross", "Chile  ", 0.0, " clp ")
            .unwrap();
        assert_eq!(beer.name(), "Golden");
        assert_eq!(beer.brewery(), "Kross");
        assert_eq!(beer.country(), "Chile");
        assert_eq!(beer.currency(), "CLP");
        assert_eq!(beer.price(), 0.0);
    }

    #[test]
    fn test_invalid_id_fails() {
        let result = Beer::new(BeerId::new(0), "Golden", "Kross", "Chile", 10.5, "EUR");
        assert_eq!(field_of(result), "id");
        let result = Beer::new(BeerId::new(-3), "Golden", "Kross", "Chile", 10.5, "EUR");
        assert_eq!(field_of(result), "id");
    }

    #[test]
    fn test_empty_text_fields_fail() {
        let id = BeerId::new(1);
        assert_eq!(field_of(Beer::new(id, "   ", "Kross", "Chile", 1.0, "EUR")), "name");
        assert_eq!(field_of(Beer::new(id, "Golden", "", "Chile", 1.0, "EUR")), "brewery");
        assert_eq!(field_of(Beer::new(id, "Golden", "Kross", " ", 1.0, "EUR")), "country");
    }

    #[test]
    fn test_long_text_fields_fail() {
        let id = BeerId::new(1);
        let long = "x".repeat(MAX_TEXT_LEN + 1);
        assert_eq!(field_of(Beer::new(id, &long, "Kross", "Chile", 1.0, "EUR")), "name");
        assert_eq!(field_of(Beer::new(id, "Golden", &long, "Chile", 1.0, "EUR")), "brewery");
        assert_eq!(field_of(Beer::new(id, "Golden", "Kross", &long, 1.0, "EUR")), "country");
    }

    #[test]
    fn test_length_limit_counts_characters_after_trim() {
        let exact = "ñ".repeat(MAX_TEXT_LEN);
        let padded = format!("  {exact}  ");
        let beer = Beer::new(BeerId::new(1), &padded, "Kross", "Chile", 1.0, "EUR").unwrap();
        assert_eq!(beer.name().chars().count(), MAX_TEXT_LEN);
    }

    #[test]
    fn test_negative_price_fails() {
        let result = Beer::new(BeerId::new(1), "Golden", "Kross", "Chile", -0.01, "EUR");
        assert_eq!(field_of(result), "price");
        let result = Beer::new(BeerId::new(1), "Golden", "Kross", "Chile", f64::NAN, "EUR");
        assert_eq!(field_of(result), "price");
    }

    #[test]
    fn test_invalid_currency_fails() {
        let id = BeerId::new(1);
        assert_eq!(field_of(Beer::new(id, "Golden", "Kross", "Chile", 1.0, "EU")), "currency");
        assert_eq!(
            field_of(Beer::new(id, "Golden", "Kross", "Chile", 1.0, "INVALID")),
            "currency"
        );
        assert_eq!(field_of(Beer::new(id, "Golden", "Kross", "Chile", 1.0, "E1R")), "currency");
    }

    #[test]
    fn test_first_violation_wins() {
        let result = Beer::new(BeerId::new(0), "", "", "", -1.0, "X");
        assert_eq!(field_of(result), "id");
        let result = Beer::new(BeerId::new(1), "Golden", "", "", -1.0, "X");
        assert_eq!(field_of(result), "brewery");
        let result = Beer::new(BeerId::new(1), "Golden", "Kross", "Chile", -1.0, "X");
        assert_eq!(field_of(result), "price");
    }

    #[test]
    fn test_calculate_box_price() {
        let beer = golden();
        assert_eq!(beer.calculate_box_price(6, 1.0).unwrap(), 63.0);
        let total = beer.calculate_box_price(10, 1.18).unwrap();
        assert!((total - 123.9).abs() < 1e-9);
    }

    #[test]
    fn test_calculate_box_price_rejects_bad_input() {
        let beer = golden();
        let err = beer.calculate_box_price(0, 1.0).unwrap_err();
        assert_eq!(err.field, "quantity");
        assert_eq!(err.message, "quantity must be greater than 0");

        let err = beer.calculate_box_price(1, 0.0).unwrap_err();
        assert_eq!(err.field, "exchange_rate");
        assert_eq!(err.message, "exchange_rate must be greater than 0");

        assert!(beer.calculate_box_price(1, -2.0).is_err());
        assert!(beer.calculate_box_price(1, f64::NAN).is_err());
    }

    #[test]
    fn test_update_refreshes_timestamp() {
        let mut beer = golden();
        let created_at = beer.created_at();
        beer.update(BeerChanges {
            name: "Golden Ale".into(),
            brewery: "Kross".into(),
            country: "Chile".into(),
            price: 12.0,
            currency: "usd".into(),
        })
        .unwrap();

        assert_eq!(beer.name(), "Golden Ale");
        assert_eq!(beer.currency(), "USD");
        assert_eq!(beer.created_at(), created_at);
        assert!(beer.updated_at() >= created_at);
    }

    #[test]
    fn test_timestamps_have_microsecond_precision() {
        let mut beer = golden();
        assert_eq!(beer.created_at().timestamp_subsec_nanos() % 1_000, 0);
        assert_eq!(beer.created_at(), beer.updated_at());

        beer.update(BeerChanges {
            name: "Golden".into(),
            brewery: "Kross".into(),
            country: "Chile".into(),
            price: 11.0,
            currency: "EUR".into(),
        })
        .unwrap();
        assert_eq!(beer.updated_at().timestamp_subsec_nanos() % 1_000, 0);
    }

    #[test]
    fn test_invalid_update_leaves_beer_untouched() {
        let mut beer = golden();
        let before = beer.clone();
        let err = beer
            .update(BeerChanges {
                name: "Renamed".into(),
                brewery: "Kross".into(),
                country: "Chile".into(),
                price: -5.0,
                currency: "EUR".into(),
            })
            .unwrap_err();

        assert_eq!(err.field, "price");
        assert_eq!(beer, before);
    }

    #[test]
    fn test_deserialization_validates() {
        let beer = golden();
        let json = serde_json::to_string(&beer).unwrap();
        let back: Beer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, beer);

        let bad = json.replace("\"EUR\"", "\"EURO\"");
        assert!(serde_json::from_str::<Beer>(&bad).is_err());
    }

    #[test]
    fn test_beer_id_parse() {
        assert_eq!(" 42 ".parse::<BeerId>().unwrap(), BeerId::new(42));
        assert!("abc".parse::<BeerId>().is_err());
    }
}
