//! Database row types shared by the SQL adapters.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use beers_types::{Beer, BeerId, RepoError};

/// Column list matching [`DbBeer`], in declaration order.
pub(crate) const BEER_COLUMNS: &str =
    "id, name, brewery, country, price, currency, created_at, updated_at";

/// Beer row from database.
#[derive(FromRow)]
pub struct DbBeer {
    pub id: i64,
    pub name: String,
    pub brewery: String,
    pub country: String,
    pub price: f64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbBeer {
    /// Rebuilds the domain entity, re-running its validation so a row edited
    /// behind our back surfaces as [`RepoError::Corrupt`].
    pub fn into_domain(self) -> Result<Beer, RepoError> {
        Ok(Beer::from_parts(
            BeerId::new(self.id),
            &self.name,
            &self.brewery,
            &self.country,
            self.price,
            &self.currency,
            self.created_at,
            self.updated_at,
        )?)
    }
}
