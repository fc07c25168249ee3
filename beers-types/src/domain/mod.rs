//! Domain models for the beer catalog.

pub mod beer;

pub use beer::{Beer, BeerChanges, BeerId, MAX_TEXT_LEN, validate_beer_id};
