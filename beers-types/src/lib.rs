//! # Beers Types
//!
//! Domain types and port traits for the beer catalog service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Beer, BeerId)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Validation, domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{Beer, BeerChanges, BeerId, MAX_TEXT_LEN, validate_beer_id};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError, ValidationError};
pub use ports::{BeerRepository, CurrencyService, ExchangeError};
