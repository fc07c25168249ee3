//! Error types for the beer service.

use crate::domain::BeerId;
use crate::ports::ExchangeError;

/// Malformed input, caught before any persistence or network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Name of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Domain-level errors (business rule violations).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("Beer not found: {0}")]
    BeerNotFound(BeerId),

    #[error("Beer with ID {0} already exists")]
    BeerAlreadyExists(BeerId),

    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),
}

impl DomainError {
    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::BeerNotFound(_) => "BEER_NOT_FOUND",
            DomainError::BeerAlreadyExists(_) => "BEER_ALREADY_EXISTS",
            DomainError::InvalidCurrency(_) => "INVALID_CURRENCY",
        }
    }
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Beer not found: {0}")]
    NotFound(BeerId),

    #[error("Conflict: beer {0} already exists")]
    Conflict(BeerId),

    /// A stored row no longer satisfies the entity invariants.
    #[error("Corrupt record: {0}")]
    Corrupt(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(String),
}

/// Application-level errors returned by the service layer.
///
/// Collaborator failures keep the stage that failed as `context`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{context}: {source}")]
    Repository {
        context: &'static str,
        source: RepoError,
    },

    #[error("{context}: {source}")]
    Exchange {
        context: &'static str,
        source: ExchangeError,
    },
}

impl AppError {
    /// Lifts a repository failure. Missing and duplicate keys become domain
    /// errors; everything else is wrapped with `context`.
    pub fn repository(context: &'static str, err: RepoError) -> Self {
        match err {
            RepoError::NotFound(id) => AppError::Domain(DomainError::BeerNotFound(id)),
            RepoError::Conflict(id) => AppError::Domain(DomainError::BeerAlreadyExists(id)),
            source => AppError::Repository { context, source },
        }
    }

    /// Lifts a gateway failure. An unsupported code is the caller's fault and
    /// becomes [`DomainError::InvalidCurrency`].
    pub fn exchange(context: &'static str, err: ExchangeError) -> Self {
        match err {
            ExchangeError::UnsupportedCurrency(code) => {
                AppError::Domain(DomainError::InvalidCurrency(code))
            }
            source => AppError::Exchange { context, source },
        }
    }
}
