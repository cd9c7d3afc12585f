use thiserror::Error;

use crate::domain::validation::ValidationErrors;

/// Error for ProductId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all product operations
#[derive(Debug, Clone, Error)]
pub enum ProductError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid product ID: {0}")]
    InvalidProductId(#[from] ProductIdError),

    /// Absent and owned-by-someone-else are the same error.
    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
