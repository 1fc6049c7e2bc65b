//! Custom error types for billtrack
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. The first group of variants is raised by
//! the billing engine at the boundary of the offending computation; the rest
//! come from configuration, storage and the command line front end.

use thiserror::Error;

/// The main error type for billtrack operations
#[derive(Error, Debug)]
pub enum BillingError {
    /// Negative, malformed, or non-cent-exact money
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Non-positive or malformed line item quantity
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    /// Negative or malformed unit price
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Tax rate outside [0, 100]
    #[error("Invalid tax rate: {0}")]
    InvalidTaxRate(String),

    /// Status outside the allowed set
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BillingError {
    /// Create a "not found" error for clients
    pub fn client_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Client",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for payments
    pub fn payment_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Payment",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for invoices
    pub fn invoice_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Invoice",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for documents
    pub fn document_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Document",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    ///
    /// All of the engine's input-validation kinds count, as does the generic
    /// `Validation` variant.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::InvalidAmount(_)
                | Self::InvalidQuantity(_)
                | Self::InvalidPrice(_)
                | Self::InvalidTaxRate(_)
                | Self::InvalidStatus(_)
        )
    }
}

impl From<std::io::Error> for BillingError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BillingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for BillingError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for billtrack operations
pub type BillingResult<T> = Result<T, BillingError>;
