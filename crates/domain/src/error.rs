//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The request body could not be serialized.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// A cart line quantity is out of range.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// A sneaker size label is empty or malformed.
    #[error("invalid size: {0:?}")]
    InvalidSize(String),

    /// An identifier is invalid or empty.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
