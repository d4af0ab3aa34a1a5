//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures. Infrastructure
/// concerns (connection errors, decode failures) belong to the store layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A business rule was violated by an otherwise well-formed request.
    #[error("{0}")]
    BadRequest(String),

    /// A referenced record does not exist.
    #[error("{0}")]
    NotFound(String),
}

impl DomainError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn client_not_found(id: i64) -> Self {
        Self::NotFound(format!("Client with id {id} was not found."))
    }

    pub fn contract_not_found(id: i64) -> Self {
        Self::NotFound(format!("Contract with id {id} was not found."))
    }
}
