use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The unique (case-insensitive) email constraint was violated.
    #[error("client email already exists")]
    DuplicateEmail,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
