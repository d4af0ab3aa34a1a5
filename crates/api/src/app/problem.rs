//! Error taxonomy and problem-body responses.
//!
//! Handlers return `Result<_, ApiError>`; the `IntoResponse` impl is the only
//! place HTTP status codes and the problem shape are decided. Domain and
//! store errors convert in, so handler code stays free of status plumbing.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use clientledger_core::DomainError;
use clientledger_store::StoreError;

/// Structured error body: `{type, title, status, detail}`.
///
/// `type` stays `about:blank`, matching what existing consumers parse.
#[derive(Debug, Serialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub type_uri: &'static str,
    pub title: &'static str,
    pub status: u16,
    pub detail: String,
}

impl Problem {
    pub fn new(status: StatusCode, title: &'static str, detail: impl Into<String>) -> Self {
        Self {
            type_uri: "about:blank",
            title,
            status: status.as_u16(),
            detail: detail.into(),
        }
    }
}

/// Closed set of request-terminal failures.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A business rule was violated (400, "Bad Request").
    #[error("{0}")]
    BadRequest(String),

    /// A request field failed shape validation (400, "Validation Failed").
    #[error("{0}")]
    Validation(String),

    /// A referenced record does not exist (404, "Not Found").
    #[error("{0}")]
    NotFound(String),

    /// The request body could not be read as JSON (400).
    #[error("{0}")]
    UnreadableBody(String),

    /// Anything else (500); the cause is logged, the caller gets a generic
    /// detail.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::BadRequest(msg) => ApiError::BadRequest(msg),
            DomainError::NotFound(msg) => ApiError::NotFound(msg),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => {
                ApiError::BadRequest("Client with email already exists.".to_string())
            }
            StoreError::Sqlx(e) => ApiError::Internal(e.into()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::UnreadableBody(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let problem = match self {
            ApiError::BadRequest(detail) => {
                Problem::new(StatusCode::BAD_REQUEST, "Bad Request", detail)
            }
            ApiError::Validation(detail) => {
                Problem::new(StatusCode::BAD_REQUEST, "Validation Failed", detail)
            }
            ApiError::NotFound(detail) => Problem::new(StatusCode::NOT_FOUND, "Not Found", detail),
            ApiError::UnreadableBody(detail) => {
                Problem::new(StatusCode::BAD_REQUEST, "Malformed Request Body", detail)
            }
            ApiError::Internal(err) => {
                tracing::error!(error = ?err, "request failed");
                Problem::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    "An unexpected error occurred.",
                )
            }
        };

        let status = StatusCode::from_u16(problem.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(problem)).into_response()
    }
}

/// JSON extractor whose rejection is rendered as a problem body instead of
/// axum's plain-text default.
#[derive(Debug, axum::extract::FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Payload<T>(pub T);

/// Query-string extractor with the same problem-body treatment as
/// [`Payload`].
#[derive(Debug, axum::extract::FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Params<T>(pub T);
