use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use chrono::Utc;

use clientledger_core::{DomainError, NewClient};
use clientledger_store::StoreError;

use crate::app::dto;
use crate::app::problem::{ApiError, Payload};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/create-client", post(create_client))
        .route("/update-client", put(update_client))
        .route("/delete-client/:id", delete(delete_client))
        .route("/:id", get(get_client))
}

async fn get_client(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let client = services
        .clients
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::client_not_found(id))?;
    Ok((StatusCode::OK, Json(client)).into_response())
}

async fn create_client(
    Extension(services): Extension<Arc<AppServices>>,
    Payload(body): Payload<dto::CreateClientRequest>,
) -> Result<Response, ApiError> {
    body.validate()?;

    let new = NewClient::register(
        body.email,
        body.phone,
        body.name,
        body.birthdate,
        body.company_identifier,
        Utc::now(),
    )?;

    let email = new.email.clone();
    if services.clients.exists_by_email(&email).await? {
        return Err(ApiError::BadRequest(format!(
            "Client with email {email} already exists."
        )));
    }

    // The pre-check races with concurrent creates; the store's uniqueness
    // constraint is authoritative.
    let client = match services.clients.insert(new).await {
        Ok(client) => client,
        Err(StoreError::DuplicateEmail) => {
            return Err(ApiError::BadRequest(format!(
                "Client with email {email} already exists."
            )));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(client_id = client.id, client_type = %client.client_type.as_str(), "client created");
    Ok((StatusCode::CREATED, Json(client)).into_response())
}

async fn update_client(
    Extension(services): Extension<Arc<AppServices>>,
    Payload(body): Payload<dto::UpdateClientRequest>,
) -> Result<Response, ApiError> {
    body.validate()?;

    let client = match services
        .clients
        .update_contact(body.id, &body.email, &body.phone, &body.name)
        .await
    {
        Ok(row) => row.ok_or_else(|| DomainError::client_not_found(body.id))?,
        Err(StoreError::DuplicateEmail) => {
            return Err(ApiError::BadRequest(format!(
                "Client with email {} already exists.",
                body.email
            )));
        }
        Err(e) => return Err(e.into()),
    };
    Ok((StatusCode::OK, Json(client)).into_response())
}

async fn delete_client(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let client = services
        .clients
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::client_not_found(id))?;

    // Force-close every contract (already-ended ones included) before the
    // client row goes away.
    let today = Utc::now().date_naive();
    let ended = services.contracts.end_all_for_client(client.id, today).await?;
    services.clients.delete(client.id).await?;

    tracing::info!(client_id = client.id, contracts_ended = ended, "client deleted");
    Ok(StatusCode::NO_CONTENT.into_response())
}
