use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use chrono::Utc;

use clientledger_core::{DomainError, NewContract};

use crate::app::dto::{
    self, ActiveContractsCostResponse, ContractDto, ListContractsQuery,
};
use crate::app::problem::{ApiError, Params, Payload};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/create-contract", post(create_contract))
        .route("/update-contract", patch(update_contract_cost))
        .route("/clients/:client_id/active-cost", get(get_active_cost))
        .route("/clients/:client_id/contracts", get(list_active_contracts))
}

async fn create_contract(
    Extension(services): Extension<Arc<AppServices>>,
    Payload(body): Payload<dto::CreateContractRequest>,
) -> Result<Response, ApiError> {
    body.validate()?;

    if !services.clients.exists_by_id(body.client_id).await? {
        return Err(DomainError::client_not_found(body.client_id).into());
    }

    let now = Utc::now();
    let new = NewContract::draw_up(
        body.client_id,
        body.start_date,
        body.end_date,
        body.cost_amount,
        now.date_naive(),
        now,
    )?;

    let contract = services.contracts.insert(new).await?;
    tracing::info!(contract_id = contract.id, client_id = contract.client_id, "contract created");
    Ok((StatusCode::CREATED, Json(ContractDto::from(&contract))).into_response())
}

async fn update_contract_cost(
    Extension(services): Extension<Arc<AppServices>>,
    Payload(body): Payload<dto::UpdateCostAmountRequest>,
) -> Result<Response, ApiError> {
    body.validate()?;

    let contract = services
        .contracts
        .update_cost(body.contract_id, body.cost_amount)
        .await?
        .ok_or_else(|| DomainError::contract_not_found(body.contract_id))?;
    Ok((StatusCode::OK, Json(ContractDto::from(&contract))).into_response())
}

async fn get_active_cost(
    Extension(services): Extension<Arc<AppServices>>,
    Path(client_id): Path<i64>,
) -> Result<Response, ApiError> {
    if !services.clients.exists_by_id(client_id).await? {
        return Err(DomainError::client_not_found(client_id).into());
    }

    let today = Utc::now().date_naive();
    let active_cost_amount = services.contracts.sum_active_cost(client_id, today).await?;
    Ok((
        StatusCode::OK,
        Json(ActiveContractsCostResponse {
            client_id,
            active_cost_amount,
        }),
    )
        .into_response())
}

async fn list_active_contracts(
    Extension(services): Extension<Arc<AppServices>>,
    Path(client_id): Path<i64>,
    Params(query): Params<ListContractsQuery>,
) -> Result<Response, ApiError> {
    if !services.clients.exists_by_id(client_id).await? {
        return Err(DomainError::client_not_found(client_id).into());
    }

    let today = Utc::now().date_naive();
    let contracts = services
        .contracts
        .find_active_for_client(client_id, today, query.updated_since)
        .await?;
    let dtos: Vec<ContractDto> = contracts.iter().map(ContractDto::from).collect();
    Ok((StatusCode::OK, Json(dtos)).into_response())
}
