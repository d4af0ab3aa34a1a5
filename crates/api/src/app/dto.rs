//! Request/response DTOs and shape validation.
//!
//! Validation here covers request *shape* (patterns, lengths, sign); the
//! business rules (person/company exclusivity, date ordering) live in the
//! domain crate. The first failing field produces the whole detail string.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clientledger_core::Contract;

use crate::app::problem::ApiError;

const PHONE_PATTERN: &str = r"^[+0-9(). -]{7,20}$";

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PHONE_PATTERN).expect("phone pattern is valid"))
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"))
}

fn validate_contact(phone: &str, email: &str, name: &str) -> Result<(), ApiError> {
    if !phone_regex().is_match(phone) {
        return Err(ApiError::Validation(format!(
            "phone must match \"{PHONE_PATTERN}\"."
        )));
    }
    if email.trim().is_empty() {
        return Err(ApiError::Validation("email must not be blank.".to_string()));
    }
    if !email_regex().is_match(email) {
        return Err(ApiError::Validation(
            "email must be a well-formed email address.".to_string(),
        ));
    }
    if name.trim().is_empty() {
        return Err(ApiError::Validation("name must not be blank.".to_string()));
    }
    if name.chars().count() > 255 {
        return Err(ApiError::Validation(
            "name must be at most 255 characters.".to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    pub phone: String,
    pub email: String,
    pub name: String,
    pub birthdate: Option<NaiveDate>,
    pub company_identifier: Option<String>,
}

impl CreateClientRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_contact(&self.phone, &self.email, &self.name)?;
        if let Some(identifier) = &self.company_identifier {
            if identifier.chars().count() > 255 {
                return Err(ApiError::Validation(
                    "companyIdentifier must be at most 255 characters.".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientRequest {
    pub id: i64,
    pub phone: String,
    pub email: String,
    pub name: String,
}

impl UpdateClientRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_contact(&self.phone, &self.email, &self.name)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContractRequest {
    pub client_id: i64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub cost_amount: Decimal,
}

impl CreateContractRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.cost_amount < Decimal::ZERO {
            return Err(ApiError::Validation(
                "costAmount must be greater than or equal to 0.".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCostAmountRequest {
    pub contract_id: i64,
    pub cost_amount: Decimal,
}

impl UpdateCostAmountRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.cost_amount < Decimal::ZERO {
            return Err(ApiError::Validation(
                "costAmount must be greater than or equal to 0.".to_string(),
            ));
        }
        Ok(())
    }
}

/// Query string for the active-contracts listing.
#[derive(Debug, Deserialize)]
pub struct ListContractsQuery {
    #[serde(rename = "updatedSince")]
    pub updated_since: Option<DateTime<Utc>>,
}

/// Contract view at the API boundary (no `updatedAt`).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDto {
    pub id: i64,
    pub client_id: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub cost_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<&Contract> for ContractDto {
    fn from(contract: &Contract) -> Self {
        Self {
            id: contract.id,
            client_id: contract.client_id,
            start_date: contract.start_date,
            end_date: contract.end_date,
            cost_amount: contract.cost_amount,
            created_at: contract.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveContractsCostResponse {
    pub client_id: i64,
    pub active_cost_amount: Decimal,
}
