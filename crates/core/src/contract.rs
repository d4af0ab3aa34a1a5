use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A persisted contract record.
///
/// `end_date = None` means the contract is open-ended. Active/ended is a
/// computed predicate over `end_date`, never a stored status field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: i64,
    pub client_id: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub cost_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contract {
    /// A contract is active at `date` iff it has no end date or ends strictly
    /// after `date`.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.end_date.is_none_or(|end| end > date)
    }
}

/// A contract that passed the date rules but has no id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContract {
    pub client_id: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub cost_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewContract {
    /// Build a contract for an existing client.
    ///
    /// The start date falls back to `today` when omitted; an end date, when
    /// given, must be on or after the start date.
    pub fn draw_up(
        client_id: i64,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        cost_amount: Decimal,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let start_date = start_date.unwrap_or(today);
        if let Some(end) = end_date {
            if end < start_date {
                return Err(DomainError::bad_request(
                    "End date must be on or after the start date.",
                ));
            }
        }

        Ok(Self {
            client_id,
            start_date,
            end_date,
            cost_amount,
            created_at: now,
            updated_at: now,
        })
    }
}
