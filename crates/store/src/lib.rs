//! `clientledger-store` — data access for clients and contracts.
//!
//! The handlers talk to the [`ClientStore`] / [`ContractStore`] traits; two
//! implementations exist:
//! - [`in_memory`]: lock-protected maps for dev and black-box tests,
//! - [`postgres`]: sqlx-backed stores against the migrated schema.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use clientledger_core::{Client, Contract, NewClient, NewContract};

pub mod error;
pub mod in_memory;
pub mod postgres;

pub use error::{StoreError, StoreResult};
pub use in_memory::{InMemoryClientStore, InMemoryContractStore};
pub use postgres::{PgClientStore, PgContractStore};

/// Client persistence operations.
#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Client>>;

    async fn exists_by_id(&self, id: i64) -> StoreResult<bool>;

    /// Case-insensitive email lookup.
    async fn exists_by_email(&self, email: &str) -> StoreResult<bool>;

    /// Insert a registered client and assign its id.
    ///
    /// Returns [`StoreError::DuplicateEmail`] when the email is already taken;
    /// the store enforces this independently of any handler pre-check.
    async fn insert(&self, new: NewClient) -> StoreResult<Client>;

    /// Overwrite the contact fields (email/phone/name) and refresh
    /// `updated_at`. Type fields are immutable and not touched.
    async fn update_contact(
        &self,
        id: i64,
        email: &str,
        phone: &str,
        name: &str,
    ) -> StoreResult<Option<Client>>;

    /// Remove the client row. Contracts are left in place.
    async fn delete(&self, id: i64) -> StoreResult<bool>;
}

/// Contract persistence operations.
#[async_trait]
pub trait ContractStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Contract>>;

    /// Insert a drawn-up contract and assign its id.
    async fn insert(&self, new: NewContract) -> StoreResult<Contract>;

    /// Overwrite the cost amount and refresh `updated_at`.
    async fn update_cost(&self, id: i64, cost_amount: Decimal) -> StoreResult<Option<Contract>>;

    /// Set `end_date` on every contract of the client, including already
    /// ended ones. Returns the number of contracts touched.
    async fn end_all_for_client(&self, client_id: i64, end_date: NaiveDate) -> StoreResult<u64>;

    /// Sum of `cost_amount` over the client's contracts that are active at
    /// `today` (no end date, or end date strictly after). Zero when none.
    async fn sum_active_cost(&self, client_id: i64, today: NaiveDate) -> StoreResult<Decimal>;

    /// The client's active contracts, optionally restricted to those updated
    /// at or after `updated_since`, ordered by (start_date, id) ascending.
    async fn find_active_for_client(
        &self,
        client_id: i64,
        today: NaiveDate,
        updated_since: Option<DateTime<Utc>>,
    ) -> StoreResult<Vec<Contract>>;
}
