//! In-memory store implementations (dev/test).
//!
//! Same contract as the Postgres stores, including the duplicate-email check
//! inside `insert`, so handler behavior is identical under test.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use clientledger_core::{Client, Contract, NewClient, NewContract};

use crate::{ClientStore, ContractStore, StoreError, StoreResult};

#[derive(Debug, Default)]
pub struct InMemoryClientStore {
    rows: Mutex<BTreeMap<i64, Client>>,
    next_id: AtomicI64,
}

impl InMemoryClientStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientStore for InMemoryClientStore {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Client>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn exists_by_id(&self, id: i64) -> StoreResult<bool> {
        Ok(self.rows.lock().unwrap().contains_key(&id))
    }

    async fn exists_by_email(&self, email: &str) -> StoreResult<bool> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.values().any(|c| c.email.eq_ignore_ascii_case(email)))
    }

    async fn insert(&self, new: NewClient) -> StoreResult<Client> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .values()
            .any(|c| c.email.eq_ignore_ascii_case(&new.email))
        {
            return Err(StoreError::DuplicateEmail);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let client = Client {
            id,
            client_type: new.client_type,
            email: new.email,
            phone: new.phone,
            name: new.name,
            birthdate: new.birthdate,
            company_identifier: new.company_identifier,
            created_at: new.created_at,
            updated_at: new.updated_at,
        };
        rows.insert(id, client.clone());
        Ok(client)
    }

    async fn update_contact(
        &self,
        id: i64,
        email: &str,
        phone: &str,
        name: &str,
    ) -> StoreResult<Option<Client>> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .values()
            .any(|c| c.id != id && c.email.eq_ignore_ascii_case(email))
        {
            return Err(StoreError::DuplicateEmail);
        }
        Ok(rows.get_mut(&id).map(|client| {
            client.email = email.to_string();
            client.phone = phone.to_string();
            client.name = name.to_string();
            client.updated_at = Utc::now();
            client.clone()
        }))
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryContractStore {
    rows: Mutex<BTreeMap<i64, Contract>>,
    next_id: AtomicI64,
}

impl InMemoryContractStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All contracts of a client, in id order. Test/introspection helper.
    pub fn all_for_client(&self, client_id: i64) -> Vec<Contract> {
        self.rows
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.client_id == client_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ContractStore for InMemoryContractStore {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Contract>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn insert(&self, new: NewContract) -> StoreResult<Contract> {
        let mut rows = self.rows.lock().unwrap();
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let contract = Contract {
            id,
            client_id: new.client_id,
            start_date: new.start_date,
            end_date: new.end_date,
            cost_amount: new.cost_amount,
            created_at: new.created_at,
            updated_at: new.updated_at,
        };
        rows.insert(id, contract.clone());
        Ok(contract)
    }

    async fn update_cost(&self, id: i64, cost_amount: Decimal) -> StoreResult<Option<Contract>> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.get_mut(&id).map(|contract| {
            contract.cost_amount = cost_amount;
            contract.updated_at = Utc::now();
            contract.clone()
        }))
    }

    async fn end_all_for_client(&self, client_id: i64, end_date: NaiveDate) -> StoreResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let mut touched = 0;
        for contract in rows.values_mut().filter(|c| c.client_id == client_id) {
            contract.end_date = Some(end_date);
            contract.updated_at = Utc::now();
            touched += 1;
        }
        Ok(touched)
    }

    async fn sum_active_cost(&self, client_id: i64, today: NaiveDate) -> StoreResult<Decimal> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .values()
            .filter(|c| c.client_id == client_id && c.is_active_on(today))
            .map(|c| c.cost_amount)
            .sum())
    }

    async fn find_active_for_client(
        &self,
        client_id: i64,
        today: NaiveDate,
        updated_since: Option<DateTime<Utc>>,
    ) -> StoreResult<Vec<Contract>> {
        let rows = self.rows.lock().unwrap();
        let mut active: Vec<Contract> = rows
            .values()
            .filter(|c| c.client_id == client_id && c.is_active_on(today))
            .filter(|c| updated_since.is_none_or(|since| c.updated_at >= since))
            .cloned()
            .collect();
        active.sort_by_key(|c| (c.start_date, c.id));
        Ok(active)
    }
}
