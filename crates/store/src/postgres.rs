//! Postgres-backed store implementations.
//!
//! Email uniqueness is enforced by the schema (unique index on
//! `lower(email)`), not only by the handler's pre-check; a unique violation
//! on insert surfaces as [`StoreError::DuplicateEmail`].

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use clientledger_core::{Client, ClientType, Contract, NewClient, NewContract};

use crate::{ClientStore, ContractStore, StoreError, StoreResult};

/// Run the schema migrations embedded from `crates/store/migrations/`.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}

#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id: i64,
    client_type: String,
    email: String,
    phone: String,
    name: String,
    birthdate: Option<NaiveDate>,
    company_identifier: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ClientRow> for Client {
    type Error = sqlx::Error;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        let client_type: ClientType = row
            .client_type
            .parse()
            .map_err(|e: String| sqlx::Error::Decode(e.into()))?;
        Ok(Client {
            id: row.id,
            client_type,
            email: row.email,
            phone: row.phone,
            name: row.name,
            birthdate: row.birthdate,
            company_identifier: row.company_identifier,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ContractRow {
    id: i64,
    client_id: i64,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    cost_amount: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ContractRow> for Contract {
    fn from(row: ContractRow) -> Self {
        Contract {
            id: row.id,
            client_id: row.client_id,
            start_date: row.start_date,
            end_date: row.end_date,
            cost_amount: row.cost_amount,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const CLIENT_COLUMNS: &str =
    "id, client_type, email, phone, name, birthdate, company_identifier, created_at, updated_at";

const CONTRACT_COLUMNS: &str =
    "id, client_id, start_date, end_date, cost_amount, created_at, updated_at";

pub struct PgClientStore {
    pool: PgPool,
}

impl PgClientStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientStore for PgClientStore {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Client>> {
        let row: Option<ClientRow> = sqlx::query_as(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Client::try_from).transpose().map_err(StoreError::from)
    }

    async fn exists_by_id(&self, id: i64) -> StoreResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM clients WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn exists_by_email(&self, email: &str) -> StoreResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM clients WHERE lower(email) = lower($1))",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn insert(&self, new: NewClient) -> StoreResult<Client> {
        let result: Result<ClientRow, sqlx::Error> = sqlx::query_as(&format!(
            r#"
            INSERT INTO clients
                (client_type, email, phone, name, birthdate, company_identifier, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {CLIENT_COLUMNS}
            "#,
        ))
        .bind(new.client_type.as_str())
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.name)
        .bind(new.birthdate)
        .bind(&new.company_identifier)
        .bind(new.created_at)
        .bind(new.updated_at)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.try_into()?),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update_contact(
        &self,
        id: i64,
        email: &str,
        phone: &str,
        name: &str,
    ) -> StoreResult<Option<Client>> {
        let result: Result<Option<ClientRow>, sqlx::Error> = sqlx::query_as(&format!(
            r#"
            UPDATE clients
            SET email = $2, phone = $3, name = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {CLIENT_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(email)
        .bind(phone)
        .bind(name)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(row) => row.map(Client::try_from).transpose().map_err(StoreError::from),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

pub struct PgContractStore {
    pool: PgPool,
}

impl PgContractStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContractStore for PgContractStore {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Contract>> {
        let row: Option<ContractRow> = sqlx::query_as(&format!(
            "SELECT {CONTRACT_COLUMNS} FROM contracts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Contract::from))
    }

    async fn insert(&self, new: NewContract) -> StoreResult<Contract> {
        let row: ContractRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO contracts
                (client_id, start_date, end_date, cost_amount, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {CONTRACT_COLUMNS}
            "#,
        ))
        .bind(new.client_id)
        .bind(new.start_date)
        .bind(new.end_date)
        .bind(new.cost_amount)
        .bind(new.created_at)
        .bind(new.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update_cost(&self, id: i64, cost_amount: Decimal) -> StoreResult<Option<Contract>> {
        let row: Option<ContractRow> = sqlx::query_as(&format!(
            r#"
            UPDATE contracts
            SET cost_amount = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {CONTRACT_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(cost_amount)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Contract::from))
    }

    async fn end_all_for_client(&self, client_id: i64, end_date: NaiveDate) -> StoreResult<u64> {
        let result = sqlx::query(
            "UPDATE contracts SET end_date = $2, updated_at = NOW() WHERE client_id = $1",
        )
        .bind(client_id)
        .bind(end_date)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn sum_active_cost(&self, client_id: i64, today: NaiveDate) -> StoreResult<Decimal> {
        let sum: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(cost_amount), 0)
            FROM contracts
            WHERE client_id = $1 AND (end_date IS NULL OR end_date > $2)
            "#,
        )
        .bind(client_id)
        .bind(today)
        .fetch_one(&self.pool)
        .await?;
        Ok(sum)
    }

    async fn find_active_for_client(
        &self,
        client_id: i64,
        today: NaiveDate,
        updated_since: Option<DateTime<Utc>>,
    ) -> StoreResult<Vec<Contract>> {
        let rows: Vec<ContractRow> = sqlx::query_as(&format!(
            r#"
            SELECT {CONTRACT_COLUMNS}
            FROM contracts
            WHERE client_id = $1
              AND (end_date IS NULL OR end_date > $2)
              AND ($3::timestamptz IS NULL OR updated_at >= $3)
            ORDER BY start_date ASC, id ASC
            "#,
        ))
        .bind(client_id)
        .bind(today)
        .bind(updated_since)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Contract::from).collect())
    }
}
