use std::sync::Arc;

use sqlx::PgPool;

use clientledger_store::{
    ClientStore, ContractStore, InMemoryClientStore, InMemoryContractStore, PgClientStore,
    PgContractStore,
};

/// Stores shared by all handlers via `Extension`.
pub struct AppServices {
    pub clients: Arc<dyn ClientStore>,
    pub contracts: Arc<dyn ContractStore>,
}

impl AppServices {
    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self {
            clients: Arc::new(InMemoryClientStore::new()),
            contracts: Arc::new(InMemoryContractStore::new()),
        }
    }

    /// Postgres wiring against a migrated pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            clients: Arc::new(PgClientStore::new(pool.clone())),
            contracts: Arc::new(PgContractStore::new(pool)),
        }
    }
}
