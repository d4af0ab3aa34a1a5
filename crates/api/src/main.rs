use std::sync::Arc;

use clientledger_api::app::{self, services::AppServices};
use sqlx::PgPool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    clientledger_observability::init();

    let services = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let pool = PgPool::connect(&url).await?;
            clientledger_store::postgres::migrate(&pool).await?;
            AppServices::postgres(pool)
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using in-memory stores");
            AppServices::in_memory()
        }
    };

    let app = app::build_app(Arc::new(services));

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
