//! Shared helpers for calcsrv integration tests

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use calcsrv::history::{CalculationRecord, HistoryStore, MemoryHistoryStore, SqliteHistoryStore};
use calcsrv::{create_routes, AppState, CalcSrvError, Config, Result};
use sqlx::sqlite::SqlitePoolOptions;

/// Router over an in-memory history store
pub fn create_test_router() -> Router {
    create_test_router_with(Config::default(), Arc::new(MemoryHistoryStore::new()))
}

pub fn create_test_router_with(config: Config, store: Arc<dyn HistoryStore>) -> Router {
    create_routes(Arc::new(AppState::new(Arc::new(config), store)))
}

/// Router over an in-memory SQLite database
pub async fn create_sqlite_test_router() -> anyhow::Result<Router> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let store = SqliteHistoryStore::from_pool(pool).await?;
    Ok(create_test_router_with(Config::default(), Arc::new(store)))
}

/// Store whose every call fails, as a dropped database connection would
pub struct UnavailableStore;

#[async_trait]
impl HistoryStore for UnavailableStore {
    async fn append(&self, _record: &CalculationRecord) -> Result<()> {
        Err(CalcSrvError::storage("database unavailable"))
    }

    async fn query(&self, _session_id: &str, _limit: usize) -> Result<Vec<CalculationRecord>> {
        Err(CalcSrvError::storage("database unavailable"))
    }

    async fn clear(&self, _session_id: &str) -> Result<u64> {
        Err(CalcSrvError::storage("database unavailable"))
    }

    fn backend(&self) -> &'static str {
        "unavailable"
    }
}
