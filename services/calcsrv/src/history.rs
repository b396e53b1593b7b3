//! Calculation history storage
//!
//! Records are append-only and partitioned by `session_id`. Two backends:
//! SQLite for deployments, memory for tests and `--memory` runs.

pub mod memory_store;
pub mod sqlite_store;

pub use memory_store::MemoryHistoryStore;
pub use sqlite_store::SqliteHistoryStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::Result;

pub const DEFAULT_SESSION_ID: &str = "default";

/// One evaluated `/api/calculate` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct CalculationRecord {
    /// UUID v4 assigned by the service
    pub calculation_id: String,
    pub expression: String,
    pub result: String,
    pub formatted_result: String,
    pub mode: String,
    pub number_system: String,
    /// RFC 3339 creation time, UTC
    pub timestamp: String,
    pub session_id: String,
}

#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Insert a record, no deduplication
    async fn append(&self, record: &CalculationRecord) -> Result<()>;

    /// Newest records first, at most `limit`
    async fn query(&self, session_id: &str, limit: usize) -> Result<Vec<CalculationRecord>>;

    /// Remove every record of the session, returning how many went
    async fn clear(&self, session_id: &str) -> Result<u64>;

    /// Backend name for logs and health output
    fn backend(&self) -> &'static str;
}

#[cfg(test)]
pub(crate) fn sample_record(session_id: &str, timestamp: &str, expression: &str) -> CalculationRecord {
    CalculationRecord {
        calculation_id: uuid::Uuid::new_v4().to_string(),
        expression: expression.to_string(),
        result: "4".to_string(),
        formatted_result: "4".to_string(),
        mode: "basic".to_string(),
        number_system: "decimal".to_string(),
        timestamp: timestamp.to_string(),
        session_id: session_id.to_string(),
    }
}
