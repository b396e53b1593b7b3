use async_trait::async_trait;
use common::sqlite::{SqliteClient, SqlitePool};
use tracing::{debug, info};

use super::{CalculationRecord, HistoryStore};
use crate::error::Result;

pub const HISTORY_TABLE: &str = "calculation_history";

const CREATE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS calculation_history (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    calculation_id TEXT NOT NULL UNIQUE,
    expression TEXT NOT NULL,
    result TEXT NOT NULL,
    formatted_result TEXT NOT NULL,
    mode TEXT NOT NULL,
    number_system TEXT NOT NULL,
    timestamp TEXT NOT NULL,
    session_id TEXT NOT NULL
)
"#;

const CREATE_INDEX_SQL: &str = r#"
CREATE INDEX IF NOT EXISTS idx_calculation_history_session
    ON calculation_history (session_id, timestamp DESC)
"#;

/// SQLite-backed history
///
/// `seq` breaks ties between records sharing a timestamp so the later
/// insert sorts first.
pub struct SqliteHistoryStore {
    client: SqliteClient,
}

impl SqliteHistoryStore {
    /// Wrap a connected client and create the schema if needed
    pub async fn new(client: SqliteClient) -> Result<Self> {
        let store = Self { client };
        store.init_schema().await?;
        Ok(store)
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        Self::new(SqliteClient::from_pool(pool)).await
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE_SQL).execute(self.pool()).await?;
        sqlx::query(CREATE_INDEX_SQL).execute(self.pool()).await?;
        info!("History table ready: {}", HISTORY_TABLE);
        Ok(())
    }

    fn pool(&self) -> &SqlitePool {
        self.client.pool()
    }
}

#[async_trait]
impl HistoryStore for SqliteHistoryStore {
    async fn append(&self, record: &CalculationRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO calculation_history
                (calculation_id, expression, result, formatted_result,
                 mode, number_system, timestamp, session_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.calculation_id)
        .bind(&record.expression)
        .bind(&record.result)
        .bind(&record.formatted_result)
        .bind(&record.mode)
        .bind(&record.number_system)
        .bind(&record.timestamp)
        .bind(&record.session_id)
        .execute(self.pool())
        .await?;

        debug!(
            calculation_id = %record.calculation_id,
            session_id = %record.session_id,
            "history record stored"
        );
        Ok(())
    }

    async fn query(&self, session_id: &str, limit: usize) -> Result<Vec<CalculationRecord>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let records = sqlx::query_as::<_, CalculationRecord>(
            r#"
            SELECT calculation_id, expression, result, formatted_result,
                   mode, number_system, timestamp, session_id
            FROM calculation_history
            WHERE session_id = ?
            ORDER BY timestamp DESC, seq DESC
            LIMIT ?
            "#,
        )
        .bind(session_id)
        .bind(limit)
        .fetch_all(self.pool())
        .await?;
        Ok(records)
    }

    async fn clear(&self, session_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM calculation_history WHERE session_id = ?")
            .bind(session_id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected())
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::history::sample_record;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_store() -> SqliteHistoryStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        SqliteHistoryStore::from_pool(pool).await.unwrap()
    }

    #[tokio::test]
    async fn test_append_and_query_order() {
        let store = memory_store().await;
        store.append(&sample_record("s1", "2026-01-01T00:00:01.000000Z", "a")).await.unwrap();
        store.append(&sample_record("s1", "2026-01-01T00:00:03.000000Z", "b")).await.unwrap();
        store.append(&sample_record("s1", "2026-01-01T00:00:02.000000Z", "c")).await.unwrap();
        store.append(&sample_record("s2", "2026-01-01T00:00:09.000000Z", "x")).await.unwrap();

        let history = store.query("s1", 50).await.unwrap();
        let expressions: Vec<&str> = history.iter().map(|r| r.expression.as_str()).collect();
        assert_eq!(expressions, vec!["b", "c", "a"]);

        let history = store.query("s1", 1).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].expression, "b");
    }

    #[tokio::test]
    async fn test_tie_break_on_insert_order() {
        let store = memory_store().await;
        store.append(&sample_record("s1", "2026-01-01T00:00:00.000000Z", "first")).await.unwrap();
        store.append(&sample_record("s1", "2026-01-01T00:00:00.000000Z", "second")).await.unwrap();

        let history = store.query("s1", 50).await.unwrap();
        assert_eq!(history[0].expression, "second");
    }

    #[tokio::test]
    async fn test_clear_counts_rows() {
        let store = memory_store().await;
        store.append(&sample_record("s1", "2026-01-01T00:00:00Z", "1")).await.unwrap();
        store.append(&sample_record("s1", "2026-01-01T00:00:01Z", "2")).await.unwrap();
        store.append(&sample_record("s2", "2026-01-01T00:00:00Z", "3")).await.unwrap();

        assert_eq!(store.clear("s1").await.unwrap(), 2);
        assert!(store.query("s1", 50).await.unwrap().is_empty());
        assert_eq!(store.query("s2", 50).await.unwrap().len(), 1);
        assert_eq!(store.clear("s1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_storage_error() {
        let store = memory_store().await;
        let record = sample_record("s1", "2026-01-01T00:00:00Z", "1");
        store.append(&record).await.unwrap();
        let err = store.append(&record).await.unwrap_err();
        assert!(err.to_string().starts_with("Storage error"));
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("history.db").display());

        {
            let client = SqliteClient::connect(&url, 2).await.unwrap();
            let store = SqliteHistoryStore::new(client).await.unwrap();
            store.append(&sample_record("s1", "2026-01-01T00:00:00Z", "2+2")).await.unwrap();
        }

        let client = SqliteClient::connect(&url, 2).await.unwrap();
        let store = SqliteHistoryStore::new(client).await.unwrap();
        let history = store.query("s1", 50).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].expression, "2+2");
    }
}
