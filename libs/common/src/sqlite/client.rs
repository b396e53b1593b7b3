use anyhow::{Context, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
    SqlitePool as SqlxSqlitePool,
};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub type SqlitePool = SqlxSqlitePool;

#[derive(Clone)]
pub struct SqliteClient {
    pool: Arc<SqlitePool>,
}

impl SqliteClient {
    /// Connect from a `sqlite:` URL
    ///
    /// File databases are created on demand (parent directory included) and
    /// run in WAL mode. `sqlite::memory:` is pinned to a single connection so
    /// every query sees the same database.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        if !url.starts_with("sqlite:") {
            anyhow::bail!("Not a SQLite URL: {}", url);
        }
        let in_memory = url.contains(":memory:") || url.contains("mode=memory");

        let mut options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid SQLite URL: {}", url))?
            .busy_timeout(Duration::from_secs(5))
            .create_if_missing(true);

        if !in_memory {
            if let Some(parent) = options.get_filename().parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create database directory {}", parent.display())
                    })?;
                }
            }
            options = options
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal);
        }

        let max_connections = if in_memory { 1 } else { max_connections.max(1) };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open SQLite database {}", url))?;

        info!("SQLite database connected: {}", url);

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Create from an existing pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check if database is accessible
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&*self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_in_memory() {
        let client = SqliteClient::connect("sqlite::memory:", 8).await.unwrap();
        client.ping().await.unwrap();
        // Pinned to one connection, so a temp table stays visible
        sqlx::query("CREATE TEMP TABLE t (x INTEGER)")
            .execute(client.pool())
            .await
            .unwrap();
        sqlx::query("SELECT x FROM t").fetch_all(client.pool()).await.unwrap();
    }

    #[tokio::test]
    async fn test_connect_creates_file_and_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("calc.db");
        let url = format!("sqlite://{}", path.display());

        let client = SqliteClient::connect(&url, 4).await.unwrap();
        client.ping().await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_invalid_url() {
        assert!(SqliteClient::connect("postgres://localhost/db", 1).await.is_err());
    }
}
