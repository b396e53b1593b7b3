use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CalculationRecord, HistoryStore};
use crate::error::Result;

/// In-process history, lost on restart
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    sessions: RwLock<HashMap<String, Vec<CalculationRecord>>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn append(&self, record: &CalculationRecord) -> Result<()> {
        self.sessions
            .write()
            .await
            .entry(record.session_id.clone())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    async fn query(&self, session_id: &str, limit: usize) -> Result<Vec<CalculationRecord>> {
        let sessions = self.sessions.read().await;
        let Some(records) = sessions.get(session_id) else {
            return Ok(Vec::new());
        };

        // Latest insert first, then a stable sort keeps it first among equal timestamps
        let mut history: Vec<CalculationRecord> = records.iter().rev().cloned().collect();
        history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        history.truncate(limit);
        Ok(history)
    }

    async fn clear(&self, session_id: &str) -> Result<u64> {
        let removed = self.sessions.write().await.remove(session_id);
        Ok(removed.map_or(0, |records| records.len() as u64))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::history::sample_record;

    #[tokio::test]
    async fn test_query_newest_first_with_limit() {
        let store = MemoryHistoryStore::new();
        for (i, ts) in ["2026-01-01T00:00:01Z", "2026-01-01T00:00:03Z", "2026-01-01T00:00:02Z"]
            .iter()
            .enumerate()
        {
            store
                .append(&sample_record("s1", ts, &format!("{}+1", i)))
                .await
                .unwrap();
        }

        let history = store.query("s1", 2).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].expression, "1+1");
        assert_eq!(history[1].expression, "2+1");
    }

    #[tokio::test]
    async fn test_equal_timestamps_keep_insert_order() {
        let store = MemoryHistoryStore::new();
        store.append(&sample_record("s1", "2026-01-01T00:00:00Z", "first")).await.unwrap();
        store.append(&sample_record("s1", "2026-01-01T00:00:00Z", "second")).await.unwrap();

        let history = store.query("s1", 10).await.unwrap();
        assert_eq!(history[0].expression, "second");
        assert_eq!(history[1].expression, "first");
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = MemoryHistoryStore::new();
        store.append(&sample_record("a", "2026-01-01T00:00:00Z", "1")).await.unwrap();
        store.append(&sample_record("a", "2026-01-01T00:00:01Z", "2")).await.unwrap();
        store.append(&sample_record("b", "2026-01-01T00:00:00Z", "3")).await.unwrap();

        assert_eq!(store.clear("a").await.unwrap(), 2);
        assert!(store.query("a", 50).await.unwrap().is_empty());
        assert_eq!(store.query("b", 50).await.unwrap().len(), 1);
        assert_eq!(store.clear("missing").await.unwrap(), 0);
    }
}
