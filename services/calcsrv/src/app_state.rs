//! Shared state handed to every handler

use std::sync::Arc;

use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::history::HistoryStore;

pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn HistoryStore>,
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(config: Arc<Config>, store: Arc<dyn HistoryStore>) -> Self {
        let dispatcher = Dispatcher::new(store.clone(), config.history.record_failures);
        Self {
            config,
            store,
            dispatcher,
        }
    }

    /// Resolve `?limit`: default when absent, capped at the configured max
    pub fn history_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.config.history.default_limit)
            .min(self.config.history.max_limit)
    }
}
