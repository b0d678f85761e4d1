use std::sync::Arc;

use crate::config::ServerConfig;
use crate::middleware::logging::ActionLogger;
use crate::session::{InMemorySessionStore, SessionManager, SessionStoreRef};
use crate::storage::RecordStore;

/// Shared state handed to every request handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub records: Arc<RecordStore>,
    pub actions: Arc<ActionLogger>,
    pub sessions: SessionManager,
}

impl AppState {
    /// State backed by the process-local session store
    pub fn new(config: ServerConfig) -> Self {
        Self::with_session_store(config, Arc::new(InMemorySessionStore::new()))
    }

    pub fn with_session_store(config: ServerConfig, store: SessionStoreRef) -> Self {
        let sessions = SessionManager::new(store, &config.session_cookie, config.session_ttl());

        Self {
            records: Arc::new(RecordStore::new(config.records_path())),
            actions: Arc::new(ActionLogger::new(config.actions_path())),
            sessions,
            config: Arc::new(config),
        }
    }
}
