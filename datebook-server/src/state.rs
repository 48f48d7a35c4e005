use std::sync::Arc;

use datebook_core::config::DatebookConfig;
use datebook_core::store::{self, EventStore};
use datebook_core::DatebookResult;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn EventStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        AppState { store }
    }

    /// Open the store selected in `config`.
    pub fn from_config(config: &DatebookConfig) -> DatebookResult<Self> {
        Ok(AppState::new(store::open(config)?))
    }

    pub fn store(&self) -> &dyn EventStore {
        self.store.as_ref()
    }
}
