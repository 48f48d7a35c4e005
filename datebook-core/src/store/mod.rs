//! Event persistence.
//!
//! Stores own events: they assign identifiers on create and answer inclusive
//! date-range queries. Validation happens before a store is reached, in
//! [`NewEvent`] and [`DateRange`] construction.

mod dir;
mod memory;

use std::sync::Arc;

use crate::config::{DatebookConfig, StoreKind};
use crate::date_range::DateRange;
use crate::error::DatebookResult;
use crate::event::{Event, NewEvent};

pub use dir::DirStore;
pub use memory::MemoryStore;

pub trait EventStore: Send + Sync {
    /// Persist a new event and return it with its assigned id.
    fn create(&self, event: NewEvent) -> DatebookResult<Event>;

    /// All events dated within `range` (inclusive), in store-natural order.
    fn list(&self, range: &DateRange) -> DatebookResult<Vec<Event>>;
}

/// Open the store selected by `config`.
pub fn open(config: &DatebookConfig) -> DatebookResult<Arc<dyn EventStore>> {
    let store: Arc<dyn EventStore> = match config.store {
        StoreKind::Dir => Arc::new(DirStore::open(config.data_path())?),
        StoreKind::Memory => Arc::new(MemoryStore::new()),
    };
    Ok(store)
}

fn new_event_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
