use std::sync::RwLock;

use tracing::debug;

use crate::date_range::DateRange;
use crate::error::{DatebookError, DatebookResult};
use crate::event::{Event, NewEvent};
use crate::store::{EventStore, new_event_id};

/// Process-local store. Natural order is insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    events: RwLock<Vec<Event>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventStore for MemoryStore {
    fn create(&self, event: NewEvent) -> DatebookResult<Event> {
        let event = event.into_event(new_event_id());

        self.events
            .write()
            .map_err(|_| DatebookError::Storage("memory store lock poisoned".into()))?
            .push(event.clone());

        debug!(id = %event.id, date = %event.date, "event created");
        Ok(event)
    }

    fn list(&self, range: &DateRange) -> DatebookResult<Vec<Event>> {
        let events = self
            .events
            .read()
            .map_err(|_| DatebookError::Storage("memory store lock poisoned".into()))?;

        Ok(events
            .iter()
            .filter(|e| range.contains(&e.date))
            .cloned()
            .collect())
    }
}
