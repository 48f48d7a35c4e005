//! Date-keyed event index.

use std::collections::BTreeMap;

use crate::date_key::DateKey;
use crate::event::Event;

/// Events grouped by calendar day.
///
/// Within a day, events keep the order in which they were fetched or merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventIndex {
    by_date: BTreeMap<DateKey, Vec<Event>>,
}

impl EventIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group fetched events by date.
    pub fn from_events(events: impl IntoIterator<Item = Event>) -> Self {
        let mut index = EventIndex::new();
        for event in events {
            index.insert(event);
        }
        index
    }

    /// Merge one event under its date key. Returns false if an event with the
    /// same id is already indexed.
    pub fn insert(&mut self, event: Event) -> bool {
        let day = self.by_date.entry(event.date).or_default();
        if day.iter().any(|e| e.id == event.id) {
            return false;
        }
        day.push(event);
        true
    }

    pub fn events_on(&self, date: &DateKey) -> &[Event] {
        self.by_date.get(date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_events(&self, date: &DateKey) -> bool {
        !self.events_on(date).is_empty()
    }

    /// Days with at least one event, ascending.
    pub fn dates(&self) -> impl Iterator<Item = &DateKey> {
        self.by_date.keys()
    }

    pub fn len(&self) -> usize {
        self.by_date.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}
