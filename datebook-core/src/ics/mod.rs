//! ICS documents.
//!
//! Each stored event is one RFC 5545 calendar holding a single all-day `VEVENT`.

mod generate;
mod parse;

use chrono::{DateTime, Utc};

use crate::event::Event;

pub use generate::generate_ics;
pub use parse::parse_event;

/// An event as read back from its document, with the bookkeeping needed for ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEvent {
    pub event: Event,
    /// DTSTAMP of the document; None when the document lacks one.
    pub created: Option<DateTime<Utc>>,
}
