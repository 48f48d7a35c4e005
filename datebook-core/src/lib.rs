//! Core types for datebook.
//!
//! - [`grid`]: Sunday-first month grids with today/has-events markers
//! - [`index`]: events grouped by [`DateKey`]
//! - [`store`]: the [`EventStore`](store::EventStore) seam and its document-backed implementations
//! - [`view`]: calendar view state and its reducer

pub mod config;
pub mod date_key;
pub mod date_range;
pub mod error;
pub mod event;
pub mod grid;
pub mod ics;
pub mod index;
pub mod month;
pub mod store;
pub mod view;

pub use date_key::DateKey;
pub use date_range::DateRange;
pub use error::{DatebookError, DatebookResult};
pub use event::{Event, NewEvent};
pub use month::YearMonth;
