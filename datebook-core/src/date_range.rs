//! Inclusive date range for filtering events.

use crate::date_key::DateKey;
use crate::error::{DatebookError, DatebookResult};
use crate::month::YearMonth;

/// Inclusive range of calendar days. `start > end` is allowed and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateKey,
    pub end: DateKey,
}

impl DateRange {
    pub fn new(start: DateKey, end: DateKey) -> Self {
        DateRange { start, end }
    }

    /// First through last day of `month`.
    pub fn for_month(month: YearMonth) -> Self {
        DateRange {
            start: month.first_day().into(),
            end: month.last_day().into(),
        }
    }

    /// Build a range from raw query bounds.
    /// Both bounds are required; each must be a `YYYY-MM-DD` date.
    pub fn from_query(start: Option<&str>, end: Option<&str>) -> DatebookResult<Self> {
        let (Some(start), Some(end)) = (non_empty(start), non_empty(end)) else {
            return Err(DatebookError::Validation(
                "Start and end dates are required".to_string(),
            ));
        };

        Ok(DateRange {
            start: DateKey::parse(start)?,
            end: DateKey::parse(end)?,
        })
    }

    pub fn contains(&self, date: &DateKey) -> bool {
        self.start <= *date && *date <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
