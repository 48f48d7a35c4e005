//! Calendar months.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;
use crate::error::{DatebookError, DatebookResult};

/// Years whose dates print as four digits, so every [`DateKey`] in the month parses back.
const MIN_YEAR: i32 = 0;
const MAX_YEAR: i32 = 9999;

/// A validated (year, month) pair. `month` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> DatebookResult<Self> {
        if (MIN_YEAR..=MAX_YEAR).contains(&year) && (1..=12).contains(&month) {
            Ok(YearMonth { year, month })
        } else {
            Err(DatebookError::Validation(format!("Invalid month {year:04}-{month:02}")))
        }
    }

    /// The month containing `date`, clamped to 0000-01..=9999-12.
    pub fn containing(date: NaiveDate) -> Self {
        match date.year() {
            year if year < MIN_YEAR => YearMonth { year: MIN_YEAR, month: 1 },
            year if year > MAX_YEAR => YearMonth { year: MAX_YEAR, month: 12 },
            year => YearMonth { year, month: date.month() },
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // Invariant of construction: day 1 exists.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        let first = self.first_day();
        first
            .checked_add_months(chrono::Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// Date key for a day of this month, or None if the month has no such day.
    pub fn date_key(&self, day: u32) -> Option<DateKey> {
        DateKey::from_ymd(self.year, self.month, day)
    }

    pub fn contains(&self, key: &DateKey) -> bool {
        let date = key.date();
        date.year() == self.year && date.month() == self.month
    }

    /// The previous month. 0000-01 has none and returns itself.
    pub fn prev(&self) -> Self {
        if self.year == MIN_YEAR && self.month == 1 {
            *self
        } else if self.month == 1 {
            YearMonth { year: self.year - 1, month: 12 }
        } else {
            YearMonth { year: self.year, month: self.month - 1 }
        }
    }

    /// The next month. 9999-12 has none and returns itself.
    pub fn next(&self) -> Self {
        if self.year == MAX_YEAR && self.month == 12 {
            *self
        } else if self.month == 12 {
            YearMonth { year: self.year + 1, month: 1 }
        } else {
            YearMonth { year: self.year, month: self.month + 1 }
        }
    }

    /// Long display name, e.g. "March 2024".
    pub fn title(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

impl FromStr for YearMonth {
    type Err = DatebookError;

    /// Parse `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DatebookError::Validation(format!("Invalid month '{s}'. Expected YYYY-MM"));

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        YearMonth::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = DatebookError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<YearMonth> for String {
    fn from(month: YearMonth) -> Self {
        month.to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
