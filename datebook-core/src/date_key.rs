//! Timezone-free calendar dates.
//!
//! A [`DateKey`] is the canonical `YYYY-MM-DD` form of a calendar day. It is the
//! value stored on disk, sent over the wire, and used to group events, so it never
//! carries a time of day or an offset.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DatebookError, DatebookResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(DateKey)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Parse a strict `YYYY-MM-DD` string.
    ///
    /// chrono alone accepts unpadded fields like `2024-3-5`; those would produce
    /// a second spelling of the same key, so the input must round-trip exactly.
    pub fn parse(s: &str) -> DatebookResult<Self> {
        let invalid = || DatebookError::Validation(format!("Invalid date '{s}'. Expected YYYY-MM-DD"));

        if s.len() != 10 {
            return Err(invalid());
        }

        let date = NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| invalid())?;
        if date.format(DATE_FORMAT).to_string() != s {
            return Err(invalid());
        }

        Ok(DateKey(date))
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        DateKey(date)
    }
}

impl FromStr for DateKey {
    type Err = DatebookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateKey::parse(s)
    }
}

impl TryFrom<String> for DateKey {
    type Error = DatebookError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        DateKey::parse(&s)
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.to_string()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}
