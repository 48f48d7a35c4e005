//! Month grid generation.
//!
//! A month is laid out as weeks of exactly seven cells starting on Sunday. Days
//! before the 1st and after the last day are padding.

use chrono::{Datelike, NaiveDate};

use crate::date_key::DateKey;
use crate::index::EventIndex;
use crate::month::YearMonth;

pub const DAYS_PER_WEEK: usize = 7;

/// Column headers, Sunday first.
pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCell {
    Padding,
    Day(u32),
}

impl DayCell {
    pub fn day(&self) -> Option<u32> {
        match self {
            DayCell::Padding => None,
            DayCell::Day(d) => Some(*d),
        }
    }
}

pub type Week = [DayCell; DAYS_PER_WEEK];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: YearMonth,
    pub weeks: Vec<Week>,
}

/// A grid cell with display markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkedCell {
    pub cell: DayCell,
    pub date: Option<DateKey>,
    pub is_today: bool,
    pub has_events: bool,
}

/// Lay out `month` as Sunday-first weeks.
pub fn build_month_grid(month: YearMonth) -> MonthGrid {
    let leading = month.first_day().weekday().num_days_from_sunday() as usize;

    let mut weeks = Vec::with_capacity(6);
    let mut week = [DayCell::Padding; DAYS_PER_WEEK];
    let mut column = leading;

    for day in 1..=month.days_in_month() {
        week[column] = DayCell::Day(day);
        column += 1;

        if column == DAYS_PER_WEEK {
            weeks.push(week);
            week = [DayCell::Padding; DAYS_PER_WEEK];
            column = 0;
        }
    }

    // Remaining cells of a partial final week are already padding
    if column > 0 {
        weeks.push(week);
    }

    MonthGrid { month, weeks }
}

impl MonthGrid {
    /// Attach today/has-events markers to every cell.
    pub fn marked(&self, today: NaiveDate, index: &EventIndex) -> Vec<[MarkedCell; DAYS_PER_WEEK]> {
        let today = DateKey::from(today);

        self.weeks
            .iter()
            .map(|week| {
                week.map(|cell| {
                    let date = cell.day().and_then(|d| self.month.date_key(d));
                    MarkedCell {
                        cell,
                        date,
                        is_today: date == Some(today),
                        has_events: date.is_some_and(|d| index.has_events(&d)),
                    }
                })
            })
            .collect()
    }

    /// Real days in grid order.
    pub fn days(&self) -> impl Iterator<Item = u32> + '_ {
        self.weeks.iter().flatten().filter_map(DayCell::day)
    }
}
