//! ICS file parsing using the icalendar crate's parser.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use icalendar::parser::{Property, read_calendar, unfold};

use crate::date_key::DateKey;
use crate::event::Event;
use crate::ics::StoredEvent;

/// Parse ICS content into a stored event.
///
/// Returns None when the document has no VEVENT, no UID, no usable DTSTART,
/// or a missing or blank SUMMARY.
pub fn parse_event(content: &str) -> Option<StoredEvent> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).ok()?;
    let vevent = calendar.components.iter().find(|c| c.name == "VEVENT")?;

    // Required fields
    let id = vevent.find_prop("UID")?.val.to_string();
    let date = parse_start_date(vevent.find_prop("DTSTART")?)?;
    let title = unescape_text(vevent.find_prop("SUMMARY")?.val.as_ref());
    if title.trim().is_empty() {
        return None;
    }

    let description = vevent
        .find_prop("DESCRIPTION")
        .map(|p| unescape_text(p.val.as_ref()));
    let created = vevent
        .find_prop("DTSTAMP")
        .and_then(|p| parse_utc_stamp(p.val.as_ref()));

    Some(StoredEvent {
        event: Event {
            id,
            title,
            date,
            description,
        },
        created,
    })
}

/// Calendar date of a DTSTART.
///
/// `VALUE=DATE` is what we write. Timed values from hand-edited documents keep
/// the date as written, without shifting through any time zone.
fn parse_start_date(prop: &Property) -> Option<DateKey> {
    let value = prop.val.as_ref().trim();
    let date_part = value.get(..8)?;

    NaiveDate::parse_from_str(date_part, "%Y%m%d")
        .ok()
        .map(DateKey::from)
}

/// Undo RFC 5545 TEXT escaping (`\\`, `\;`, `\,`, `\n`).
fn unescape_text(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => result.push('\n'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }

    result
}

fn parse_utc_stamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim().trim_end_matches('Z');
    NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S")
        .ok()
        .map(|dt| dt.and_utc())
}
