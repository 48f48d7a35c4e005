//! ICS file generation.

use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component, Property, ValueType};

use crate::error::DatebookResult;
use crate::event::Event;

const DTSTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Generate .ics content for an event created at `created`.
pub fn generate_ics(event: &Event, created: DateTime<Utc>) -> DatebookResult<String> {
    let mut cal = Calendar::new();

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.id);
    ics_event.summary(&event.title);
    ics_event.add_property("DTSTAMP", created.format(DTSTAMP_FORMAT).to_string());

    // All-day: the date never passes through a timestamp
    let mut dtstart = Property::new("DTSTART", event.date.date().format("%Y%m%d").to_string());
    dtstart.append_parameter(ValueType::Date);
    ics_event.append_property(dtstart);

    if let Some(ref desc) = event.description {
        ics_event.description(desc);
    }

    let ics_event = ics_event.done();
    cal.push(ics_event);
    let cal = cal.done();

    Ok(strip_ics_bloat(&cal.to_string()))
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with DATEBOOK
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:DATEBOOK\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
