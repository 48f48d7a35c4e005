//! Terminal rendering for datebook types.
//!
//! Extension traits that add colored terminal output to datebook-core types
//! using owo_colors.

use owo_colors::OwoColorize;

use datebook_core::grid::{DAYS_PER_WEEK, DayCell, MarkedCell, WEEKDAY_LABELS};
use datebook_core::index::EventIndex;
use datebook_core::view::CalendarState;
use datebook_core::{DateKey, Event};

/// Width of one rendered grid cell, separator included
const CELL_WIDTH: usize = 4;
const EVENT_MARKER: char = '•';

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        match &self.description {
            Some(desc) => format!("{} {}", self.title, format!("- {desc}").dimmed()),
            None => self.title.clone(),
        }
    }
}

impl Render for DateKey {
    /// e.g. "Fri Mar 15 2024"
    fn render(&self) -> String {
        self.date().format("%a %b %-d %Y").to_string()
    }
}

impl Render for MarkedCell {
    fn render(&self) -> String {
        let DayCell::Day(day) = self.cell else {
            return " ".repeat(CELL_WIDTH);
        };

        let number = format!("{:>2}", day);
        let number = if self.is_today {
            number.reversed().bold().to_string()
        } else {
            number
        };
        let marker = if self.has_events {
            EVENT_MARKER.blue().to_string()
        } else {
            " ".to_string()
        };

        format!("{number}{marker} ")
    }
}

impl Render for CalendarState {
    fn render(&self) -> String {
        let width = CELL_WIDTH * DAYS_PER_WEEK;
        let mut lines = Vec::new();

        let title = format!("{:^width$}", self.month.title());
        lines.push(title.bold().to_string());

        let header: String = WEEKDAY_LABELS
            .iter()
            .map(|label| format!("{:<CELL_WIDTH$}", &label[..2]))
            .collect();
        lines.push(header.dimmed().to_string());

        for week in self.grid().marked(self.today, &self.index) {
            let row: String = week.iter().map(Render::render).collect();
            lines.push(row.trim_end().to_string());
        }

        if self.is_loading() {
            lines.push("Loading…".dimmed().to_string());
        }

        if let Some(ref error) = self.error {
            lines.push(format!("{} {}", "error:".red().bold(), error));
        }

        lines.join("\n")
    }
}

/// Events grouped under a bold date heading per day.
pub fn render_event_list(index: &EventIndex) -> String {
    if index.is_empty() {
        return "No events".dimmed().to_string();
    }

    let mut lines = Vec::new();

    for date in index.dates() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(date.render().bold().to_string());
        for event in index.events_on(date) {
            lines.push(format!("  {} {}", EVENT_MARKER.blue(), event.render()));
        }
    }

    lines.join("\n")
}

/// The read-only list for a single day.
pub fn render_day(date: &DateKey, events: &[Event]) -> String {
    let mut lines = vec![format!("Events for {}", date.render()).bold().to_string()];
    lines.extend(
        events
            .iter()
            .map(|event| format!("  {} {}", EVENT_MARKER.blue(), event.render())),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use datebook_core::YearMonth;

    fn event(title: &str, date: &str) -> Event {
        Event {
            id: title.to_lowercase(),
            title: title.to_string(),
            date: DateKey::parse(date).unwrap(),
            description: None,
        }
    }

    #[test]
    fn test_calendar_has_title_header_and_one_line_per_week() {
        let state = CalendarState::at(
            YearMonth::new(2024, 3).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        );

        let rendered = state.render();
        let lines: Vec<&str> = rendered.lines().collect();

        // title, weekday header, six weeks
        assert_eq!(lines.len(), 8);
        assert!(lines[0].contains("March 2024"));
        assert!(lines[1].contains("Su  Mo  Tu"));
        assert!(lines[7].contains("31"));
    }

    #[test]
    fn test_padding_cells_are_blank() {
        let cell = MarkedCell {
            cell: DayCell::Padding,
            date: None,
            is_today: false,
            has_events: false,
        };
        assert_eq!(cell.render(), "    ");

        let day = MarkedCell {
            cell: DayCell::Day(7),
            date: DateKey::from_ymd(2024, 3, 7),
            is_today: false,
            has_events: false,
        };
        assert_eq!(day.render(), " 7  ");
    }

    #[test]
    fn test_event_list_groups_by_day() {
        let index = EventIndex::from_events(vec![
            event("Standup", "2024-03-15"),
            event("Dentist", "2024-03-02"),
        ]);

        let rendered = render_event_list(&index);
        let dentist = rendered.find("Dentist").unwrap();
        let standup = rendered.find("Standup").unwrap();
        assert!(dentist < standup);
        assert!(rendered.contains("Sat Mar 2 2024"));
        assert!(rendered.contains("Fri Mar 15 2024"));
    }

    #[test]
    fn test_empty_event_list() {
        assert!(render_event_list(&EventIndex::new()).contains("No events"));
    }
}
