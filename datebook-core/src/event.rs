//! Event types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::date_key::DateKey;
use crate::error::{DatebookError, DatebookResult};

/// A stored event, as returned by the store and sent over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Opaque identifier assigned by the store
    pub id: String,
    pub title: String,
    pub date: DateKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A validated request to create an event.
///
/// Constructing one is the only way to reach [`EventStore::create`](crate::store::EventStore::create),
/// so stores never see an empty title or a missing date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewEvent {
    title: String,
    date: DateKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl NewEvent {
    pub fn new(title: impl AsRef<str>, date: DateKey) -> DatebookResult<Self> {
        let title = title.as_ref().trim();
        if title.is_empty() {
            return Err(DatebookError::Validation("Title is required".to_string()));
        }

        Ok(NewEvent {
            title: title.to_string(),
            date,
            description: None,
        })
    }

    /// Validate raw request fields. Missing and blank values are treated alike.
    pub fn from_fields(title: Option<&str>, date: Option<&str>) -> DatebookResult<Self> {
        let title = title.map(str::trim).filter(|t| !t.is_empty());
        let date = date.map(str::trim).filter(|d| !d.is_empty());

        let (Some(title), Some(date)) = (title, date) else {
            return Err(DatebookError::Validation(
                "Date and title are required".to_string(),
            ));
        };

        NewEvent::new(title, DateKey::parse(date)?)
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn date(&self) -> DateKey {
        self.date
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Attach the store-assigned id.
    pub fn into_event(self, id: String) -> Event {
        Event {
            id,
            title: self.title,
            date: self.date,
            description: self.description,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fields_requires_title_and_date() {
        for (title, date) in [
            (None, Some("2024-03-15")),
            (Some(""), Some("2024-03-15")),
            (Some("   "), Some("2024-03-15")),
            (Some("Meeting"), None),
            (Some("Meeting"), Some("")),
        ] {
            let err = NewEvent::from_fields(title, date).unwrap_err();
            assert!(err.is_validation());
            assert_eq!(err.to_string(), "Date and title are required");
        }
    }

    #[test]
    fn test_from_fields_rejects_malformed_date() {
        let err = NewEvent::from_fields(Some("Meeting"), Some("03/15/2024")).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_title_is_trimmed() {
        let new = NewEvent::from_fields(Some("  Meeting "), Some("2024-03-15")).unwrap();
        assert_eq!(new.title(), "Meeting");
        assert_eq!(new.date().to_string(), "2024-03-15");
    }

    #[test]
    fn test_blank_description_is_dropped() {
        let date = DateKey::parse("2024-03-15").unwrap();
        let new = NewEvent::new("Meeting", date).unwrap().with_description(Some("  ".into()));
        assert_eq!(new.description(), None);
    }

    #[test]
    fn test_event_wire_shape() {
        let event = NewEvent::new("Meeting", DateKey::parse("2024-03-15").unwrap())
            .unwrap()
            .into_event("abc".to_string());

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "abc", "title": "Meeting", "date": "2024-03-15"})
        );
    }
}
