//! Directory of ICS documents, one per event.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use tracing::{debug, warn};

use crate::date_range::DateRange;
use crate::error::{DatebookError, DatebookResult};
use crate::event::{Event, NewEvent};
use crate::ics::{StoredEvent, generate_ics, parse_event};
use crate::store::{EventStore, new_event_id};

/// Upper bound on `-N` suffixes tried for one base filename.
const MAX_FILENAME_SUFFIX: u32 = 100;

/// Event store backed by a data directory of `.ics` files.
///
/// Files are named `YYYY-MM-DD__<slug>.ics`. Natural order is ascending date,
/// then creation time.
#[derive(Debug)]
pub struct DirStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl DirStore {
    /// Open (creating if needed) the data directory at `root`.
    pub fn open(root: impl Into<PathBuf>) -> DatebookResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;

        Ok(DirStore {
            root,
            write_lock: Mutex::new(()),
        })
    }

    /// Every readable document in the directory. Unparseable files are skipped.
    fn read_all(&self) -> DatebookResult<Vec<StoredEvent>> {
        let entries = std::fs::read_dir(&self.root)?;

        let stored = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|e| e == "ics"))
            .filter_map(|path| match read_document(&path) {
                Ok(stored) => Some(stored),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable event document");
                    None
                }
            })
            .collect();

        Ok(stored)
    }
}

impl EventStore for DirStore {
    fn create(&self, event: NewEvent) -> DatebookResult<Event> {
        let event = event.into_event(new_event_id());
        let content = generate_ics(&event, Utc::now())?;

        // Filename choice and write must not interleave with another create
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| DatebookError::Storage("data directory lock poisoned".into()))?;

        let filename = filename_for(&event, &self.root)?;
        std::fs::write(self.root.join(&filename), content)?;

        debug!(id = %event.id, date = %event.date, file = %filename, "event created");
        Ok(event)
    }

    fn list(&self, range: &DateRange) -> DatebookResult<Vec<Event>> {
        let mut matching: Vec<StoredEvent> = self
            .read_all()?
            .into_iter()
            .filter(|s| range.contains(&s.event.date))
            .collect();

        matching.sort_by(|a, b| {
            a.event
                .date
                .cmp(&b.event.date)
                .then_with(|| a.created.cmp(&b.created))
        });

        debug!(start = %range.start, end = %range.end, count = matching.len(), "events listed");
        Ok(matching.into_iter().map(|s| s.event).collect())
    }
}

fn read_document(path: &Path) -> DatebookResult<StoredEvent> {
    let content = std::fs::read_to_string(path)?;

    parse_event(&content).ok_or_else(|| {
        DatebookError::IcsParse(format!("Failed to parse event from {}", path.display()))
    })
}

// =============================================================================
// Filename generation
// =============================================================================

/// Pick an unused filename for an event, handling collisions.
fn filename_for(event: &Event, dir: &Path) -> DatebookResult<String> {
    let base = base_filename(event);
    let stem = base.trim_end_matches(".ics");

    if !dir.join(&base).exists() {
        return Ok(base);
    }

    for n in 2..=MAX_FILENAME_SUFFIX {
        let suffixed = format!("{}-{}.ics", stem, n);
        if !dir.join(&suffixed).exists() {
            return Ok(suffixed);
        }
    }

    Err(DatebookError::Storage(format!(
        "Too many filename collisions for {}",
        base
    )))
}

fn base_filename(event: &Event) -> String {
    let slug = slugify(&event.title);
    if slug.is_empty() {
        return format!("{}__event.ics", event.date);
    }
    format!("{}__{}.ics", event.date, slug)
}

fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(50)
        .collect()
}
