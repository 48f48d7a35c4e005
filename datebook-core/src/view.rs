//! Calendar view state.
//!
//! All interactive state lives in [`CalendarState`] and changes only through
//! [`reduce`]. Anything that needs I/O comes back as an [`Effect`]; whoever runs
//! the effect reports its outcome as another [`Action`].
//!
//! Month fetches are tagged with a [`FetchTicket`]. Only the response to the
//! most recent fetch may replace the index, so a slow response for a month the
//! user already left is dropped.

use chrono::NaiveDate;
use tracing::debug;

use crate::date_key::DateKey;
use crate::date_range::DateRange;
use crate::event::{Event, NewEvent};
use crate::grid::{MonthGrid, build_month_grid};
use crate::index::EventIndex;
use crate::month::YearMonth;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    None,
    /// Read-only list of the events on a day
    EventList { date: DateKey },
    /// Entry form for a new event
    AddEvent {
        date: DateKey,
        title: String,
        submitting: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Fetch the displayed month (initial load or refresh)
    Load,
    PrevMonth,
    NextMonth,
    GoTo(YearMonth),
    /// Jump to the month containing today
    Today,
    EventsLoaded { ticket: FetchTicket, events: Vec<Event> },
    FetchFailed { ticket: FetchTicket, message: String },
    SelectDay(u32),
    TitleChanged(String),
    Submit,
    EventCreated(Event),
    CreateFailed(String),
    CloseModal,
    DismissError,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchEvents { ticket: FetchTicket, range: DateRange },
    CreateEvent(NewEvent),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarState {
    pub month: YearMonth,
    pub today: NaiveDate,
    pub index: EventIndex,
    pub modal: Modal,
    /// Last failure worth showing to the user
    pub error: Option<String>,
    next_ticket: u64,
    pending: Option<FetchTicket>,
}

impl CalendarState {
    /// State showing the month containing `today`, with nothing loaded yet.
    pub fn new(today: NaiveDate) -> Self {
        Self::at(YearMonth::containing(today), today)
    }

    pub fn at(month: YearMonth, today: NaiveDate) -> Self {
        CalendarState {
            month,
            today,
            index: EventIndex::new(),
            modal: Modal::None,
            error: None,
            next_ticket: 0,
            pending: None,
        }
    }

    pub fn grid(&self) -> MonthGrid {
        build_month_grid(self.month)
    }

    /// True while a month fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Events for the day shown in the list view, if one is open.
    pub fn listed_events(&self) -> &[Event] {
        match &self.modal {
            Modal::EventList { date } => self.index.events_on(date),
            _ => &[],
        }
    }

    fn start_fetch(mut self) -> (Self, Option<Effect>) {
        self.next_ticket += 1;
        let ticket = FetchTicket(self.next_ticket);
        self.pending = Some(ticket);

        let range = DateRange::for_month(self.month);
        (self, Some(Effect::FetchEvents { ticket, range }))
    }

    fn show_month(mut self, month: YearMonth) -> (Self, Option<Effect>) {
        self.month = month;
        self.index = EventIndex::new();
        self.modal = Modal::None;
        self.start_fetch()
    }

    fn is_current(&self, ticket: FetchTicket) -> bool {
        self.pending == Some(ticket)
    }
}

/// Apply `action` to `state`.
pub fn reduce(mut state: CalendarState, action: Action) -> (CalendarState, Option<Effect>) {
    match action {
        Action::Load => state.start_fetch(),
        Action::PrevMonth => {
            let month = state.month.prev();
            state.show_month(month)
        }
        Action::NextMonth => {
            let month = state.month.next();
            state.show_month(month)
        }
        Action::GoTo(month) => state.show_month(month),
        Action::Today => {
            let month = YearMonth::containing(state.today);
            state.show_month(month)
        }

        Action::EventsLoaded { ticket, events } => {
            if !state.is_current(ticket) {
                debug!(?ticket, "discarding stale month fetch");
                return (state, None);
            }
            state.pending = None;
            state.error = None;
            state.index = EventIndex::from_events(events);
            (state, None)
        }
        Action::FetchFailed { ticket, message } => {
            if !state.is_current(ticket) {
                debug!(?ticket, "discarding stale month fetch failure");
                return (state, None);
            }
            state.pending = None;
            state.error = Some(message);
            (state, None)
        }

        Action::SelectDay(day) => {
            let Some(date) = state.month.date_key(day) else {
                return (state, None);
            };
            state.modal = if state.index.has_events(&date) {
                Modal::EventList { date }
            } else {
                Modal::AddEvent {
                    date,
                    title: String::new(),
                    submitting: false,
                }
            };
            (state, None)
        }
        Action::TitleChanged(text) => {
            if let Modal::AddEvent { title, submitting: false, .. } = &mut state.modal {
                *title = text;
            }
            (state, None)
        }
        Action::Submit => {
            let Modal::AddEvent { date, title, submitting } = &mut state.modal else {
                return (state, None);
            };
            if *submitting {
                return (state, None);
            }
            match NewEvent::new(title.as_str(), *date) {
                Ok(new_event) => {
                    *submitting = true;
                    state.error = None;
                    (state, Some(Effect::CreateEvent(new_event)))
                }
                Err(e) => {
                    state.error = Some(e.to_string());
                    (state, None)
                }
            }
        }
        Action::EventCreated(event) => {
            if state.month.contains(&event.date) {
                state.index.insert(event);
            }
            if matches!(state.modal, Modal::AddEvent { submitting: true, .. }) {
                state.modal = Modal::None;
            }
            (state, None)
        }
        Action::CreateFailed(message) => {
            if let Modal::AddEvent { submitting, .. } = &mut state.modal {
                *submitting = false;
            }
            state.error = Some(message);
            (state, None)
        }

        Action::CloseModal => {
            state.modal = Modal::None;
            (state, None)
        }
        Action::DismissError => {
            state.error = None;
            (state, None)
        }
    }
}
