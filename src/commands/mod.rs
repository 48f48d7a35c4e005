pub mod add;
pub mod browse;
pub mod events;
pub mod show;

use tracing::warn;

use datebook_core::view::{Action, CalendarState, Effect, reduce};

use crate::client::EventApi;
use crate::utils::tui::create_spinner;

/// Apply `action`, then run every effect it produces against the server and
/// feed each outcome back through the reducer.
pub async fn dispatch<A: EventApi>(api: &A, state: CalendarState, action: Action) -> CalendarState {
    let (mut state, mut effect) = reduce(state, action);

    while let Some(next) = effect.take() {
        let outcome = perform(api, next).await;
        (state, effect) = reduce(state, outcome);
    }

    state
}

async fn perform<A: EventApi>(api: &A, effect: Effect) -> Action {
    match effect {
        Effect::FetchEvents { ticket, range } => {
            let spinner = create_spinner(format!("Loading {} to {}", range.start, range.end));
            let result = api.list_events(&range).await;
            spinner.finish_and_clear();

            match result {
                Ok(events) => Action::EventsLoaded { ticket, events },
                Err(e) => {
                    warn!(error = %e, "failed to fetch events");
                    Action::FetchFailed {
                        ticket,
                        message: format!("Could not load events: {e}"),
                    }
                }
            }
        }
        Effect::CreateEvent(new_event) => match api.create_event(&new_event).await {
            Ok(event) => Action::EventCreated(event),
            Err(e) => {
                warn!(error = %e, "failed to add event");
                Action::CreateFailed(format!("Could not add event: {e}"))
            }
        },
    }
}
