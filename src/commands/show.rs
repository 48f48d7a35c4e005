use anyhow::Result;
use chrono::NaiveDate;

use datebook_core::YearMonth;
use datebook_core::view::{Action, CalendarState};

use crate::client::Client;
use crate::commands::dispatch;
use crate::render::{Render, render_event_list};

pub async fn run(client: &Client, month: YearMonth, today: NaiveDate) -> Result<()> {
    let state = dispatch(client, CalendarState::at(month, today), Action::Load).await;

    println!("{}", state.render());

    if let Some(error) = state.error {
        anyhow::bail!(error);
    }

    println!();
    println!("{}", render_event_list(&state.index));

    Ok(())
}
