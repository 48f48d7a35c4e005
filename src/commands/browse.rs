//! Interactive month browser.

use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::Input;
use owo_colors::OwoColorize;

use datebook_core::view::{Action, CalendarState, Modal, reduce};
use datebook_core::{DateKey, YearMonth};

use crate::client::Client;
use crate::commands::dispatch;
use crate::render::{Render, render_day};

const PROMPT: &str = "Day number, [n]ext, [p]rev, [t]oday, [r]efresh, [q]uit";

/// What the user typed at the month prompt
#[derive(Debug, PartialEq)]
enum Command {
    Quit,
    Act(Action),
    Unknown,
}

fn parse_command(input: &str) -> Command {
    match input.trim().to_lowercase().as_str() {
        "q" | "quit" => Command::Quit,
        "n" | "next" => Command::Act(Action::NextMonth),
        "p" | "prev" => Command::Act(Action::PrevMonth),
        "t" | "today" => Command::Act(Action::Today),
        "r" | "refresh" | "" => Command::Act(Action::Load),
        other => match other.parse::<u32>() {
            Ok(day) => Command::Act(Action::SelectDay(day)),
            Err(_) => Command::Unknown,
        },
    }
}

pub async fn run(client: &Client, month: YearMonth, today: NaiveDate) -> Result<()> {
    let mut state = dispatch(client, CalendarState::at(month, today), Action::Load).await;

    loop {
        println!("\n{}", state.render());

        // Errors are shown once
        if state.error.is_some() {
            state = reduce(state, Action::DismissError).0;
        }

        let input: String = Input::new()
            .with_prompt(PROMPT)
            .allow_empty(true)
            .interact_text()?;

        let action = match parse_command(&input) {
            Command::Quit => return Ok(()),
            Command::Act(action) => action,
            Command::Unknown => {
                println!("{}", format!("Unknown command: {}", input.trim()).yellow());
                continue;
            }
        };

        state = dispatch(client, state, action).await;

        state = match state.modal.clone() {
            Modal::EventList { date } => {
                println!("\n{}", render_day(&date, state.listed_events()));
                dispatch(client, state, Action::CloseModal).await
            }
            Modal::AddEvent { date, .. } => add_event(client, state, date).await?,
            Modal::None => state,
        };
    }
}

/// Entry form for a day without events. An empty title cancels.
async fn add_event(client: &Client, state: CalendarState, date: DateKey) -> Result<CalendarState> {
    let title: String = Input::new()
        .with_prompt(format!("New event on {} (empty to cancel)", date.render()))
        .allow_empty(true)
        .interact_text()?;

    if title.trim().is_empty() {
        return Ok(dispatch(client, state, Action::CloseModal).await);
    }

    let state = dispatch(client, state, Action::TitleChanged(title)).await;
    let state = dispatch(client, state, Action::Submit).await;

    // Still open means validation or the request failed; the error is in state
    if matches!(state.modal, Modal::AddEvent { .. }) {
        return Ok(dispatch(client, state, Action::CloseModal).await);
    }

    Ok(state)
}
