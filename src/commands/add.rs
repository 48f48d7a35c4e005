use anyhow::Result;
use owo_colors::OwoColorize;

use datebook_core::{DateKey, NewEvent};

use crate::client::{Client, EventApi};
use crate::render::Render;

pub async fn run(client: &Client, date: DateKey, title: String, description: Option<String>) -> Result<()> {
    let new_event = NewEvent::new(&title, date)?.with_description(description);
    let event = client.create_event(&new_event).await?;

    println!(
        "{} {} on {} {}",
        "Added".green(),
        event.render(),
        event.date.render(),
        format!("({})", event.id).dimmed()
    );

    Ok(())
}
