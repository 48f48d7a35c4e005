use anyhow::Result;

use datebook_core::index::EventIndex;
use datebook_core::{DateKey, DateRange};

use crate::client::{Client, EventApi};
use crate::render::render_event_list;

pub async fn run(client: &Client, start: DateKey, end: DateKey) -> Result<()> {
    let range = DateRange::new(start, end);
    if range.is_empty() {
        anyhow::bail!("--start must not be after --end");
    }

    let events = client.list_events(&range).await?;
    println!("{}", render_event_list(&EventIndex::from_events(events)));

    Ok(())
}
