//! HTTP client for communicating with datebook-server

use anyhow::{Context, Result};
use serde::Deserialize;
use std::process::Command;
use std::time::Duration;

use datebook_core::config::DatebookConfig;
use datebook_core::{DateRange, Event, NewEvent};

const SERVER_BINARY: &str = "datebook-server";
const MAX_RETRIES: u32 = 10;
const RETRY_DELAY_MS: u64 = 200;
const HEALTH_TIMEOUT_SECS: u64 = 2;

/// HTTP client for datebook-server
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
pub struct ErrorResponse {
    pub msg: String,
}

/// The event endpoints the calendar commands rely on.
pub trait EventApi {
    async fn list_events(&self, range: &DateRange) -> Result<Vec<Event>>;
    async fn create_event(&self, event: &NewEvent) -> Result<Event>;
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Connect to the configured server, starting a local one if needed
    pub async fn connect(config: &DatebookConfig) -> Result<Self> {
        let client = Self::new(config.api_url());

        // Try to connect to existing server
        if client.health_check().await.is_ok() {
            return Ok(client);
        }

        if !is_local(&client.base_url) {
            anyhow::bail!("datebook-server is not reachable at {}", client.base_url);
        }

        // Server not running - start it
        start_server()?;

        // Wait for server to be ready
        for _ in 0..MAX_RETRIES {
            tokio::time::sleep(Duration::from_millis(RETRY_DELAY_MS)).await;
            if client.health_check().await.is_ok() {
                return Ok(client);
            }
        }

        anyhow::bail!("Failed to connect to datebook-server after starting it")
    }

    async fn health_check(&self) -> Result<()> {
        self.http
            .get(format!("{}/api/health", self.base_url))
            .timeout(Duration::from_secs(HEALTH_TIMEOUT_SECS))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

impl EventApi for Client {
    /// GET /api/events?start=&end=
    async fn list_events(&self, range: &DateRange) -> Result<Vec<Event>> {
        let resp = self
            .http
            .get(format!("{}/api/events", self.base_url))
            .query(&[
                ("start", range.start.to_string()),
                ("end", range.end.to_string()),
            ])
            .send()
            .await
            .context("Failed to connect to server")?;

        if !resp.status().is_success() {
            let err: ErrorResponse = resp.json().await?;
            anyhow::bail!("{}", err.msg);
        }

        Ok(resp.json().await?)
    }

    /// POST /api/events
    async fn create_event(&self, event: &NewEvent) -> Result<Event> {
        let resp = self
            .http
            .post(format!("{}/api/events", self.base_url))
            .json(event)
            .send()
            .await
            .context("Failed to connect to server")?;

        if !resp.status().is_success() {
            let err: ErrorResponse = resp.json().await?;
            anyhow::bail!("{}", err.msg);
        }

        Ok(resp.json().await?)
    }
}

fn is_local(base_url: &str) -> bool {
    reqwest::Url::parse(base_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_owned))
        .is_some_and(|host| matches!(host.as_str(), "127.0.0.1" | "localhost" | "[::1]"))
}

/// Start datebook-server as a background process
fn start_server() -> Result<()> {
    Command::new(SERVER_BINARY)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to start {SERVER_BINARY}. Is it installed and in PATH?"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_local() {
        assert!(is_local("http://127.0.0.1:5000"));
        assert!(is_local("http://localhost:5000/"));
        assert!(!is_local("https://calendar.example.com"));
        assert!(is_local("http://[::1]:5000"));
        assert!(!is_local("http://10.0.0.5:5000"));
        assert!(!is_local("not a url"));
    }
}
