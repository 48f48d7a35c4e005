//! datebook configuration.
//!
//! Sources, lowest to highest precedence:
//! 1. built-in defaults
//! 2. `~/.config/datebook/config.toml` (created with every option commented out on first load)
//! 3. `DATEBOOK_*` environment variables, `__` separating nested keys
//!    (e.g. `DATEBOOK_SERVER__PORT=8080`)

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{DatebookError, DatebookResult};

static DEFAULT_DATA_DIR: &str = "~/datebook";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const ENV_PREFIX: &str = "DATEBOOK";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Which [`EventStore`](crate::store::EventStore) backs the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// ICS documents in `data_dir`
    #[default]
    Dir,
    /// Process-local; everything is lost on exit
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> DatebookResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| DatebookError::Config(format!("Invalid server address {}:{}: {e}", self.host, self.port)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatebookConfig {
    /// Where event documents live
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub store: StoreKind,

    #[serde(default)]
    pub server: ServerConfig,

    /// Base URL the client talks to. Defaults to the local server address.
    #[serde(default)]
    pub api_url: Option<String>,
}

impl Default for DatebookConfig {
    fn default() -> Self {
        DatebookConfig {
            data_dir: default_data_dir(),
            store: StoreKind::default(),
            server: ServerConfig::default(),
            api_url: None,
        }
    }
}

impl DatebookConfig {
    /// Load from the user config file and environment.
    pub fn load() -> DatebookResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (which may be absent) and environment.
    pub fn load_from(path: &Path) -> DatebookResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| DatebookError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DatebookError::Config(e.to_string()))
    }

    pub fn config_path() -> DatebookResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DatebookError::Config("Could not determine config directory".into()))?
            .join("datebook");

        Ok(config_dir.join("config.toml"))
    }

    /// `data_dir` with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Base URL for API requests, without a trailing slash.
    pub fn api_url(&self) -> String {
        match &self.api_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://{}:{}", self.server.host, self.server.port),
        }
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DatebookResult<()> {
        let contents = format!(
            "\
# datebook configuration

# Where event documents live:
# data_dir = \"{DEFAULT_DATA_DIR}\"

# Event store: \"dir\" (documents in data_dir) or \"memory\" (lost on exit):
# store = \"dir\"

# Client override for the server URL:
# api_url = \"http://{DEFAULT_HOST}:{DEFAULT_PORT}\"

# [server]
# host = \"{DEFAULT_HOST}\"
# port = {DEFAULT_PORT}
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatebookError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DatebookError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = DatebookConfig::load_from(&tmp.path().join("absent.toml")).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("~/datebook"));
        assert_eq!(config.store, StoreKind::Dir);
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.api_url(), "http://127.0.0.1:5000");
    }

    #[test]
    fn test_default_config_file_parses_to_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested/config.toml");

        DatebookConfig::create_default_config(&path).unwrap();
        let config = DatebookConfig::load_from(&path).unwrap();

        assert_eq!(config.server, ServerConfig::default());
        assert_eq!(config.api_url, None);
    }

    #[test]
    fn test_file_values_override_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "data_dir = \"/srv/datebook\"\nstore = \"memory\"\napi_url = \"http://cal.local:9000/\"\n\n[server]\nport = 8080\n",
        )
        .unwrap();

        let config = DatebookConfig::load_from(&path).unwrap();
        assert_eq!(config.data_path(), PathBuf::from("/srv/datebook"));
        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.api_url(), "http://cal.local:9000");
    }

    #[test]
    fn test_invalid_store_kind_is_a_config_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "store = \"mongo\"\n").unwrap();

        let err = DatebookConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, DatebookError::Config(_)));
    }

    #[test]
    fn test_socket_addr() {
        let server = ServerConfig::default();
        assert_eq!(server.socket_addr().unwrap().port(), 5000);

        let bad = ServerConfig { host: "not a host".into(), port: 1 };
        assert!(bad.socket_addr().is_err());
    }
}
