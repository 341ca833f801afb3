// src/config.rs
use crate::application::services::enrichment::{DEFAULT_ENRICH_BATCH_SIZE, DEFAULT_FAVICON_SERVICE};
use crate::application::services::link_validator::{
    DEFAULT_BATCH_DELAY, DEFAULT_BATCH_SIZE, DEFAULT_TIMEOUT,
};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::validation::DEFAULT_INTERVAL_DAYS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument, trace, warn};

pub const ENV_API_URL: &str = "LINKVAULT_API_URL";
pub const ENV_API_TOKEN: &str = "LINKVAULT_API_TOKEN";
pub const ENV_DEFAULT_FOLDER: &str = "LINKVAULT_DEFAULT_FOLDER";
pub const ENV_DEFAULT_TAGS: &str = "LINKVAULT_DEFAULT_TAGS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Folder assigned to every imported bookmark
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_folder: Option<String>,

    /// Tag ids assigned to every imported bookmark
    pub default_tags: Vec<String>,

    /// Look up title/description/favicon before importing (default: true)
    pub fetch_metadata: bool,

    /// Concurrent metadata lookups per batch (default: 5)
    pub enrich_batch_size: usize,

    /// Favicon URL template; `{domain}` is substituted
    pub favicon_service: String,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            default_folder: None,
            default_tags: Vec::new(),
            fetch_metadata: true,
            enrich_batch_size: DEFAULT_ENRICH_BATCH_SIZE,
            favicon_service: DEFAULT_FAVICON_SERVICE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// Links probed concurrently per batch (default: 10)
    pub batch_size: usize,

    /// HEAD timeout in seconds; the GET retry gets half (default: 10)
    pub timeout_secs: u64,

    /// Pause between batches in milliseconds (default: 1000)
    pub batch_delay_ms: u64,

    /// Re-validate links checked longer ago than this (default: 7)
    pub interval_days: i64,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            batch_delay_ms: DEFAULT_BATCH_DELAY.as_millis() as u64,
            interval_days: DEFAULT_INTERVAL_DAYS,
        }
    }
}

impl ValidationSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the bookmark backend API
    pub api_url: String,

    /// Bearer token for the backend API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    pub import: ImportSettings,

    pub validation: ValidationSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000/api".to_string(),
            api_token: None,
            import: ImportSettings::default(),
            validation: ValidationSettings::default(),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config/linkvault/config.toml"))
}

/// Split a comma separated id list, dropping blanks
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn read_config_file(path: &Path) -> Option<Settings> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!("Cannot read config file {:?}: {}", path, e);
            return None;
        }
    };
    match toml::from_str::<Settings>(&text) {
        Ok(settings) => Some(settings),
        Err(e) => {
            warn!("Ignoring malformed config file {:?}: {}", path, e);
            None
        }
    }
}

/// Load settings: defaults, then the config file, then environment variables.
///
/// An explicit `config_file` must exist; the default location is optional.
#[instrument(level = "debug")]
pub fn load_settings(config_file: Option<&Path>) -> DomainResult<Settings> {
    trace!("Loading settings");

    let mut settings = match config_file {
        Some(path) => {
            if !path.exists() {
                return Err(DomainError::InvalidInput(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            read_config_file(path).unwrap_or_default()
        }
        None => default_config_path()
            .filter(|path| path.exists())
            .and_then(|path| {
                debug!("Loading config from: {:?}", path);
                read_config_file(&path)
            })
            .unwrap_or_default(),
    };

    if let Ok(api_url) = std::env::var(ENV_API_URL) {
        trace!("Using {} from environment: {}", ENV_API_URL, api_url);
        settings.api_url = api_url;
    }
    if let Ok(token) = std::env::var(ENV_API_TOKEN) {
        trace!("Using {} from environment", ENV_API_TOKEN);
        settings.api_token = Some(token);
    }
    if let Ok(folder) = std::env::var(ENV_DEFAULT_FOLDER) {
        trace!("Using {} from environment: {}", ENV_DEFAULT_FOLDER, folder);
        settings.import.default_folder = Some(folder).filter(|f| !f.trim().is_empty());
    }
    if let Ok(tags) = std::env::var(ENV_DEFAULT_TAGS) {
        trace!("Using {} from environment: {}", ENV_DEFAULT_TAGS, tags);
        settings.import.default_tags = parse_list(&tags);
    }

    trace!("Settings loaded: {:?}", settings);
    Ok(settings)
}

pub fn generate_default_config() -> String {
    toml::to_string_pretty(&Settings::default())
        .unwrap_or_else(|_| "# Error generating default configuration".to_string())
}
