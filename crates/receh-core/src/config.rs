//! Engine configuration
//!
//! Config is loaded with a layered resolution:
//! 1. An explicit path (e.g. `--config`), when it exists
//! 2. The override in the data dir (~/.local/share/receh/config/receh.toml)
//! 3. Embedded defaults (compiled into binary)
//!
//! `RECEH_SOURCE_URL` replaces `source.base_url` after the file is read.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{FixedOffset, NaiveDateTime, Offset, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::category::{CategoryRule, CategoryTable};
use crate::error::{Error, Result};
use crate::pagination::{DEFAULT_MAX_PAGE_BUTTONS, DEFAULT_PAGE_SIZE};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/receh.toml");

/// Environment variable overriding the relay URL
pub const SOURCE_URL_ENV: &str = "RECEH_SOURCE_URL";

/// Where report payloads come from
#[derive(Debug, Clone, PartialEq)]
pub struct SourceConfig {
    pub base_url: String,
    pub endpoint: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000/api/proxy".to_string(),
            endpoint: "api_laporan_lengkap.php".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: "RECEH-Laporan-Client/1.0".to_string(),
        }
    }
}

/// View defaults
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub page_size: usize,
    pub max_page_buttons: usize,
    /// Offset of the backend's local time from UTC, used to compute "now"
    pub utc_offset_hours: i32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_page_buttons: DEFAULT_MAX_PAGE_BUTTONS,
            utc_offset_hours: 7,
        }
    }
}

impl ViewConfig {
    /// Current wall-clock time at the configured offset
    ///
    /// This is the only place the clock is read; engine functions take `now`
    /// as a parameter.
    pub fn now(&self) -> NaiveDateTime {
        let offset = FixedOffset::east_opt(self.utc_offset_hours * 3600)
            .unwrap_or_else(|| Utc.fix());
        Utc::now().with_timezone(&offset).naive_local()
    }
}

/// Resolved engine configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    pub source: SourceConfig,
    pub view: ViewConfig,
    pub categories: CategoryTable,
}

impl EngineConfig {
    /// Load with the layered resolution described in the module docs
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = load_config(explicit)?;
        if let Ok(url) = std::env::var(SOURCE_URL_ENV) {
            if !url.trim().is_empty() {
                debug!("Using {} for source URL", SOURCE_URL_ENV);
                config.source.base_url = url.trim().to_string();
            }
        }
        Ok(config)
    }

    /// Parse a TOML document on top of the defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }

    /// The embedded default configuration
    pub fn embedded() -> Result<Self> {
        parse_config(DEFAULT_CONFIG)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("receh").join("config").join("receh.toml"))
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config {}: {}", path.display(), e))
    })
}

/// Load configuration (explicit path, then override, then default)
fn load_config(explicit: Option<&Path>) -> Result<EngineConfig> {
    let content = match explicit {
        Some(path) if path.exists() => {
            debug!("Loading config from {}", path.display());
            read_config(path)?
        }
        _ => match default_config_path() {
            Some(path) if path.exists() => {
                debug!("Loading config override from {}", path.display());
                read_config(&path)?
            }
            _ => DEFAULT_CONFIG.to_string(),
        },
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    source: Option<RawSource>,
    view: Option<RawView>,
    categories: Option<Vec<RawCategory>>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    base_url: Option<String>,
    endpoint: Option<String>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawView {
    page_size: Option<usize>,
    max_page_buttons: Option<usize>,
    utc_offset_hours: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    name: String,
    #[serde(default)]
    keywords: Vec<String>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<EngineConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    let mut config = EngineConfig::default();

    if let Some(source) = raw.source {
        if let Some(base_url) = source.base_url {
            config.source.base_url = base_url;
        }
        if let Some(endpoint) = source.endpoint {
            config.source.endpoint = endpoint;
        }
        if let Some(timeout) = source.timeout_secs {
            config.source.timeout = Duration::from_secs(timeout.max(1));
        }
        if let Some(user_agent) = source.user_agent {
            config.source.user_agent = user_agent;
        }
    }

    if let Some(view) = raw.view {
        if let Some(page_size) = view.page_size.filter(|n| *n > 0) {
            config.view.page_size = page_size;
        }
        if let Some(buttons) = view.max_page_buttons.filter(|n| *n > 0) {
            config.view.max_page_buttons = buttons;
        }
        if let Some(offset) = view.utc_offset_hours {
            if !(-12..=14).contains(&offset) {
                return Err(Error::Config(format!(
                    "utc_offset_hours must be between -12 and 14, got {}",
                    offset
                )));
            }
            config.view.utc_offset_hours = offset;
        }
    }

    if let Some(categories) = raw.categories {
        let table = CategoryTable::new(
            categories
                .into_iter()
                .map(|c| CategoryRule {
                    name: c.name,
                    keywords: c.keywords,
                })
                .collect(),
        );
        // An empty list keeps the built-in table
        if !table.is_empty() {
            config.categories = table;
        }
    }

    Ok(config)
}
