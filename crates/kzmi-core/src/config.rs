use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, TryFromFloatSecsError};
use thiserror::Error;

use crate::normalize::{NormalizeOptions, UrlPolicy};
use crate::record::DEFAULT_URL_FIELDS;
use crate::retry::RetryPolicy;

/// Raw GitHub root of the kz-map-info dataset.
pub const DEFAULT_BASE_URL: &str = "https://raw.githubusercontent.com/zer0k-z/kz-map-info/master/";

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per category fetch (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.5 = 500ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay_secs: 0.5,
            max_delay_secs: 10,
        }
    }
}

/// Config values that parse as TOML but cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("retry.base_delay_secs = {value} is not a usable delay")]
    BadDelay {
        value: f64,
        #[source]
        source: TryFromFloatSecsError,
    },
}

impl TryFrom<&RetryConfig> for RetryPolicy {
    type Error = ConfigError;

    fn try_from(c: &RetryConfig) -> Result<Self, ConfigError> {
        let base_delay = Duration::try_from_secs_f64(c.base_delay_secs).map_err(|source| {
            ConfigError::BadDelay {
                value: c.base_delay_secs,
                source,
            }
        })?;
        Ok(Self {
            max_attempts: c.max_attempts.max(1),
            base_delay,
            max_delay: Duration::from_secs(c.max_delay_secs),
        })
    }
}

/// One remote dataset and the base name of its output pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Remote resource key, fetched as `<base_url><key>.json`.
    pub key: String,
    /// Output base name: `<name>.json` and `<name>.min.json`.
    pub name: String,
}

impl Category {
    fn new(key: &str, name: &str) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
        }
    }
}

pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("MapsWithMappers", "maps"),
        Category::new("MapsWithMappers_Global", "global"),
        Category::new("MapsWithMappers_NonGlobal", "non-global"),
        Category::new("IncompletedMaps", "uncompleted"),
    ]
}

fn default_url_fields() -> Vec<String> {
    DEFAULT_URL_FIELDS.iter().map(|s| s.to_string()).collect()
}

/// Global configuration loaded from `~/.config/kzmi/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KzmiConfig {
    /// Remote root the category keys are resolved against.
    pub base_url: String,
    /// Directory receiving the `.json` / `.min.json` pairs.
    pub dest_dir: PathBuf,
    /// Record fields holding URLs to correct.
    #[serde(default = "default_url_fields")]
    pub url_fields: Vec<String>,
    /// Fail when a URL field is missing instead of skipping it.
    #[serde(default)]
    pub strict_urls: bool,
    /// TCP connect timeout for fetches.
    pub connect_timeout_secs: u64,
    /// Total per-request timeout for fetches.
    pub timeout_secs: u64,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    /// Categories processed in order.
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,
}

impl Default for KzmiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            dest_dir: PathBuf::from("."),
            url_fields: default_url_fields(),
            strict_urls: false,
            connect_timeout_secs: 15,
            timeout_secs: 60,
            retry: None,
            categories: default_categories(),
        }
    }
}

impl KzmiConfig {
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            url_fields: self.url_fields.clone(),
            url_policy: if self.strict_urls {
                UrlPolicy::Strict
            } else {
                UrlPolicy::Lenient
            },
        }
    }

    pub fn retry_policy(&self) -> Result<RetryPolicy, ConfigError> {
        match &self.retry {
            Some(retry) => RetryPolicy::try_from(retry),
            None => Ok(RetryPolicy::default()),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("kzmi")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<KzmiConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = KzmiConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit path (no default file is created).
pub fn load_from(path: &Path) -> Result<KzmiConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: KzmiConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
