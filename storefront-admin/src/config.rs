//! Admin configuration.
//!
//! Settings come from `<config_dir>/config.json` when it exists, then from
//! the environment:
//!
//! | variable                   | setting        |
//! |----------------------------|----------------|
//! | `STOREFRONT_API_URL`       | `api_url`      |
//! | `STOREFRONT_API_TOKEN`     | `api_token`    |
//! | `STOREFRONT_TIMEOUT_SECS`  | `timeout_secs` |

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use gridview::SearchMode;
use serde::{Deserialize, Serialize};

use crate::api::AdminClient;
use crate::error::ConfigError;
use crate::model::ResourceKind;

pub const ENV_API_URL: &str = "STOREFRONT_API_URL";
pub const ENV_API_TOKEN: &str = "STOREFRONT_API_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "STOREFRONT_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Base URL of the admin API.
    pub api_url: Option<String>,
    /// Bearer token.
    pub api_token: Option<String>,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Page size overrides keyed by collection path, e.g. `"products": 5`.
    pub page_sizes: BTreeMap<String, usize>,
    /// How free-text search matches.
    pub search_mode: SearchMode,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_sizes: BTreeMap::new(),
            search_mode: SearchMode::default(),
        }
    }
}

impl AdminConfig {
    /// Loads the config file, if any, then applies the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match crate::paths::config_file() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Reads a config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No config file at {}", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overrides settings from environment variables. Blank values are
    /// ignored.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_API_URL) {
            self.api_url = Some(url);
        }
        if let Some(token) = get(ENV_API_TOKEN) {
            self.api_token = Some(token);
        }
        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            self.timeout_secs = secs
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid("timeout_secs", format!("{secs:?}: {e}")))?;
        }
        Ok(())
    }

    /// The API base URL, which has no default.
    pub fn api_url(&self) -> Result<&str, ConfigError> {
        self.api_url.as_deref().ok_or(ConfigError::Missing("api_url"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Page size for a screen, falling back to the screen's own default.
    pub fn page_size(&self, kind: ResourceKind, default: usize) -> usize {
        self.page_sizes
            .get(kind.path())
            .copied()
            .filter(|&n| n > 0)
            .unwrap_or(default)
    }

    /// Builds an API client from these settings.
    pub fn client(&self) -> Result<AdminClient, crate::Error> {
        let mut builder = AdminClient::builder().url(self.api_url()?);
        if let Some(token) = &self.api_token {
            builder = builder.token(token);
        }
        if self.timeout_secs > 0 {
            builder = builder.timeout(self.timeout());
        }
        Ok(builder.build()?)
    }
}
