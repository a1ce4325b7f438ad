use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreError;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "tascan.json";

/// Scanner configuration document.
///
/// ```json
/// { "ta_url": "http://tubearchivist.local:8000", "ta_token": "abc123" }
/// ```
///
/// Every field is optional. Enrichment is only attempted when both the URL
/// and the token are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ta_url: Option<String>,
    #[serde(default)]
    pub ta_token: Option<String>,
    /// Per-request timeout for the metadata service. Unset or 0 means no
    /// timeout.
    #[serde(default)]
    pub ta_timeout_secs: Option<u64>,
}

impl Config {
    /// Load the config document at `path`. A missing file yields the empty
    /// config rather than an error.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        serde_json::from_str(raw).map_err(|e| CoreError::Config(format!("parse JSON: {e}")))
    }

    /// Resolve the config path: explicit value, then `TASCAN_CONFIG`, then
    /// [`DEFAULT_CONFIG_FILE`].
    pub fn resolve_path(explicit: Option<PathBuf>) -> PathBuf {
        explicit
            .or_else(|| std::env::var_os("TASCAN_CONFIG").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Apply `TASCAN_TA_URL` / `TASCAN_TA_TOKEN` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var("TASCAN_TA_URL").ok(),
            std::env::var("TASCAN_TA_TOKEN").ok(),
        )
    }

    pub fn with_overrides(mut self, ta_url: Option<String>, ta_token: Option<String>) -> Self {
        if let Some(url) = ta_url.filter(|v| !v.trim().is_empty()) {
            self.ta_url = Some(url);
        }
        if let Some(token) = ta_token.filter(|v| !v.trim().is_empty()) {
            self.ta_token = Some(token);
        }
        self
    }

    /// Request timeout for the metadata service, if one is set.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.ta_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// URL and token, when both are set and non-blank.
    pub fn metadata_service(&self) -> Option<(&str, &str)> {
        let url = self.ta_url.as_deref().map(str::trim).filter(|v| !v.is_empty())?;
        let token = self
            .ta_token
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())?;
        Some((url, token))
    }
}
