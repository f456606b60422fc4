//! Addon configuration
//!
//! Addon metadata plus the few knobs the search and download paths need.
//! Loaded once per invocation, read-only afterwards.
//! Optional overrides live at ~/.config/subtis/addon.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://api.subt.is/v1";

const DEFAULT_ADDON_ID: &str = "service.subtitles.subtis";
const DEFAULT_ADDON_NAME: &str = "Kodi Subtis Addon";
const DEFAULT_AUTHOR: &str = "Subtis";

/// Addon configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddonConfig {
    /// Addon id, used in plugin:// action URLs
    pub id: String,
    /// Display name, used in the user-agent
    pub name: String,
    pub author: String,
    pub version: String,
    /// Base URL of the subt.is API (no trailing slash)
    pub base_url: String,
    /// Per-installation profile directory
    pub profile_dir: PathBuf,
    /// ISO 639-1 code of the subtitles the API serves
    pub language: String,
    /// Timeout for search requests, in seconds
    pub search_timeout_secs: u64,
    /// Timeout for subtitle downloads, in seconds
    pub download_timeout_secs: u64,
}

impl Default for AddonConfig {
    fn default() -> Self {
        Self {
            id: DEFAULT_ADDON_ID.to_string(),
            name: DEFAULT_ADDON_NAME.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            profile_dir: default_profile_dir(),
            language: "es".to_string(),
            search_timeout_secs: 10,
            download_timeout_secs: 30,
        }
    }
}

impl AddonConfig {
    /// Get config file path (~/.config/subtis/addon.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("subtis").join("addon.toml"))
    }

    /// Load config from the default path, or return defaults if not found
    pub fn load() -> Self {
        Self::path()
            .map(|p| Self::load_from(&p))
            .unwrap_or_default()
    }

    /// Load config from an explicit path, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// Same defaults, pointed at another API root (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Scratch directory for downloaded subtitles ({profile}/temp)
    pub fn scratch_dir(&self) -> PathBuf {
        self.profile_dir.join("temp")
    }

    /// "{name}/{version}"; a value that is not a valid header falls back
    /// to the default addon name with only visible ASCII kept in the version
    pub fn user_agent(&self) -> String {
        let agent = format!("{}/{}", self.name, self.version);
        if reqwest::header::HeaderValue::from_str(&agent).is_ok() {
            return agent;
        }

        let version: String = self
            .version
            .chars()
            .filter(|c| c.is_ascii_graphic())
            .collect();
        warn!(
            target: "subtis",
            "Configured user-agent {:?} is not a valid header, using the default name",
            agent
        );
        format!("{}/{}", DEFAULT_ADDON_NAME, version)
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}

fn default_profile_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("subtis")
}
