//! Console configuration
//!
//! Loaded from a TOML file (`orabak.toml` by default). Every field has a
//! default, so an absent or partial file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{OrabakError, Result};

/// Default config file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "orabak.toml";

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV: &str = "ORABAK_CONFIG";

/// Console configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Base URL of the backup backend
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bearer token sent with every request
    #[serde(default)]
    pub token: Option<String>,

    /// Per-request timeout
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Lookback window for backup statistics
    #[serde(default = "default_stats_window_days")]
    pub stats_window_days: u32,

    /// Periodic health/scheduler refresh. `None` means manual refresh only.
    #[serde(default)]
    pub auto_refresh_ms: Option<u64>,

    /// Terminal width (columns) at which the permanent side panel is used
    #[serde(default = "default_wide_breakpoint")]
    pub wide_breakpoint: u16,

    /// Side panel width while expanded
    #[serde(default = "default_panel_expanded_width")]
    pub panel_expanded_width: u16,

    /// Side panel width while collapsed
    #[serde(default = "default_panel_collapsed_width")]
    pub panel_collapsed_width: u16,

    /// Duration of the panel width transition
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,

    /// Maximum entries kept in the activity history
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Where logs go while the terminal UI owns the screen
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_stats_window_days() -> u32 {
    30
}

fn default_wide_breakpoint() -> u16 {
    100
}

fn default_panel_expanded_width() -> u16 {
    24
}

fn default_panel_collapsed_width() -> u16 {
    6
}

fn default_transition_ms() -> u64 {
    300
}

fn default_history_limit() -> usize {
    200
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            request_timeout_ms: default_request_timeout_ms(),
            stats_window_days: default_stats_window_days(),
            auto_refresh_ms: None,
            wide_breakpoint: default_wide_breakpoint(),
            panel_expanded_width: default_panel_expanded_width(),
            panel_collapsed_width: default_panel_collapsed_width(),
            transition_ms: default_transition_ms(),
            history_limit: default_history_limit(),
            log_file: None,
        }
    }
}

impl ConsoleConfig {
    /// Parse and validate a config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| OrabakError::Config(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path. The file must exist.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            OrabakError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Resolve the config file: explicit path, then `$ORABAK_CONFIG`, then
    /// `orabak.toml` in `cwd`. Falls back to defaults when none exists.
    pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Ok(from_env) = std::env::var(CONFIG_ENV) {
            if !from_env.is_empty() {
                return Self::load(Path::new(&from_env));
            }
        }

        let local = cwd.join(DEFAULT_CONFIG_FILE);
        if local.exists() {
            Self::load(&local)
        } else {
            tracing::debug!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Write the default configuration to `path`
    pub fn write_default(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(&Self::default())
            .map_err(|e| OrabakError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings the console cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(OrabakError::Config("api_url must not be empty".to_string()));
        }
        if self.stats_window_days == 0 {
            return Err(OrabakError::Config(
                "stats_window_days must be at least 1".to_string(),
            ));
        }
        if self.panel_collapsed_width >= self.panel_expanded_width {
            return Err(OrabakError::Config(format!(
                "panel_collapsed_width ({}) must be smaller than panel_expanded_width ({})",
                self.panel_collapsed_width, self.panel_expanded_width
            )));
        }
        if self.wide_breakpoint < self.panel_expanded_width {
            return Err(OrabakError::Config(format!(
                "wide_breakpoint ({}) must be at least panel_expanded_width ({})",
                self.wide_breakpoint, self.panel_expanded_width
            )));
        }
        Ok(())
    }

    /// Log file used while the terminal UI is active
    pub fn effective_log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("orabak-console.log"))
    }
}
