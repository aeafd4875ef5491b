/// Configuration schema and defaults for sumview.
///
/// Defines the TOML-serializable configuration structure with all sections:
/// `[storage]`, `[api]`, `[dashboard]`, `[logging]`, and `[web]`.
///
/// Every field has a sensible built-in default. Users only need to set the
/// values they want to override.
use serde::{Deserialize, Serialize};

use crate::app::ViewMode;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level sumview configuration.
///
/// Maps directly to the `~/.sumview/config.toml` and `.sumview.toml` file
/// schemas. All sections and fields are optional: missing values fall back
/// to built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SumviewConfig {
    pub storage: StorageConfig,
    pub api: ApiConfig,
    pub dashboard: DashboardConfig,
    pub logging: LoggingConfig,
    pub web: WebConfig,
}

// ---------------------------------------------------------------------------
// [storage]
// ---------------------------------------------------------------------------

/// Local storage tree settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage root. Summaries live under `<root>/summaries/<date>/<category>.md`.
    pub root: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: "./storage".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// [api]
// ---------------------------------------------------------------------------

/// Remote research-platform API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,
    /// Per-request timeout in milliseconds. `0` disables the timeout.
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_ms: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// [dashboard]
// ---------------------------------------------------------------------------

/// Initial widget values for a dashboard session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// View shown when a session starts: `local`, `remote`, or `manage`.
    pub default_mode: ViewMode,
    /// Initial value of the cleanup retention input (minimum 1).
    pub days_to_keep: u32,
    /// Whether the analysis panel starts enabled.
    pub show_analysis: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_mode: ViewMode::default(),
            days_to_keep: 30,
            show_analysis: false,
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Activity log settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether activity logging is enabled.
    pub enabled: bool,
    /// Path to the activity log file. `~` is expanded to the home directory.
    pub path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "~/.sumview/activity.jsonl".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// [web]
// ---------------------------------------------------------------------------

/// Web dashboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Listen address for `sumview web`.
    pub addr: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8501".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Annotated defaults
// ---------------------------------------------------------------------------

impl SumviewConfig {
    /// The annotated default config written by `sumview config init`.
    pub fn default_toml() -> String {
        r#"# sumview Configuration
# Daily research summary dashboard
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (SUMVIEW_*)
#   2. Project config (.sumview.toml in current directory)
#   3. User global config (~/.sumview/config.toml)
#   4. Built-in defaults

[storage]
root = "./storage"    # summaries are read from <root>/summaries/<date>/<category>.md

[api]
base_url = "http://localhost:5000/api"
timeout_ms = 0        # 0 = wait indefinitely

[dashboard]
default_mode = "local"  # local | remote | manage
days_to_keep = 30
show_analysis = false

[logging]
enabled = true
path = "~/.sumview/activity.jsonl"

[web]
addr = "127.0.0.1:8501"
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
