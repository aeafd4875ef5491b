use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::config::schema::LoggingConfig;

// ---------------------------------------------------------------------------
// Activity log entry (JSONL)
// ---------------------------------------------------------------------------

/// A single record in the activity log (`~/.sumview/activity.jsonl`).
///
/// Records remote failures, maintenance actions, and web requests so that
/// `sumview activity` can show what happened in earlier sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: String,
    /// Event kind, e.g. `"fetch"`, `"export"`, `"cleanup"`, `"web"`.
    pub kind: String,
    pub detail: String,
    #[serde(default = "default_true")]
    pub success: bool,
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Append-only activity log.
///
/// Writes are best-effort: an unwritable log never fails a render pass.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    path: Option<PathBuf>,
}

impl ActivityLog {
    /// Build the log from the resolved `[logging]` section.
    pub fn from_config(config: &LoggingConfig) -> Self {
        if !config.enabled {
            return Self::disabled();
        }
        Self {
            path: Some(config::expand_home(&config.path)),
        }
    }

    /// A log that drops every record.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    /// A log writing to an explicit file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Record a successful event.
    pub fn record(&self, kind: &str, detail: &str) {
        self.write(kind, detail, true);
    }

    /// Record a failed event.
    pub fn record_failure(&self, kind: &str, detail: &str) {
        self.write(kind, detail, false);
    }

    fn write(&self, kind: &str, detail: &str, success: bool) {
        let Some(path) = &self.path else {
            return;
        };

        let entry = ActivityEntry {
            timestamp: Utc::now().to_rfc3339(),
            kind: kind.to_string(),
            detail: detail.replace(['\r', '\n'], " "),
            success,
        };

        let _ = append_entry(path, &entry);
    }

    /// Read the most recent `limit` records, oldest first.
    ///
    /// Silently skips malformed lines. Returns an empty vec if logging is
    /// disabled or the file does not exist.
    pub fn read_recent(&self, limit: usize) -> Vec<ActivityEntry> {
        let Some(path) = &self.path else {
            return Vec::new();
        };

        let Ok(file) = fs::File::open(path) else {
            return Vec::new();
        };

        let entries: Vec<ActivityEntry> = BufReader::new(file)
            .lines()
            .map_while(Result::ok)
            .filter_map(|line| serde_json::from_str::<ActivityEntry>(&line).ok())
            .collect();

        let skip = entries.len().saturating_sub(limit);
        entries.into_iter().skip(skip).collect()
    }
}

fn append_entry(path: &Path, entry: &ActivityEntry) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(entry)?;
    writeln!(file, "{json}")?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
