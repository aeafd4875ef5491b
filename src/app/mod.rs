//! Application state, events, and the view router.
//!
//! [`AppState`] holds every widget value a session needs (selected mode,
//! selected dates, analysis checkbox, retention input, last action outcome).
//! Surfaces translate user input into [`Event`]s, apply them with
//! [`App::handle`], and call [`App::render`] for a fresh [`Page`]. Rendering
//! reloads local data and re-queries the API every time.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::activity::ActivityLog;
use crate::config::{self, SumviewConfig};
use crate::page::Page;
use crate::remote::ApiClient;
use crate::storage::{self, SummaryTree};
use crate::views::manage::{self, ActionOutcome, MIN_DAYS_TO_KEEP};
use crate::views::{analysis, local, remote};

// ---------------------------------------------------------------------------
// View mode
// ---------------------------------------------------------------------------

/// The three mutually exclusive dashboard views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    /// Summaries read from the local storage tree.
    #[default]
    Local,
    /// Summaries fetched from the platform API.
    Remote,
    /// Export, cleanup, and the storage index.
    Manage,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Local, ViewMode::Remote, ViewMode::Manage];

    /// Human-facing label for selectors.
    pub fn label(self) -> &'static str {
        match self {
            Self::Local => "Local files",
            Self::Remote => "API",
            Self::Manage => "Storage management",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Remote => write!(f, "remote"),
            Self::Manage => write!(f, "manage"),
        }
    }
}

impl FromStr for ViewMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "remote" | "api" => Ok(Self::Remote),
            "manage" | "storage" => Ok(Self::Manage),
            other => anyhow::bail!("unknown view mode '{other}' (expected local, remote, manage)"),
        }
    }
}

// ---------------------------------------------------------------------------
// State and events
// ---------------------------------------------------------------------------

/// Widget values for one dashboard session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppState {
    pub mode: ViewMode,
    pub local_date: Option<String>,
    pub remote_date: Option<String>,
    pub show_analysis: bool,
    pub days_to_keep: u32,
    pub last_action: Option<ActionOutcome>,
}

impl AppState {
    pub fn from_config(config: &SumviewConfig) -> Self {
        Self {
            mode: config.dashboard.default_mode,
            local_date: None,
            remote_date: None,
            show_analysis: config.dashboard.show_analysis,
            days_to_keep: config.dashboard.days_to_keep.max(MIN_DAYS_TO_KEEP),
            last_action: None,
        }
    }
}

/// A discrete user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SelectMode(ViewMode),
    /// Select a date in the current view's date selector.
    SelectDate(String),
    ShowAnalysis(bool),
    SetDaysToKeep(u32),
    Export,
    Cleanup,
    /// Re-render without changing anything.
    Refresh,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// A dashboard session: configuration-derived components plus state.
#[derive(Debug, Clone)]
pub struct App {
    summaries_root: PathBuf,
    client: ApiClient,
    activity: ActivityLog,
    pub state: AppState,
}

impl App {
    /// Build a session from the resolved config.
    pub fn new(config: &SumviewConfig) -> Self {
        let activity = ActivityLog::from_config(&config.logging);
        let client = ApiClient::from_config(&config.api, activity.clone());
        let storage_root = config::expand_home(&config.storage.root);

        Self::with_parts(
            storage::summaries_dir(&storage_root),
            client,
            activity,
            AppState::from_config(config),
        )
    }

    /// Build a session from explicit components.
    pub fn with_parts(
        summaries_root: PathBuf,
        client: ApiClient,
        activity: ActivityLog,
        state: AppState,
    ) -> Self {
        Self {
            summaries_root,
            client,
            activity,
            state,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    /// Reload the local tree from disk.
    pub fn load_tree(&self) -> Result<SummaryTree> {
        storage::load_local_summaries(&self.summaries_root)
            .context("failed to load local summaries")
    }

    /// Apply one event to the state.
    ///
    /// Maintenance actions call the API here and store their outcome; every
    /// other event only changes widget values.
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::SelectMode(mode) => {
                if mode != self.state.mode {
                    self.state.last_action = None;
                }
                self.state.mode = mode;
            }
            Event::SelectDate(date) => match self.state.mode {
                ViewMode::Local => self.state.local_date = Some(date),
                ViewMode::Remote => self.state.remote_date = Some(date),
                ViewMode::Manage => {}
            },
            Event::ShowAnalysis(show) => self.state.show_analysis = show,
            Event::SetDaysToKeep(days) => self.state.days_to_keep = days.max(MIN_DAYS_TO_KEEP),
            Event::Export => {
                self.state.last_action = Some(manage::run_export(&self.client));
            }
            Event::Cleanup => {
                self.state.last_action =
                    Some(manage::run_cleanup(&self.client, self.state.days_to_keep));
            }
            Event::Refresh => {}
        }
    }

    /// Render only the view the router selects.
    ///
    /// Local filesystem failures abort the pass with `Err`; API failures are
    /// already reported inside the page.
    pub fn render_view(&self) -> Result<Page> {
        let page = match self.state.mode {
            ViewMode::Local => {
                let tree = self.load_tree()?;
                local::render(&tree, self.state.local_date.as_deref())
            }
            ViewMode::Remote => {
                remote::render(&self.client, self.state.remote_date.as_deref(), None)
            }
            ViewMode::Manage => manage::render(
                &self.client,
                self.state.days_to_keep,
                self.state.last_action.as_ref(),
            ),
        };
        Ok(page)
    }

    /// Render the full dashboard: title, routed view, optional analysis
    /// panel, footer.
    pub fn render(&self) -> Result<Page> {
        let mut page = Page::new();
        page.title("📊 Investment research dashboard");
        page.markdown("### Explore the platform's daily AI summaries");

        page.extend(self.render_view()?);

        if self.state.show_analysis {
            let tree = self.load_tree()?;
            page.extend(analysis::render(&tree));
        }

        page.push(crate::page::Widget::Divider);
        page.markdown(
            "💡 **Usage**: browse the daily summaries produced by the research platform, \
             from local files or through its API.",
        );
        page.markdown(
            "🔧 **Support**: make sure the research platform is running and has generated \
             some summaries.",
        );

        Ok(page)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ApiConfig;

    fn app(root: PathBuf) -> App {
        let client = ApiClient::from_config(
            &ApiConfig {
                base_url: "http://127.0.0.1:9/api".into(),
                timeout_ms: 200,
            },
            ActivityLog::disabled(),
        );
        App::with_parts(
            root,
            client,
            ActivityLog::disabled(),
            AppState::from_config(&SumviewConfig::default()),
        )
    }

    #[test]
    fn view_mode_parses_labels_and_aliases() {
        assert_eq!("local".parse::<ViewMode>().unwrap(), ViewMode::Local);
        assert_eq!("API".parse::<ViewMode>().unwrap(), ViewMode::Remote);
        assert_eq!(" storage ".parse::<ViewMode>().unwrap(), ViewMode::Manage);
        assert!("charts".parse::<ViewMode>().is_err());
    }

    #[test]
    fn view_mode_display_round_trips() {
        for mode in ViewMode::ALL {
            assert_eq!(mode.to_string().parse::<ViewMode>().unwrap(), mode);
        }
    }

    #[test]
    fn state_starts_from_config() {
        let mut config = SumviewConfig::default();
        config.dashboard.default_mode = ViewMode::Manage;
        config.dashboard.days_to_keep = 0;
        config.dashboard.show_analysis = true;

        let state = AppState::from_config(&config);
        assert_eq!(state.mode, ViewMode::Manage);
        assert_eq!(state.days_to_keep, 1);
        assert!(state.show_analysis);
    }

    #[test]
    fn date_selection_is_tracked_per_view() {
        let mut app = app(PathBuf::from("/nonexistent"));
        app.handle(Event::SelectDate("2024-01-01".into()));
        app.handle(Event::SelectMode(ViewMode::Remote));
        app.handle(Event::SelectDate("2024-02-02".into()));

        assert_eq!(app.state.local_date.as_deref(), Some("2024-01-01"));
        assert_eq!(app.state.remote_date.as_deref(), Some("2024-02-02"));
    }

    #[test]
    fn days_to_keep_is_clamped() {
        let mut app = app(PathBuf::from("/nonexistent"));
        app.handle(Event::SetDaysToKeep(0));
        assert_eq!(app.state.days_to_keep, 1);
        app.handle(Event::SetDaysToKeep(14));
        assert_eq!(app.state.days_to_keep, 14);
    }

    #[test]
    fn local_mode_with_missing_root_renders_warning() {
        let app = app(PathBuf::from("/nonexistent/summaries"));
        let page = app.render_view().unwrap();
        assert_eq!(page.notices(crate::page::Level::Warning).len(), 1);
        assert!(!page.has_select());
    }

    #[test]
    fn analysis_panel_follows_checkbox() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path().to_path_buf());

        let without = app.render().unwrap();
        app.handle(Event::ShowAnalysis(true));
        let with = app.render().unwrap();

        let warnings = |p: &Page| p.notices(crate::page::Level::Warning).len();
        assert_eq!(warnings(&without), 1);
        assert_eq!(warnings(&with), 2);
    }
}
