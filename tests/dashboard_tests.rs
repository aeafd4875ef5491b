/// End-to-end tests over a real storage tree on disk.
///
/// Covers the loader, the Local View, the analysis panel, and the router.
/// The API base URL points at a closed port so remote-backed views exercise
/// their failure path without a server.
use std::fs;
use std::path::Path;

use sumview::activity::ActivityLog;
use sumview::analytics::reporter;
use sumview::app::{App, AppState, Event, ViewMode};
use sumview::config::SumviewConfig;
use sumview::config::schema::ApiConfig;
use sumview::page::{Level, Widget};
use sumview::remote::ApiClient;
use sumview::storage;
use sumview::views::local::{self, METRIC_LATEST_DATE, METRIC_TOTAL_DAYS, METRIC_TOTAL_SUMMARIES};
use sumview::views::analysis;

fn write_summary(root: &Path, date: &str, file: &str, content: &str) {
    let dir = root.join(date);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(file), content).unwrap();
}

fn app(root: &Path) -> App {
    let client = ApiClient::from_config(
        &ApiConfig {
            base_url: "http://127.0.0.1:9/api".into(),
            timeout_ms: 500,
        },
        ActivityLog::disabled(),
    );
    App::with_parts(
        root.to_path_buf(),
        client,
        ActivityLog::disabled(),
        AppState::from_config(&SumviewConfig::default()),
    )
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

#[test]
fn loader_maps_files_to_categories() {
    let dir = tempfile::tempdir().unwrap();
    write_summary(dir.path(), "2024-01-02", "monthly_report.md", "# Report");
    write_summary(dir.path(), "2024-01-02", "notes.txt", "ignored");
    fs::write(dir.path().join("README.md"), "not a date folder").unwrap();

    let tree = storage::load_local_summaries(dir.path()).unwrap();
    assert_eq!(tree.len(), 1);
    let day = &tree["2024-01-02"];
    assert_eq!(day.len(), 1);
    assert_eq!(day["monthly report"], "# Report");
}

#[test]
fn loader_rejects_non_utf8_summary() {
    let dir = tempfile::tempdir().unwrap();
    let day = dir.path().join("2024-01-02");
    fs::create_dir_all(&day).unwrap();
    fs::write(day.join("market.md"), [0xff, 0xfe, 0x00]).unwrap();

    assert!(storage::load_local_summaries(dir.path()).is_err());
}

// ---------------------------------------------------------------------------
// Local View
// ---------------------------------------------------------------------------

#[test]
fn local_metrics_cover_whole_tree() {
    let dir = tempfile::tempdir().unwrap();
    write_summary(dir.path(), "2024-01-01", "market.md", "Flat");
    write_summary(dir.path(), "2024-01-02", "market.md", "Rally");

    let tree = storage::load_local_summaries(dir.path()).unwrap();
    let page = local::render(&tree, None);

    assert_eq!(page.metric(METRIC_TOTAL_DAYS), Some("2"));
    assert_eq!(page.metric(METRIC_TOTAL_SUMMARIES), Some("2"));
    assert_eq!(page.metric(METRIC_LATEST_DATE), Some("2024-01-02"));

    let (options, selected) = page.select().unwrap();
    assert_eq!(options, ["2024-01-02".to_string(), "2024-01-01".to_string()]);
    assert_eq!(selected, Some("2024-01-02"));
}

#[test]
fn local_view_shows_tabs_for_selected_date() {
    let dir = tempfile::tempdir().unwrap();
    write_summary(dir.path(), "2024-01-01", "market.md", "Flat");
    write_summary(dir.path(), "2024-01-01", "tech_stocks.md", "Chips");
    write_summary(dir.path(), "2024-01-02", "market.md", "Rally");

    let tree = storage::load_local_summaries(dir.path()).unwrap();
    let page = local::render(&tree, Some("2024-01-01"));

    let tabs = page
        .widgets
        .iter()
        .find_map(|w| match w {
            Widget::Tabs { tabs } => Some(tabs),
            _ => None,
        })
        .unwrap();
    let labels: Vec<&str> = tabs.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, ["market", "tech stocks"]);
    assert_eq!(tabs[1].markdown, "Chips");
}

#[test]
fn local_view_date_without_summaries_shows_info() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("2024-01-03")).unwrap();

    let tree = storage::load_local_summaries(dir.path()).unwrap();
    let page = local::render(&tree, None);

    assert_eq!(page.notices(Level::Info).len(), 1);
    assert_eq!(page.metric(METRIC_TOTAL_DAYS), Some("1"));
    assert_eq!(page.metric(METRIC_TOTAL_SUMMARIES), Some("0"));
}

#[test]
fn local_view_empty_root_warns_without_selector() {
    let dir = tempfile::tempdir().unwrap();
    let tree = storage::load_local_summaries(&dir.path().join("missing")).unwrap();
    let page = local::render(&tree, None);

    assert_eq!(page.notices(Level::Warning).len(), 1);
    assert!(!page.has_select());
    assert_eq!(page.metric(METRIC_TOTAL_DAYS), None);
}

#[test]
fn unknown_requested_date_falls_back_to_latest() {
    let dir = tempfile::tempdir().unwrap();
    write_summary(dir.path(), "2024-01-02", "market.md", "Rally");

    let tree = storage::load_local_summaries(dir.path()).unwrap();
    let page = local::render(&tree, Some("1999-12-31"));
    assert_eq!(page.select().unwrap().1, Some("2024-01-02"));
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

#[test]
fn analysis_charts_count_categories_and_days() {
    let dir = tempfile::tempdir().unwrap();
    write_summary(dir.path(), "2024-01-01", "market.md", "a b");
    write_summary(dir.path(), "2024-01-02", "market.md", "c");
    write_summary(dir.path(), "2024-01-02", "tech.md", "d e f");

    let tree = storage::load_local_summaries(dir.path()).unwrap();
    let rows = reporter::summary_rows(&tree);
    assert_eq!(
        reporter::category_counts(&rows),
        vec![("market".to_string(), 2), ("tech".to_string(), 1)]
    );
    assert_eq!(
        reporter::daily_counts(&rows),
        vec![("2024-01-01".to_string(), 1), ("2024-01-02".to_string(), 2)]
    );

    let page = analysis::render(&tree);
    assert!(
        page.widgets
            .iter()
            .any(|w| matches!(w, Widget::BarChart { points, .. } if points.len() == 2))
    );
    assert!(
        page.widgets
            .iter()
            .any(|w| matches!(w, Widget::LineChart { points, .. } if points.len() == 2))
    );
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

#[test]
fn router_renders_only_the_selected_view() {
    let dir = tempfile::tempdir().unwrap();
    write_summary(dir.path(), "2024-01-02", "market.md", "Rally");
    let mut app = app(dir.path());

    let local_page = app.render_view().unwrap();
    assert!(local_page.metric(METRIC_TOTAL_DAYS).is_some());

    app.handle(Event::SelectMode(ViewMode::Remote));
    let remote_page = app.render_view().unwrap();
    assert!(remote_page.metric(METRIC_TOTAL_DAYS).is_none());
    assert!(!remote_page.notices(Level::Error).is_empty());

    app.handle(Event::SelectMode(ViewMode::Manage));
    let manage_page = app.render_view().unwrap();
    assert!(
        manage_page
            .widgets
            .iter()
            .any(|w| matches!(w, Widget::NumberInput { value: 30, .. }))
    );
}

#[test]
fn failed_action_is_reported_and_cleared_on_mode_switch() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(dir.path());
    app.handle(Event::SelectMode(ViewMode::Manage));
    app.handle(Event::Export);

    let page = app.render_view().unwrap();
    assert!(
        page.notices(Level::Error)
            .iter()
            .any(|e| e.starts_with("Export request failed"))
    );

    app.handle(Event::SelectMode(ViewMode::Local));
    assert!(app.state.last_action.is_none());
}

#[test]
fn full_dashboard_has_title_and_footer() {
    let dir = tempfile::tempdir().unwrap();
    let page = app(dir.path()).render().unwrap();

    assert!(matches!(page.widgets.first(), Some(Widget::Title { .. })));
    assert!(page.widgets.iter().any(|w| matches!(w, Widget::Divider)));
    assert!(matches!(page.widgets.last(), Some(Widget::Markdown { .. })));
}
