/// Configuration layering tests.
///
/// File layers are exercised through `load_layers` with temp files. All
/// environment-variable checks live in a single test because the process
/// environment is shared between test threads.
use std::fs;

use sumview::app::{App, ViewMode};
use sumview::config::{self, SumviewConfig};

#[test]
fn later_layers_override_earlier_ones() {
    let dir = tempfile::tempdir().unwrap();
    let global = dir.path().join("global.toml");
    let project = dir.path().join("project.toml");
    fs::write(
        &global,
        "[api]\nbase_url = \"http://research:5000/api\"\n\n[dashboard]\ndays_to_keep = 10\n",
    )
    .unwrap();
    fs::write(&project, "[dashboard]\ndays_to_keep = 3\ndefault_mode = \"remote\"\n").unwrap();

    let cfg = config::load_layers([global.as_path(), project.as_path()]);
    assert_eq!(cfg.api.base_url, "http://research:5000/api");
    assert_eq!(cfg.dashboard.days_to_keep, 3);
    assert_eq!(cfg.dashboard.default_mode, ViewMode::Remote);
    // untouched keys keep their defaults
    assert_eq!(cfg.storage.root, SumviewConfig::default().storage.root);
    assert_eq!(cfg.api.timeout_ms, 0);
}

#[test]
fn malformed_and_missing_layers_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.toml");
    let missing = dir.path().join("missing.toml");
    fs::write(&broken, "[api\nbase_url = ").unwrap();

    let cfg = config::load_layers([broken.as_path(), missing.as_path()]);
    assert_eq!(cfg, SumviewConfig::default());
}

#[test]
fn app_session_starts_from_config() {
    let mut cfg = SumviewConfig::default();
    cfg.dashboard.default_mode = ViewMode::Manage;
    cfg.dashboard.show_analysis = true;
    cfg.logging.enabled = false;

    let app = App::new(&cfg);
    assert_eq!(app.state.mode, ViewMode::Manage);
    assert!(app.state.show_analysis);
    assert!(app.activity().path().is_none());
    assert_eq!(app.client().base_url(), "http://localhost:5000/api");
}

#[test]
fn environment_overrides_win() {
    // SAFETY: this is the only test in the binary that touches SUMVIEW_* vars.
    unsafe {
        std::env::set_var("SUMVIEW_STORAGE_ROOT", "/srv/research/storage");
        std::env::set_var("SUMVIEW_API_URL", "http://api.internal:5000/api");
        std::env::set_var("SUMVIEW_API_TIMEOUT_MS", "2500");
        std::env::set_var("SUMVIEW_LOGGING", "off");
        std::env::set_var("SUMVIEW_WEB_ADDR", "0.0.0.0:9000");
    }

    let cfg = config::load();

    unsafe {
        for key in [
            "SUMVIEW_STORAGE_ROOT",
            "SUMVIEW_API_URL",
            "SUMVIEW_API_TIMEOUT_MS",
            "SUMVIEW_LOGGING",
            "SUMVIEW_WEB_ADDR",
        ] {
            std::env::remove_var(key);
        }
    }

    assert_eq!(cfg.storage.root, "/srv/research/storage");
    assert_eq!(cfg.api.base_url, "http://api.internal:5000/api");
    assert_eq!(cfg.api.timeout_ms, 2500);
    assert!(!cfg.logging.enabled);
    assert_eq!(cfg.web.addr, "0.0.0.0:9000");
}
