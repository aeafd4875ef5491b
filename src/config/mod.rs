/// Configuration system for sumview.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults**: hardcoded in [`schema::SumviewConfig::default()`]
/// 2. **User global config**: `~/.sumview/config.toml`
/// 3. **Project local config**: `.sumview.toml` in the current working directory
/// 4. **Environment variables**: `SUMVIEW_*` overrides (highest precedence)
///
/// Later layers override earlier ones at the key level. The resolved value is
/// built once in `main` and handed to each component by reference; nothing
/// reads configuration from a global.
///
/// # Usage
///
/// ```rust,ignore
/// use sumview::config;
///
/// let cfg = config::load();
/// let client = ApiClient::from_config(&cfg.api, ActivityLog::from_config(&cfg.logging));
/// ```
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use schema::SumviewConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved sumview configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML → env
/// vars.
pub fn load() -> SumviewConfig {
    let layers = [global_config_path(), project_config_path()];
    let mut config = load_layers(layers.iter().flatten().map(PathBuf::as_path));
    apply_env_overrides(&mut config);
    config
}

/// Merge the TOML files at `paths` (in order) over the built-in defaults.
///
/// Missing or malformed files are skipped so a broken config never blocks the
/// dashboard from starting. A file holding a value of the wrong type is
/// skipped as a whole; earlier layers keep their settings.
pub fn load_layers<'a>(paths: impl IntoIterator<Item = &'a Path>) -> SumviewConfig {
    let Ok(mut merged) = toml::Value::try_from(SumviewConfig::default()) else {
        return SumviewConfig::default();
    };

    for path in paths {
        let Some(layer) = load_toml_value(path) else {
            continue;
        };
        let mut candidate = merged.clone();
        merge_tables(&mut candidate, layer);
        if candidate.clone().try_into::<SumviewConfig>().is_ok() {
            merged = candidate;
        }
    }

    merged.try_into().unwrap_or_default()
}

/// Read a TOML file as a raw value tree, if it exists and parses.
fn load_toml_value(path: &Path) -> Option<toml::Value> {
    let content = fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Recursively overlay `overlay` onto `base`.
///
/// Tables merge key by key; any other value in the overlay replaces the base
/// value outright.
fn merge_tables(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_tables(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.sumview/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".sumview").join("config.toml"))
}

/// Path to the project local config: `.sumview.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".sumview.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `SUMVIEW_STORAGE_ROOT`: local storage root
/// - `SUMVIEW_API_URL`: API base URL
/// - `SUMVIEW_API_TIMEOUT_MS`: request timeout (`0` = none)
/// - `SUMVIEW_LOGGING`: activity log switch (`1`/`true`/`yes`/`on`)
/// - `SUMVIEW_WEB_ADDR`: web dashboard listen address
fn apply_env_overrides(config: &mut SumviewConfig) {
    if let Ok(val) = std::env::var("SUMVIEW_STORAGE_ROOT")
        && !val.is_empty()
    {
        config.storage.root = val;
    }
    if let Ok(val) = std::env::var("SUMVIEW_API_URL")
        && !val.is_empty()
    {
        config.api.base_url = val;
    }
    if let Ok(val) = std::env::var("SUMVIEW_API_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.api.timeout_ms = ms;
    }
    if let Ok(val) = std::env::var("SUMVIEW_LOGGING") {
        config.logging.enabled = is_truthy(&val);
    }
    if let Ok(val) = std::env::var("SUMVIEW_WEB_ADDR")
        && !val.is_empty()
    {
        config.web.addr = val;
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.sumview/config.toml`.
///
/// Creates the `~/.sumview/` directory if it doesn't exist. Returns an error
/// if the file already exists (use `force = true` to overwrite).
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.sumview/ directory")?;
    }

    fs::write(&path, SumviewConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set a single config key to a value in the global config file.
///
/// Starts from the existing file (or serialized defaults when there is none),
/// updates the dotted key such as `api.base_url`, and writes the result back.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let content = if path.exists() {
        fs::read_to_string(&path).context("failed to read config file")?
    } else {
        toml::to_string_pretty(&SumviewConfig::default())
            .context("failed to serialize default config")?
    };

    let mut root: toml::Value =
        toml::from_str(&content).context("failed to parse config as TOML value")?;
    set_toml_value(&mut root, key, value)?;

    // Reject values that would no longer deserialize into the schema.
    let _: SumviewConfig = root
        .clone()
        .try_into()
        .with_context(|| format!("invalid value for '{key}': {value}"))?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, output).context("failed to write config file")?;

    Ok(())
}

/// Set a value in a TOML value tree using a dotted key path.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        anyhow::bail!("malformed config key: '{key}'");
    }

    // Navigate to the parent table
    let mut current = root;
    for &part in &parts[..parts.len() - 1] {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let leaf = parts[parts.len() - 1];
    let table = current
        .as_table_mut()
        .with_context(|| format!("expected table above '{key}'"))?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::String(_)) => toml::Value::String(raw_value.to_string()),
        Some(_) => anyhow::bail!("config key '{key}' is not a scalar"),
        None => anyhow::bail!("unknown config key: '{key}'"),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config(config: &SumviewConfig) -> Result<String> {
    toml::to_string_pretty(config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ViewMode;

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn load_layers_without_files_returns_defaults() {
        let config = load_layers(std::iter::empty());
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.storage.root, "./storage");
    }

    #[test]
    fn later_layer_overrides_only_keys_it_sets() {
        let dir = tempfile::tempdir().unwrap();
        let global = write(
            dir.path(),
            "global.toml",
            "[api]\nbase_url = \"http://global:5000/api\"\ntimeout_ms = 2500\n",
        );
        let project = write(
            dir.path(),
            "project.toml",
            "[api]\nbase_url = \"http://project:5000/api\"\n[storage]\nroot = \"/srv/research\"\n",
        );

        let config = load_layers([global.as_path(), project.as_path()]);
        assert_eq!(config.api.base_url, "http://project:5000/api");
        assert_eq!(config.api.timeout_ms, 2500);
        assert_eq!(config.storage.root, "/srv/research");
        assert_eq!(config.dashboard.default_mode, ViewMode::Local);
    }

    #[test]
    fn mistyped_layer_is_skipped_without_losing_earlier_layers() {
        let dir = tempfile::tempdir().unwrap();
        let global = write(
            dir.path(),
            "global.toml",
            "[api]\nbase_url = \"http://global:5000/api\"\n",
        );
        let project = write(
            dir.path(),
            "project.toml",
            "[dashboard]\ndays_to_keep = \"thirty\"\nshow_analysis = true\n",
        );

        let config = load_layers([global.as_path(), project.as_path()]);
        assert_eq!(config.api.base_url, "http://global:5000/api");
        assert_eq!(config.dashboard.days_to_keep, 30);
        assert!(!config.dashboard.show_analysis);
    }

    #[test]
    fn malformed_layer_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let broken = write(dir.path(), "broken.toml", "[api\nbase_url = ");
        let good = write(dir.path(), "good.toml", "[web]\naddr = \"0.0.0.0:9000\"\n");

        let config = load_layers([broken.as_path(), good.as_path()]);
        assert_eq!(config.web.addr, "0.0.0.0:9000");
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
    }

    #[test]
    fn missing_layer_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let config = load_layers([missing.as_path()]);
        assert_eq!(config.dashboard.days_to_keep, 30);
    }

    #[test]
    fn is_truthy_accepts_variants() {
        assert!(is_truthy("1"));
        assert!(is_truthy("TRUE"));
        assert!(is_truthy("yes"));
        assert!(is_truthy("On"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("off"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn expand_home_leaves_plain_paths() {
        assert_eq!(expand_home("./storage"), PathBuf::from("./storage"));
        assert_eq!(expand_home("/var/log/x"), PathBuf::from("/var/log/x"));
    }

    #[test]
    fn set_toml_value_updates_string() {
        let mut root: toml::Value =
            toml::from_str("[api]\nbase_url = \"http://a/api\"\n").unwrap();
        set_toml_value(&mut root, "api.base_url", "http://b/api").unwrap();
        assert_eq!(root["api"]["base_url"].as_str(), Some("http://b/api"));
    }

    #[test]
    fn set_toml_value_updates_integer_and_bool() {
        let mut root: toml::Value =
            toml::from_str("[api]\ntimeout_ms = 0\n[logging]\nenabled = true\n").unwrap();
        set_toml_value(&mut root, "api.timeout_ms", "1500").unwrap();
        set_toml_value(&mut root, "logging.enabled", "off").unwrap();
        assert_eq!(root["api"]["timeout_ms"].as_integer(), Some(1500));
        assert_eq!(root["logging"]["enabled"].as_bool(), Some(false));
    }

    #[test]
    fn set_toml_value_rejects_bad_input() {
        let mut root: toml::Value = toml::from_str("[api]\ntimeout_ms = 0\n").unwrap();
        assert!(set_toml_value(&mut root, "api.timeout_ms", "soon").is_err());
        assert!(set_toml_value(&mut root, "api.unknown", "x").is_err());
        assert!(set_toml_value(&mut root, "nonexistent.key", "x").is_err());
        assert!(set_toml_value(&mut root, "api.", "x").is_err());
    }

    #[test]
    fn show_effective_config_round_trips() {
        let toml_str = show_effective_config(&SumviewConfig::default()).unwrap();
        let parsed: SumviewConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.web.addr, "127.0.0.1:8501");
    }
}
