//! CLI command implementations for sumview.
//!
//! Provides subcommand handlers for:
//! - `sumview local` / `remote` / `manage`: render one dashboard view
//! - `sumview analyze`: category and daily aggregates of the local tree
//! - `sumview index`: remote or local storage index
//! - `sumview dash`: interactive terminal dashboard
//! - `sumview activity`: recent activity log records
//! - `sumview config show|init|set|reset`: configuration management

pub mod dashboard;

use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use crate::activity::ActivityEntry;
use crate::analytics::reporter;
use crate::app::{App, Event, ViewMode};
use crate::config::{self, SumviewConfig};
use crate::page::Page;
use crate::render;
use crate::storage;
use crate::views::{analysis, remote};

/// Output format for view and analytics commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            _ => Self::Table,
        }
    }
}

/// Maintenance action requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManageAction {
    Export,
    Cleanup { days: u32 },
}

fn print_page(page: &Page, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(page)?),
        OutputFormat::Table => print!("{}", render::to_terminal(page)),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// sumview local | remote | manage
// ---------------------------------------------------------------------------

/// Render the Local View once.
pub fn run_local(app: &mut App, date: Option<String>, format: OutputFormat) -> Result<()> {
    app.handle(Event::SelectMode(ViewMode::Local));
    if let Some(date) = date {
        app.handle(Event::SelectDate(date));
    }
    print_page(&app.render_view()?, format)
}

/// Render the Remote View once, optionally for a single category.
pub fn run_remote(
    app: &mut App,
    date: Option<String>,
    category: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    app.handle(Event::SelectMode(ViewMode::Remote));
    let page = remote::render(app.client(), date.as_deref(), category.as_deref());
    print_page(&page, format)
}

/// Run an optional maintenance action, then render the Management View.
pub fn run_manage(app: &mut App, action: Option<ManageAction>, format: OutputFormat) -> Result<()> {
    app.handle(Event::SelectMode(ViewMode::Manage));
    match action {
        Some(ManageAction::Export) => app.handle(Event::Export),
        Some(ManageAction::Cleanup { days }) => {
            app.handle(Event::SetDaysToKeep(days));
            app.handle(Event::Cleanup);
        }
        None => {}
    }
    print_page(&app.render_view()?, format)
}

// ---------------------------------------------------------------------------
// sumview analyze
// ---------------------------------------------------------------------------

/// Show the analysis panel plus per-category word statistics.
pub fn run_analyze(app: &App, format: OutputFormat) -> Result<()> {
    let tree = app.load_tree()?;

    if format == OutputFormat::Json {
        let rows = reporter::summary_rows(&tree);
        let value = json!({
            "rows": rows,
            "category_counts": reporter::category_counts(&rows)
                .into_iter()
                .map(|(category, count)| json!({ "category": category, "count": count }))
                .collect::<Vec<_>>(),
            "daily_counts": reporter::daily_counts(&rows)
                .into_iter()
                .map(|(date, count)| json!({ "date": date, "count": count }))
                .collect::<Vec<_>>(),
            "category_stats": reporter::category_stats(&rows),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print!("{}", render::to_terminal(&analysis::render(&tree)));
    if tree.is_empty() {
        return Ok(());
    }

    let stats = reporter::category_stats(&reporter::summary_rows(&tree));
    println!("\n{}", "Words per Category".bold().cyan());
    println!(
        "  {:<24} {:>9} {:>11} {:>10} {:>10}",
        "Category", "Summaries", "Total words", "Avg words", "Avg chars"
    );
    println!("  {}", "-".repeat(68));
    for (i, stat) in stats.iter().enumerate() {
        let line = format!(
            "  {:<24} {:>9} {:>11} {:>10.1} {:>10.1}",
            truncate(&stat.category, 24),
            stat.summaries,
            format_number(stat.total_words),
            stat.avg_words,
            stat.avg_length,
        );
        if i % 2 == 0 {
            println!("{line}");
        } else {
            println!("{}", line.dimmed());
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// sumview index
// ---------------------------------------------------------------------------

/// Print the remote storage index, or the index of the local tree.
pub fn run_index(app: &App, local: bool, format: OutputFormat) -> Result<()> {
    let value = if local {
        let tree = app.load_tree()?;
        serde_json::to_value(storage::build_local_index(&tree))?
    } else {
        match app.client().storage_index() {
            Ok(value) => value,
            Err(e) => {
                println!("{}", format!("✖ API request failed: {e}").red());
                return Ok(());
            }
        }
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&value)?),
        OutputFormat::Table => {
            let title = if local { "Local Storage Index" } else { "Storage Index" };
            println!("{}", title.bold().cyan());
            println!("{}", "=".repeat(50));
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// sumview activity
// ---------------------------------------------------------------------------

/// Show the most recent activity log records.
pub fn run_activity(app: &App, limit: usize, format: OutputFormat) -> Result<()> {
    let Some(path) = app.activity().path() else {
        println!("{}", "Activity logging is disabled.".yellow());
        return Ok(());
    };

    let entries = app.activity().read_recent(limit);
    if entries.is_empty() {
        println!(
            "{}",
            format!("No activity recorded yet in {}.", path.display()).yellow()
        );
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Table => print_activity_table(&entries),
    }
    Ok(())
}

fn print_activity_table(entries: &[ActivityEntry]) {
    println!("{}", "Recent Activity".bold().cyan());
    println!("{}", "=".repeat(60));
    println!("  {:<20} {:<8} {:<3} Detail", "Time", "Kind", "OK");
    println!("  {}", "-".repeat(58));

    for entry in entries {
        let time = entry.timestamp.get(..19).unwrap_or(&entry.timestamp).replace('T', " ");
        let ok = if entry.success {
            "✓".green()
        } else {
            "✗".red()
        };
        println!(
            "  {:<20} {:<8} {:<3} {}",
            time,
            truncate(&entry.kind, 8),
            ok,
            entry.detail
        );
    }
}

// ---------------------------------------------------------------------------
// sumview config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show(config: &SumviewConfig) -> Result<()> {
    let toml_str = config::show_effective_config(config)?;
    println!("{}", "Effective sumview Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source("~/.sumview/config.toml", global_exists);
    print_source(".sumview.toml", project_exists);
    println!(
        "  {} {}",
        "·".dimmed(),
        "SUMVIEW_* environment variables".dimmed()
    );

    Ok(())
}

fn print_source(name: &str, exists: bool) {
    if exists {
        println!("  {} {}", "✓".green(), name.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{name} (not found)").dimmed());
    }
}

/// Initialize a default config file at `~/.sumview/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Format a number with comma separators for readability.
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Truncate a string to `max_len` characters, appending "…" if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("market", 10), "market");
        assert_eq!(truncate("hello world", 5), "hell…");
        assert_eq!(truncate("科技股分析", 3), "科技…");
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str_opt(Some("json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str_opt(Some("table")), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str_opt(Some("csv")), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str_opt(None), OutputFormat::Table);
    }
}
