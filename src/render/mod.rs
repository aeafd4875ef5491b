//! Terminal presentation of a [`Page`].
//!
//! Produces a plain `String` (styled with `colored`) so callers decide where
//! it goes. Tabs print one after another, expanders print open, and charts
//! become horizontal bar rows.

use std::fmt::Write as _;

use colored::Colorize;

use crate::page::{ButtonAction, ChartPoint, Level, Page, Widget};

/// Widest bar drawn for a chart row.
const BAR_WIDTH: usize = 40;

/// Render a page for the terminal.
pub fn to_terminal(page: &Page) -> String {
    let mut out = String::new();
    for widget in &page.widgets {
        render_widget(&mut out, widget);
    }
    out
}

fn render_widget(out: &mut String, widget: &Widget) {
    match widget {
        Widget::Title { text } => {
            let _ = writeln!(out, "{}", text.bold().cyan());
            let _ = writeln!(out, "{}", "=".repeat(60));
        }
        Widget::Header { text } => {
            let _ = writeln!(out, "\n{}", text.bold().cyan());
        }
        Widget::Subheader { text } => {
            let _ = writeln!(out, "\n{}", text.bold());
        }
        Widget::Markdown { text } => {
            let _ = writeln!(out, "{text}");
        }
        Widget::Notice { level, text } => {
            let line = match level {
                Level::Info => format!("ℹ {text}").blue(),
                Level::Success => format!("✔ {text}").green(),
                Level::Warning => format!("⚠ {text}").yellow(),
                Level::Error => format!("✖ {text}").red(),
            };
            let _ = writeln!(out, "{line}");
        }
        Widget::Select {
            label,
            options,
            selected,
        } => {
            let _ = writeln!(out, "{}", format!("{label}:").bold());
            for option in options {
                if Some(option) == selected.as_ref() {
                    let _ = writeln!(out, "  {} {}", "▸".green(), option.bold());
                } else {
                    let _ = writeln!(out, "    {}", option.dimmed());
                }
            }
        }
        Widget::Tabs { tabs } => {
            let labels: Vec<&str> = tabs.iter().map(|t| t.label.as_str()).collect();
            let _ = writeln!(out, "{}", format!("[ {} ]", labels.join(" | ")).dimmed());
            for tab in tabs {
                let _ = writeln!(out, "\n{}", format!("── {} ──", tab.label).bold().magenta());
                let _ = writeln!(out, "{}", tab.markdown);
            }
        }
        Widget::Expander { label, markdown } => {
            let _ = writeln!(out, "\n{}", format!("▾ {label}").bold().magenta());
            for line in markdown.lines() {
                let _ = writeln!(out, "  {line}");
            }
        }
        Widget::Metrics { metrics } => {
            for metric in metrics {
                let _ = writeln!(
                    out,
                    "  {} {}",
                    format!("{}:", metric.label).bold(),
                    metric.value
                );
            }
        }
        Widget::Json { value } => {
            let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
            let _ = writeln!(out, "{}", text.dimmed());
        }
        Widget::BarChart { title, points } | Widget::LineChart { title, points } => {
            let _ = writeln!(out, "\n{}", title.bold());
            render_bars(out, points);
        }
        Widget::NumberInput { label, min, value } => {
            let _ = writeln!(
                out,
                "  {} {} {}",
                format!("{label}:").bold(),
                value,
                format!("(min {min})").dimmed()
            );
        }
        Widget::Button { label, action } => {
            let command = match action {
                ButtonAction::Export => "export",
                ButtonAction::Cleanup => "cleanup",
            };
            let _ = writeln!(
                out,
                "  [{}] {}",
                label.bold(),
                format!("→ `{command}`").dimmed()
            );
        }
        Widget::Divider => {
            let _ = writeln!(out, "\n{}", "-".repeat(60));
        }
    }
}

fn render_bars(out: &mut String, points: &[ChartPoint]) {
    let Some(max) = points.iter().map(|p| p.value).max() else {
        return;
    };
    let label_width = points
        .iter()
        .map(|p| p.label.chars().count())
        .max()
        .unwrap_or(0)
        .min(24);

    for point in points {
        let len = scaled_bar_len(point.value, max);
        let _ = writeln!(
            out,
            "  {:<width$} {} {}",
            truncate(&point.label, label_width),
            "█".repeat(len).cyan(),
            point.value,
            width = label_width,
        );
    }
}

/// Bar length proportional to `value / max`, at least one cell for non-zero
/// values.
fn scaled_bar_len(value: usize, max: usize) -> usize {
    if max == 0 || value == 0 {
        return 0;
    }
    ((value * BAR_WIDTH) / max).max(1)
}

/// Truncate a string to `max` characters, appending `…` when cut.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
