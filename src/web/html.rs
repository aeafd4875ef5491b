//! HTML rendering of a [`Page`] for the web dashboard.
//!
//! Widget state travels in the URL: selectors submit GET forms carrying the
//! current `mode`, `date`, and `analysis` values, and action buttons POST
//! back to the same URL.

use std::fmt::Write as _;

use pulldown_cmark::{Event, Options, Parser, html};

use crate::app::{AppState, ViewMode};
use crate::page::{ButtonAction, ChartPoint, Level, Page, Widget};

use super::frontend;

/// Render a full HTML document: sidebar controls plus the page body.
pub fn document(page: &Page, state: &AppState) -> String {
    let mut body = String::new();
    for widget in &page.widgets {
        render_widget(&mut body, widget, state);
    }

    frontend::SHELL
        .replace("{{SIDEBAR}}", &sidebar(state))
        .replace("{{BODY}}", &body)
}

/// Query string that reproduces `state`.
pub fn state_query(state: &AppState) -> String {
    let mut query = format!("mode={}", state.mode);
    if let Some(date) = selected_date(state) {
        let _ = write!(query, "&date={}", urlencoding::encode(date));
    }
    if state.show_analysis {
        query.push_str("&analysis=1");
    }
    let _ = write!(query, "&days={}", state.days_to_keep);
    query
}

fn selected_date(state: &AppState) -> Option<&str> {
    match state.mode {
        ViewMode::Local => state.local_date.as_deref(),
        ViewMode::Remote => state.remote_date.as_deref(),
        ViewMode::Manage => None,
    }
}

fn sidebar(state: &AppState) -> String {
    let mut out = String::new();
    out.push_str("<form method=\"get\" action=\"/\">");
    out.push_str("<label for=\"mode\">Data source</label>");
    out.push_str("<select id=\"mode\" name=\"mode\" onchange=\"this.form.submit()\">");
    for mode in ViewMode::ALL {
        let selected = if mode == state.mode { " selected" } else { "" };
        let _ = write!(
            out,
            "<option value=\"{mode}\"{selected}>{}</option>",
            escape_html(mode.label())
        );
    }
    out.push_str("</select>");
    let checked = if state.show_analysis { " checked" } else { "" };
    let _ = write!(
        out,
        "<label class=\"check\"><input type=\"checkbox\" name=\"analysis\" value=\"1\"{checked} \
         onchange=\"this.form.submit()\"> Show analysis dashboard</label>"
    );
    let _ = write!(
        out,
        "<input type=\"hidden\" name=\"days\" value=\"{}\">",
        state.days_to_keep
    );
    out.push_str("<noscript><button type=\"submit\">Apply</button></noscript></form>");
    out
}

fn render_widget(out: &mut String, widget: &Widget, state: &AppState) {
    match widget {
        Widget::Title { text } => {
            let _ = write!(out, "<h1>{}</h1>", escape_html(text));
        }
        Widget::Header { text } => {
            let _ = write!(out, "<h2>{}</h2>", escape_html(text));
        }
        Widget::Subheader { text } => {
            let _ = write!(out, "<h3>{}</h3>", escape_html(text));
        }
        Widget::Markdown { text } => out.push_str(&markdown_to_html(text)),
        Widget::Notice { level, text } => {
            let class = match level {
                Level::Info => "info",
                Level::Success => "success",
                Level::Warning => "warning",
                Level::Error => "error",
            };
            let _ = write!(
                out,
                "<div class=\"notice {class}\">{}</div>",
                escape_html(text)
            );
        }
        Widget::Select {
            label,
            options,
            selected,
        } => {
            let _ = write!(
                out,
                "<form method=\"get\" action=\"/\" class=\"select\">\
                 <input type=\"hidden\" name=\"mode\" value=\"{}\">\
                 <input type=\"hidden\" name=\"days\" value=\"{}\">",
                state.mode, state.days_to_keep
            );
            if state.show_analysis {
                out.push_str("<input type=\"hidden\" name=\"analysis\" value=\"1\">");
            }
            let _ = write!(
                out,
                "<label>{}</label><select name=\"date\" onchange=\"this.form.submit()\">",
                escape_html(label)
            );
            for option in options {
                let mark = if Some(option) == selected.as_ref() {
                    " selected"
                } else {
                    ""
                };
                let option = escape_html(option);
                let _ = write!(out, "<option value=\"{option}\"{mark}>{option}</option>");
            }
            out.push_str("</select></form>");
        }
        Widget::Tabs { tabs } => {
            out.push_str("<div class=\"tabs\"><nav>");
            for (i, tab) in tabs.iter().enumerate() {
                let _ = write!(out, "<a href=\"#tab-{i}\">{}</a>", escape_html(&tab.label));
            }
            out.push_str("</nav>");
            for (i, tab) in tabs.iter().enumerate() {
                let _ = write!(
                    out,
                    "<section id=\"tab-{i}\" class=\"tab\"><h4>{}</h4>{}</section>",
                    escape_html(&tab.label),
                    markdown_to_html(&tab.markdown)
                );
            }
            out.push_str("</div>");
        }
        Widget::Expander { label, markdown } => {
            let _ = write!(
                out,
                "<details><summary>{}</summary>{}</details>",
                escape_html(label),
                markdown_to_html(markdown)
            );
        }
        Widget::Metrics { metrics } => {
            out.push_str("<div class=\"metrics\">");
            for metric in metrics {
                let _ = write!(
                    out,
                    "<div class=\"metric\"><span class=\"label\">{}</span>\
                     <span class=\"value\">{}</span></div>",
                    escape_html(&metric.label),
                    escape_html(&metric.value)
                );
            }
            out.push_str("</div>");
        }
        Widget::Json { value } => {
            let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
            let _ = write!(out, "<pre class=\"json\">{}</pre>", escape_html(&text));
        }
        Widget::BarChart { title, points } => {
            let _ = write!(out, "<h4>{}</h4>", escape_html(title));
            render_bar_chart(out, points);
        }
        Widget::LineChart { title, points } => {
            let _ = write!(out, "<h4>{}</h4>", escape_html(title));
            render_line_chart(out, points);
        }
        Widget::NumberInput { label, min, value } => {
            let _ = write!(
                out,
                "<label class=\"number\">{} <input type=\"number\" name=\"days\" \
                 form=\"cleanup-form\" min=\"{min}\" value=\"{value}\"></label>",
                escape_html(label)
            );
        }
        Widget::Button { label, action } => {
            let name = match action {
                ButtonAction::Export => "export",
                ButtonAction::Cleanup => "cleanup",
            };
            let _ = write!(
                out,
                "<form id=\"{name}-form\" method=\"post\" action=\"/?{}\">\
                 <input type=\"hidden\" name=\"action\" value=\"{name}\">\
                 <button type=\"submit\">{}</button></form>",
                escape_html(&state_query(state)),
                escape_html(label)
            );
        }
        Widget::Divider => out.push_str("<hr>"),
    }
}

fn render_bar_chart(out: &mut String, points: &[ChartPoint]) {
    let max = points.iter().map(|p| p.value).max().unwrap_or(0).max(1);
    out.push_str("<div class=\"bars\">");
    for point in points {
        let pct = point.value * 100 / max;
        let _ = write!(
            out,
            "<div class=\"bar-row\"><span class=\"bar-label\">{}</span>\
             <span class=\"bar\" style=\"width:{pct}%\"></span>\
             <span class=\"bar-value\">{}</span></div>",
            escape_html(&point.label),
            point.value
        );
    }
    out.push_str("</div>");
}

/// Inline SVG polyline, 600x200 viewbox, one vertex per point.
fn render_line_chart(out: &mut String, points: &[ChartPoint]) {
    const WIDTH: usize = 600;
    const HEIGHT: usize = 200;

    if points.is_empty() {
        return;
    }
    let max = points.iter().map(|p| p.value).max().unwrap_or(0).max(1);
    let step = if points.len() > 1 {
        WIDTH / (points.len() - 1)
    } else {
        0
    };

    let vertices: Vec<String> = points
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{},{}", i * step, HEIGHT - p.value * HEIGHT / max))
        .collect();

    let _ = write!(
        out,
        "<svg class=\"line\" viewBox=\"-10 -10 {} {}\"><polyline points=\"{}\"/>",
        WIDTH + 20,
        HEIGHT + 20,
        vertices.join(" ")
    );
    for (i, p) in points.iter().enumerate() {
        let _ = write!(
            out,
            "<circle cx=\"{}\" cy=\"{}\" r=\"4\"><title>{}: {}</title></circle>",
            i * step,
            HEIGHT - p.value * HEIGHT / max,
            escape_html(&p.label),
            p.value
        );
    }
    out.push_str("</svg>");
}

/// Render markdown to HTML with tables, strikethrough, and task lists.
///
/// Raw HTML in the source is shown as escaped text, never as markup.
pub fn markdown_to_html(input: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    let parser = Parser::new_ext(input, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
