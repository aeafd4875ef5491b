//! Request handlers for the web dashboard.
//!
//! The dashboard keeps no server-side session: every request rebuilds the
//! [`App`] state from its query string (and form body, for actions), applies
//! the resulting events, and renders a fresh page.

use std::io::Cursor;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tiny_http::Response;

use crate::app::{App, AppState, Event, ViewMode};
use crate::page::Page;
use crate::views::manage::ActionOutcome;

use super::{html, respond};

// ---------------------------------------------------------------------------
// JSON response types
// ---------------------------------------------------------------------------

/// `GET /api/page` response: the resolved state and the rendered page.
#[derive(Serialize)]
struct PageResponse<'a> {
    state: &'a AppState,
    page: Page,
}

/// `POST /api/cleanup` request body.
#[derive(Deserialize)]
struct CleanupBody {
    #[serde(rename = "daysToKeep")]
    days_to_keep: u32,
}

// ---------------------------------------------------------------------------
// Query / form parsing
// ---------------------------------------------------------------------------

/// Split `a=1&b=two` into decoded key/value pairs.
pub(crate) fn parse_pairs(raw: &str) -> Vec<(String, String)> {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(k), decode_component(v))
        })
        .collect()
}

/// Decode `application/x-www-form-urlencoded` text (`+` and `%XX`).
///
/// Text that does not decode to UTF-8 is kept as sent.
pub(crate) fn decode_component(s: &str) -> String {
    let spaced = s.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

fn query_of(url: &str) -> &str {
    url.split_once('?').map(|(_, q)| q).unwrap_or("")
}

/// Widget-value events encoded in a dashboard URL.
///
/// A URL without any query keeps the configured defaults; otherwise the
/// analysis checkbox is on only when `analysis` is present.
pub(crate) fn events_from_query(url: &str) -> Vec<Event> {
    let pairs = parse_pairs(query_of(url));
    if pairs.is_empty() {
        return Vec::new();
    }

    let value = |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };

    let mut events = Vec::new();
    if let Some(mode) = value("mode").and_then(|m| m.parse::<ViewMode>().ok()) {
        events.push(Event::SelectMode(mode));
    }
    if let Some(date) = value("date").filter(|d| !d.is_empty()) {
        events.push(Event::SelectDate(date.to_string()));
    }
    if let Some(days) = value("days").and_then(|d| d.parse::<u32>().ok()) {
        events.push(Event::SetDaysToKeep(days));
    }
    events.push(Event::ShowAnalysis(value("analysis").is_some()));
    events
}

/// Action events from a submitted form body.
pub(crate) fn events_from_form(body: &str) -> Vec<Event> {
    let pairs = parse_pairs(body.trim());
    let value = |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };

    let mut events = Vec::new();
    if let Some(days) = value("days").and_then(|d| d.trim().parse::<u32>().ok()) {
        events.push(Event::SetDaysToKeep(days));
    }
    match value("action") {
        Some("export") => events.push(Event::Export),
        Some("cleanup") => events.push(Event::Cleanup),
        _ => {}
    }
    events
}

fn session(base: &App, url: &str) -> App {
    let mut app = base.clone();
    for event in events_from_query(url) {
        app.handle(event);
    }
    app
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /`: the HTML dashboard for the state in the query string.
pub fn get_dashboard(base: &App, url: &str) -> Response<Cursor<Vec<u8>>> {
    render_html(&session(base, url))
}

/// `POST /`: apply a form action, then render the dashboard.
pub fn post_dashboard(base: &App, url: &str, body: &str) -> Response<Cursor<Vec<u8>>> {
    let mut app = session(base, url);
    for event in events_from_form(body) {
        app.handle(event);
    }
    render_html(&app)
}

fn render_html(app: &App) -> Response<Cursor<Vec<u8>>> {
    match app.render() {
        Ok(page) => respond(html::document(&page, &app.state), 200, "text/html"),
        Err(e) => {
            app.activity().record_failure("render", &format!("{e:#}"));
            let mut page = Page::new();
            page.title("📊 Investment research dashboard");
            page.error(format!("Render failed: {e:#}"));
            respond(html::document(&page, &app.state), 500, "text/html")
        }
    }
}

/// `GET /api/page`: the rendered page as JSON.
pub fn get_page(base: &App, url: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let app = session(base, url);
    let page = app.render()?;
    json_response(&PageResponse {
        state: &app.state,
        page,
    })
}

/// `POST /api/export`: trigger an export and return the outcome.
pub fn post_export(base: &App) -> Result<Response<Cursor<Vec<u8>>>> {
    let mut app = base.clone();
    app.handle(Event::Export);
    outcome_response(app.state.last_action.as_ref())
}

/// `POST /api/cleanup`: body `{"daysToKeep": N}`.
///
/// A body that does not decode is answered with 400.
pub fn post_cleanup(base: &App, body: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let req: CleanupBody = match serde_json::from_str(body) {
        Ok(req) => req,
        Err(e) => {
            let message = format!("invalid JSON in cleanup request: {e}");
            let body = serde_json::json!({ "error": message }).to_string();
            return Ok(respond(body, 400, "application/json"));
        }
    };

    let mut app = base.clone();
    app.handle(Event::SetDaysToKeep(req.days_to_keep));
    app.handle(Event::Cleanup);
    outcome_response(app.state.last_action.as_ref())
}

fn outcome_response(outcome: Option<&ActionOutcome>) -> Result<Response<Cursor<Vec<u8>>>> {
    let outcome = outcome.context("action produced no outcome")?;
    let status = match outcome {
        ActionOutcome::Exported { .. } | ActionOutcome::CleanedUp { .. } => 200,
        ActionOutcome::ExportFailed { .. } | ActionOutcome::CleanupFailed { .. } => 502,
    };
    let body = serde_json::to_vec(outcome).context("failed to serialize action outcome")?;
    Ok(respond(body, status, "application/json"))
}

fn json_response<T: Serialize>(data: &T) -> Result<Response<Cursor<Vec<u8>>>> {
    let body = serde_json::to_vec(data).context("failed to serialize JSON response")?;
    Ok(respond(body, 200, "application/json"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
