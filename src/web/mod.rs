//! Embedded web dashboard for sumview.
//!
//! Provides a lightweight HTTP server (sync, via `tiny_http`) that serves:
//! - The dashboard as server-rendered HTML, with widget state in the URL
//! - JSON endpoints for the rendered page and the two maintenance actions
//!
//! Launched via `sumview web` (default: `http://127.0.0.1:8501`).

mod api;
mod frontend;
pub mod html;

use std::io::Cursor;

use anyhow::Result;
use chrono::Local;
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::app::App;

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the web dashboard server on the given address.
///
/// Blocks the current thread and handles requests one at a time. A failing
/// request gets a 500 response; the server keeps running.
pub fn serve(app: &App, addr: &str, open: bool) -> Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    println!("sumview dashboard running at http://{addr}");
    println!("Press Ctrl+C to stop.\n");

    if open {
        let _ = open_browser(&format!("http://{addr}"));
    }

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        // Read body up-front for methods that carry one
        let body = if matches!(method, Method::Post) {
            let mut buf = String::new();
            let _ = request.as_reader().read_to_string(&mut buf);
            Some(buf)
        } else {
            None
        };

        let resp = match dispatch(app, &method, &url, body.as_deref()) {
            Ok(resp) => resp,
            Err(e) => {
                app.activity()
                    .record_failure("web", &format!("{method} {url}: {e:#}"));
                let body = serde_json::json!({ "error": format!("{e:#}") }).to_string();
                respond(body, 500, "application/json")
            }
        };
        let status = resp.status_code().0;
        let _ = request.respond(resp);

        // Brief access log
        println!("{} {} {} {}", method, url, status, Local::now().format("%H:%M:%S"));
        app.activity().record("web", &format!("{method} {url} {status}"));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Dispatch an incoming request to the appropriate handler.
fn dispatch(
    app: &App,
    method: &Method,
    url: &str,
    body: Option<&str>,
) -> Result<Response<Cursor<Vec<u8>>>> {
    // Strip query string for path matching
    let path = url.split('?').next().unwrap_or(url);

    match (method, path) {
        (&Method::Get, "/") | (&Method::Get, "/index.html") => Ok(api::get_dashboard(app, url)),
        (&Method::Post, "/") => Ok(api::post_dashboard(app, url, body.unwrap_or(""))),

        (&Method::Get, "/api/page") => api::get_page(app, url),
        (&Method::Post, "/api/export") => api::post_export(app),
        (&Method::Post, "/api/cleanup") => api::post_cleanup(app, body.unwrap_or("{}")),

        _ => Ok(not_found()),
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Build a response with a status and `Content-Type` (UTF-8).
pub(crate) fn respond(
    body: impl Into<Vec<u8>>,
    status: u16,
    content_type: &str,
) -> Response<Cursor<Vec<u8>>> {
    let mut resp = Response::from_data(body.into()).with_status_code(StatusCode(status));
    if let Ok(header) =
        Header::from_bytes("Content-Type", format!("{content_type}; charset=utf-8"))
    {
        resp.add_header(header);
    }
    resp
}

/// 404 response.
fn not_found() -> Response<Cursor<Vec<u8>>> {
    respond(r#"{"error": "not found"}"#, 404, "application/json")
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    use anyhow::Context;

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
