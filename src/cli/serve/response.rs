//! HTTP response handlers.

use super::content::maybe_inject_livereload;
use crate::utils::mime::types::{HTML, JAVASCRIPT, PLAIN};
use anyhow::{Context, Result, anyhow};
use std::{fs, path::Path};
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// Respond with a static file, injecting the live reload script into HTML.
pub fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = crate::utils::mime::from_path(path);

    if is_head_request(&request) {
        return send_head(request, 200, content_type);
    }

    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let body = maybe_inject_livereload(body, content_type);

    send_body(request, 200, content_type, body)
}

/// Respond with a plain 404.
pub fn respond_not_found(request: Request) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, 404, PLAIN);
    }
    send_body(request, 404, PLAIN, b"404 Not Found".to_vec())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, PLAIN, b"503 Service Unavailable".to_vec())
}

/// Respond with livereload.js from memory, pointed at `push_port`.
pub fn respond_livereload_js(request: Request, push_port: u16) -> Result<()> {
    use crate::embed::serve::{LIVERELOAD_JS, LiveReloadVars};

    if is_head_request(&request) {
        return send_head(request, 200, JAVASCRIPT);
    }
    let body = LIVERELOAD_JS.render(&LiveReloadVars::new(push_port));
    send_body(request, 200, JAVASCRIPT, body.into_bytes())
}

/// Respond to `/` when the page file is missing from the output tree.
///
/// Still carries the live reload script so the tab recovers on the next build.
pub fn respond_missing_page(request: Request) -> Result<()> {
    let body = maybe_inject_livereload(
        b"<html><body><p>No page built yet. Waiting for changes...</p></body></html>".to_vec(),
        HTML,
    );
    send_body(request, 404, HTML, body)
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response = Response::empty(StatusCode(status))
        .with_header(make_header("Content-Type", content_type)?)
        .with_header(make_header("Cache-Control", "no-cache")?);
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type)?)
        .with_header(make_header("Cache-Control", "no-cache")?);
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &str, value: &str) -> Result<Header> {
    Header::from_bytes(key, value).map_err(|()| anyhow!("invalid header {key}: {value}"))
}
