//! Preview server with live reload support.
//!
//! ```text
//! HTTP  GET /                 → index.html + injected live reload script
//! HTTP  GET /__livereload.js  → live reload client, from memory
//! HTTP  GET /<path>           → file from the output tree
//! WS    <interface>:<push>/   → preview session (connected, then reload events)
//! ```

mod content;
mod lifecycle;
mod path;
mod push;
mod response;
mod session;

pub use lifecycle::ActorContext;

use crate::{config::ServeConfig, embed::serve::LIVERELOAD_SCRIPT_URL, log};
use anyhow::{Context, Result};
use crossbeam::channel;
use std::net::{SocketAddr, TcpListener};
use std::path::Path;
use std::sync::Arc;
use tiny_http::{Request, Server};

/// Request worker threads. Preview sessions run on their own threads.
const REQUEST_THREADS: usize = 4;

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
    push_listener: TcpListener,
    push_addr: SocketAddr,
    shutdown_rx: channel::Receiver<()>,
}

/// Bind the HTTP server and the push listener without starting either loop.
///
/// Registers the server with the Ctrl+C handler, so from here on an
/// interrupt shuts down gracefully instead of exiting.
pub fn bind_server(serve: &ServeConfig) -> Result<BoundServer> {
    let (server, addr) = lifecycle::bind_with_retry(serve.interface, serve.port)?;
    let (push_listener, push_addr) = push::bind_listener(serve.interface, serve.push_port)?;
    let server = Arc::new(server);

    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    lifecycle::register_server_for_shutdown(Arc::clone(&server), shutdown_tx);

    Ok(BoundServer {
        server,
        addr,
        push_listener,
        push_addr,
        shutdown_rx,
    })
}

impl BoundServer {
    /// Start the actors, the push acceptor and the request loop (blocking until shutdown).
    pub fn run(self, context: ActorContext) -> Result<()> {
        let output = context.config.paths.output.clone();
        let notifier = context.notifier.clone();

        push::spawn_acceptor(self.push_listener, notifier.clone())?;
        let actor_handle = lifecycle::spawn_actors(context, self.shutdown_rx);
        log!("serve"; "http://{}", self.addr);
        crate::debug!("serve"; "live reload on ws://{}", self.push_addr);

        let result = run_request_loop(&self.server, &output, self.push_addr.port());
        lifecycle::wait_for_shutdown(actor_handle);

        // Last sender gone: every preview session receives Closed and exits.
        drop(notifier);
        result
    }
}

fn run_request_loop(server: &Server, output: &Path, push_port: u16) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(REQUEST_THREADS)
        .build()
        .context("failed to create request thread pool")?;

    for request in server.incoming_requests() {
        let output = output.to_path_buf();
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &output, push_port) {
                log!("serve"; "request error: {e:#}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, output: &Path, push_port: u16) -> Result<()> {
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    let Some(url) = path::url_path(request.url()) else {
        return response::respond_not_found(request);
    };

    if url == LIVERELOAD_SCRIPT_URL {
        return response::respond_livereload_js(request, push_port);
    }

    match path::resolve_path(&url, output) {
        Some(file) => response::respond_file(request, &file),
        None if is_page_url(&url) => response::respond_missing_page(request),
        None => response::respond_not_found(request),
    }
}

fn is_page_url(url: &str) -> bool {
    let trimmed = url.trim_start_matches('/');
    trimmed.is_empty() || trimmed == crate::render::PAGE_FILE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::serve::script_tag;
    use std::fs;
    use std::io::{Read, Write};
    use std::net::{IpAddr, Ipv4Addr, TcpStream};
    use tempfile::TempDir;

    const PUSH_PORT: u16 = 35799;

    struct TestServer {
        server: Arc<Server>,
        addr: SocketAddr,
        handle: Option<std::thread::JoinHandle<()>>,
    }

    impl TestServer {
        fn start(output: &Path) -> Self {
            let (server, addr) =
                lifecycle::bind_with_retry(IpAddr::V4(Ipv4Addr::LOCALHOST), 0).unwrap();
            let server = Arc::new(server);
            let loop_server = Arc::clone(&server);
            let output = output.to_path_buf();
            let handle = std::thread::spawn(move || {
                run_request_loop(&loop_server, &output, PUSH_PORT).unwrap();
            });
            Self {
                server,
                addr,
                handle: Some(handle),
            }
        }

        fn get(&self, path: &str) -> (u16, String) {
            let mut stream = TcpStream::connect(self.addr).unwrap();
            write!(
                stream,
                "GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n"
            )
            .unwrap();
            let mut raw = String::new();
            stream.read_to_string(&mut raw).unwrap();

            let status = raw
                .split_whitespace()
                .nth(1)
                .and_then(|s| s.parse().ok())
                .unwrap();
            let body = raw
                .split_once("\r\n\r\n")
                .map(|(_, body)| body.to_string())
                .unwrap_or_default();
            (status, body)
        }
    }

    impl Drop for TestServer {
        fn drop(&mut self) {
            self.server.unblock();
            if let Some(handle) = self.handle.take() {
                let _ = handle.join();
            }
        }
    }

    fn output() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("index.html"),
            "<html><body><h1>Ada</h1></body></html>",
        )
        .unwrap();
        fs::create_dir_all(temp.path().join("styles")).unwrap();
        fs::write(temp.path().join("styles/base.css"), "body{}").unwrap();
        temp
    }

    #[test]
    fn test_root_serves_page_with_script() {
        let out = output();
        let server = TestServer::start(out.path());

        let (status, body) = server.get("/");
        assert_eq!(status, 200);
        assert!(body.contains("<h1>Ada</h1>"));
        assert!(body.contains(&format!("{}</body>", script_tag())));
    }

    #[test]
    fn test_static_files_and_not_found() {
        let out = output();
        let server = TestServer::start(out.path());

        assert_eq!(server.get("/styles/base.css"), (200, "body{}".to_string()));
        assert_eq!(server.get("/missing.css").0, 404);
        assert_eq!(server.get("/../etc/passwd").0, 404);
    }

    #[test]
    fn test_livereload_script_points_at_push_port() {
        let out = output();
        let server = TestServer::start(out.path());

        let (status, body) = server.get(LIVERELOAD_SCRIPT_URL);
        assert_eq!(status, 200);
        assert!(body.contains("new WebSocket"));
        assert!(body.contains(&format!("var PUSH_PORT = {PUSH_PORT};")));
    }

    #[test]
    fn test_missing_page_still_carries_script() {
        let out = TempDir::new().unwrap();
        let server = TestServer::start(out.path());

        let (status, body) = server.get("/");
        assert_eq!(status, 404);
        assert!(body.contains(&script_tag()));
    }
}
