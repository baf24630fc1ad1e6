//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed route table from a background thread. Unknown paths get
//! 404. Every GET is counted and its `Accept` header recorded so tests can
//! assert how many requests reached the network.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

/// Canned response for one path.
#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Route {
    pub fn ok(body: &[u8]) -> Self {
        Self {
            status: 200,
            body: body.to_vec(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }
}

/// Handle to a running server. The server runs until the process exits.
pub struct TestServer {
    base: String,
    hits: Arc<AtomicUsize>,
    accept_headers: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    /// Full URL for `path` (without leading slash), e.g. `url("a.jar")`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Number of requests served so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// `Accept` header values seen so far, in arrival order.
    pub fn accept_headers(&self) -> Vec<String> {
        self.accept_headers.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread serving `routes` keyed by path
/// (e.g. `"/a.jar"`). A route with status 301 redirects to its body, read as a path.
pub fn start(routes: HashMap<String, Route>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    let hits = Arc::new(AtomicUsize::new(0));
    let accept_headers = Arc::new(Mutex::new(Vec::new()));
    {
        let hits = Arc::clone(&hits);
        let accept_headers = Arc::clone(&accept_headers);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                let hits = Arc::clone(&hits);
                let accept_headers = Arc::clone(&accept_headers);
                thread::spawn(move || handle(stream, &routes, &hits, &accept_headers));
            }
        });
    }
    TestServer {
        base: format!("http://127.0.0.1:{}/", port),
        hits,
        accept_headers,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &HashMap<String, Route>,
    hits: &AtomicUsize,
    accept_headers: &Mutex<Vec<String>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (method, path, accept) = parse_request(request);
    hits.fetch_add(1, Ordering::SeqCst);
    if let Some(a) = accept {
        accept_headers.lock().unwrap().push(a.to_string());
    }

    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(
            b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        return;
    }

    let (status, extra, body): (u16, String, &[u8]) = match routes.get(path) {
        Some(route) if route.status == 301 => {
            let location = String::from_utf8_lossy(&route.body).into_owned();
            (301, format!("Location: {}\r\n", location), &[][..])
        }
        Some(route) => (route.status, String::new(), route.body.as_slice()),
        None => (404, String::new(), &b"not found"[..]),
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nContent-Type: application/octet-stream\r\n{}Connection: close\r\n\r\n",
        status,
        reason(status),
        body.len(),
        extra
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body);
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        301 => "Moved Permanently",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// Returns (method, path, optional Accept header value).
fn parse_request(request: &str) -> (&str, &str, Option<&str>) {
    let mut lines = request.lines();
    let mut first = lines.next().unwrap_or("").split_whitespace();
    let method = first.next().unwrap_or("");
    let path = first.next().unwrap_or("/");
    let mut accept = None;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("accept") {
                accept = Some(value.trim());
            }
        }
    }
    (method, path, accept)
}
