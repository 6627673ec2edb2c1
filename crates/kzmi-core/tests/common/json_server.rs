//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves fixed bodies by path. A route can be told to answer 503 for its
//! first few requests to exercise the retry path.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub body: String,
    /// Number of initial requests answered with 503 before `status`/`body`.
    pub fail_first: usize,
}

impl Route {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            fail_first: 0,
        }
    }
}

/// Shared request counter per path.
pub type Hits = Arc<Mutex<HashMap<String, usize>>>;

/// Starts a server in a background thread. Returns the base URL
/// (e.g. "http://127.0.0.1:12345/") and the per-path hit counter.
pub fn start(routes: HashMap<String, Route>) -> (String, Hits) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    let hits: Hits = Arc::default();
    let hits_srv = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let hits = Arc::clone(&hits_srv);
            thread::spawn(move || handle(stream, &routes, &hits));
        }
    });
    (format!("http://127.0.0.1:{}/", port), hits)
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>, hits: &Hits) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    let seen = {
        let mut h = hits.lock().unwrap();
        let c = h.entry(path.clone()).or_insert(0);
        *c += 1;
        *c
    };

    let (status, body) = match routes.get(&path) {
        Some(route) if seen <= route.fail_first => (503, String::new()),
        Some(route) => (route.status, route.body.clone()),
        None => (404, String::new()),
    };
    let response = format!(
        "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}
