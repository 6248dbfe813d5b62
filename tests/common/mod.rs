//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves HTML pages and canned redirects from a route table. Routes are
//! registered after bind, so a page body can embed the server's own URL (or
//! another server's) for reciprocal-link scenarios.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

enum Route {
    Html(String),
    Redirect(String),
    RedirectWithoutLocation,
}

pub struct TestServer {
    base: String,
    routes: Arc<Mutex<HashMap<String, Route>>>,
}

impl TestServer {
    /// Binds on an ephemeral port and starts serving in a background thread.
    /// The server runs until the process exits.
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes: Arc<Mutex<HashMap<String, Route>>> = Arc::default();

        let accept_routes = Arc::clone(&routes);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&accept_routes);
                thread::spawn(move || handle(stream, &routes));
            }
        });

        TestServer {
            base: format!("http://127.0.0.1:{}", port),
            routes,
        }
    }

    /// Absolute URL for `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Serves `html` at `path` with a 200 response.
    pub fn page(&self, path: &str, html: impl Into<String>) {
        self.insert(path, Route::Html(html.into()));
    }

    /// Serves a 302 at `path` pointing at `location` (absolute or relative).
    pub fn redirect(&self, path: &str, location: &str) {
        self.insert(path, Route::Redirect(location.to_string()));
    }

    /// Serves a 302 at `path` with no Location header at all.
    pub fn redirect_without_location(&self, path: &str) {
        self.insert(path, Route::RedirectWithoutLocation);
    }

    fn insert(&self, path: &str, route: Route) {
        self.routes.lock().unwrap().insert(path.to_string(), route);
    }
}

fn handle(mut stream: TcpStream, routes: &Mutex<HashMap<String, Route>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));

    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = match request_path(request) {
        Some(p) => p,
        None => return,
    };

    let reply = match routes.lock().unwrap().get(&path) {
        Some(Route::Html(body)) => format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        ),
        Some(Route::Redirect(location)) => format!(
            "HTTP/1.1 302 Found\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            location
        ),
        Some(Route::RedirectWithoutLocation) => {
            "HTTP/1.1 302 Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string()
        }
        None => {
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string()
        }
    };
    let _ = stream.write_all(reply.as_bytes());
}

fn request_path(request: &str) -> Option<String> {
    let line = request.lines().next()?;
    let mut parts = line.split_whitespace();
    let _method = parts.next()?;
    parts.next().map(str::to_string)
}
