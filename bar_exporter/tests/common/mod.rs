//! A minimal canned HTTP/1.1 server for driving the provider in tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Answers requests whose path starts with `prefix`.
#[derive(Clone)]
pub struct Route {
    pub prefix: String,
    pub status: u16,
    pub body: String,
}

pub fn route(prefix: &str, status: u16, body: &str) -> Route {
    Route {
        prefix: prefix.to_string(),
        status,
        body: body.to_string(),
    }
}

pub struct MockServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockServer {
    /// Starts serving on an ephemeral port. The first matching route wins;
    /// anything else gets a 404.
    pub async fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                let routes = routes.clone();
                let seen = Arc::clone(&seen);
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 4096];
                    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        match stream.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => buf.extend_from_slice(&chunk[..n]),
                        }
                    }

                    let head = String::from_utf8_lossy(&buf);
                    let target = head
                        .lines()
                        .next()
                        .and_then(|line| line.split_whitespace().nth(1))
                        .unwrap_or("")
                        .to_string();
                    seen.lock().unwrap().push(target.clone());

                    let path = target.split('?').next().unwrap_or("");
                    let (status, body) = routes
                        .iter()
                        .find(|r| path.starts_with(&r.prefix))
                        .map(|r| (r.status, r.body.clone()))
                        .unwrap_or((404, r#"{"status":"NOT_FOUND"}"#.to_string()));

                    let response = format!(
                        "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        reason(status),
                        body.len()
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    /// Request targets (path and query) in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// Three AMD minute bars starting 2024-01-02 14:30 UTC (09:30 Eastern).
pub const AMD_BARS: &str = r#"{
  "ticker": "AMD",
  "queryCount": 3,
  "resultsCount": 3,
  "adjusted": true,
  "results": [
    {"v": 1200, "vw": 138.5012, "o": 138.5, "c": 138.62, "h": 138.7, "l": 138.41, "t": 1704205800000, "n": 31},
    {"v": 800.0, "vw": 138.6, "o": 138.62, "c": 138.55, "h": 138.66, "l": 138.5, "t": 1704205860000, "n": 12},
    {"v": 950, "o": 138.55, "c": 138.8, "h": 138.81, "l": 138.5, "t": 1704205920000}
  ],
  "status": "OK",
  "request_id": "abc",
  "count": 3
}"#;

pub const NO_RESULTS: &str = r#"{"ticker":"DEAD","queryCount":0,"resultsCount":0,"adjusted":true,"status":"OK","request_id":"def"}"#;

pub const EXCHANGES: &str = r#"{
  "results": [
    {"id": 1, "type": "exchange", "asset_class": "stocks", "locale": "us", "name": "NYSE American, LLC", "mic": "XASE"},
    {"id": 4, "type": "TRF", "asset_class": "stocks", "locale": "us", "name": "FINRA Alternative Display Facility"},
    {"id": 12, "type": "exchange", "asset_class": "stocks", "locale": "us", "name": "Nasdaq", "mic": "XNAS"}
  ],
  "status": "OK",
  "request_id": "ghi",
  "count": 3
}"#;
