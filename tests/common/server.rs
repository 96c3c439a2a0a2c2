//! A small range-aware HTTP server for end-to-end tests.
//!
//! It understands just enough HTTP/1.1 to answer the downloader: one request
//! per connection, a single `bytes=<start>-<end>` range, and
//! `Connection: close` on every response.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// How the server answers requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Honor `Range` headers with `206 Partial Content`.
    Ranged,
    /// Ignore `Range` headers and always send the whole body with `200 OK`.
    IgnoreRange,
    /// Answer the first `n` ranged requests with `500`, then honor ranges.
    FailFirst(usize),
    /// Answer every ranged request with `500`.
    AlwaysFail,
    /// Answer the probe without a `Content-Length` header.
    NoContentLength,
    /// Answer the probe with `404`.
    NotFound,
}

/// A running test server.
pub struct TestServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Option<String>>>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start serving `content` on an ephemeral localhost port.
    pub async fn start(content: Vec<u8>, behavior: Behavior) -> Self {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().expect("Failed to read local address");

        let content = Arc::new(content);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let failures = Arc::new(AtomicUsize::new(0));

        let seen = requests.clone();
        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let content = content.clone();
                let seen = seen.clone();
                let failures = failures.clone();
                tokio::spawn(async move {
                    let _ = serve(stream, &content, behavior, &seen, &failures).await;
                });
            }
        });

        Self {
            addr,
            requests,
            handle,
        }
    }

    /// URL of the served resource.
    pub fn url(&self) -> String {
        format!("http://{}/file.bin", self.addr)
    }

    /// `Range` header of every request received so far, in arrival order.
    /// Requests without a `Range` header are recorded as `None`.
    pub fn requests(&self) -> Vec<Option<String>> {
        self.requests.lock().expect("poisoned").clone()
    }

    /// `Range` headers of the ranged requests only.
    pub fn ranges(&self) -> Vec<String> {
        self.requests().into_iter().flatten().collect()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Return the address of a localhost port nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to read local address");
    drop(listener);
    format!("http://{}/file.bin", addr)
}

async fn serve(
    stream: TcpStream,
    content: &[u8],
    behavior: Behavior,
    seen: &Mutex<Vec<Option<String>>>,
    failures: &AtomicUsize,
) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream);

    let mut range = None;
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(());
        }
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            break;
        }
        if let Some((name, value)) = trimmed.split_once(':') {
            if name.eq_ignore_ascii_case("range") {
                range = Some(value.trim().to_string());
            }
        }
    }
    seen.lock().expect("poisoned").push(range.clone());

    let total = content.len();
    let full = |with_length: bool| {
        let mut head = String::from("HTTP/1.1 200 OK\r\n");
        if with_length {
            head.push_str(&format!("Content-Length: {}\r\n", total));
        }
        (head, content.to_vec())
    };

    let (head, body) = match (behavior, range.as_deref()) {
        (Behavior::NotFound, _) => status_only("404 Not Found"),
        (Behavior::NoContentLength, None) => full(false),
        (_, None) | (Behavior::IgnoreRange, Some(_)) => full(true),
        (Behavior::AlwaysFail, Some(_)) => status_only("500 Internal Server Error"),
        (Behavior::FailFirst(n), Some(_)) if failures.fetch_add(1, Ordering::SeqCst) < n => {
            status_only("500 Internal Server Error")
        }
        (_, Some(spec)) => match parse_range(spec, total) {
            Some((start, end)) => {
                let head = format!(
                    "HTTP/1.1 206 Partial Content\r\nContent-Range: bytes {}-{}/{}\r\nContent-Length: {}\r\n",
                    start,
                    end,
                    total,
                    end - start + 1
                );
                (head, content[start..=end].to_vec())
            }
            None => status_only("416 Range Not Satisfiable"),
        },
    };

    let mut stream = reader.into_inner();
    stream.write_all(head.as_bytes()).await?;
    stream.write_all(b"Connection: close\r\n\r\n").await?;
    stream.write_all(&body).await?;
    stream.shutdown().await
}

fn status_only(status: &str) -> (String, Vec<u8>) {
    (
        format!("HTTP/1.1 {}\r\nContent-Length: 0\r\n", status),
        Vec::new(),
    )
}

/// Parse `bytes=<start>-<end>` into inclusive bounds clamped to the content.
fn parse_range(spec: &str, total: usize) -> Option<(usize, usize)> {
    let (start, end) = spec.strip_prefix("bytes=")?.split_once('-')?;
    let start: usize = start.trim().parse().ok()?;
    let end: usize = match end.trim() {
        "" => total.checked_sub(1)?,
        end => end.parse::<usize>().ok()?.min(total.checked_sub(1)?),
    };
    (start <= end).then_some((start, end))
}
