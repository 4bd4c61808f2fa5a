// Minimal HTTP/1 GET client for connectivity checks
//
// Only plain `http://` URLs are supported. Hosts may be names, IPv4 or
// bracketed IPv6 literals. The blocking `HttpClient` impl
// drives the async request on the tokio runtime it was created from, so it
// must be used from a thread outside that runtime's async workers (for
// example a `spawn_blocking` task).

use std::time::Duration;

use http_body_util::Empty;
use hyper::body::Bytes;
use hyper::{Request, Uri};
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::hal::{HalError, HttpClient, HttpResponse, Result};

const DEFAULT_HTTP_PORT: u16 = 80;

/// Where a GET request goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Host without IPv6 brackets, ready for name resolution
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl Target {
    /// `Host` header value: IPv6 literals re-bracketed, port only if not 80
    pub fn host_header(&self) -> String {
        let host = if self.host.contains(':') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        if self.port == DEFAULT_HTTP_PORT {
            host
        } else {
            format!("{}:{}", host, self.port)
        }
    }
}

pub fn parse_target(url: &str) -> Result<Target> {
    let invalid = |reason: &str| HalError::InvalidUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    };

    let uri: Uri = url.parse().map_err(|e: hyper::http::uri::InvalidUri| invalid(&e.to_string()))?;
    match uri.scheme_str() {
        Some("http") => {}
        Some(other) => return Err(invalid(&format!("unsupported scheme {:?}", other))),
        None => return Err(invalid("missing scheme")),
    }
    let host = uri.host().ok_or_else(|| invalid("missing host"))?;
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .filter(|pq| !pq.is_empty())
        .unwrap_or("/");

    // `Uri::host` keeps the brackets of an IPv6 literal
    let host = host.trim_start_matches('[').trim_end_matches(']');

    Ok(Target {
        host: host.to_string(),
        port: uri.port_u16().unwrap_or(DEFAULT_HTTP_PORT),
        path: path.to_string(),
    })
}

/// Send a GET and return the response status; the body is discarded
pub async fn fetch(url: &str) -> Result<HttpResponse> {
    let target = parse_target(url)?;
    let stream = TcpStream::connect((target.host.as_str(), target.port)).await?;
    let io = TokioIo::new(stream);

    let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
        .await
        .map_err(|e| HalError::Http(e.to_string()))?;
    tokio::spawn(async move {
        if let Err(e) = conn.await {
            warn!("HTTP connection closed with error: {}", e);
        }
    });

    let host_header = target.host_header();
    let request = Request::builder()
        .uri(target.path.as_str())
        .header(hyper::header::HOST, host_header)
        .body(Empty::<Bytes>::new())
        .map_err(|e| HalError::Http(e.to_string()))?;

    debug!("GET {} via {}:{}", target.path, target.host, target.port);
    let response = sender
        .send_request(request)
        .await
        .map_err(|e| HalError::Http(e.to_string()))?;

    Ok(HttpResponse {
        status: response.status().as_u16(),
    })
}

/// Blocking client backed by a tokio runtime handle.
/// Each request, connect included, is bounded by `timeout`.
pub struct HyperClient {
    handle: Handle,
    timeout: Duration,
}

impl HyperClient {
    pub fn new(handle: Handle, timeout: Duration) -> Self {
        Self { handle, timeout }
    }
}

impl HttpClient for HyperClient {
    fn get(&mut self, url: &str) -> Result<HttpResponse> {
        let timeout = self.timeout;
        self.handle.block_on(async move {
            match tokio::time::timeout(timeout, fetch(url)).await {
                Ok(result) => result,
                Err(_) => Err(HalError::Timeout(timeout)),
            }
        })
    }
}
