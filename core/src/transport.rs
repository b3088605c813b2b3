//! The I/O seam between `HttpClient` and the network.
//!
//! # Design
//! A `Transport` executes one `HttpRequest` and hands back the raw
//! `HttpResponse`. It never interprets status codes: every status a server
//! sends is data. Only a missing response is an error.
//!
//! `UreqTransport` drives ureq's blocking agent on tokio's blocking pool so
//! callers can `.await` it from async code. Bodies are read as raw bytes
//! with no size cap unless one is configured.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes HTTP requests.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Transport backed by a shared ureq agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    body_limit: u64,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport")
            .field("body_limit", &self.body_limit)
            .finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self {
            agent,
            body_limit: u64::MAX,
        }
    }

    /// Cap response bodies at `limit` bytes. `None` reads bodies of any size.
    pub fn with_body_limit(mut self, limit: Option<u64>) -> Self {
        self.body_limit = limit.unwrap_or(u64::MAX);
        self
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = self.agent.clone();
        let body_limit = self.body_limit;
        tokio::task::spawn_blocking(move || execute(&agent, request, body_limit))
            .await
            .map_err(|e| TransportError::Other(format!("transport worker failed: {e}")))?
    }
}

fn execute(
    agent: &ureq::Agent,
    request: HttpRequest,
    body_limit: u64,
) -> Result<HttpResponse, TransportError> {
    let HttpRequest {
        method,
        url,
        headers,
        body,
    } = request;

    macro_rules! with_headers {
        ($builder:expr) => {{
            let mut builder = $builder;
            for (name, value) in &headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder
        }};
    }

    let result = match (method, body) {
        (HttpMethod::Get, None) => with_headers!(agent.get(&url)).call(),
        (HttpMethod::Get, Some(body)) => with_headers!(agent.get(&url))
            .force_send_body()
            .send(body.as_bytes()),
        (HttpMethod::Delete, None) => with_headers!(agent.delete(&url)).call(),
        (HttpMethod::Delete, Some(body)) => with_headers!(agent.delete(&url))
            .force_send_body()
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => with_headers!(agent.post(&url)).send_empty(),
        (HttpMethod::Post, Some(body)) => with_headers!(agent.post(&url)).send(body.as_bytes()),
        (HttpMethod::Put, None) => with_headers!(agent.put(&url)).send_empty(),
        (HttpMethod::Put, Some(body)) => with_headers!(agent.put(&url)).send(body.as_bytes()),
        (HttpMethod::Patch, None) => with_headers!(agent.patch(&url)).send_empty(),
        (HttpMethod::Patch, Some(body)) => with_headers!(agent.patch(&url)).send(body.as_bytes()),
    };

    let mut response = result.map_err(map_ureq_error)?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let body = response
        .body_mut()
        .with_config()
        .limit(body_limit)
        .read_to_vec()
        .map_err(map_ureq_error)?;

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

fn map_ureq_error(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Timeout(_) => TransportError::Timeout,
        ureq::Error::BodyExceedsLimit(limit) => TransportError::BodyTooLarge { limit },
        ureq::Error::HostNotFound | ureq::Error::ConnectionFailed => {
            TransportError::Connection(err.to_string())
        }
        ureq::Error::Io(ref io) => match io.kind() {
            std::io::ErrorKind::TimedOut => TransportError::Timeout,
            _ => TransportError::Connection(err.to_string()),
        },
        other => TransportError::Other(other.to_string()),
    }
}
