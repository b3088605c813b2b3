//! HTTP requests and responses as plain data.
//!
//! # Design
//! `HttpClient` turns a verb, a path and `RequestOptions` into an
//! `HttpRequest` without touching the network, and turns an `HttpResponse`
//! into JSON the same way. Only the `Transport` in between performs I/O, so
//! both halves can be tested without a server.
//!
//! All fields use owned types (`String`, `Vec`) so values can move onto a
//! blocking worker thread without lifetime concerns.

use std::fmt;

use ureq::http::{HeaderName, HeaderValue};

use crate::error::ClientError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute: base URL, joined path and query string. `body` is
/// `None` when the caller supplied no body, and the transport must then
/// send none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// An HTTP response described as plain data.
///
/// `body` holds the bytes exactly as received. Whether they are UTF-8, let
/// alone JSON, is decided when the response is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .rev()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Reject header names and values that cannot go on the wire, such as a
/// value containing a line break.
pub(crate) fn check_header(name: &str, value: &str) -> Result<(), ClientError> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| ClientError::Config(format!("invalid header name {name:?}")))?;
    HeaderValue::from_str(value)
        .map_err(|_| ClientError::Config(format!("invalid value for header {name:?}")))?;
    Ok(())
}

/// Insert or replace a header, matching names case-insensitively.
pub(crate) fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
    headers.push((name.to_string(), value.to_string()));
}
