//! Verb-level REST client.
//!
//! # Design
//! `HttpClient` holds an immutable `ClientConfig` and a `Transport`, and
//! carries no state between calls. Each call is split into
//! `build_request` (path joining, query serialization, header merging) and
//! `parse_response` (JSON decoding); both are pure, and only the transport
//! performs I/O.
//!
//! Status codes are never interpreted. A backend that answers
//! `{"code": 1, "msg": "bad credentials"}`, with any status, resolves with
//! that payload and the caller decides what it means.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::{check_header, set_header, HttpMethod, HttpRequest, HttpResponse};
use crate::options::RequestOptions;
use crate::path;
use crate::query;
use crate::transport::{Transport, UreqTransport};

/// Stateless REST client over a pluggable transport.
#[derive(Debug, Clone)]
pub struct HttpClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl HttpClient<UreqTransport> {
    /// Client using ureq with the configured timeout and body cap.
    pub fn new(config: ClientConfig) -> Self {
        let transport =
            UreqTransport::new(config.timeout()).with_body_limit(config.max_body_bytes);
        Self { config, transport }
    }
}

impl<T: Transport> HttpClient<T> {
    /// Responses with a JSON body resolve regardless of HTTP status.
    pub const RESOLVES_ON_APPLICATION_ERROR: bool = true;

    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn get(&self, path: &str, options: RequestOptions) -> Result<Value, ClientError> {
        self.request(HttpMethod::Get, path, options).await
    }

    pub async fn post(&self, path: &str, options: RequestOptions) -> Result<Value, ClientError> {
        self.request(HttpMethod::Post, path, options).await
    }

    pub async fn put(&self, path: &str, options: RequestOptions) -> Result<Value, ClientError> {
        self.request(HttpMethod::Put, path, options).await
    }

    pub async fn patch(&self, path: &str, options: RequestOptions) -> Result<Value, ClientError> {
        self.request(HttpMethod::Patch, path, options).await
    }

    pub async fn delete(&self, path: &str, options: RequestOptions) -> Result<Value, ClientError> {
        self.request(HttpMethod::Delete, path, options).await
    }

    /// Build, send and decode one request into a JSON value.
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, ClientError> {
        self.request_as(method, path, options).await
    }

    /// Like [`HttpClient::request`], decoding the body straight into `R`.
    /// A body that is JSON but not shaped like `R` is a decode error.
    pub async fn request_as<R: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        options: RequestOptions,
    ) -> Result<R, ClientError> {
        let request = self.build_request(method, path, &options)?;
        debug!(%method, url = %request.url, has_body = request.body.is_some(), "sending request");

        let response = self.transport.send(request).await.map_err(|e| {
            warn!(%method, path, error = %e, "request failed");
            e
        })?;
        debug!(%method, path, status = response.status, "received response");

        self.parse_response_as(response)
    }

    /// Resolve the base URL, join the path, append the query and merge
    /// headers. Performs no I/O. A header that cannot be sent is a
    /// `Config` error.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        options: &RequestOptions,
    ) -> Result<HttpRequest, ClientError> {
        let base_url = self.config.base_url_for(options.api_category.as_ref());
        let url = query::append_query(&path::join([base_url, path]), options.query.as_ref());

        let body = options
            .body
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(ClientError::Serialization)?;

        let mut headers = Vec::new();
        for (name, value) in &self.config.default_headers {
            set_header(&mut headers, name, value);
        }
        if body.is_some() {
            set_header(&mut headers, "content-type", "application/json");
        }
        for (name, value) in &options.headers {
            set_header(&mut headers, name, value);
        }
        for (name, value) in &headers {
            check_header(name, value)?;
        }

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Decode the response body as JSON. The status code is only carried
    /// into the error for diagnostics. Bytes that are not UTF-8 fail here too.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, ClientError> {
        self.parse_response_as(response)
    }

    pub fn parse_response_as<R: DeserializeOwned>(
        &self,
        response: HttpResponse,
    ) -> Result<R, ClientError> {
        serde_json::from_slice(&response.body).map_err(|source| ClientError::Decode {
            status: response.status,
            source,
        })
    }
}
