//! Async REST client for the gridnet dashboard backends.
//!
//! # Overview
//! `HttpClient` issues GET/POST/PUT/PATCH/DELETE calls against one of
//! several configured backends ("API categories") and resolves with the
//! decoded JSON body. Paths are joined with [`path::join`] and query
//! parameters are appended with [`query::append_query`].
//!
//! # Design
//! - `ClientConfig` is injected at construction; there is no global state.
//! - Each call is `build_request` (pure) → `Transport::send` (I/O) →
//!   `parse_response` (pure), so everything but the transport is testable
//!   without a server.
//! - Only transport and decode failures are errors. Application errors
//!   encoded in a JSON body are returned as data (see [`api::ApiResponse`]).

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod options;
pub mod path;
pub mod query;
pub mod transport;

pub use client::HttpClient;
pub use config::{ApiCategory, ClientConfig};
pub use error::{ClientError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use options::RequestOptions;
pub use query::{Query, QueryValue};
pub use transport::{Transport, UreqTransport};
