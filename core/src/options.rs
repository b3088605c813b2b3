//! Per-request options.

use serde::Serialize;
use serde_json::Value;

use crate::config::ApiCategory;
use crate::error::ClientError;
use crate::query::{Query, QueryValue};

/// Options accepted by every `HttpClient` verb.
///
/// Every field defaults to "not set": no query string, no body, the default
/// backend, and no headers beyond the configured defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub query: Option<Query>,
    pub body: Option<Value>,
    pub api_category: Option<ApiCategory>,
    /// Applied last; replaces configured headers of the same name.
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: Query) -> Self {
        self.query = Some(query);
        self
    }

    /// Append one query parameter, creating the query if needed.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.get_or_insert_with(Query::new).push(key, value);
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `body` into the JSON request body.
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self, ClientError> {
        let value = serde_json::to_value(body).map_err(ClientError::Serialization)?;
        Ok(self.body(value))
    }

    pub fn api_category(mut self, category: impl Into<ApiCategory>) -> Self {
        self.api_category = Some(category.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}
