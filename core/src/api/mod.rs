//! Typed endpoints used by the dashboard pages.
//!
//! # Design
//! Backends wrap their answers in a `{code, msg, data}` envelope and signal
//! failure through `code`, usually with HTTP 200. `HttpClient` hands the
//! envelope back untouched; `ApiResponse::into_result` is where a caller
//! chooses to turn a non-zero code into an error.

pub mod auth;
pub mod market;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::query::Query;

/// Application-level success code.
pub const CODE_OK: i64 = 0;

/// The `{code, msg, data}` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: Option<T>,
}

/// A failure reported inside a successfully decoded response body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("application error {code}: {msg}")]
pub struct ApplicationError {
    pub code: i64,
    pub msg: String,
}

impl<T> ApiResponse<T> {
    pub fn is_ok(&self) -> bool {
        self.code == CODE_OK
    }

    /// `Ok(data)` when `code` is zero, otherwise the code and message as
    /// an error. A zero code without `data` yields `Ok(None)`.
    pub fn into_result(self) -> Result<Option<T>, ApplicationError> {
        if self.is_ok() {
            Ok(self.data)
        } else {
            Err(ApplicationError {
                code: self.code,
                msg: self.msg,
            })
        }
    }
}

/// One page of a list endpoint. Backends may omit any field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub results: Vec<T>,
    #[serde(default)]
    pub current: Option<u64>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// Offset paging parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    pub limit: Option<u64>,
    pub skip: Option<u64>,
}

impl PageParams {
    pub fn new(limit: u64, skip: u64) -> Self {
        Self {
            limit: Some(limit),
            skip: Some(skip),
        }
    }

    /// `limit` then `skip`, omitting unset fields.
    pub fn to_query(self) -> Query {
        let mut query = Query::new();
        if let Some(limit) = self.limit {
            query.push("limit", limit);
        }
        if let Some(skip) = self.skip {
            query.push("skip", skip);
        }
        query
    }
}
