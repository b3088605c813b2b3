//! Query-string serialization.
//!
//! # Design
//! `Query` keeps its parameters in insertion order so the serialized URL is
//! deterministic and matches the order the caller wrote. Keys and values are
//! escaped with the same character set as JavaScript's `encodeURIComponent`,
//! which is what the dashboard backends expect.

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A scalar query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Str(s) => f.write_str(s),
            QueryValue::Int(n) => write!(f, "{n}"),
            QueryValue::Float(n) => write_number(f, *n),
            QueryValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Formats a float the way JavaScript's `String(x)` does: `NaN`,
/// `Infinity`, no negative zero, and exponent form with an explicit sign
/// outside `[1e-6, 1e21)`.
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        return f.write_str("NaN");
    }
    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if n == 0.0 {
        return f.write_str("0");
    }
    if (1e-6..1e21).contains(&n.abs()) {
        return write!(f, "{n}");
    }
    let exp = format!("{n:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => write!(f, "{mantissa}e+{power}"),
        _ => f.write_str(&exp),
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Str(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

macro_rules! int_query_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for QueryValue {
                fn from(value: $ty) -> Self {
                    QueryValue::Int(i64::from(value))
                }
            }
        )*
    };
}

int_query_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(n) => QueryValue::Int(n),
            Err(_) => QueryValue::Str(value.to_string()),
        }
    }
}

/// An insertion-ordered list of query parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    params: Vec<(String, QueryValue)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter. Repeated keys are kept, in order.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.params.push((key.into(), value.into()));
    }

    pub fn extend(&mut self, other: Query) {
        self.params.extend(other.params);
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Serialize as `k=v&k=v` without a leading `?`.
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    encode_component(key),
                    encode_component(&value.to_string())
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K, V> FromIterator<(K, V)> for Query
where
    K: Into<String>,
    V: Into<QueryValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            params: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Percent-encode one key or value.
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// Append `query` to `url`. A missing or empty query leaves `url` unchanged.
pub fn append_query(url: &str, query: Option<&Query>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{url}?{}", query.to_query_string()),
        _ => url.to_string(),
    }
}
