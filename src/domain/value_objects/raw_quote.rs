//! # Raw Quote
//!
//! Untyped quote payload as delivered by an FX provider integration.
//!
//! Providers disagree on key names (`bid` vs `bid_rate` vs `buy_rate`) and
//! on value types (numbers, numeric strings, sometimes garbage). This module
//! offers key probing in priority order and a parse-or-zero numeric
//! coercion that never fails.
//!
//! # Examples
//!
//! ```
//! use fx_quotes::domain::value_objects::RawQuote;
//! use serde_json::json;
//!
//! let raw = RawQuote::from_value(json!({"bid_rate": "0.91", "ask": null})).unwrap();
//!
//! assert_eq!(raw.number_of(&["bid", "bid_rate"]), Some(0.91));
//! assert!(!raw.contains("ask"));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Loosely structured quote payload.
///
/// A key is *present* when it exists and holds a non-null scalar (string,
/// number or boolean). Nulls, arrays and objects are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawQuote {
    fields: Map<String, Value>,
}

impl RawQuote {
    /// Creates an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a JSON value, which must be an object.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPayload` for any non-object value.
    pub fn from_value(value: Value) -> DomainResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(DomainError::invalid_payload(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Parses a JSON document into a payload.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPayload` if the text is not valid JSON
    /// or not an object.
    pub fn from_json_str(json: &str) -> DomainResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| DomainError::invalid_payload(e.to_string()))?;
        Self::from_value(value)
    }

    /// Sets a field, returning the payload for chaining.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets a field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Returns the value under `key` if it is present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| is_scalar(v))
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns the first present value among `keys`, in order.
    #[must_use]
    pub fn first_of(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter().find_map(|key| self.get(key))
    }

    /// Returns the first present value among `keys`, coerced to `f64`.
    #[must_use]
    pub fn number_of(&self, keys: &[&str]) -> Option<f64> {
        self.first_of(keys).map(parse_or_zero)
    }

    /// Returns the first present value among `keys`, as text.
    #[must_use]
    pub fn text_of(&self, keys: &[&str]) -> Option<String> {
        self.first_of(keys).map(scalar_text)
    }

    /// Returns the number of stored fields, present or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawQuote
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl TryFrom<Value> for RawQuote {
    type Error = DomainError;

    fn try_from(value: Value) -> DomainResult<Self> {
        Self::from_value(value)
    }
}

impl fmt::Display for RawQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.fields.clone()))
    }
}

/// Coerces a scalar to `f64`, yielding `0.0` for anything unusable.
///
/// Strings are trimmed and their longest leading numeric prefix is parsed,
/// so `"1.25"` is `1.25`, `"1.25 EUR"` is `1.25` and `"n/a"` is `0.0`.
/// Booleans map to `1.0` and `0.0`.
///
/// # Examples
///
/// ```
/// use fx_quotes::domain::value_objects::raw_quote::parse_or_zero;
/// use serde_json::json;
///
/// assert_eq!(parse_or_zero(&json!(1.5)), 1.5);
/// assert_eq!(parse_or_zero(&json!(" 2e2 ")), 200.0);
/// assert_eq!(parse_or_zero(&json!("abc")), 0.0);
/// ```
#[must_use]
pub fn parse_or_zero(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => numeric_prefix(s.trim())
            .and_then(|prefix| prefix.parse::<f64>().ok())
            .unwrap_or(0.0),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    }
}

/// Returns the longest prefix of `s` shaped like a decimal float literal.
fn numeric_prefix(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let at = |i: usize| bytes.get(i).copied();
    let digits_from = |mut i: usize| {
        while at(i).is_some_and(|b| b.is_ascii_digit()) {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(at(end), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if at(end) == Some(b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }

    if mantissa_digits == 0 {
        return None;
    }

    if matches!(at(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(at(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s.get(..end)
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
