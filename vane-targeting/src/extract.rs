//! Typed Field Extraction
//!
//! Configuration payloads come from an independently versioned schema, so a
//! field of the wrong shape must not abort evaluation. Each extractor returns
//! `None` on a mismatch and logs which type and field were affected; callers
//! decide whether to fall back to a default or skip the rule.

use crate::LOG_TARGET;
use serde_json::Value as Json;
use vane_log::warn;

/// Conversion from one decoded JSON value.
pub trait FromJson: Sized {
    fn from_json(value: &Json) -> Option<Self>;
}

impl FromJson for String {
    fn from_json(value: &Json) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromJson for bool {
    fn from_json(value: &Json) -> Option<Self> {
        value.as_bool()
    }
}

/// Numbers decode as doubles; integers are truncated toward zero.
impl FromJson for i64 {
    fn from_json(value: &Json) -> Option<Self> {
        value.as_f64().map(|n| n as i64)
    }
}

impl FromJson for f64 {
    fn from_json(value: &Json) -> Option<Self> {
        value.as_f64()
    }
}

/// Every element must be a number.
impl FromJson for Vec<f64> {
    fn from_json(value: &Json) -> Option<Self> {
        value.as_array()?.iter().map(Json::as_f64).collect()
    }
}

/// Extract a `T` from `value`, logging a diagnostic naming `type_name` and
/// `field_name` when the shape does not match.
///
/// ```
/// use serde_json::json;
/// use vane_targeting::extract;
///
/// let coverage: Option<f64> = extract(&json!(0.5), "Experiment", "coverage");
/// assert_eq!(coverage, Some(0.5));
///
/// let force: Option<bool> = extract(&json!("yes"), "FeatureRule", "force");
/// assert_eq!(force, None);
/// ```
pub fn extract<T: FromJson>(value: &Json, type_name: &str, field_name: &str) -> Option<T> {
    let extracted = T::from_json(value);
    if extracted.is_none() {
        warn!(
            target: LOG_TARGET,
            "Invalid JSON data type for {}.{}: {}",
            type_name,
            field_name,
            json_kind(value)
        );
    }
    extracted
}

pub fn json_string(value: &Json, type_name: &str, field_name: &str) -> Option<String> {
    extract(value, type_name, field_name)
}

pub fn json_bool(value: &Json, type_name: &str, field_name: &str) -> Option<bool> {
    extract(value, type_name, field_name)
}

pub fn json_int(value: &Json, type_name: &str, field_name: &str) -> Option<i64> {
    extract(value, type_name, field_name)
}

pub fn json_float(value: &Json, type_name: &str, field_name: &str) -> Option<f64> {
    extract(value, type_name, field_name)
}

/// Reads an optional numeric field, ready to store as `Option<f64>`.
///
/// A `null` is not an absent number: like any other non-number it is a type
/// mismatch and gets logged.
pub fn json_maybe_float(value: &Json, type_name: &str, field_name: &str) -> Option<f64> {
    extract(value, type_name, field_name)
}

pub fn json_float_array(value: &Json, type_name: &str, field_name: &str) -> Option<Vec<f64>> {
    extract(value, type_name, field_name)
}

fn json_kind(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
