//! Variant Coercion
//!
//! The cast matrix between value variants. Coercions that have no sensible
//! result produce `Null` instead of an error.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Variant tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Null,
    Bool,
    Num,
    Str,
    Arr,
    Obj,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Bool => "bool",
            ValueType::Num => "num",
            ValueType::Str => "str",
            ValueType::Arr => "arr",
            ValueType::Obj => "obj",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Variant tag of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Num(_) => ValueType::Num,
            Value::Str(_) => ValueType::Str,
            Value::Arr(_) => ValueType::Arr,
            Value::Obj(_) => ValueType::Obj,
        }
    }

    /// Coerce into the `target` variant.
    ///
    /// Bool, Num and Str casts follow the truthiness, numeric and string
    /// conversions of a scripting language. Nothing converts into `Arr` or
    /// `Obj` except the same variant, and `Obj` has no Num or Str form.
    pub fn cast(&self, target: ValueType) -> Value {
        match (self, target) {
            (_, ValueType::Null) => Value::Null,

            (Value::Null, ValueType::Bool) => Value::FALSE,
            (Value::Bool(b), ValueType::Bool) => Value::Bool(*b),
            (Value::Num(n), ValueType::Bool) => Value::Bool(*n != 0.0 && !n.is_nan()),
            (Value::Str(s), ValueType::Bool) => Value::Bool(!s.is_empty()),
            (Value::Arr(_) | Value::Obj(_), ValueType::Bool) => Value::TRUE,

            (Value::Null, ValueType::Num) => Value::Num(0.0),
            (Value::Bool(b), ValueType::Num) => Value::Num(if *b { 1.0 } else { 0.0 }),
            (Value::Num(n), ValueType::Num) => Value::Num(*n),
            (Value::Str(s), ValueType::Num) => parse_number(s).map_or(Value::Null, Value::Num),
            (Value::Arr(items), ValueType::Num) => match items.as_slice() {
                [] => Value::Num(0.0),
                [only] => only.cast(ValueType::Num),
                _ => Value::Null,
            },
            (Value::Obj(_), ValueType::Num) => Value::Null,

            (Value::Null, ValueType::Str) => Value::str("null"),
            (Value::Bool(b), ValueType::Str) => Value::Str(b.to_string()),
            (Value::Num(n), ValueType::Str) => Value::Str(number_to_string(*n)),
            (Value::Str(s), ValueType::Str) => Value::Str(s.clone()),
            (Value::Arr(items), ValueType::Str) => join_text(items).map_or(Value::Null, Value::Str),
            (Value::Obj(_), ValueType::Str) => Value::Null,

            (Value::Arr(_), ValueType::Arr) | (Value::Obj(_), ValueType::Obj) => self.clone(),
            (_, ValueType::Arr | ValueType::Obj) => Value::Null,
        }
    }
}

/// Empty (after trimming) text is zero, unparseable text is `None`.
fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse().ok()
}

// Any element without a text form (an object) makes the whole join fail.
fn join_text(items: &[Value]) -> Option<String> {
    let parts = items
        .iter()
        .map(|item| match item.cast(ValueType::Str) {
            Value::Str(s) => Some(s),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join(","))
}

/// Shortest decimal text that parses back to `n`, without exponent notation.
pub(crate) fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        // -0 renders as 0
        "0".to_string()
    } else {
        n.to_string()
    }
}
