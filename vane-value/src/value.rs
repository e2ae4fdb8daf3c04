//! Value Core
//!
//! The six-variant value type, its constructors and display form.

use crate::object::ObjValue;
use crate::source::{Numeric, ValueSource};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered sequence of values.
pub type ArrValue = Vec<Value>;

/// Dynamically-typed value.
///
/// Numbers are always stored as `f64`, so `Value::num(10)` and
/// `Value::num(10.0)` are the same value. Values are built once and read
/// afterwards; every operation returns a new value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent value
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// Number
    Num(f64),
    /// Text
    Str(String),
    /// Ordered sequence
    Arr(ArrValue),
    /// String-keyed mapping
    Obj(ObjValue),
}

impl Value {
    pub const TRUE: Value = Value::Bool(true);
    pub const FALSE: Value = Value::Bool(false);

    pub fn null() -> Self {
        Value::Null
    }

    pub fn bool(value: bool) -> Self {
        Value::Bool(value)
    }

    /// Create a number from any primitive numeric type.
    pub fn num<N: Numeric>(value: N) -> Self {
        Value::Num(value.to_f64())
    }

    pub fn str(value: impl Into<String>) -> Self {
        Value::Str(value.into())
    }

    /// Create an array, projecting each item with [`Value::new`].
    pub fn arr<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: ValueSource,
    {
        Value::Arr(items.into_iter().map(|item| Value::new(&item)).collect())
    }

    /// Create an object, projecting each entry value with [`Value::new`].
    pub fn obj<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ValueSource,
    {
        Value::Obj(
            entries
                .into_iter()
                .map(|(key, value)| (key, Value::new(&value)))
                .collect(),
        )
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_num(&self) -> bool {
        matches!(self, Value::Num(_))
    }

    pub fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    pub fn is_arr(&self) -> bool {
        matches!(self, Value::Arr(_))
    }

    pub fn is_obj(&self) -> bool {
        matches!(self, Value::Obj(_))
    }

    /// Borrow the boolean payload without coercion.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrow the numeric payload without coercion.
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// Borrow the text payload without coercion.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_arr(&self) -> Option<&[Value]> {
        match self {
            Value::Arr(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_obj(&self) -> Option<&ObjValue> {
        match self {
            Value::Obj(fields) => Some(fields),
            _ => None,
        }
    }

    /// Follow `keys` through nested objects.
    ///
    /// Returns `None` as soon as a key is missing or a non-object is reached
    /// while keys remain. An empty key list resolves to `self`.
    pub fn lookup<K: AsRef<str>>(&self, keys: &[K]) -> Option<&Value> {
        let mut current = self;
        for key in keys {
            current = match current {
                Value::Obj(fields) => fields.get(key.as_ref())?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Like [`Value::lookup`], returning `Null` when the path does not resolve.
    pub fn path<K: AsRef<str>>(&self, keys: &[K]) -> Value {
        self.lookup(keys).cloned().unwrap_or(Value::Null)
    }
}

/// Strict structural equality.
///
/// Values of different variants are never equal, even when their text or
/// numeric renderings coincide. Object key order is irrelevant.
pub fn equal(a: &Value, b: &Value) -> bool {
    a == b
}

/// Debug-oriented rendering.
///
/// Arrays render as the comma-joined display of their items (nested arrays
/// flatten into the same line). Objects always render as `Object`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Num(n) => f.write_str(&crate::cast::number_to_string(*n)),
            Value::Str(s) => f.write_str(s),
            Value::Arr(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            Value::Obj(_) => f.write_str("Object"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Num(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::num(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<ArrValue> for Value {
    fn from(items: ArrValue) -> Self {
        Value::Arr(items)
    }
}

impl From<ObjValue> for Value {
    fn from(fields: ObjValue) -> Self {
        Value::Obj(fields)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::new(&json)
    }
}

impl<T: ValueSource> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::arr(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{arr, obj};

    #[test]
    fn test_constructors() {
        assert_eq!(Value::null(), Value::Null);
        assert!(Value::null().is_null());
        assert_eq!(Value::TRUE, Value::bool(true));
        assert_ne!(Value::TRUE, Value::FALSE);
        assert!(Value::bool(false).is_bool());
        assert!(Value::str("test").is_str());
        assert_ne!(Value::str("test"), Value::str("notest"));
        assert!(arr![10, Value::num(20), Value::str("test")].is_arr());
        assert!(obj! { "n" => 10, "a" => arr![1, "test"] }.is_obj());
    }

    #[test]
    fn test_numbers_are_canonical() {
        assert_eq!(Value::num(10), Value::num(10.0));
        assert_eq!(Value::num(10u8), Value::num(10i64));
        assert_ne!(Value::num(10.0), Value::num(10.1));
        assert!(Value::num(10).is_num());
    }

    #[test]
    fn test_equality_is_variant_strict() {
        assert!(!equal(&Value::str("10"), &Value::num(10)));
        assert!(!equal(&Value::Null, &Value::FALSE));
        assert!(!equal(&Value::num(0), &Value::FALSE));
        assert!(!equal(&arr![], &obj! {}));
    }

    #[test]
    fn test_equality_of_containers() {
        assert!(equal(&arr![1, 2, "test"], &arr![1, 2, "test"]));
        assert!(equal(&arr![1, 2, arr![10, 20]], &arr![1, 2, arr![10, 20]]));
        assert!(!equal(&arr![1, 2], &arr![2, 1]));
        assert!(!equal(&arr![1, 2], &arr![1, 2, 3]));
        assert!(equal(
            &obj! { "f1" => 1, "f2" => arr![1, 2] },
            &obj! { "f2" => arr![1, 2], "f1" => 1 },
        ));
        assert!(!equal(&obj! { "f1" => 1 }, &obj! { "f1" => 1, "f2" => 2 }));
        assert!(!equal(&obj! { "f1" => 1 }, &obj! { "f1" => "1" }));
    }

    #[test]
    fn test_accessors_do_not_coerce() {
        assert_eq!(Value::num(3).as_num(), Some(3.0));
        assert_eq!(Value::str("3").as_num(), None);
        assert_eq!(Value::str("x").as_str(), Some("x"));
        assert_eq!(Value::TRUE.as_bool(), Some(true));
        assert_eq!(Value::num(1).as_bool(), None);
        assert_eq!(arr![1].as_arr().map(|items| items.len()), Some(1));
        assert!(obj! {}.as_obj().is_some());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::TRUE.to_string(), "true");
        assert_eq!(Value::FALSE.to_string(), "false");
        assert_eq!(Value::num(100).to_string(), "100");
        assert_eq!(Value::num(10.5).to_string(), "10.5");
        assert_eq!(Value::str("ASDF").to_string(), "ASDF");
        assert_eq!(
            arr![1, "T", true, Value::Null, arr![1, 2]].to_string(),
            "1,T,true,null,1,2"
        );
        assert_eq!(obj! { "f" => 10 }.to_string(), "Object");
        assert_eq!(arr![obj! { "f" => 10 }].to_string(), "Object");
    }

    #[test]
    fn test_value_path() {
        let value = obj! {
            "user" => obj! { "name" => "Bob" },
            "score" => 5,
        };
        assert_eq!(value.path(&["user", "name"]), Value::str("Bob"));
        assert_eq!(value.path(&["score", "value"]), Value::Null);
        assert_eq!(value.path::<&str>(&[]), value);
        assert_eq!(Value::num(1).path(&["a"]), Value::Null);
        assert!(value.lookup(&["missing"]).is_none());
    }

    #[test]
    fn test_json_round_trip_shape() {
        let value: Value =
            serde_json::from_str(r#"{"a": [1, "x", null, true], "b": {"c": 2.5}}"#).unwrap();
        assert_eq!(
            value,
            obj! {
                "a" => arr![1, "x", Value::Null, true],
                "b" => obj! { "c" => 2.5 },
            }
        );

        let json = serde_json::to_value(&arr![1, "x", Value::Null]).unwrap();
        assert_eq!(json, serde_json::json!([1.0, "x", null]));
    }

    #[test]
    fn test_collect_into_array() {
        let value: Value = vec!["a", "b"].into_iter().collect();
        assert_eq!(value, arr!["a", "b"]);
    }
}
