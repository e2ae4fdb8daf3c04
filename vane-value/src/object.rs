//! Object values and path lookup.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map;

/// String-keyed mapping of values. Key order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjValue(HashMap<String, Value>);

impl ObjValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(HashMap::with_capacity(capacity))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert a field, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Walk nested objects by successive keys.
    ///
    /// Returns `Null` as soon as a key is absent, or when a non-object is
    /// reached while keys remain; a missing field and a field of the wrong
    /// shape are indistinguishable to the caller.
    pub fn path<K: AsRef<str>>(&self, keys: &[K]) -> Value {
        match keys.split_first() {
            None => Value::Obj(self.clone()),
            Some((first, rest)) => self
                .get(first.as_ref())
                .and_then(|field| field.lookup(rest))
                .cloned()
                .unwrap_or(Value::Null),
        }
    }
}

impl From<HashMap<String, Value>> for ObjValue {
    fn from(fields: HashMap<String, Value>) -> Self {
        Self(fields)
    }
}

impl From<ObjValue> for HashMap<String, Value> {
    fn from(fields: ObjValue) -> Self {
        fields.0
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ObjValue {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<'a> IntoIterator for &'a ObjValue {
    type Item = (&'a String, &'a Value);
    type IntoIter = hash_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for ObjValue {
    type Item = (String, Value);
    type IntoIter = hash_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obj;

    fn profile() -> ObjValue {
        let value = obj! {
            "user_id" => 1,
            "user" => obj! {
                "name" => "Bob",
                "age" => 25,
                "admin" => false,
            },
            "country" => obj! {
                "name" => "USA",
                "code" => "us",
            },
        };
        value.as_obj().cloned().unwrap()
    }

    #[test]
    fn test_path_resolves_leaves() {
        let fields = profile();
        assert_eq!(fields.path(&["user", "name"]), Value::str("Bob"));
        assert_eq!(fields.path(&["user", "age"]), Value::num(25));
        assert_eq!(fields.path(&["user", "admin"]), Value::FALSE);
        assert_eq!(fields.path(&["user_id"]), Value::num(1));

        let keys = vec!["country".to_string(), "code".to_string()];
        assert_eq!(fields.path(&keys), Value::str("us"));
    }

    #[test]
    fn test_path_returns_intermediate_objects() {
        let fields = profile();
        let country = fields.path(&["country"]);
        assert!(country.is_obj());
        assert_eq!(country.path(&["name"]), Value::str("USA"));
    }

    #[test]
    fn test_path_missing_or_wrong_shape_is_null() {
        let fields = profile();
        assert_eq!(fields.path(&["user", "country"]), Value::Null);
        assert_eq!(fields.path(&["missing"]), Value::Null);
        assert_eq!(fields.path(&["missing", "deeper"]), Value::Null);
        assert_eq!(fields.path(&["user_id", "value"]), Value::Null);
        assert_eq!(fields.path(&["user", "name", "first"]), Value::Null);
    }

    #[test]
    fn test_empty_path_is_self() {
        let fields = profile();
        assert_eq!(fields.path::<&str>(&[]), Value::Obj(fields.clone()));
    }

    #[test]
    fn test_insert_and_iterate() {
        let mut fields = ObjValue::new();
        assert!(fields.is_empty());
        assert_eq!(fields.insert("a", Value::num(1)), None);
        assert_eq!(fields.insert("a", Value::num(2)), Some(Value::num(1)));
        fields.insert("b".to_string(), Value::TRUE);

        assert_eq!(fields.len(), 2);
        assert!(fields.contains_key("b"));

        let mut keys: Vec<_> = fields.keys().collect();
        keys.sort();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!((&fields).into_iter().count(), 2);
    }
}
