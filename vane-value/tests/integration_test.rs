//! Integration tests for vane-value

use std::collections::HashMap;
use vane_value::*;

#[derive(Clone, Copy)]
struct Plan(u16);

impl ValueSource for Plan {
    fn as_number(&self) -> Option<f64> {
        Some(self.0 as f64)
    }
}

struct Account {
    id: Plan,
    country: &'static str,
    emails: Vec<&'static str>,
}

impl ValueSource for Account {
    fn as_mapping(&self) -> Option<Vec<(&str, &dyn ValueSource)>> {
        Some(vec![
            ("id", &self.id as &dyn ValueSource),
            ("country", &self.country as &dyn ValueSource),
            ("emails", &self.emails as &dyn ValueSource),
        ])
    }
}

#[test]
fn test_struct_projection_through_capabilities() {
    let account = Account {
        id: Plan(7),
        country: "us",
        emails: vec!["a@example.com", "b@example.com"],
    };

    let value = Value::new(&account);

    assert_eq!(value.path(&["id"]), Value::num(7));
    assert_eq!(value.path(&["country"]), Value::str("us"));
    assert_eq!(value.path(&["emails"]), arr!["a@example.com", "b@example.com"]);
    assert_eq!(value.path(&["emails"]).to_string(), "a@example.com,b@example.com");
}

#[test]
fn test_attributes_from_decoded_json() {
    let payload = r#"{
        "user": {"id": "123", "tier": 2, "beta": false},
        "tags": ["new", "google"]
    }"#;
    let json: serde_json::Value = serde_json::from_str(payload).unwrap();
    let attributes = Value::from(json);

    assert_eq!(attributes.path(&["user", "tier"]), Value::num(2.0));
    assert_eq!(
        attributes.path(&["user", "id"]).cast(ValueType::Num),
        Value::num(123)
    );
    assert_eq!(
        attributes.path(&["user", "beta"]).cast(ValueType::Str),
        Value::str("false")
    );
    assert_eq!(
        attributes.path(&["tags"]).cast(ValueType::Str),
        Value::str("new,google")
    );
    assert_eq!(attributes.path(&["user", "missing", "x"]), Value::Null);
}

#[test]
fn test_numeric_text_is_not_equal_to_number() {
    let from_text = Value::str("10");
    let from_number = Value::num(10);

    assert!(!equal(&from_text, &from_number));
    assert!(equal(&from_text.cast(ValueType::Num), &from_number));
    assert!(equal(&from_number.cast(ValueType::Str), &from_text));
}

#[test]
fn test_map_of_vectors() {
    let groups: HashMap<String, Vec<u32>> =
        HashMap::from([("admins".to_string(), vec![1, 2]), ("guests".to_string(), vec![])]);

    let value = Value::new(&groups);

    assert_eq!(value.path(&["admins"]), arr![1, 2]);
    assert_eq!(value.path(&["guests"]).cast(ValueType::Num), Value::num(0));
    assert_eq!(value.cast(ValueType::Bool), Value::TRUE);
    assert_eq!(value.to_string(), "Object");
}

#[test]
fn test_values_are_shareable_across_threads() {
    let value = std::sync::Arc::new(obj! { "n" => 1 });
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let value = value.clone();
            std::thread::spawn(move || value.path(&["n"]).cast(ValueType::Str))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Value::str("1"));
    }
}
