//! Host Value Projection
//!
//! [`Value::new`] converts arbitrary host data into a [`Value`]. Types take
//! part by implementing [`ValueSource`] and exposing whichever canonical
//! projections make sense for them; the projector tries the capabilities in a
//! fixed order and falls back to `Null` when none applies.

use crate::object::ObjValue;
use crate::value::Value;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

/// Capability-based conversion into a [`Value`].
///
/// Every method defaults to `None`. Capabilities are consulted in the order
/// `as_value`, `as_bool`, `as_number`, `as_text`, `as_sequence`,
/// `as_mapping`; the first one returning `Some` decides the variant.
///
/// ```
/// use vane_value::{Value, ValueSource};
///
/// struct Tier(u8);
///
/// impl ValueSource for Tier {
///     fn as_number(&self) -> Option<f64> {
///         Some(self.0 as f64)
///     }
/// }
///
/// assert_eq!(Value::new(&Tier(3)), Value::num(3));
/// ```
pub trait ValueSource {
    /// A ready-made value, used as-is.
    fn as_value(&self) -> Option<Value> {
        None
    }

    fn as_bool(&self) -> Option<bool> {
        None
    }

    fn as_number(&self) -> Option<f64> {
        None
    }

    fn as_text(&self) -> Option<Cow<'_, str>> {
        None
    }

    fn as_sequence(&self) -> Option<Vec<&dyn ValueSource>> {
        None
    }

    fn as_mapping(&self) -> Option<Vec<(&str, &dyn ValueSource)>> {
        None
    }
}

impl Value {
    /// Recursively project a host value.
    ///
    /// Never fails: data exposing no capability becomes `Null`.
    pub fn new<T: ValueSource + ?Sized>(source: &T) -> Value {
        if let Some(value) = source.as_value() {
            return value;
        }
        if let Some(b) = source.as_bool() {
            return Value::Bool(b);
        }
        if let Some(n) = source.as_number() {
            return Value::Num(n);
        }
        if let Some(text) = source.as_text() {
            return Value::Str(text.into_owned());
        }
        if let Some(items) = source.as_sequence() {
            return Value::Arr(items.into_iter().map(|item| Value::new(item)).collect());
        }
        if let Some(entries) = source.as_mapping() {
            return Value::Obj(
                entries
                    .into_iter()
                    .map(|(key, item)| (key, Value::new(item)))
                    .collect(),
            );
        }
        Value::Null
    }
}

/// Primitive numeric types, all stored as `f64`.
pub trait Numeric: Copy {
    fn to_f64(self) -> f64;
}

macro_rules! numeric {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Numeric for $ty {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }

            impl ValueSource for $ty {
                fn as_number(&self) -> Option<f64> {
                    Some(self.to_f64())
                }
            }
        )+
    };
}

numeric!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl ValueSource for () {}

impl ValueSource for bool {
    fn as_bool(&self) -> Option<bool> {
        Some(*self)
    }
}

impl ValueSource for str {
    fn as_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self))
    }
}

impl ValueSource for String {
    fn as_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_str()))
    }
}

impl ValueSource for Cow<'_, str> {
    fn as_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(&**self))
    }
}

impl ValueSource for char {
    fn as_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Owned(self.to_string()))
    }
}

impl ValueSource for Value {
    fn as_value(&self) -> Option<Value> {
        Some(self.clone())
    }
}

impl ValueSource for ObjValue {
    fn as_value(&self) -> Option<Value> {
        Some(Value::Obj(self.clone()))
    }
}

// Absence projects to Null, presence to the wrapped value.
impl<T: ValueSource> ValueSource for Option<T> {
    fn as_value(&self) -> Option<Value> {
        Some(match self {
            Some(inner) => Value::new(inner),
            None => Value::Null,
        })
    }
}

impl<T: ValueSource + ?Sized> ValueSource for &T {
    fn as_value(&self) -> Option<Value> {
        Some(Value::new(*self))
    }
}

impl<T: ValueSource + ?Sized> ValueSource for Box<T> {
    fn as_value(&self) -> Option<Value> {
        Some(Value::new(&**self))
    }
}

impl<T: ValueSource + ?Sized> ValueSource for Rc<T> {
    fn as_value(&self) -> Option<Value> {
        Some(Value::new(&**self))
    }
}

impl<T: ValueSource + ?Sized> ValueSource for Arc<T> {
    fn as_value(&self) -> Option<Value> {
        Some(Value::new(&**self))
    }
}

impl<T: ValueSource> ValueSource for [T] {
    fn as_sequence(&self) -> Option<Vec<&dyn ValueSource>> {
        Some(self.iter().map(|item| item as &dyn ValueSource).collect())
    }
}

impl<T: ValueSource, const N: usize> ValueSource for [T; N] {
    fn as_sequence(&self) -> Option<Vec<&dyn ValueSource>> {
        self.as_slice().as_sequence()
    }
}

impl<T: ValueSource> ValueSource for Vec<T> {
    fn as_sequence(&self) -> Option<Vec<&dyn ValueSource>> {
        self.as_slice().as_sequence()
    }
}

impl<T: ValueSource> ValueSource for VecDeque<T> {
    fn as_sequence(&self) -> Option<Vec<&dyn ValueSource>> {
        Some(self.iter().map(|item| item as &dyn ValueSource).collect())
    }
}

impl<K, T, S> ValueSource for HashMap<K, T, S>
where
    K: AsRef<str>,
    T: ValueSource,
    S: BuildHasher,
{
    fn as_mapping(&self) -> Option<Vec<(&str, &dyn ValueSource)>> {
        Some(
            self.iter()
                .map(|(key, item)| (key.as_ref(), item as &dyn ValueSource))
                .collect(),
        )
    }
}

impl<K, T> ValueSource for BTreeMap<K, T>
where
    K: AsRef<str>,
    T: ValueSource,
{
    fn as_mapping(&self) -> Option<Vec<(&str, &dyn ValueSource)>> {
        Some(
            self.iter()
                .map(|(key, item)| (key.as_ref(), item as &dyn ValueSource))
                .collect(),
        )
    }
}

/// Decoded JSON shares the six value shapes; numbers become `f64`.
impl ValueSource for serde_json::Value {
    fn as_bool(&self) -> Option<bool> {
        serde_json::Value::as_bool(self)
    }

    fn as_number(&self) -> Option<f64> {
        serde_json::Value::as_f64(self)
    }

    fn as_text(&self) -> Option<Cow<'_, str>> {
        serde_json::Value::as_str(self).map(Cow::Borrowed)
    }

    fn as_sequence(&self) -> Option<Vec<&dyn ValueSource>> {
        serde_json::Value::as_array(self)
            .map(|items| items.iter().map(|item| item as &dyn ValueSource).collect())
    }

    fn as_mapping(&self) -> Option<Vec<(&str, &dyn ValueSource)>> {
        serde_json::Value::as_object(self).map(|fields| {
            fields
                .iter()
                .map(|(key, item)| (key.as_str(), item as &dyn ValueSource))
                .collect()
        })
    }
}
