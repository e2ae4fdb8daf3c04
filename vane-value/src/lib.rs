//! Dynamic Values for Vane
//!
//! A closed, dynamically-typed value algebra used to represent user
//! attributes and targeting-condition operands.
//!
//! # Features
//!
//! - **Six variants** - `Null`, `Bool`, `Num`, `Str`, `Arr` and `Obj`
//! - **Coercion** - a fixed cast matrix between variants, never failing
//! - **Projection** - any host type opting into [`ValueSource`] converts with [`Value::new`]
//! - **Path lookup** - safe descent into nested objects
//!
//! # Quick Start
//!
//! ```
//! use vane_value::{arr, obj, Value, ValueType};
//!
//! let attributes = obj! {
//!     "id" => 10,
//!     "tags" => arr!["beta", "internal"],
//!     "country" => obj! { "code" => "us" },
//! };
//!
//! assert_eq!(attributes.path(&["country", "code"]), Value::str("us"));
//! assert_eq!(attributes.path(&["user", "country"]), Value::Null);
//! assert_eq!(arr!["10"].cast(ValueType::Num), Value::num(10));
//! assert_eq!(arr![1, 2, arr![3, 4]].to_string(), "1,2,3,4");
//! ```
//!
//! # Projection
//!
//! ```
//! use std::collections::HashMap;
//! use vane_value::{Value, ValueSource};
//!
//! struct Cents(u32);
//!
//! impl ValueSource for Cents {
//!     fn as_number(&self) -> Option<f64> {
//!         Some(self.0 as f64)
//!     }
//! }
//!
//! let prices = HashMap::from([("basic".to_string(), Cents(500))]);
//! assert_eq!(Value::new(&prices).path(&["basic"]), Value::num(500));
//! ```

mod cast;
mod object;
mod source;
mod value;

pub use cast::ValueType;
pub use object::ObjValue;
pub use source::{Numeric, ValueSource};
pub use value::{ArrValue, Value, equal};

/// Build a [`Value::Arr`], projecting every item with [`Value::new`].
#[macro_export]
macro_rules! arr {
    () => {
        $crate::Value::Arr(::std::vec::Vec::new())
    };
    ($($item:expr),+ $(,)?) => {
        $crate::Value::Arr(::std::vec![$($crate::Value::new(&$item)),+])
    };
}

/// Build a [`Value::Obj`], projecting every entry value with [`Value::new`].
#[macro_export]
macro_rules! obj {
    () => {
        $crate::Value::Obj($crate::ObjValue::new())
    };
    ($($key:expr => $val:expr),+ $(,)?) => {{
        let mut fields = $crate::ObjValue::new();
        $(
            fields.insert($key, $crate::Value::new(&$val));
        )+
        $crate::Value::Obj(fields)
    }};
}
