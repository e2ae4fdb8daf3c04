// Vane - client-side evaluation core for feature flags and experiments
//
// This library bundles the dynamic value model used for attributes and
// condition operands with the targeting primitives the rule evaluator is
// built on.

// Re-export logging
pub use vane_log as log;

// Re-export optional crates
#[cfg(feature = "value")]
pub use vane_value as value;

#[cfg(feature = "value")]
pub use vane_value::{arr, obj};

#[cfg(feature = "targeting")]
pub use vane_targeting as targeting;

// Prelude for common imports
pub mod prelude {
    #[cfg(feature = "value")]
    pub use crate::value::{ObjValue, Value, ValueSource, ValueType, arr, equal, obj};

    #[cfg(feature = "targeting")]
    pub use crate::targeting::{
        Url, UrlTarget, UrlTargetKind, VersionOperator, compare_versions,
        eval_simple_url_target, is_url_targeted, padded_version_string, query_string_override,
    };
}
