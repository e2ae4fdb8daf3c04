//! Targeting Primitives for Vane
//!
//! Stateless helpers the rule evaluator uses to decide whether a condition
//! applies to the current request.
//!
//! # Features
//!
//! - **URL targets** - wildcard URL patterns and regex targets with include/exclude lists
//! - **Version ordering** - padded semantic versions that compare correctly as strings
//! - **QA overrides** - force a variation through a query-string parameter
//! - **Typed extraction** - read loosely typed configuration fields without failing
//!
//! None of these functions return errors. Malformed input is reported through
//! `vane-log` on the `vane::targeting` target and treated as a non-match.
//!
//! # URL Targeting
//!
//! ```
//! use vane_targeting::*;
//!
//! let page = Url::parse("https://example.com/pricing/").unwrap();
//!
//! assert!(eval_simple_url_target(&page, "example.com/pricing"));
//! assert!(is_url_targeted(&page, &[
//!     UrlTarget::simple("example.com/*"),
//!     UrlTarget::regex("/admin").exclude(),
//! ]));
//! ```
//!
//! # Version Conditions
//!
//! ```
//! use vane_targeting::VersionOperator;
//!
//! assert!(VersionOperator::Gte.evaluate("10.1.0", "9.8.7"));
//! assert!(VersionOperator::Lt.evaluate("2.0.0-beta", "2.0.0"));
//! ```

pub mod error;
pub mod extract;
pub mod query;
pub mod url_target;
pub mod version;

pub(crate) const LOG_TARGET: &str = "vane::targeting";

pub use error::{Result, TargetingError};
pub use extract::{
    FromJson, extract, json_bool, json_float, json_float_array, json_int, json_maybe_float,
    json_string,
};
pub use query::query_string_override;
pub use url_target::{UrlTarget, UrlTargetKind, eval_simple_url_target, is_url_targeted, url_regex};
pub use version::{VersionOperator, compare_versions, padded_version_string};

pub use url::Url;
