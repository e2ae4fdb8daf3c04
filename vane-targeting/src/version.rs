//! Version Ordering
//!
//! Semantic versions are compared as plain strings after padding, so rules
//! can order `9.0.0` before `10.0.0` and a pre-release before its release.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sorts after every ASCII pre-release tag.
const RELEASE_MARKER: &str = "~";

const NUMERIC_WIDTH: usize = 5;

/// Pad a version for ordinal comparison.
///
/// Strips a leading `v` and any `+build` metadata, splits on `.` and `-`,
/// appends a release marker when there is no pre-release tag, and
/// right-aligns numeric parts to a fixed width. The result is not meant for
/// display.
///
/// ```
/// use vane_targeting::padded_version_string;
///
/// assert_eq!(padded_version_string("v1.2.3+build7"), "    1-    2-    3-~");
/// assert!(padded_version_string("9.0.0") < padded_version_string("10.0.0"));
/// assert!(padded_version_string("1.0.0-beta") < padded_version_string("1.0.0"));
/// ```
pub fn padded_version_string(input: &str) -> String {
    let stripped = input.strip_prefix('v').unwrap_or(input);
    let stripped = stripped
        .split_once('+')
        .map_or(stripped, |(version, _build)| version);

    let mut parts: Vec<&str> = stripped.split(['.', '-']).collect();
    if parts.len() == 3 {
        parts.push(RELEASE_MARKER);
    }

    parts
        .into_iter()
        .map(|part| {
            if !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()) {
                format!("{:>width$}", part, width = NUMERIC_WIDTH)
            } else {
                part.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Order two version strings by their padded forms.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    padded_version_string(a).cmp(&padded_version_string(b))
}

/// Version comparison operator used by targeting conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VersionOperator {
    #[serde(rename = "$veq")]
    Eq,
    #[serde(rename = "$vne")]
    Ne,
    #[serde(rename = "$vgt")]
    Gt,
    #[serde(rename = "$vgte")]
    Gte,
    #[serde(rename = "$vlt")]
    Lt,
    #[serde(rename = "$vlte")]
    Lte,
}

impl VersionOperator {
    /// Apply the operator as `actual <op> expected`.
    pub fn evaluate(self, actual: &str, expected: &str) -> bool {
        let ordering = compare_versions(actual, expected);
        match self {
            VersionOperator::Eq => ordering == Ordering::Equal,
            VersionOperator::Ne => ordering != Ordering::Equal,
            VersionOperator::Gt => ordering == Ordering::Greater,
            VersionOperator::Gte => ordering != Ordering::Less,
            VersionOperator::Lt => ordering == Ordering::Less,
            VersionOperator::Lte => ordering != Ordering::Greater,
        }
    }
}
