//! URL Targeting
//!
//! Decides whether the current page URL falls inside an experiment's URL
//! targets. Simple targets are URL-shaped patterns with `*` wildcards; regex
//! targets are tested against the full URL.

use crate::LOG_TARGET;
use crate::error::{Result, TargetingError};
use crate::query::parse_query;
use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;
use vane_log::{debug, warn};

/// Stand-in for `*` while the pattern is parsed as a URL. Not a legal
/// hostname in every browser, so real input cannot collide with it.
const WILDCARD: &str = "_____";

// Host-like token before the first dot, with no scheme in front of it.
static MISSING_SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^([^:/?]*)\.").unwrap());

// Relative patterns resolve against this, so a host-less pattern matches any host.
static WILDCARD_BASE: Lazy<Url> = Lazy::new(|| Url::parse("https://_____/").unwrap());

/// Kind of URL target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlTargetKind {
    /// Wildcard URL pattern, see [`eval_simple_url_target`]
    Simple,
    /// Regular expression tested against the whole URL
    Regex,
}

/// A single include or exclude URL rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlTarget {
    #[serde(rename = "type")]
    pub kind: UrlTargetKind,

    /// `false` turns the target into an exclusion
    #[serde(default = "default_include")]
    pub include: bool,

    pub pattern: String,
}

fn default_include() -> bool {
    true
}

impl UrlTarget {
    pub fn simple(pattern: impl Into<String>) -> Self {
        Self {
            kind: UrlTargetKind::Simple,
            include: true,
            pattern: pattern.into(),
        }
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        Self {
            kind: UrlTargetKind::Regex,
            include: true,
            pattern: pattern.into(),
        }
    }

    /// Turn this target into an exclusion.
    pub fn exclude(mut self) -> Self {
        self.include = false;
        self
    }

    /// Whether `url` matches the pattern, regardless of include/exclude.
    pub fn matches(&self, url: &Url) -> bool {
        match self.kind {
            UrlTargetKind::Simple => eval_simple_url_target(url, &self.pattern),
            UrlTargetKind::Regex => {
                url_regex(&self.pattern).is_some_and(|regex| regex.is_match(url.as_str()))
            }
        }
    }
}

/// Evaluate a list of URL targets.
///
/// No targets means not targeted. Any matching exclusion wins; otherwise the
/// URL is targeted when an inclusion matches or when the list holds only
/// exclusions.
pub fn is_url_targeted(url: &Url, targets: &[UrlTarget]) -> bool {
    if targets.is_empty() {
        return false;
    }

    let mut has_include_rules = false;
    let mut is_included = false;

    for target in targets {
        let matched = target.matches(url);
        if !target.include {
            if matched {
                return false;
            }
        } else {
            has_include_rules = true;
            if matched {
                is_included = true;
            }
        }
    }

    is_included || !has_include_rules
}

/// Compile an operator-supplied URL regex, logging and discarding it when
/// invalid.
pub fn url_regex(pattern: &str) -> Option<Regex> {
    match compile(pattern) {
        Ok(regex) => Some(regex),
        Err(err) => {
            warn!(target: LOG_TARGET, "{}", err);
            None
        }
    }
}

/// Match `actual` against a wildcard URL pattern such as
/// `*.example.com/pricing/*`.
///
/// Host, path, fragment (only when the pattern names one) and every query
/// parameter the pattern names are compared separately, case-insensitively,
/// and all of them must match. Leading and trailing slashes of the path are
/// optional. A malformed pattern or query string is logged and never matches.
///
/// ```
/// use url::Url;
/// use vane_targeting::eval_simple_url_target;
///
/// let url = Url::parse("https://sub.example.com/any/path").unwrap();
/// assert!(eval_simple_url_target(&url, "*.example.com/*"));
/// assert!(!eval_simple_url_target(&url, "example.com/pricing"));
/// ```
pub fn eval_simple_url_target(actual: &Url, pattern: &str) -> bool {
    match try_eval_simple_url_target(actual, pattern) {
        Ok(matched) => matched,
        Err(err) => {
            warn!(target: LOG_TARGET, "{}", err);
            false
        }
    }
}

struct Comparison {
    actual: String,
    expected: String,
    is_path: bool,
}

fn try_eval_simple_url_target(actual: &Url, pattern: &str) -> Result<bool> {
    let normalized = normalize_pattern(pattern);
    debug!(target: LOG_TARGET, "Normalized URL pattern '{}' to '{}'", pattern, normalized);

    let expected = Url::options()
        .base_url(Some(&*WILDCARD_BASE))
        .parse(&normalized)
        .map_err(|source| TargetingError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

    let mut comparisons = vec![
        Comparison {
            actual: host_with_port(actual).unwrap_or_default(),
            expected: host_with_port(&expected).unwrap_or_else(|| WILDCARD.to_string()),
            is_path: false,
        },
        Comparison {
            actual: decode(actual.path()),
            expected: decode(expected.path()),
            is_path: true,
        },
    ];

    if let Some(fragment) = expected.fragment().filter(|fragment| !fragment.is_empty()) {
        comparisons.push(Comparison {
            actual: decode(actual.fragment().unwrap_or_default()),
            expected: decode(fragment),
            is_path: false,
        });
    }

    let actual_params = first_values(parse_query(actual.query().unwrap_or_default())?);
    let expected_params = first_values(parse_query(expected.query().unwrap_or_default())?);
    for (name, value) in expected_params {
        comparisons.push(Comparison {
            actual: actual_params.get(&name).cloned().unwrap_or_default(),
            expected: value,
            is_path: false,
        });
    }

    for comparison in &comparisons {
        if !eval_url_part(&comparison.actual, &comparison.expected, comparison.is_path)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn normalize_pattern(pattern: &str) -> String {
    MISSING_SCHEME
        .replace(pattern, "https://${1}.")
        .replace('*', WILDCARD)
}

// Paths and fragments compare in decoded form, so `%7E` and `~` are the same text.
fn decode(component: &str) -> String {
    percent_decode_str(component).decode_utf8_lossy().into_owned()
}

// The url crate drops a scheme's default port, so `:443` on an https
// pattern is the same host as no port at all.
fn host_with_port(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

// Keeps the first value of repeated parameters.
fn first_values(pairs: Vec<(String, String)>) -> HashMap<String, String> {
    let mut values = HashMap::with_capacity(pairs.len());
    for (name, value) in pairs {
        values.entry(name).or_insert(value);
    }
    values
}

fn eval_url_part(actual: &str, pattern: &str, is_path: bool) -> Result<bool> {
    let mut escaped = regex::escape(pattern).replace(WILDCARD, ".*");

    if is_path {
        let trimmed = escaped.strip_prefix('/').unwrap_or(&escaped);
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
        escaped = format!("/?{}/?", trimmed);
    }

    let regex = compile(&format!("(?i)^{}$", escaped))?;
    Ok(regex.is_match(actual))
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| TargetingError::InvalidRegex {
        pattern: pattern.to_string(),
        source,
    })
}
