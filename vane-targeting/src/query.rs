//! Query-string handling: forced variations and strict parameter parsing.

use crate::LOG_TARGET;
use crate::error::{Result, TargetingError};
use url::Url;
use vane_log::debug;

/// Variation forced through the URL query string.
///
/// An operator can pin a variation for manual QA with `?<id>=<index>`. The
/// parameter must appear exactly once, hold an integer and satisfy
/// `0 <= index < num_variations`; anything else means no override.
///
/// ```
/// use url::Url;
/// use vane_targeting::query_string_override;
///
/// let url = Url::parse("http://localhost/?my-test=1").unwrap();
/// assert_eq!(query_string_override("my-test", Some(&url), 2), Some(1));
/// assert_eq!(query_string_override("other", Some(&url), 2), None);
/// ```
pub fn query_string_override(id: &str, url: Option<&Url>, num_variations: usize) -> Option<usize> {
    let url = url?;

    let mut values = url
        .query_pairs()
        .filter(|(key, _)| key == id)
        .map(|(_, value)| value);
    let value = values.next()?;
    if values.next().is_some() {
        debug!(target: LOG_TARGET, "Ignoring repeated override parameter '{}'", id);
        return None;
    }

    let variation = value.parse::<i64>().ok()?;
    usize::try_from(variation)
        .ok()
        .filter(|variation| *variation < num_variations)
}

/// Parse `application/x-www-form-urlencoded` text, rejecting `;` separators
/// and malformed percent escapes instead of skipping them.
pub(crate) fn parse_query(raw: &str) -> Result<Vec<(String, String)>> {
    if raw.contains(';') {
        return Err(TargetingError::InvalidQuery(format!(
            "invalid semicolon separator in query: {}",
            raw
        )));
    }

    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return Err(TargetingError::InvalidQuery(format!(
                    "invalid escape in query: {}",
                    raw
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    Ok(url::form_urlencoded::parse(bytes).into_owned().collect())
}
