// Error types for targeting primitives

use thiserror::Error;

/// Failure inside a targeting primitive.
///
/// The public matching functions never return these; they log them and
/// report a non-match.
#[derive(Error, Debug)]
pub enum TargetingError {
    #[error("Failed to parse URL pattern {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to parse URL query parameters: {0}")]
    InvalidQuery(String),

    #[error("Failed to compile regexp {pattern}: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, TargetingError>;
