//! Error types for the engine.

use thiserror::Error;

/// Errors reported when configuring the engine or registering handlers.
///
/// Substitution itself never fails: anything unresolvable at that point
/// degrades to leaving the placeholder unchanged. The only caller errors are
/// inputs that cannot produce a usable matching pattern, and those are
/// reported eagerly at configuration or registration time.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The delimiter set does not assemble into valid matching patterns.
    #[error("invalid delimiter configuration: {0}")]
    InvalidDelimiters(#[source] regex::Error),

    /// A pattern entry's key is not a valid regular expression.
    #[error("invalid handler pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The regular expression source as given to `register_pattern`.
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Exact entries must have a non-empty name.
    ///
    /// A placeholder with an empty name never decomposes, so an entry keyed
    /// by the empty string could never match; registering one is rejected
    /// rather than silently accepted.
    #[error("exact handler name must not be empty")]
    EmptyName,
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
