//! Delimiter configuration for the substitution engine.

/// The five delimiter strings that define the placeholder grammar.
///
/// `match_start` and `match_end` bracket an entire placeholder span.
/// `params_start`, `params_split` and `params_end` bracket and separate the
/// optional argument list inside a span. All five are plain strings; the
/// engine escapes them when assembling its matching patterns, so values like
/// `"("` need no regex escaping.
///
/// An empty string disables that delimiter's role: empty `params_start` or
/// `params_end` turns the argument syntax off entirely, and empty
/// `match_start`/`match_end` degenerate to "any non-empty text" — valid,
/// but rarely what you want. The fields are deliberately not cross-validated
/// (nothing stops `params_start == params_end`).
///
/// # Example
///
/// ```rust
/// use textswap::Delimiters;
///
/// // <<name|a;b>> style placeholders
/// let delims = Delimiters::new("<<", ">>", "|", ";", "");
/// assert_eq!(delims.match_start, "<<");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delimiters {
    /// Opens a placeholder span.
    pub match_start: String,
    /// Closes a placeholder span.
    pub match_end: String,
    /// Opens the argument list inside a span.
    pub params_start: String,
    /// Separates arguments inside the list.
    pub params_split: String,
    /// Closes the argument list.
    pub params_end: String,
}

impl Delimiters {
    /// Creates a delimiter set from the five fragments.
    pub fn new(
        match_start: impl Into<String>,
        match_end: impl Into<String>,
        params_start: impl Into<String>,
        params_split: impl Into<String>,
        params_end: impl Into<String>,
    ) -> Self {
        Self {
            match_start: match_start.into(),
            match_end: match_end.into(),
            params_start: params_start.into(),
            params_split: params_split.into(),
            params_end: params_end.into(),
        }
    }

    /// The `{#name(a,b)}` grammar used throughout the documentation.
    pub fn standard() -> Self {
        Self::new("{#", "}", "(", ",", ")")
    }
}
