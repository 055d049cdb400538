//! Pattern construction and span decomposition.
//!
//! The matcher derives two regular expressions from a [`Delimiters`] value:
//!
//! 1. A **span pattern** (`MS.+?ME`) that locates candidate placeholder
//!    spans in input text. The run between the delimiters is non-greedy, so
//!    two placeholders separated by ordinary text are found as two spans,
//!    never one span swallowing both.
//! 2. An anchored **decomposition pattern**
//!    (`^MS name (?:PS args PE)? ME$`) applied to one located span to split
//!    it into a handler name and an optional raw argument group. The name is
//!    everything before the first occurrence of `params_start` (or before
//!    `match_end` when the argument syntax is disabled), and the argument
//!    group must sit flush against `match_end` — trailing characters after
//!    `params_end` make the span fail to decompose.
//!
//! A span that fails to decompose has no name and is left unchanged by the
//! engine. Both patterns are compiled once per configuration and reused for
//! every substitution call.

use regex::Regex;

use crate::config::Delimiters;
use crate::error::{EngineError, Result};

/// Compiled matching patterns for one delimiter configuration.
pub(crate) struct Matcher {
    span: Regex,
    decompose: Regex,
    params_split: String,
}

impl Matcher {
    /// Assembles and compiles the span and decomposition patterns.
    pub(crate) fn compile(delims: &Delimiters) -> Result<Self> {
        let ms = regex::escape(&delims.match_start);
        let me = regex::escape(&delims.match_end);

        let span_src = format!("{ms}.+?{me}");

        // The name runs up to the first occurrence of params_start. With the
        // argument syntax disabled there is nothing to stop at, so the name
        // is just the shortest non-empty run before match_end.
        let has_args = !delims.params_start.is_empty() && !delims.params_end.is_empty();
        let name_part = if delims.params_start.is_empty() {
            "(.+?)".to_string()
        } else {
            format!("([^{}]+)", class_escape(&delims.params_start))
        };
        let args_part = if has_args {
            format!(
                "(?:{}(.*?){})?",
                regex::escape(&delims.params_start),
                regex::escape(&delims.params_end)
            )
        } else {
            String::new()
        };
        let decompose_src = format!("^{ms}{name_part}{args_part}{me}$");

        let span = Regex::new(&span_src).map_err(EngineError::InvalidDelimiters)?;
        let decompose = Regex::new(&decompose_src).map_err(EngineError::InvalidDelimiters)?;

        Ok(Self {
            span,
            decompose,
            params_split: delims.params_split.clone(),
        })
    }

    /// The span-locating pattern.
    pub(crate) fn span(&self) -> &Regex {
        &self.span
    }

    /// Splits one matched span into a handler name and parsed arguments.
    ///
    /// Returns `None` when the span does not decompose, which the engine
    /// treats as "leave unchanged".
    pub(crate) fn decompose(&self, span: &str) -> Option<(String, Vec<String>)> {
        let caps = self.decompose.captures(span)?;
        let name = caps.get(1)?.as_str().to_owned();
        let args = self.parse_args(caps.get(2).map(|m| m.as_str()));
        Some((name, args))
    }

    /// Parses the raw argument group captured from a span.
    ///
    /// An absent or empty group means no arguments were supplied. A present
    /// group is split on `params_split`; if ANY element comes out empty the
    /// whole list is discarded, not filtered element-wise.
    fn parse_args(&self, group: Option<&str>) -> Vec<String> {
        let Some(group) = group else {
            return Vec::new();
        };
        if group.is_empty() {
            return Vec::new();
        }
        let parts: Vec<&str> = if self.params_split.is_empty() {
            vec![group]
        } else {
            group.split(self.params_split.as_str()).collect()
        };
        if parts.iter().any(|p| p.is_empty()) {
            return Vec::new();
        }
        parts.into_iter().map(str::to_owned).collect()
    }
}

/// Escapes a delimiter for use inside a negated character class, one
/// character at a time.
fn class_escape(s: &str) -> String {
    s.chars().map(|c| regex::escape(&c.to_string())).collect()
}
