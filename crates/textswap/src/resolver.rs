//! Handler resolution.
//!
//! Given a decomposed `(name, args)` pair, resolution runs two ordered
//! phases. Phase 1 walks the pattern entries in registration order; the
//! first entry whose pattern matches the name decides the outcome, and an
//! arity mismatch there is final — it does not fall through to another
//! pattern or to the exact table. Phase 2, reached only when no pattern
//! matched, looks the name up by equality in the exact table.
//!
//! The arity rule is shared by both phases: a handler runs only when its
//! declared arity is exactly satisfied, so callbacks never see a partial or
//! surplus argument list.

use std::collections::HashMap;

use crate::engine::{ExactEntry, PatternEntry};

/// Resolves one placeholder to its replacement text.
///
/// Returns `None` when the placeholder is left unchanged: no entry matched,
/// or the first matching entry's arity was not satisfied.
pub(crate) fn resolve(
    patterns: &[PatternEntry],
    exact: &HashMap<String, ExactEntry>,
    name: &str,
    args: &[String],
) -> Option<String> {
    // Phase 1: pattern entries, registration order, first match decides.
    for entry in patterns {
        let Some(caps) = entry.regex.captures(name) else {
            continue;
        };
        if !arity_ok(entry.requires_args, args) {
            return None;
        }
        // Non-participating groups come through as empty strings.
        let groups: Vec<String> = caps
            .iter()
            .skip(1)
            .map(|m| m.map_or_else(String::new, |m| m.as_str().to_owned()))
            .collect();
        return Some((entry.handler)(&groups, args));
    }

    // Phase 2: exact lookup.
    let entry = exact.get(name)?;
    if !arity_ok(entry.requires_args, args) {
        return None;
    }
    Some((entry.handler)(args))
}

fn arity_ok(requires_args: bool, args: &[String]) -> bool {
    requires_args == !args.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn pattern(source: &str, requires_args: bool, tag: &'static str) -> PatternEntry {
        PatternEntry {
            source: source.to_string(),
            regex: Regex::new(source).unwrap(),
            requires_args,
            handler: Box::new(move |groups: &[String], args: &[String]| {
                format!("{tag}:{}:{}", groups.join("+"), args.join("+"))
            }),
        }
    }

    fn exact_entry(requires_args: bool, value: &'static str) -> ExactEntry {
        ExactEntry {
            requires_args,
            handler: Box::new(move |_: &[String]| value.to_string()),
        }
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn arity_table() {
        assert!(arity_ok(true, &args(&["x"])));
        assert!(arity_ok(false, &[]));
        assert!(!arity_ok(true, &[]));
        assert!(!arity_ok(false, &args(&["x"])));
    }

    #[test]
    fn exact_lookup_when_no_pattern_matches() {
        let mut exact = HashMap::new();
        exact.insert("name".to_string(), exact_entry(false, "Alice"));

        let result = resolve(&[], &exact, "name", &[]);
        assert_eq!(result, Some("Alice".to_string()));
        assert_eq!(resolve(&[], &exact, "other", &[]), None);
    }

    #[test]
    fn first_registered_pattern_wins() {
        let patterns = vec![pattern("^url", false, "first"), pattern("^url", false, "second")];
        let result = resolve(&patterns, &HashMap::new(), "url1", &[]);
        assert_eq!(result, Some("first::".to_string()));
    }

    #[test]
    fn capture_groups_are_passed_through() {
        let patterns = vec![pattern(r"^url(\d+)$", false, "p")];
        let result = resolve(&patterns, &HashMap::new(), "url42", &[]);
        assert_eq!(result, Some("p:42:".to_string()));
    }

    #[test]
    fn unmatched_group_becomes_empty_string() {
        let patterns = vec![pattern(r"^item(\d+)?(x)?$", false, "p")];
        let result = resolve(&patterns, &HashMap::new(), "item7", &[]);
        assert_eq!(result, Some("p:7+:".to_string()));
    }

    #[test]
    fn pattern_arity_failure_does_not_fall_through() {
        // The pattern matches but requires args; an exact entry with the
        // literal name exists and would accept the call. It must never run.
        let patterns = vec![pattern("^name$", true, "p")];
        let mut exact = HashMap::new();
        exact.insert("name".to_string(), exact_entry(false, "Alice"));

        assert_eq!(resolve(&patterns, &exact, "name", &[]), None);
    }

    #[test]
    fn pattern_match_is_an_unanchored_search() {
        let patterns = vec![pattern("url", false, "p")];
        assert!(resolve(&patterns, &HashMap::new(), "my_url_here", &[]).is_some());
    }

    #[test]
    fn exact_arity_mismatch_leaves_unchanged() {
        let mut exact = HashMap::new();
        exact.insert("greet".to_string(), exact_entry(true, "hi"));

        assert_eq!(resolve(&[], &exact, "greet", &[]), None);
        assert!(resolve(&[], &exact, "greet", &args(&["Alice"])).is_some());
    }
}
