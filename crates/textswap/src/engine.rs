//! The substitution engine.

use std::collections::HashMap;
use std::fmt;

use regex::{Captures, Regex};

use crate::config::Delimiters;
use crate::error::{EngineError, Result};
use crate::matcher::Matcher;
use crate::resolver;

/// Callback type for exact entries.
///
/// Receives the parsed argument list. When the entry was registered with
/// `requires_args = false` the slice is always empty; otherwise it is always
/// non-empty — the engine never invokes a handler with a mismatched arity.
pub type ExactHandler = Box<dyn Fn(&[String]) -> String + Send + Sync>;

/// Callback type for pattern entries.
///
/// Receives the capture groups extracted from the placeholder name (one
/// string per group, empty for groups that did not participate), then the
/// parsed argument list under the same arity guarantee as [`ExactHandler`].
pub type PatternHandler = Box<dyn Fn(&[String], &[String]) -> String + Send + Sync>;

/// An exact entry: matched by literal name equality.
pub(crate) struct ExactEntry {
    pub(crate) requires_args: bool,
    pub(crate) handler: ExactHandler,
}

/// A pattern entry: matched by testing a regular expression against the
/// placeholder name.
pub(crate) struct PatternEntry {
    pub(crate) source: String,
    pub(crate) regex: Regex,
    pub(crate) requires_args: bool,
    pub(crate) handler: PatternHandler,
}

/// A configurable placeholder-substitution engine.
///
/// The engine holds a delimiter configuration and two handler registries:
/// exact entries keyed by literal placeholder name, and pattern entries
/// keyed by a regular expression tested against the name. [`substitute`]
/// replaces every resolvable placeholder and leaves everything else —
/// unknown names, malformed spans, arity mismatches — byte-for-byte
/// unchanged.
///
/// Pattern entries take priority: they are consulted first, in registration
/// order, and the first one whose expression matches the name decides the
/// outcome even when its arity check fails. The exact table is only reached
/// when no pattern matches.
///
/// # Example
///
/// ```rust
/// use textswap::Engine;
///
/// let mut engine = Engine::standard();
/// engine.register_exact("name", false, |_args: &[String]| "Alice".to_string())?;
/// engine.register_exact("greet", true, |args: &[String]| {
///     format!("Hello, {}!", args.join(" and "))
/// })?;
/// engine.register_pattern(r"^url(\d+)$", false, |groups: &[String], _args: &[String]| {
///     format!("http://example.com/{}", groups[0])
/// })?;
///
/// assert_eq!(engine.substitute("{#name}"), "Alice");
/// assert_eq!(engine.substitute("{#greet(Bob,Carol)}"), "Hello, Bob and Carol!");
/// assert_eq!(engine.substitute("{#url7}"), "http://example.com/7");
/// assert_eq!(engine.substitute("{#unknown}"), "{#unknown}");
/// # Ok::<(), textswap::EngineError>(())
/// ```
///
/// # Thread Safety
///
/// Handlers are `Fn + Send + Sync`, so the engine is `Send + Sync` and
/// concurrent [`substitute`] calls are safe as long as no registration,
/// removal or reconfiguration happens in that window. The engine provides
/// no internal locking; mutation takes `&mut self`, which already enforces
/// exclusive access for single-owner use.
///
/// [`substitute`]: Engine::substitute
pub struct Engine {
    delimiters: Delimiters,
    matcher: Matcher,
    exact: HashMap<String, ExactEntry>,
    patterns: Vec<PatternEntry>,
}

impl Engine {
    /// Creates an engine with all delimiters empty.
    ///
    /// The empty configuration is degenerate ("any non-empty text" matches
    /// as a span); call [`configure`](Engine::configure) before use, or
    /// start from [`standard`](Engine::standard).
    pub fn new() -> Self {
        Self::with_delimiters(Delimiters::default()).expect("empty delimiter set always compiles")
    }

    /// Creates an engine with the standard `{#name(a,b)}` grammar.
    pub fn standard() -> Self {
        Self::with_delimiters(Delimiters::standard())
            .expect("standard delimiter set always compiles")
    }

    /// Creates an engine with the given delimiter configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDelimiters`] when the delimiters do not
    /// assemble into valid matching patterns.
    pub fn with_delimiters(delimiters: Delimiters) -> Result<Self> {
        let matcher = Matcher::compile(&delimiters)?;
        Ok(Self {
            delimiters,
            matcher,
            exact: HashMap::new(),
            patterns: Vec::new(),
        })
    }

    /// Replaces the delimiter configuration.
    ///
    /// The matching patterns are recompiled eagerly, so an unusable
    /// configuration is reported here instead of surfacing later inside
    /// [`substitute`](Engine::substitute). On error the previous
    /// configuration stays in effect. Registered handlers are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDelimiters`] when the delimiters do not
    /// assemble into valid matching patterns.
    pub fn configure(&mut self, delimiters: Delimiters) -> Result<()> {
        self.matcher = Matcher::compile(&delimiters)?;
        self.delimiters = delimiters;
        Ok(())
    }

    /// The current delimiter configuration.
    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// Registers an exact entry keyed by `name`, replacing any existing
    /// entry under the same name.
    ///
    /// `requires_args` declares the handler's arity: `true` means the
    /// placeholder must supply a non-empty argument list, `false` means it
    /// must supply none. A placeholder violating the declared arity is left
    /// unchanged and the handler is not invoked.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyName`] when `name` is empty.
    pub fn register_exact<F>(
        &mut self,
        name: impl Into<String>,
        requires_args: bool,
        handler: F,
    ) -> Result<()>
    where
        F: Fn(&[String]) -> String + Send + Sync + 'static,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(EngineError::EmptyName);
        }
        self.exact.insert(
            name,
            ExactEntry {
                requires_args,
                handler: Box::new(handler),
            },
        );
        Ok(())
    }

    /// Registers a pattern entry keyed by the regular expression source
    /// `pattern`, replacing any existing entry under the same source.
    ///
    /// Pattern entries are consulted in registration order; replacing an
    /// entry keeps its original position. The expression is tested against
    /// the placeholder name with an unanchored search — anchor it
    /// (`^url(\d+)$`) to require a full-name match. Capture groups are
    /// passed to the handler ahead of the argument list.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPattern`] when `pattern` is not a valid
    /// regular expression.
    pub fn register_pattern<F>(
        &mut self,
        pattern: impl Into<String>,
        requires_args: bool,
        handler: F,
    ) -> Result<()>
    where
        F: Fn(&[String], &[String]) -> String + Send + Sync + 'static,
    {
        let source = pattern.into();
        let regex = Regex::new(&source).map_err(|e| EngineError::InvalidPattern {
            pattern: source.clone(),
            source: e,
        })?;
        let entry = PatternEntry {
            source,
            regex,
            requires_args,
            handler: Box::new(handler),
        };
        match self.patterns.iter().position(|p| p.source == entry.source) {
            Some(i) => self.patterns[i] = entry,
            None => self.patterns.push(entry),
        }
        Ok(())
    }

    /// Removes the exact entry for `name`. No-op when absent.
    pub fn unregister_exact(&mut self, name: &str) {
        self.exact.remove(name);
    }

    /// Removes the pattern entry registered under `pattern`. No-op when
    /// absent.
    pub fn unregister_pattern(&mut self, pattern: &str) {
        self.patterns.retain(|p| p.source != pattern);
    }

    /// Replaces every resolvable placeholder in `text`.
    ///
    /// Total over all inputs and configurations: spans that fail to
    /// decompose, name no registered handler, or violate the arity rule are
    /// emitted unchanged, never reported as errors. Reads the configuration
    /// and registries without mutating them.
    ///
    /// # Panics
    ///
    /// A panicking handler propagates out of this call; the engine has no
    /// meaningful partial result to produce in that case.
    pub fn substitute(&self, text: &str) -> String {
        self.matcher
            .span()
            .replace_all(text, |caps: &Captures<'_>| {
                let raw = &caps[0];
                self.matcher
                    .decompose(raw)
                    .and_then(|(name, args)| {
                        resolver::resolve(&self.patterns, &self.exact, &name, &args)
                    })
                    .unwrap_or_else(|| raw.to_string())
            })
            .into_owned()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Handlers are opaque closures; report counts only.
        f.debug_struct("Engine")
            .field("delimiters", &self.delimiters)
            .field("exact", &self.exact.len())
            .field("patterns", &self.patterns.len())
            .finish_non_exhaustive()
    }
}
