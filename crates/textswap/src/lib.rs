//! Textswap - configurable placeholder substitution.
//!
//! Textswap replaces delimited placeholders in text with values produced by
//! registered handlers. A placeholder is a span like `{#name}` or
//! `{#greet(Alice,Bob)}`: a handler name, optionally followed by a
//! positional argument list. Handlers are registered under either a literal
//! name (an *exact* entry) or a regular expression tested against the name
//! (a *pattern* entry, whose capture groups are passed to the handler).
//!
//! # Quick Start
//!
//! ```rust
//! use textswap::Engine;
//!
//! let mut engine = Engine::standard();
//!
//! // Exact entry: replaces {#name} wholesale.
//! engine.register_exact("name", false, |_args: &[String]| "Alice".to_string())?;
//!
//! // Pattern entry: groups captured from the name reach the handler.
//! engine.register_pattern(r"^url(\d+)$", false, |groups: &[String], _args: &[String]| {
//!     format!("http://example.com/{}", groups[0])
//! })?;
//!
//! let out = engine.substitute("Hi {#name}, see {#url1} (and {#unknown})");
//! assert_eq!(out, "Hi Alice, see http://example.com/1 (and {#unknown})");
//! # Ok::<(), textswap::EngineError>(())
//! ```
//!
//! # Resolution
//!
//! For every located span the engine decomposes the placeholder into a name
//! and an argument list, then resolves it in two ordered phases:
//!
//! 1. **Pattern entries**, in registration order. The first entry whose
//!    expression matches the name decides the outcome — even when its arity
//!    check fails, in which case the span is left unchanged without trying
//!    anything else.
//! 2. **Exact entries**, by literal name equality, only when no pattern
//!    matched.
//!
//! The arity rule is strict in both directions: a handler registered with
//! `requires_args = true` runs only when the placeholder supplies a
//! non-empty argument list, and one registered with `requires_args = false`
//! runs only when it supplies none. Anything else leaves the span untouched,
//! so handlers can rely on their declared arity being exactly satisfied.
//!
//! # Arguments
//!
//! The argument list is the text between `params_start` and `params_end`,
//! split on `params_split`. Validation is all-or-nothing: if any split
//! element is empty (`{#greet(Alice,,Bob)}`), the entire list is discarded
//! and the placeholder follows the no-arguments path.
//!
//! # Totality
//!
//! [`Engine::substitute`] never fails. Unknown names, malformed spans and
//! arity mismatches all degrade to emitting the original span unchanged;
//! the only reportable errors are configuration inputs that cannot produce
//! a usable matching pattern, raised eagerly at configure/registration time.

mod config;
mod engine;
mod error;
mod matcher;
mod random;
mod resolver;

// Re-export public API
pub use config::Delimiters;
pub use engine::{Engine, ExactHandler, PatternHandler};
pub use error::{EngineError, Result};
pub use random::random_string;
