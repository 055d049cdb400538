//! Integration tests for the substitution contract.

use textswap::{Delimiters, Engine, EngineError};

// ============================================================================
// Helpers
// ============================================================================

fn engine_with_name() -> Engine {
    let mut engine = Engine::standard();
    engine
        .register_exact("name", false, |_: &[String]| "Alice".to_string())
        .unwrap();
    engine
}

// ============================================================================
// Totality and identity
// ============================================================================

#[test]
fn text_without_match_start_is_unchanged() {
    let engine = engine_with_name();
    let input = "no placeholders here, not even close";
    assert_eq!(engine.substitute(input), input);
}

#[test]
fn empty_input() {
    let engine = engine_with_name();
    assert_eq!(engine.substitute(""), "");
}

#[test]
fn unknown_name_is_left_unchanged() {
    let engine = engine_with_name();
    assert_eq!(engine.substitute("{#unknown}"), "{#unknown}");
}

#[test]
fn malformed_span_is_left_unchanged() {
    let engine = engine_with_name();
    // Trailing characters between params_end and match_end.
    assert_eq!(engine.substitute("{#name(x)y}"), "{#name(x)y}");
    // Empty name.
    assert_eq!(engine.substitute("{#}"), "{#}");
}

#[test]
fn substitution_with_no_registered_handlers() {
    let engine = Engine::standard();
    assert_eq!(engine.substitute("{#anything}"), "{#anything}");
}

// ============================================================================
// Arity laws
// ============================================================================

#[test]
fn zero_arity_handler_rejects_supplied_args() {
    let mut engine = Engine::standard();
    engine
        .register_exact("greeting", false, |_: &[String]| "hello".to_string())
        .unwrap();

    assert_eq!(engine.substitute("{#greeting}"), "hello");
    assert_eq!(engine.substitute("{#greeting(x)}"), "{#greeting(x)}");
}

#[test]
fn args_required_handler_rejects_missing_args() {
    let mut engine = Engine::standard();
    engine
        .register_exact("greet", true, |args: &[String]| format!("Hello, {}!", args[0]))
        .unwrap();

    assert_eq!(engine.substitute("{#greet}"), "{#greet}");
    assert_eq!(engine.substitute("{#greet(Alice)}"), "Hello, Alice!");
}

#[test]
fn empty_argument_discards_the_whole_list() {
    let mut engine = Engine::standard();
    engine
        .register_exact("greet", true, |args: &[String]| args.join("+"))
        .unwrap();

    // One empty element poisons the list; the placeholder follows the
    // no-args path and the args-required handler is never invoked.
    assert_eq!(engine.substitute("{#greet(Alice,,Bob)}"), "{#greet(Alice,,Bob)}");
}

#[test]
fn empty_argument_group_follows_no_args_path() {
    let mut engine = Engine::standard();
    engine
        .register_exact("ping", false, |_: &[String]| "pong".to_string())
        .unwrap();
    engine
        .register_exact("need", true, |args: &[String]| args.join("+"))
        .unwrap();

    assert_eq!(engine.substitute("{#ping()}"), "pong");
    assert_eq!(engine.substitute("{#need()}"), "{#need()}");
}

#[test]
fn handlers_receive_the_full_argument_list() {
    let mut engine = Engine::standard();
    engine
        .register_exact("join", true, |args: &[String]| args.join("|"))
        .unwrap();

    assert_eq!(engine.substitute("{#join(a,b,c,d)}"), "a|b|c|d");
}

// ============================================================================
// Pattern entries and priority
// ============================================================================

#[test]
fn pattern_capture_groups_reach_the_handler() {
    let mut engine = Engine::standard();
    engine
        .register_pattern(r"^url(\d+)$", false, |groups: &[String], _: &[String]| {
            format!("http://x/{}", groups[0])
        })
        .unwrap();

    assert_eq!(engine.substitute("{#url1}"), "http://x/1");
}

#[test]
fn pattern_entry_shadows_exact_entry() {
    let mut engine = Engine::standard();
    engine
        .register_exact("name", false, |_: &[String]| "exact".to_string())
        .unwrap();
    engine
        .register_pattern("^name$", false, |_: &[String], _: &[String]| {
            "pattern".to_string()
        })
        .unwrap();

    assert_eq!(engine.substitute("{#name}"), "pattern");
}

#[test]
fn pattern_arity_failure_never_reaches_exact_entry() {
    let mut engine = Engine::standard();
    engine
        .register_exact("name", false, |_: &[String]| "exact".to_string())
        .unwrap();
    engine
        .register_pattern("^name$", true, |_: &[String], args: &[String]| args.join("+"))
        .unwrap();

    // The pattern matches but requires args; the exact entry must not be
    // consulted as a fallback.
    assert_eq!(engine.substitute("{#name}"), "{#name}");
}

#[test]
fn pattern_with_args() {
    let mut engine = Engine::standard();
    engine
        .register_pattern(r"^env_(\w+)$", true, |groups: &[String], args: &[String]| {
            format!("{}={}", groups[0], args.join(","))
        })
        .unwrap();

    assert_eq!(engine.substitute("{#env_PATH(/usr/bin,/bin)}"), "PATH=/usr/bin,/bin");
    assert_eq!(engine.substitute("{#env_PATH}"), "{#env_PATH}");
}

#[test]
fn unregistered_pattern_no_longer_matches() {
    let mut engine = Engine::standard();
    engine
        .register_pattern("^x$", false, |_: &[String], _: &[String]| "X".to_string())
        .unwrap();
    assert_eq!(engine.substitute("{#x}"), "X");

    engine.unregister_pattern("^x$");
    assert_eq!(engine.substitute("{#x}"), "{#x}");
}

#[test]
fn unregistered_exact_no_longer_matches() {
    let mut engine = engine_with_name();
    assert_eq!(engine.substitute("{#name}"), "Alice");

    engine.unregister_exact("name");
    assert_eq!(engine.substitute("{#name}"), "{#name}");
}

// ============================================================================
// Span location
// ============================================================================

#[test]
fn two_spans_resolve_independently() {
    let mut engine = Engine::standard();
    engine
        .register_exact("a", false, |_: &[String]| "A".to_string())
        .unwrap();
    engine
        .register_exact("b", false, |_: &[String]| "B".to_string())
        .unwrap();

    // Non-greedy matching: the middle text must survive.
    assert_eq!(engine.substitute("{#a} middle {#b}"), "A middle B");
}

#[test]
fn resolved_and_unresolved_spans_mix() {
    let engine = engine_with_name();
    assert_eq!(
        engine.substitute("Hello {#name}, bye {#unknown}"),
        "Hello Alice, bye {#unknown}"
    );
}

#[test]
fn repeated_spans_each_resolve() {
    let engine = engine_with_name();
    assert_eq!(engine.substitute("{#name}{#name}"), "AliceAlice");
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn custom_delimiters_end_to_end() {
    let mut engine = Engine::with_delimiters(Delimiters::new("<<", ">>", "[", ";", "]")).unwrap();
    engine
        .register_exact("sum", true, |args: &[String]| {
            let total: i64 = args.iter().filter_map(|a| a.parse::<i64>().ok()).sum();
            total.to_string()
        })
        .unwrap();

    assert_eq!(engine.substitute("total: <<sum[1;2;3]>>"), "total: 6");
}

#[test]
fn reconfiguration_takes_effect_on_next_call() {
    let mut engine = engine_with_name();
    assert_eq!(engine.substitute("{#name}"), "Alice");

    engine
        .configure(Delimiters::new("%", "%", "(", ",", ")"))
        .unwrap();
    assert_eq!(engine.substitute("%name%"), "Alice");
    assert_eq!(engine.substitute("{#name}"), "{#name}");
}

#[test]
fn registration_errors() {
    let mut engine = Engine::standard();
    assert!(matches!(
        engine.register_exact("", false, |_: &[String]| String::new()),
        Err(EngineError::EmptyName)
    ));
    assert!(matches!(
        engine.register_pattern("[", false, |_: &[String], _: &[String]| String::new()),
        Err(EngineError::InvalidPattern { .. })
    ));
}

#[test]
fn handler_output_is_not_rescanned() {
    let mut engine = Engine::standard();
    engine
        .register_exact("loop", false, |_: &[String]| "{#loop}".to_string())
        .unwrap();

    // One pass: the produced text is emitted verbatim, not re-substituted.
    assert_eq!(engine.substitute("{#loop}"), "{#loop}");
}
