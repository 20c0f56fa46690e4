//! End-to-end expression tests — text → lexer → parser → evaluation.
//!
//! All evaluations run against a fixed tempo of 120 BPM, 4 beats per bar,
//! 192 PPQ unless a test says otherwise. At that tempo one beat is 0.5s
//! and one measure is 2.0s.

use assert_approx_eq::assert_approx_eq;
use cadence::error::ErrorKind;
use cadence::{EvalContext, Tempo, TimeExpr, TimeValue, Value};

fn tempo() -> Tempo {
    Tempo::new(120.0, 4.0, 192)
}

fn eval(source: &str) -> f64 {
    let tempo = tempo();
    let ctx = EvalContext::new(&tempo);
    TimeExpr::parse(source)
        .expect("parse failed")
        .eval(&ctx)
        .expect("eval failed")
}

fn eval_detached(source: &str) -> f64 {
    TimeExpr::parse(source)
        .expect("parse failed")
        .eval(&EvalContext::detached())
        .expect("eval failed")
}

// =============================================================================
// Literal round-trips
// =============================================================================

#[test]
fn duplet_literals() {
    assert_approx_eq!(eval("4n"), 0.5);
    assert_approx_eq!(eval("8n"), 0.25);
    assert_approx_eq!(eval("2n"), 1.0);
    // A whole note spans a full measure.
    assert_approx_eq!(eval("1n"), 2.0);
}

#[test]
fn triplet_literals() {
    assert_approx_eq!(eval("4t"), 1.0 / 3.0);
    assert_approx_eq!(eval("8t"), 1.0 / 6.0);
}

#[test]
fn measure_literals() {
    assert_approx_eq!(eval("1m"), 2.0);
    assert_approx_eq!(eval("3m"), 6.0);
}

#[test]
fn tick_literals() {
    assert_approx_eq!(eval("192i"), 0.5);
    assert_approx_eq!(eval("48i"), 0.125);
}

#[test]
fn hertz_literals() {
    assert_approx_eq!(eval("2hz"), 0.5);
    assert_approx_eq!(eval("1hz"), 1.0);
}

#[test]
fn seconds_literals() {
    assert_approx_eq!(eval("2"), 2.0);
    assert_approx_eq!(eval("1.5"), 1.5);
    assert_approx_eq!(eval("2s"), 2.0);
    assert_approx_eq!(eval("0.5s"), 0.5);
}

#[test]
fn transport_literals() {
    // 1 bar + 2 beats = 4*0.5 + 2*0.5
    assert_approx_eq!(eval("1:2:0"), 3.0);
    assert_approx_eq!(eval("1:2"), 3.0);
    assert_approx_eq!(eval("0:0:2"), 0.25);
    assert_approx_eq!(eval("2:0:0"), 4.0);
}

// =============================================================================
// Operators
// =============================================================================

#[test]
fn addition_and_subtraction() {
    assert_approx_eq!(eval("4n + 8n"), 0.75);
    assert_approx_eq!(eval("1m - 4n"), 1.5);
}

#[test]
fn multiplication_binds_before_addition() {
    // eval(1m) + eval(2n) * eval(3n)
    let expected = 2.0 + 1.0 * (4.0 / 3.0 * 0.5);
    assert_approx_eq!(eval("1m+2n*3n"), expected);
}

#[test]
fn grouping_overrides_precedence() {
    // (eval(1m) + eval(2n)) * eval(3n)
    let expected = (2.0 + 1.0) * (4.0 / 3.0 * 0.5);
    assert_approx_eq!(eval("(1m+2n)*3n"), expected);
}

#[test]
fn same_tier_is_left_associative() {
    assert_approx_eq!(eval("2-1+0.5"), 1.5);
    assert_approx_eq!(eval("2/2/2"), 0.5);
}

#[test]
fn negation() {
    assert_approx_eq!(eval("-4n"), -0.5);
    assert_approx_eq!(eval("-(4n+4n)"), -1.0);
    assert_approx_eq!(eval("1m + -4n"), 1.5);
}

#[test]
fn quantize_is_a_ratio_of_durations() {
    // 1m expressed in 8n units: 2.0 / 0.25
    assert_approx_eq!(eval("1m@8n"), 8.0);
    assert_approx_eq!(eval("4n+1m@8n"), 0.5 + 8.0);
}

#[test]
fn division() {
    assert_approx_eq!(eval("1m/4n"), 4.0);
    assert_approx_eq!(eval("2t*3"), eval("2t") * 3.0);
}

#[test]
fn from_now_adds_reference_time() {
    let tempo = tempo();
    let ctx = EvalContext::new(&tempo).with_now(10.0);
    let value = TimeExpr::parse("+4n").unwrap();
    assert_approx_eq!(value.eval(&ctx).unwrap(), 10.5);
    assert_approx_eq!(value.eval_from(&ctx, Some(3.0)).unwrap(), 3.5);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn unknown_unit_is_a_syntax_error_naming_the_remainder() {
    let err = TimeExpr::parse("4x").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
    assert!(err.to_string().contains("'4x'"), "got: {err}");
}

#[test]
fn unbalanced_parens_are_syntax_errors() {
    assert!(TimeExpr::parse("(4n + 1m").is_err());
    assert!(TimeExpr::parse("4n)").is_err());
}

#[test]
fn dangling_operator_is_a_syntax_error() {
    let err = TimeExpr::parse("4n +").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
}

#[test]
fn division_by_zero_duration_is_an_arithmetic_error() {
    let tempo = tempo();
    let ctx = EvalContext::new(&tempo);
    let err = TimeExpr::parse("4n/0").unwrap().eval(&ctx).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Arithmetic);
}

#[test]
fn quantize_by_zero_duration_is_an_arithmetic_error() {
    let tempo = tempo();
    let ctx = EvalContext::new(&tempo);
    let err = TimeExpr::parse("1m@0s").unwrap().eval(&ctx).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Arithmetic);

    let err = TimeValue::new(Value::Measures(1))
        .quantize(TimeValue::seconds(0.0))
        .eval(&ctx)
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Arithmetic);
}

#[test]
fn parse_failure_returns_no_value() {
    assert!(TimeExpr::parse("4n ** 2").is_err());
}

// =============================================================================
// Contexts
// =============================================================================

#[test]
fn eval_is_idempotent() {
    let tempo = tempo();
    let ctx = EvalContext::new(&tempo);
    let value = TimeExpr::parse("(1m+2n)*3n @ 8n").unwrap();
    let first = value.eval(&ctx).unwrap();
    let second = value.eval(&ctx).unwrap();
    assert_eq!(first, second);
}

#[test]
fn same_value_tracks_tempo_changes() {
    let mut tempo = tempo();
    let value = TimeExpr::parse("1m").unwrap();
    assert_approx_eq!(value.eval(&EvalContext::new(&tempo)).unwrap(), 2.0);
    tempo.set_bpm(60.0);
    assert_approx_eq!(value.eval(&EvalContext::new(&tempo)).unwrap(), 4.0);
}

#[test]
fn detached_context_zeroes_tempo_relative_literals() {
    assert_approx_eq!(eval_detached("4n"), 0.0);
    assert_approx_eq!(eval_detached("1m"), 0.0);
    assert_approx_eq!(eval_detached("3i"), 0.0);
    assert_approx_eq!(eval_detached("1:2:0"), 0.0);
    // Absolute units still evaluate.
    assert_approx_eq!(eval_detached("2s"), 2.0);
    assert_approx_eq!(eval_detached("2hz"), 0.5);
}

// =============================================================================
// Fluent construction
// =============================================================================

#[test]
fn fluent_chain_matches_parsed_expression() {
    let tempo = tempo();
    let ctx = EvalContext::new(&tempo);
    let built = TimeValue::new(Value::Duplet(4))
        .add(Value::Measures(1))
        .quantize(Value::Duplet(8));
    // Chained ops apply left to right: (4n + 1m) @ 8n.
    assert_approx_eq!(built.eval(&ctx).unwrap(), eval("(4n+1m)@8n"));
}

#[test]
fn fluent_from_now() {
    let tempo = tempo();
    let ctx = EvalContext::new(&tempo).with_now(2.0);
    let value = TimeValue::new(Value::Duplet(4)).from_now();
    assert_approx_eq!(value.eval(&ctx).unwrap(), 2.5);
}

#[test]
fn programmatic_construction_skips_the_grammar() {
    let tempo = tempo();
    let ctx = EvalContext::new(&tempo);
    let value: TimeValue = Value::Transport {
        bars: 1.0,
        beats: 2.0,
        sixteenths: 0.0,
    }
    .into();
    assert_approx_eq!(value.eval(&ctx).unwrap(), 3.0);
}
