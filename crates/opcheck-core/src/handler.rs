//! Operation handlers: one `(predicate, verb)` pair per comparison operator.
//!
//! Predicates are pure and never mutate either operand. Operators that
//! evaluate expressions (`validate`, `then`) have no handler here.

use crate::{
    operator::CanonicalOp,
    value::{Value, order_cmp, value_eq},
};
use regex::Regex;
use std::cmp::Ordering;

/// Verb phrase used when a `validate` expression evaluates falsy.
pub const VALIDATE_VERB: &str = "should validate to true with";

///
/// CompareError
///
/// Why a predicate could not produce an answer.
///

#[derive(Debug)]
pub enum CompareError {
    /// The operands have no meaning under this operator.
    Incomparable,
    /// The expected operand is not a valid regular expression.
    Pattern(regex::Error),
}

pub type Predicate = fn(&Value, &Value) -> Result<bool, CompareError>;

///
/// Handler
///

#[derive(Clone, Copy, Debug)]
pub struct Handler {
    pub predicate: Predicate,
    pub verb: &'static str,
}

impl Handler {
    pub fn check(&self, actual: &Value, expected: &Value) -> Result<bool, CompareError> {
        (self.predicate)(actual, expected)
    }
}

const fn handler(predicate: Predicate, verb: &'static str) -> Handler {
    Handler { predicate, verb }
}

pub const HANDLERS: &[(CanonicalOp, Handler)] = &[
    (CanonicalOp::Eq, handler(eq, "should be")),
    (CanonicalOp::Ne, handler(ne, "should not be")),
    (CanonicalOp::Lt, handler(lt, "should be less than")),
    (CanonicalOp::Gt, handler(gt, "should be greater than")),
    (CanonicalOp::Le, handler(le, "should be less than or equal")),
    (CanonicalOp::Ge, handler(ge, "should be greater than or equal")),
    (CanonicalOp::Contains, handler(contains, "should contain")),
    (CanonicalOp::StartsWith, handler(starts_with, "should start with")),
    (CanonicalOp::EndsWith, handler(ends_with, "should end with")),
    (CanonicalOp::Matches, handler(matches, "should match")),
];

/// Look up the handler registered for `op`.
#[must_use]
pub fn lookup(op: CanonicalOp) -> Option<&'static Handler> {
    HANDLERS
        .iter()
        .find(|(candidate, _)| *candidate == op)
        .map(|(_, handler)| handler)
}

// Numbers compare by value; any other kind mismatch is never equal.
#[allow(clippy::unnecessary_wraps)]
fn eq(actual: &Value, expected: &Value) -> Result<bool, CompareError> {
    Ok(value_eq(actual, expected))
}

fn ne(actual: &Value, expected: &Value) -> Result<bool, CompareError> {
    eq(actual, expected).map(|equal| !equal)
}

fn ordered(actual: &Value, expected: &Value) -> Result<Ordering, CompareError> {
    order_cmp(actual, expected).ok_or(CompareError::Incomparable)
}

fn lt(actual: &Value, expected: &Value) -> Result<bool, CompareError> {
    ordered(actual, expected).map(Ordering::is_lt)
}

fn gt(actual: &Value, expected: &Value) -> Result<bool, CompareError> {
    ordered(actual, expected).map(Ordering::is_gt)
}

fn le(actual: &Value, expected: &Value) -> Result<bool, CompareError> {
    ordered(actual, expected).map(Ordering::is_le)
}

fn ge(actual: &Value, expected: &Value) -> Result<bool, CompareError> {
    ordered(actual, expected).map(Ordering::is_ge)
}

fn contains(actual: &Value, expected: &Value) -> Result<bool, CompareError> {
    match (actual, expected) {
        (Value::Text(haystack), Value::Text(needle)) => Ok(haystack.contains(needle.as_str())),
        (Value::List(items), needle) => Ok(items.iter().any(|item| value_eq(item, needle))),
        (Value::Map(map), Value::Text(key)) => Ok(map.contains_key(key)),
        _ => Err(CompareError::Incomparable),
    }
}

fn text_pair<'a>(actual: &'a Value, expected: &'a Value) -> Result<(&'a str, &'a str), CompareError> {
    match (actual, expected) {
        (Value::Text(actual), Value::Text(expected)) => Ok((actual, expected)),
        _ => Err(CompareError::Incomparable),
    }
}

fn search(pattern: &str, haystack: &str) -> Result<bool, CompareError> {
    let regex = Regex::new(pattern).map_err(CompareError::Pattern)?;

    Ok(regex.is_match(haystack))
}

// An anchored match on the escaped literal is a plain prefix test.
fn starts_with(actual: &Value, expected: &Value) -> Result<bool, CompareError> {
    let (actual, expected) = text_pair(actual, expected)?;

    Ok(actual.starts_with(expected))
}

fn ends_with(actual: &Value, expected: &Value) -> Result<bool, CompareError> {
    let (actual, expected) = text_pair(actual, expected)?;

    Ok(actual.ends_with(expected))
}

// Unanchored search; inline flags such as (?m) and (?i) come from the pattern.
fn matches(actual: &Value, expected: &Value) -> Result<bool, CompareError> {
    let (actual, pattern) = text_pair(actual, expected)?;

    search(pattern, actual)
}
