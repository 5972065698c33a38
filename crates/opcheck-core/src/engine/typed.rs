//! Type-directed verifiers.

use crate::{
    engine::Engine,
    error::{Allowed, VerifyError},
    operator::{CanonicalOp, FamilySet, OperatorFamily, resolve_optional},
    value::{Value, canonical_cmp},
};
use tracing::trace;

const INT_STR_FAMILIES: FamilySet = FamilySet::NUMERICAL.union(FamilySet::EVAL);
const INT_DICT_FAMILIES: FamilySet = FamilySet::NUMERICAL.union(FamilySet::SEQUENCE);
const BOOL_OPERATORS: &[CanonicalOp] = &[CanonicalOp::Eq, CanonicalOp::Ne];

impl Engine {
    /// Numeric/ordinal verifier.
    ///
    /// Numerical operators coerce `expected` to an integer; evaluation
    /// operators coerce it to expression text. Anything else is rejected.
    pub fn verify_int_str(
        &self,
        value: Value,
        operator: Option<&str>,
        expected: Value,
        message: &str,
    ) -> Result<Value, VerifyError> {
        self.observe(self.int_str(value, operator, expected, message))
    }

    /// Boolean verifier: `==`/`!=` only, `expected` read through the
    /// configured truthiness interpreter.
    pub fn verify_bool(
        &self,
        value: Value,
        operator: Option<&str>,
        expected: Value,
        message: &str,
    ) -> Result<Value, VerifyError> {
        self.observe(self.boolean(value, operator, expected, message))
    }

    /// Sequence verifier for list/list and map/map operands.
    ///
    /// Lists are sorted before comparison (multiset semantics) and a
    /// one-element list is unwrapped to its element; an empty list becomes
    /// `Null`. Returns the normalized actual value. Operands are taken by
    /// value, so the caller's originals are never reordered.
    pub fn verify_sequence(
        &self,
        value: Value,
        operator: Option<&str>,
        expected: Value,
        message: &str,
    ) -> Result<Value, VerifyError> {
        self.observe(self.sequence(value, operator, expected, message))
    }

    /// Per-key numeric map verifier.
    ///
    /// Numerical operators with a non-empty expected map compare every key
    /// of `value` against the same key of `expected` and return `true`;
    /// sequence operators compare the maps whole.
    pub fn verify_int_dict(
        &self,
        value: Value,
        operator: Option<&str>,
        expected: Value,
        message: &str,
    ) -> Result<Value, VerifyError> {
        self.observe(self.int_dict(value, operator, expected, message))
    }

    fn int_str(
        &self,
        value: Value,
        operator: Option<&str>,
        expected: Value,
        message: &str,
    ) -> Result<Value, VerifyError> {
        let Some(operator) = resolve_optional(operator)? else {
            return Ok(value);
        };

        let expected = if operator.is_in(OperatorFamily::Numerical) {
            coerce_int(expected)?
        } else if operator.is_in(OperatorFamily::Eval) {
            coerce_text(expected)
        } else {
            return Err(VerifyError::not_allowed(
                operator,
                Allowed::Families(INT_STR_FAMILIES),
            ));
        };

        self.verify_resolved(value, Some(operator), expected, message)
    }

    fn boolean(
        &self,
        value: Value,
        operator: Option<&str>,
        expected: Value,
        message: &str,
    ) -> Result<Value, VerifyError> {
        let Some(operator) = resolve_optional(operator)? else {
            return Ok(value);
        };
        if !BOOL_OPERATORS.contains(&operator) {
            return Err(VerifyError::not_allowed(
                operator,
                Allowed::Operators(BOOL_OPERATORS),
            ));
        }

        let expected = Value::Bool(self.truthiness.is_truthy(&expected));
        trace!(%expected, "expected coerced to bool");

        self.verify_resolved(value, Some(operator), expected, message)
    }

    fn sequence(
        &self,
        value: Value,
        operator: Option<&str>,
        expected: Value,
        message: &str,
    ) -> Result<Value, VerifyError> {
        let operator = resolve_optional(operator)?;

        match (value, expected) {
            (Value::List(value), Value::List(expected)) => self.verify_resolved(
                normalize_list(value),
                operator,
                normalize_list(expected),
                message,
            ),
            (value @ Value::Map(_), expected @ Value::Map(_)) => {
                self.verify_resolved(value, operator, expected, message)
            }
            (value, expected) => Err(VerifyError::ShapeMismatch {
                shapes: "lists or maps",
                assertion: "sequence",
                actual: value.kind(),
                expected: expected.kind(),
            }),
        }
    }

    fn int_dict(
        &self,
        value: Value,
        operator: Option<&str>,
        expected: Value,
        message: &str,
    ) -> Result<Value, VerifyError> {
        let Some(operator) = resolve_optional(operator)? else {
            return Ok(value);
        };

        if operator.is_in(OperatorFamily::Numerical) && expected.is_truthy() {
            let (Value::Map(actual), Value::Map(expected)) = (&value, &expected) else {
                return Err(VerifyError::ShapeMismatch {
                    shapes: "maps",
                    assertion: "per-key",
                    actual: value.kind(),
                    expected: expected.kind(),
                });
            };

            for (key, actual) in actual {
                let expected = expected
                    .get(key)
                    .ok_or_else(|| VerifyError::MissingKey { key: key.clone() })?;
                trace!(%key, "checking map entry");
                self.verify_resolved(actual.clone(), Some(operator), expected.clone(), message)?;
            }

            return Ok(Value::Bool(true));
        }

        if operator.is_in(OperatorFamily::Sequence) {
            return self.verify_resolved(value, Some(operator), expected, message);
        }

        Err(VerifyError::not_allowed(
            operator,
            Allowed::Families(INT_DICT_FAMILIES),
        ))
    }
}

// Sort into canonical order, then map [] to Null and [x] to x.
fn normalize_list(mut items: Vec<Value>) -> Value {
    items.sort_by(canonical_cmp);

    match items.len() {
        0 => Value::Null,
        1 => items.pop().unwrap_or_default(),
        _ => Value::List(items),
    }
}

fn coerce_int(expected: Value) -> Result<Value, VerifyError> {
    let coerced = match &expected {
        Value::Int(n) => Some(*n),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Float(f) => float_to_int(*f),
        Value::Text(text) => text.trim().parse::<i64>().ok(),
        Value::Null | Value::List(_) | Value::Map(_) => None,
    };

    match coerced {
        Some(n) => {
            trace!(from = %expected, to = n, "expected coerced to int");
            Ok(Value::Int(n))
        }
        None => Err(VerifyError::NotAnInteger {
            value: expected.to_string(),
            kind: expected.kind(),
        }),
    }
}

// Truncates toward zero; non-finite or out-of-range floats have no integer.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn float_to_int(f: f64) -> Option<i64> {
    let truncated = f.trunc();
    (truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64)
        .then_some(truncated as i64)
}

fn coerce_text(expected: Value) -> Value {
    match expected {
        text @ Value::Text(_) => text,
        other => Value::Text(other.to_string()),
    }
}
