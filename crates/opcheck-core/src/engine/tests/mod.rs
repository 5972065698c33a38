mod property;

use crate::{error::VerifyError, value::Value};

/// Assert a check passes, then that swapping in `invalid` fails it.
fn validate_operator(
    verify: impl Fn(Value, Option<&str>, Value) -> Result<Value, VerifyError>,
    operator: &str,
    actual: Value,
    expected: Value,
    invalid: Value,
) {
    if let Err(err) = verify(actual.clone(), Some(operator), expected.clone()) {
        panic!("'{actual}' {operator} '{expected}' should hold: {err}");
    }

    match verify(actual.clone(), Some(operator), invalid.clone()) {
        Err(VerifyError::Assertion(_)) => {}
        other => panic!("'{actual}' {operator} '{invalid}' should fail the assertion, got {other:?}"),
    }
}
