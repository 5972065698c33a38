use crate::{
    eval::EvalError,
    operator::{CanonicalOp, FamilySet},
    value::{Value, ValueKind},
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// VerifyError
///
/// Every way a verification call can fail.
/// Configuration, type and lookup errors are test-authoring mistakes;
/// `Assertion` is the expected outcome of a correct check that did not hold.
///

#[derive(Debug, ThisError)]
pub enum VerifyError {
    #[error("unrecognized assertion operator '{token}'")]
    UnknownOperator { token: String },

    #[error("{}`{operator}` is not a valid assertion operator", message_prefix(.message))]
    InvalidOperator {
        operator: CanonicalOp,
        message: String,
    },

    #[error("operator '{operator}' is not allowed here; allowed operators: {allowed}")]
    OperatorNotAllowed {
        operator: CanonicalOp,
        allowed: Allowed,
    },

    #[error("operator '{operator}' evaluates an expression, but evaluation is disabled")]
    EvaluationDisabled { operator: CanonicalOp },

    #[error("operator '{operator}' needs an expression evaluator, but none is configured")]
    EvaluatorUnavailable { operator: CanonicalOp },

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("expected value '{value}' ({kind}) cannot be converted to an integer")]
    NotAnInteger { value: String, kind: ValueKind },

    #[error("operator '{operator}' cannot compare {actual} with {expected}")]
    IncomparableOperands {
        operator: CanonicalOp,
        actual: ValueKind,
        expected: ValueKind,
    },

    #[error(
        "both value and expected need to be {shapes} to use {assertion} assertion; their types were: {actual}, expected: {expected}"
    )]
    ShapeMismatch {
        shapes: &'static str,
        assertion: &'static str,
        actual: ValueKind,
        expected: ValueKind,
    },

    #[error("key '{key}' is missing from the expected map")]
    MissingKey { key: String },

    #[error("{0}")]
    Assertion(AssertionFailure),

    /// Raised by the expression evaluator; its Display and source are
    /// passed through untouched.
    #[error("{source}")]
    Evaluator {
        #[source]
        source: EvalError,
    },
}

impl VerifyError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::UnknownOperator { .. }
            | Self::InvalidOperator { .. }
            | Self::OperatorNotAllowed { .. }
            | Self::EvaluationDisabled { .. }
            | Self::EvaluatorUnavailable { .. }
            | Self::InvalidPattern { .. } => ErrorClass::Configuration,
            Self::NotAnInteger { .. }
            | Self::IncomparableOperands { .. }
            | Self::ShapeMismatch { .. } => ErrorClass::TypeMismatch,
            Self::MissingKey { .. } => ErrorClass::Lookup,
            Self::Assertion(_) => ErrorClass::Assertion,
            Self::Evaluator { .. } => ErrorClass::Evaluator,
        }
    }

    #[must_use]
    pub const fn is_assertion_failure(&self) -> bool {
        matches!(self, Self::Assertion(_))
    }

    /// Structured failure detail, if this is an assertion failure.
    #[must_use]
    pub const fn as_assertion(&self) -> Option<&AssertionFailure> {
        match self {
            Self::Assertion(failure) => Some(failure),
            _ => None,
        }
    }

    pub(crate) const fn not_allowed(operator: CanonicalOp, allowed: Allowed) -> Self {
        Self::OperatorNotAllowed { operator, allowed }
    }
}

// Caller context rendered in front of a diagnostic, if any.
fn message_prefix(message: &str) -> String {
    let message = message.trim_end();
    if message.is_empty() {
        String::new()
    } else {
        format!("{message} ")
    }
}

///
/// ErrorClass
///
/// Coarse classification of a `VerifyError`.
/// Callers use it to separate authoring bugs from failed checks.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorClass {
    Configuration,
    TypeMismatch,
    Lookup,
    Assertion,
    Evaluator,
}

impl ErrorClass {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::TypeMismatch => "type_mismatch",
            Self::Lookup => "lookup",
            Self::Assertion => "assertion",
            Self::Evaluator => "evaluator",
        }
    }
}

///
/// Allowed
///
/// What a type-directed verifier accepts, for `OperatorNotAllowed`.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Allowed {
    Families(FamilySet),
    Operators(&'static [CanonicalOp]),
}

impl fmt::Display for Allowed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Families(families) => write!(f, "{families}"),
            Self::Operators(ops) => {
                for (i, op) in ops.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "'{op}'")?;
                }
                Ok(())
            }
        }
    }
}

///
/// AssertionFailure
///
/// A check that evaluated to false.
/// Renders as `<message> '<actual>' <verb> '<expected>'`.
///

#[derive(Clone, Debug, PartialEq)]
pub struct AssertionFailure {
    pub message: String,
    pub actual: Value,
    pub verb: &'static str,
    pub expected: Value,
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}'{}' {} '{}'",
            message_prefix(&self.message),
            self.actual,
            self.verb,
            self.expected
        )
    }
}
