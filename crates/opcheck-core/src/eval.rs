//! Capabilities the engine consumes but does not implement: expression
//! evaluation and textual truthiness.

use crate::value::Value;

/// Error raised by an `Evaluator`. The engine never wraps or inspects it.
pub type EvalError = Box<dyn std::error::Error + Send + Sync>;

///
/// EvalContext
///
/// Variables visible to one evaluation call.
/// Exactly one name is bound: `value`, the actual operand.
///

#[derive(Clone, Copy, Debug)]
pub struct EvalContext<'a> {
    value: &'a Value,
}

impl<'a> EvalContext<'a> {
    /// Name the actual operand is bound to.
    pub const VALUE: &'static str = "value";

    #[must_use]
    pub const fn new(value: &'a Value) -> Self {
        Self { value }
    }

    #[must_use]
    pub const fn value(&self) -> &'a Value {
        self.value
    }

    /// Look up a bound variable by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        (name == Self::VALUE).then_some(self.value)
    }
}

///
/// Evaluator
///
/// Evaluates expression text with `value` bound, returning its result.
/// Implementations may have side effects; the engine calls them
/// synchronously and imposes no timeout.
///

pub trait Evaluator: Send + Sync {
    fn evaluate(&self, expression: &str, context: &EvalContext<'_>) -> Result<Value, EvalError>;
}

impl<F> Evaluator for F
where
    F: Fn(&str, &EvalContext<'_>) -> Result<Value, EvalError> + Send + Sync,
{
    fn evaluate(&self, expression: &str, context: &EvalContext<'_>) -> Result<Value, EvalError> {
        self(expression, context)
    }
}

///
/// Truthiness
///
/// Maps a loosely typed operand to a boolean for the boolean verifier.
///

pub trait Truthiness: Send + Sync {
    fn is_truthy(&self, value: &Value) -> bool;
}

/// Spellings read as false when no configuration overrides them.
pub const DEFAULT_FALSE_STRINGS: &[&str] = &["FALSE", "NONE", "NO", "OFF", "0", ""];

///
/// TextualTruthiness
///
/// Text is false iff it matches one of `false_strings` (case-insensitive,
/// surrounding whitespace ignored); other values use structural truthiness.
///

#[derive(Clone, Debug)]
pub struct TextualTruthiness {
    false_strings: Vec<String>,
}

impl TextualTruthiness {
    #[must_use]
    pub fn new<I, S>(false_strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            false_strings: false_strings
                .into_iter()
                .map(|s| s.as_ref().trim().to_uppercase())
                .collect(),
        }
    }
}

impl Default for TextualTruthiness {
    fn default() -> Self {
        Self::new(DEFAULT_FALSE_STRINGS)
    }
}

impl Truthiness for TextualTruthiness {
    fn is_truthy(&self, value: &Value) -> bool {
        match value {
            Value::Text(text) => {
                let text = text.trim().to_uppercase();
                !self.false_strings.iter().any(|candidate| *candidate == text)
            }
            other => other.is_truthy(),
        }
    }
}
