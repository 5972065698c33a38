//! The verification engine.
//!
//! `verify` is the generic verifier; `verify_int_str`, `verify_bool`,
//! `verify_sequence` and `verify_int_dict` validate and coerce operands for
//! one value type before delegating to it. All of them resolve the
//! operator token first, so unknown tokens fail before any other work.

mod typed;

#[cfg(test)]
mod tests;

use crate::{
    config::EngineConfig,
    error::{AssertionFailure, VerifyError},
    eval::{EvalContext, Evaluator, Truthiness},
    handler::{self, CompareError, VALIDATE_VERB},
    obs::{AssertionEvent, MetricsSink},
    operator::{CanonicalOp, resolve_optional},
    value::Value,
};
use std::{fmt, sync::Arc};
use tracing::debug;

///
/// Engine
///
/// Stateless between calls; cheap to clone and safe to share across
/// threads. Each call consumes its operands and returns the (possibly
/// transformed) actual value on success.
///

#[derive(Clone)]
pub struct Engine {
    config: Arc<EngineConfig>,
    evaluator: Option<Arc<dyn Evaluator>>,
    truthiness: Arc<dyn Truthiness>,
    metrics: Option<Arc<dyn MetricsSink>>,
}

impl Engine {
    /// Engine with default configuration and no evaluator.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    #[must_use]
    pub fn from_config(config: EngineConfig) -> Self {
        Self::builder().config(config).build()
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generic verifier.
    ///
    /// - no operator: returns `value` unchanged
    /// - `then`: returns the evaluator's result for `expected` with `value` bound
    /// - `validate`: fails unless that result is truthy
    /// - otherwise: applies the operator's handler and returns `value` if it holds
    pub fn verify(
        &self,
        value: Value,
        operator: Option<&str>,
        expected: Value,
        message: &str,
    ) -> Result<Value, VerifyError> {
        self.observe(
            resolve_optional(operator)
                .and_then(|operator| self.verify_resolved(value, operator, expected, message)),
        )
    }

    pub(crate) fn verify_resolved(
        &self,
        value: Value,
        operator: Option<CanonicalOp>,
        expected: Value,
        message: &str,
    ) -> Result<Value, VerifyError> {
        let Some(operator) = operator else {
            return Ok(value);
        };

        match operator {
            CanonicalOp::Then => {
                let result = self.evaluate(operator, &value, &expected)?;
                debug!(%operator, actual = %value, result = %result, "expression transformed value");
                self.record(AssertionEvent::Transformed { operator });

                Ok(result)
            }
            CanonicalOp::Validate => {
                let result = self.evaluate(operator, &value, &expected)?;
                self.conclude(operator, result.is_truthy(), value, VALIDATE_VERB, expected, message)
            }
            _ => {
                let handler =
                    handler::lookup(operator).ok_or_else(|| VerifyError::InvalidOperator {
                        operator,
                        message: message.to_string(),
                    })?;

                let holds = handler
                    .check(&value, &expected)
                    .map_err(|err| compare_error(err, operator, &value, &expected))?;

                self.conclude(operator, holds, value, handler.verb, expected, message)
            }
        }
    }

    fn evaluate(
        &self,
        operator: CanonicalOp,
        value: &Value,
        expected: &Value,
    ) -> Result<Value, VerifyError> {
        if !self.config.evaluation.allow {
            return Err(VerifyError::EvaluationDisabled { operator });
        }
        let evaluator = self
            .evaluator
            .as_ref()
            .ok_or(VerifyError::EvaluatorUnavailable { operator })?;

        let expression = match expected {
            Value::Text(text) => text.clone(),
            other => other.to_string(),
        };

        evaluator
            .evaluate(&expression, &EvalContext::new(value))
            .map_err(|source| VerifyError::Evaluator { source })
    }

    // Turn a predicate outcome into the call result.
    fn conclude(
        &self,
        operator: CanonicalOp,
        holds: bool,
        value: Value,
        verb: &'static str,
        expected: Value,
        message: &str,
    ) -> Result<Value, VerifyError> {
        if holds {
            debug!(%operator, actual = %value, expected = %expected, "assertion passed");
            self.record(AssertionEvent::Passed { operator });

            return Ok(value);
        }

        debug!(%operator, actual = %value, expected = %expected, "assertion failed");
        self.record(AssertionEvent::Failed { operator });

        Err(VerifyError::Assertion(AssertionFailure {
            message: message.to_string(),
            actual: value,
            verb,
            expected,
        }))
    }

    // Record every non-assertion failure leaving a public entry point.
    fn observe(&self, outcome: Result<Value, VerifyError>) -> Result<Value, VerifyError> {
        if let Err(err) = &outcome
            && !err.is_assertion_failure()
        {
            let class = err.class();
            debug!(class = class.label(), error = %err, "verification rejected");
            self.record(AssertionEvent::Rejected { class });
        }

        outcome
    }

    fn record(&self, event: AssertionEvent) {
        if let Some(metrics) = &self.metrics {
            metrics.record(event);
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("evaluator", &self.evaluator.is_some())
            .field("metrics", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}

fn compare_error(
    err: CompareError,
    operator: CanonicalOp,
    actual: &Value,
    expected: &Value,
) -> VerifyError {
    match err {
        CompareError::Incomparable => VerifyError::IncomparableOperands {
            operator,
            actual: actual.kind(),
            expected: expected.kind(),
        },
        CompareError::Pattern(source) => VerifyError::InvalidPattern {
            pattern: expected.to_string(),
            source,
        },
    }
}

///
/// EngineBuilder
///

#[derive(Default)]
pub struct EngineBuilder {
    config: EngineConfig,
    evaluator: Option<Arc<dyn Evaluator>>,
    truthiness: Option<Arc<dyn Truthiness>>,
    metrics: Option<Arc<dyn MetricsSink>>,
}

impl EngineBuilder {
    #[must_use]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Expression evaluator used by `then` and `validate`.
    #[must_use]
    pub fn evaluator(mut self, evaluator: impl Evaluator + 'static) -> Self {
        self.evaluator = Some(Arc::new(evaluator));
        self
    }

    /// Truthiness interpreter used by the boolean verifier.
    /// Defaults to `TextualTruthiness` built from the configuration.
    #[must_use]
    pub fn truthiness(mut self, truthiness: impl Truthiness + 'static) -> Self {
        self.truthiness = Some(Arc::new(truthiness));
        self
    }

    #[must_use]
    pub fn metrics(mut self, sink: Arc<dyn MetricsSink>) -> Self {
        self.metrics = Some(sink);
        self
    }

    #[must_use]
    pub fn build(self) -> Engine {
        let truthiness: Arc<dyn Truthiness> = match self.truthiness {
            Some(truthiness) => truthiness,
            None => Arc::new(self.config.truthiness.interpreter()),
        };

        Engine {
            config: Arc::new(self.config),
            evaluator: self.evaluator,
            truthiness,
            metrics: self.metrics,
        }
    }
}
