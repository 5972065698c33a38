use crate::{
    engine::Engine,
    eval::{EvalContext, EvalError, Evaluator},
    value::Value,
};
use std::{
    collections::BTreeMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

type Script = fn(&Value) -> Result<Value, EvalError>;

///
/// ScriptedEvaluator
///
/// Test evaluator that knows a fixed set of expressions and counts calls.
/// Unknown expressions fail the way a real evaluator rejects bad syntax.
///

#[derive(Clone)]
pub(crate) struct ScriptedEvaluator {
    scripts: BTreeMap<&'static str, Script>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedEvaluator {
    pub(crate) fn new() -> Self {
        let mut scripts: BTreeMap<&'static str, Script> = BTreeMap::new();
        scripts.insert("value + 3", |value| match value {
            Value::Int(n) => Ok(Value::Int(n + 3)),
            other => Err(format!("unsupported operand for +: {other}").into()),
        });
        scripts.insert("0 < value < 2", |value| match value {
            Value::Int(n) => Ok(Value::Bool(0 < *n && *n < 2)),
            other => Err(format!("'<' not supported for {other}").into()),
        });
        scripts.insert("value == 'hello'", |value| {
            Ok(Value::Bool(value.as_text() == Some("hello")))
        });
        scripts.insert("'Hello ' + value + '!'", |value| match value {
            Value::Text(name) => Ok(Value::Text(format!("Hello {name}!"))),
            other => Err(format!("can only concatenate text, not {other}").into()),
        });
        scripts.insert("len(value)", |value| match value {
            Value::Text(text) => Ok(Value::from(text.chars().count() as i64)),
            Value::List(items) => Ok(Value::from(items.len() as i64)),
            Value::Map(map) => Ok(Value::from(map.len() as i64)),
            other => Err(format!("object of type {} has no len()", other.kind()).into()),
        });
        scripts.insert("value", |value| Ok(value.clone()));

        Self {
            scripts,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Evaluator for ScriptedEvaluator {
    fn evaluate(&self, expression: &str, context: &EvalContext<'_>) -> Result<Value, EvalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let script = self
            .scripts
            .get(expression.trim())
            .ok_or_else(|| format!("invalid syntax: {expression}"))?;

        script(context.value())
    }
}

/// Engine wired with a fresh `ScriptedEvaluator`.
pub(crate) fn scripted_engine() -> (Engine, ScriptedEvaluator) {
    let evaluator = ScriptedEvaluator::new();
    let engine = Engine::builder().evaluator(evaluator.clone()).build();

    (engine, evaluator)
}

pub(crate) fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

pub(crate) fn list<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Value {
    Value::List(items.into_iter().map(Into::into).collect())
}

pub(crate) fn map<T: Into<Value>>(entries: impl IntoIterator<Item = (&'static str, T)>) -> Value {
    Value::Map(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.into()))
            .collect(),
    )
}
