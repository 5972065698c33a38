//! ## Crate layout
//! - `core`: operator taxonomy, handlers, verifiers, configuration and metrics.
//!
//! The free functions below run against a process-wide default engine
//! (default configuration, no expression evaluator). Build an
//! [`Engine`](crate::core::engine::Engine) directly to plug in an evaluator,
//! a truthiness interpreter or a metrics sink.

pub use opcheck_core as core;

use crate::core::{engine::Engine, error::VerifyError, value::Value};
use std::sync::LazyLock;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

static DEFAULT_ENGINE: LazyLock<Engine> = LazyLock::new(Engine::new);

/// The engine used by the free functions in this crate.
#[must_use]
pub fn default_engine() -> &'static Engine {
    &DEFAULT_ENGINE
}

/// Generic verifier; see [`Engine::verify`].
pub fn verify(
    value: impl Into<Value>,
    operator: Option<&str>,
    expected: impl Into<Value>,
    message: &str,
) -> Result<Value, VerifyError> {
    DEFAULT_ENGINE.verify(value.into(), operator, expected.into(), message)
}

/// Numeric verifier; see [`Engine::verify_int_str`].
pub fn verify_int_str(
    value: impl Into<Value>,
    operator: Option<&str>,
    expected: impl Into<Value>,
    message: &str,
) -> Result<Value, VerifyError> {
    DEFAULT_ENGINE.verify_int_str(value.into(), operator, expected.into(), message)
}

/// Boolean verifier; see [`Engine::verify_bool`].
pub fn verify_bool(
    value: impl Into<Value>,
    operator: Option<&str>,
    expected: impl Into<Value>,
    message: &str,
) -> Result<Value, VerifyError> {
    DEFAULT_ENGINE.verify_bool(value.into(), operator, expected.into(), message)
}

/// Order-independent list/map verifier; see [`Engine::verify_sequence`].
pub fn verify_sequence(
    value: impl Into<Value>,
    operator: Option<&str>,
    expected: impl Into<Value>,
    message: &str,
) -> Result<Value, VerifyError> {
    DEFAULT_ENGINE.verify_sequence(value.into(), operator, expected.into(), message)
}

/// Per-key numeric map verifier; see [`Engine::verify_int_dict`].
pub fn verify_int_dict(
    value: impl Into<Value>,
    operator: Option<&str>,
    expected: impl Into<Value>,
    message: &str,
) -> Result<Value, VerifyError> {
    DEFAULT_ENGINE.verify_int_dict(value.into(), operator, expected.into(), message)
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        core::{
            config::EngineConfig,
            obs::{CounterSink, MetricsSink},
            prelude::*,
        },
        verify, verify_bool, verify_int_dict, verify_int_str, verify_sequence,
    };
}
