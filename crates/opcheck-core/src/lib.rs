//! Core runtime for opcheck: the operator taxonomy, comparison handlers,
//! the generic and type-directed verifiers, and the capabilities they
//! consume (expression evaluation, truthiness).
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod handler;
pub mod obs;
pub mod operator;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains only the vocabulary needed to run verifications.
/// Config loading, handlers and sinks stay one module level down.
///

pub mod prelude {
    pub use crate::{
        engine::Engine,
        error::{ErrorClass, VerifyError},
        eval::{EvalContext, EvalError, Evaluator, Truthiness},
        operator::CanonicalOp,
        value::Value,
    };
}
