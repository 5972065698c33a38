//! Observability: assertion events and the sink they flow through.
//!
//! Verification logic never touches counters directly; every event goes
//! through the `MetricsSink` injected into the engine.

mod sink;

// re-exports
pub use sink::{AssertionEvent, CounterSink, EventReport, MetricsSink};
