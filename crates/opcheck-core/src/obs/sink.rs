use crate::{error::ErrorClass, operator::CanonicalOp};
use serde::Serialize;
use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicU64, Ordering},
};

///
/// AssertionEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AssertionEvent {
    /// A comparison or `validate` held.
    Passed { operator: CanonicalOp },
    /// A comparison or `validate` did not hold.
    Failed { operator: CanonicalOp },
    /// `then` produced a value.
    Transformed { operator: CanonicalOp },
    /// The call failed for any reason other than a failed check.
    Rejected { class: ErrorClass },
}

///
/// MetricsSink
///

pub trait MetricsSink: Send + Sync {
    fn record(&self, event: AssertionEvent);
}

///
/// CounterSink
///
/// Lock-free in-memory counters.
///

#[derive(Debug, Default)]
pub struct CounterSink {
    passed: AtomicU64,
    failed: AtomicU64,
    transformed: AtomicU64,
    rejected: AtomicU64,
    per_operator: [AtomicU64; CanonicalOp::ALL.len()],
}

impl CounterSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current counters.
    #[must_use]
    pub fn report(&self) -> EventReport {
        let operators = CanonicalOp::ALL
            .into_iter()
            .filter_map(|op| {
                let count = self.per_operator[op.index()].load(Ordering::Relaxed);
                (count > 0).then(|| (op.symbol().to_string(), count))
            })
            .collect();

        EventReport {
            passed: self.passed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            transformed: self.transformed.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            operators,
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        for counter in [&self.passed, &self.failed, &self.transformed, &self.rejected] {
            counter.store(0, Ordering::Relaxed);
        }
        for counter in &self.per_operator {
            counter.store(0, Ordering::Relaxed);
        }
    }

    fn bump_operator(&self, op: CanonicalOp) {
        self.per_operator[op.index()].fetch_add(1, Ordering::Relaxed);
    }
}

impl MetricsSink for CounterSink {
    fn record(&self, event: AssertionEvent) {
        match event {
            AssertionEvent::Passed { operator } => {
                self.passed.fetch_add(1, Ordering::Relaxed);
                self.bump_operator(operator);
            }
            AssertionEvent::Failed { operator } => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                self.bump_operator(operator);
            }
            AssertionEvent::Transformed { operator } => {
                self.transformed.fetch_add(1, Ordering::Relaxed);
                self.bump_operator(operator);
            }
            AssertionEvent::Rejected { .. } => {
                self.rejected.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

///
/// EventReport
///
/// Point-in-time counter snapshot; `operators` is keyed by canonical symbol.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EventReport {
    pub passed: u64,
    pub failed: u64,
    pub transformed: u64,
    pub rejected: u64,
    pub operators: BTreeMap<String, u64>,
}
