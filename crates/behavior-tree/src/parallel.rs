//! Concurrent composite node.
//!
//! [`Parallel`] ticks every child once per tick on a bounded pool of scoped
//! worker threads and resolves by counting outcomes against a success
//! threshold.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use tracing::Span;

use crate::{BoxedNode, Node, NodeKind, Status, TickContext};

/// Upper bound on worker threads used by a single [`Parallel`] tick.
pub const DEFAULT_MAX_WORKERS: usize = 8;

/// Ticks all children concurrently and resolves on a success threshold.
///
/// # Semantics
///
/// Every child is ticked exactly once per tick, regardless of the outcome of
/// its siblings. Once all children have returned:
/// - `Success` if the number of successes is at least `threshold`
/// - `Failure` if the number of failures is at least
///   `children.len() - threshold` (the threshold can no longer be reached)
/// - `Running` otherwise
///
/// A threshold of `0` always succeeds. A threshold above the number of
/// children can never succeed.
///
/// # Concurrency
///
/// Children are pulled from a shared cursor by at most `max_workers` scoped
/// threads, so with more children than workers the excess is processed in
/// turn by whichever worker frees up first. The tick blocks until every child
/// has returned. Completion order is unspecified; the aggregation only
/// counts outcomes.
pub struct Parallel {
    children: Vec<BoxedNode>,
    threshold: usize,
    max_workers: usize,
}

impl Parallel {
    /// Creates a new parallel node requiring `threshold` child successes.
    pub fn new(threshold: usize, children: Vec<BoxedNode>) -> Self {
        Self {
            children,
            threshold,
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }

    /// Overrides the worker cap. Values below one are treated as one.
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    fn resolve(&self, successes: usize, failures: usize) -> Status {
        if successes >= self.threshold {
            return Status::Success;
        }

        if failures >= self.children.len().saturating_sub(self.threshold) {
            return Status::Failure;
        }

        Status::Running
    }
}

impl Node for Parallel {
    fn tick(&self, ctx: &TickContext) -> Status {
        let next = AtomicUsize::new(0);
        let successes = AtomicUsize::new(0);
        let failures = AtomicUsize::new(0);

        let drain = || {
            loop {
                let index = next.fetch_add(1, Ordering::Relaxed);
                let Some(child) = self.children.get(index) else {
                    break;
                };

                match ctx.tick(child.as_ref()) {
                    Status::Success => {
                        successes.fetch_add(1, Ordering::Relaxed);
                    }
                    Status::Failure => {
                        failures.fetch_add(1, Ordering::Relaxed);
                    }
                    _ => {}
                }
            }
        };

        let workers = self.children.len().min(self.max_workers);
        if workers <= 1 {
            drain();
        } else {
            let span = Span::current();
            thread::scope(|scope| {
                for _ in 0..workers {
                    scope.spawn(|| span.in_scope(drain));
                }
            });
        }

        // The scope join orders every increment before these loads.
        self.resolve(
            successes.load(Ordering::Relaxed),
            failures.load(Ordering::Relaxed),
        )
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Parallel {
            threshold: self.threshold,
        }
    }

    fn children(&self) -> &[BoxedNode] {
        &self.children
    }
}
