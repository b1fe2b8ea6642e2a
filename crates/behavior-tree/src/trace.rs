//! Tick observation hooks.
//!
//! The engine reports the start and finish of every node tick to a
//! [`Tracer`]. Tracers only observe: nothing they do can change a status or
//! the order in which nodes are ticked.

use std::time::Duration;

use tracing::trace;

use crate::{NodeKind, Status};

/// Identity of the node being ticked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickInfo<'a> {
    pub kind: NodeKind,
    pub name: Option<&'a str>,
}

/// Observer invoked around each node tick.
///
/// Implementations must be cheap and thread-safe: [`Parallel`](crate::Parallel)
/// ticks children, and therefore calls the tracer, from worker threads.
pub trait Tracer: Send + Sync {
    /// Called right before the node is ticked.
    fn tick_started(&self, _node: TickInfo<'_>) {}

    /// Called right after the node returned `status`.
    fn tick_finished(&self, _node: TickInfo<'_>, _status: Status, _elapsed: Duration) {}
}

/// Tracer that ignores every event. This is the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracer;

impl Tracer for NoopTracer {}

/// Tracer that forwards tick events to the `tracing` ecosystem.
///
/// Events are emitted at `TRACE` level under the `behavior_tree::tick` target,
/// so they are filtered out unless explicitly enabled, e.g.
/// `RUST_LOG=behavior_tree::tick=trace`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn tick_started(&self, node: TickInfo<'_>) {
        trace!(
            target: "behavior_tree::tick",
            kind = node.kind.as_str(),
            name = node.name.unwrap_or_default(),
            "tick started"
        );
    }

    fn tick_finished(&self, node: TickInfo<'_>, status: Status, elapsed: Duration) {
        trace!(
            target: "behavior_tree::tick",
            kind = node.kind.as_str(),
            name = node.name.unwrap_or_default(),
            status = status.as_str(),
            elapsed_us = saturating_u64(elapsed.as_micros()),
            "tick finished"
        );
    }
}

/// Narrows a duration count for log fields, saturating instead of wrapping.
pub(crate) fn saturating_u64(value: u128) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{Node, Sequence, Task, TickContext};

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl Tracer for Recorder {
        fn tick_started(&self, node: TickInfo<'_>) {
            self.events
                .lock()
                .unwrap()
                .push(format!("start {} {}", node.kind, node.name.unwrap_or("-")));
        }

        fn tick_finished(&self, node: TickInfo<'_>, status: Status, _elapsed: Duration) {
            self.events
                .lock()
                .unwrap()
                .push(format!("finish {} {status}", node.kind));
        }
    }

    #[test]
    fn tracer_observes_every_node_in_order() {
        let recorder = Arc::new(Recorder::default());
        let ctx = TickContext::background().with_tracer(recorder.clone());

        let tree = Sequence::new(vec![
            Box::new(Task::new("first", |_| Status::Success)),
            Box::new(Task::new("second", |_| Status::Failure)),
        ]);

        assert_eq!(ctx.tick(&tree), Status::Failure);

        let events = recorder.events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                "start Sequence -",
                "start Task first",
                "finish Task success",
                "start Task second",
                "finish Task failure",
                "finish Sequence failure",
            ]
        );
    }

    #[test]
    fn log_fields_saturate() {
        assert_eq!(saturating_u64(42), 42);
        assert_eq!(saturating_u64(Duration::MAX.as_micros()), u64::MAX);
    }

    #[test]
    fn direct_tick_bypasses_tracer() {
        let recorder = Arc::new(Recorder::default());
        let ctx = TickContext::background().with_tracer(recorder.clone());

        let task = Task::new("quiet", |_| Status::Success);
        assert_eq!(task.tick(&ctx), Status::Success);
        assert!(recorder.events.lock().unwrap().is_empty());
    }
}
