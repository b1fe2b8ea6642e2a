//! Per-tick execution context.
//!
//! A [`TickContext`] is handed to every node on every tick. It carries the
//! cooperative cancellation signal, the optional per-tick deadline and the
//! tracer that observes node ticks. Leaves are expected to poll
//! [`TickContext::is_cancelled`] during long-running work; nothing in the
//! engine preempts a tick.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::trace::{NoopTracer, TickInfo, Tracer};
use crate::{Node, Status};

/// Execution context shared by every node during a tick.
#[derive(Clone)]
pub struct TickContext {
    token: CancellationToken,
    deadline: Option<Instant>,
    tracer: Arc<dyn Tracer>,
}

impl TickContext {
    /// Creates a context bound to the given cancellation token, with no
    /// deadline and a no-op tracer.
    pub fn new(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
            tracer: Arc::new(NoopTracer),
        }
    }

    /// Context that is never cancelled and has no deadline.
    ///
    /// Convenient for ticking nodes directly outside of [`run`](crate::run).
    pub fn background() -> Self {
        Self::new(CancellationToken::new())
    }

    /// Replaces the deadline.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Bounds the context by `timeout` from now. An earlier existing deadline
    /// is kept, and a timeout too large to represent adds no bound.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let Some(candidate) = Instant::now().checked_add(timeout) else {
            return self;
        };
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(candidate),
            None => candidate,
        });
        self
    }

    /// Replaces the tracer.
    pub fn with_tracer(mut self, tracer: Arc<dyn Tracer>) -> Self {
        self.tracer = tracer;
        self
    }

    /// Derives a context whose token is a child of this one. Cancelling the
    /// child does not affect the parent.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
            tracer: Arc::clone(&self.tracer),
        }
    }

    /// Returns `true` once the token is cancelled or the deadline has passed.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Time left before the deadline, or `None` if there is no deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn tracer(&self) -> &Arc<dyn Tracer> {
        &self.tracer
    }

    /// Ticks `node` under this context, reporting the tick to the tracer.
    ///
    /// Composite nodes and [`run`](crate::run) tick their children through
    /// this method so every node in the tree is observed. Calling
    /// [`Node::tick`] directly skips tracing.
    pub fn tick(&self, node: &dyn Node) -> Status {
        let info = TickInfo {
            kind: node.kind(),
            name: node.name(),
        };

        self.tracer.tick_started(info);
        let started = Instant::now();
        let status = node.tick(self);
        self.tracer.tick_finished(info, status, started.elapsed());

        if !status.is_valid() {
            error!(
                target: "behavior_tree::tick",
                kind = info.kind.as_str(),
                name = info.name.unwrap_or_default(),
                "Node returned an invalid status"
            );
            debug_assert!(status.is_valid(), "node tick returned Status::Invalid");
        }

        status
    }
}

impl Default for TickContext {
    fn default() -> Self {
        Self::background()
    }
}

impl fmt::Debug for TickContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickContext")
            .field("cancelled", &self.token.is_cancelled())
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}
