//! Leaf nodes.
//!
//! Leaves do the actual work of a tree. [`Task`] runs arbitrary work and
//! reports a [`Status`] directly; [`Conditional`] tests a predicate.
//! Neither has children.

use crate::{Node, NodeKind, Status, TickContext};

/// Runs a closure and returns its status verbatim.
///
/// No retry or timeout is applied beyond what the [`TickContext`] already
/// carries; long-running closures should poll [`TickContext::is_cancelled`].
///
/// Stateful tasks keep their progress inside the closure, behind interior
/// mutability, since a task may be ticked many times before it resolves.
pub struct Task<F> {
    name: String,
    f: F,
}

impl<F> Task<F>
where
    F: Fn(&TickContext) -> Status + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> Node for Task<F>
where
    F: Fn(&TickContext) -> Status + Send + Sync,
{
    fn tick(&self, ctx: &TickContext) -> Status {
        (self.f)(ctx)
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Task
    }

    fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }
}

/// Maps a boolean predicate to `Success` (true) or `Failure` (false).
///
/// Conditionals never return `Running`.
pub struct Conditional<P> {
    name: String,
    predicate: P,
}

impl<P> Conditional<P>
where
    P: Fn(&TickContext) -> bool + Send + Sync,
{
    pub fn new(name: impl Into<String>, predicate: P) -> Self {
        Self {
            name: name.into(),
            predicate,
        }
    }
}

impl<P> Node for Conditional<P>
where
    P: Fn(&TickContext) -> bool + Send + Sync,
{
    fn tick(&self, ctx: &TickContext) -> Status {
        if (self.predicate)(ctx) {
            Status::Success
        } else {
            Status::Failure
        }
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Conditional
    }

    fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }
}

/// Task that always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Noop;

impl Node for Noop {
    fn tick(&self, _ctx: &TickContext) -> Status {
        Status::Success
    }

    fn name(&self) -> Option<&str> {
        Some("Success Noop")
    }
}

pub(crate) fn non_empty(name: &str) -> Option<&str> {
    (!name.is_empty()).then_some(name)
}
