//! Composite behavior nodes.
//!
//! Composite nodes control the execution flow of multiple child nodes. This
//! module provides the ordered composites [`Sequence`] (AND logic) and
//! [`Fallback`] (OR logic), plus [`Dynamic`], whose single child is rebuilt on
//! every tick. [`Parallel`](crate::Parallel) lives in its own module.

use crate::leaf::non_empty;
use crate::{BoxedNode, Node, NodeKind, Status, TickContext};

/// Ticks child nodes in order until one does not succeed.
///
/// # Semantics
///
/// A `Sequence` node evaluates its children from left to right:
/// - If a child returns `Failure` or `Running`, the sequence **stops
///   immediately** and returns that status
/// - If a child returns `Success`, the sequence **continues** to the next child
/// - If all children return `Success`, the sequence returns `Success`
/// - An empty sequence returns `Success`
///
/// This is analogous to a short-circuited logical AND (&&) operation.
///
/// A sequence does not remember progress between ticks: after a `Running`
/// result the next tick starts again from the first child.
pub struct Sequence {
    children: Vec<BoxedNode>,
}

impl Sequence {
    /// Creates a new sequence with the given child nodes.
    pub fn new(children: Vec<BoxedNode>) -> Self {
        Self { children }
    }
}

impl Node for Sequence {
    fn tick(&self, ctx: &TickContext) -> Status {
        for child in &self.children {
            match ctx.tick(child.as_ref()) {
                Status::Success => continue,
                other => return other, // Short-circuit
            }
        }
        Status::Success
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Sequence
    }

    fn children(&self) -> &[BoxedNode] {
        &self.children
    }
}

/// Ticks child nodes in order until one does not fail.
///
/// # Semantics
///
/// A `Fallback` node evaluates its children from left to right:
/// - If a child returns `Success` or `Running`, the fallback **stops
///   immediately** and returns that status
/// - If a child returns `Failure`, the fallback **continues** to the next child
/// - If all children return `Failure`, the fallback returns `Failure`
/// - An empty fallback returns `Failure`
///
/// This is analogous to a short-circuited logical OR (||) operation.
pub struct Fallback {
    children: Vec<BoxedNode>,
}

impl Fallback {
    /// Creates a new fallback with the given child nodes.
    pub fn new(children: Vec<BoxedNode>) -> Self {
        Self { children }
    }
}

impl Node for Fallback {
    fn tick(&self, ctx: &TickContext) -> Status {
        for child in &self.children {
            match ctx.tick(child.as_ref()) {
                Status::Failure => continue,
                other => return other, // Short-circuit
            }
        }
        Status::Failure
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Fallback
    }

    fn children(&self) -> &[BoxedNode] {
        &self.children
    }
}

/// Builds a fresh subtree on every tick and ticks it once.
///
/// # Semantics
///
/// The constructor runs at the start of each tick; the subtree it returns is
/// ticked once and then dropped. Nothing is carried over to the next tick, so
/// any cross-tick state has to be captured by the constructor itself.
///
/// Useful when the shape of the subtree depends on conditions that are only
/// known at tick time.
pub struct Dynamic<F> {
    name: String,
    build: F,
}

impl<F> Dynamic<F>
where
    F: Fn(&TickContext) -> BoxedNode + Send + Sync,
{
    pub fn new(name: impl Into<String>, build: F) -> Self {
        Self {
            name: name.into(),
            build,
        }
    }
}

impl<F> Node for Dynamic<F>
where
    F: Fn(&TickContext) -> BoxedNode + Send + Sync,
{
    fn tick(&self, ctx: &TickContext) -> Status {
        let subtree = (self.build)(ctx);
        ctx.tick(subtree.as_ref())
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Dynamic
    }

    fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }
}
