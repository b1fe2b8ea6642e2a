//! Builder utilities for ergonomic behavior tree construction.
//!
//! This module provides helper functions to reduce boilerplate when building
//! behavior trees. Instead of writing verbose
//! `Box::new(Sequence::new(vec![...]))`, you can use shorter functions like
//! `sequence(vec![...])`.
//!
//! ```rust
//! use behavior_tree::builder::*;
//! use behavior_tree::{Status, TickContext};
//!
//! let tree = ternary(
//!     conditional("door open", |_| false),
//!     task("walk through", |_| Status::Success),
//!     task("knock", |_| Status::Running),
//! );
//!
//! assert_eq!(TickContext::background().tick(tree.as_ref()), Status::Running);
//! ```

use crate::{
    BoxedNode, Conditional, Decorator, Dynamic, Fallback, Noop, Parallel, Sequence, Status, Task,
    TickContext,
};

/// Creates a task leaf.
///
/// Shorthand for `Box::new(Task::new(name, f))`.
#[inline]
pub fn task(
    name: impl Into<String>,
    f: impl Fn(&TickContext) -> Status + Send + Sync + 'static,
) -> BoxedNode {
    Box::new(Task::new(name, f))
}

/// Creates a conditional leaf.
///
/// Shorthand for `Box::new(Conditional::new(name, predicate))`.
#[inline]
pub fn conditional(
    name: impl Into<String>,
    predicate: impl Fn(&TickContext) -> bool + Send + Sync + 'static,
) -> BoxedNode {
    Box::new(Conditional::new(name, predicate))
}

/// Creates a task that always succeeds.
#[inline]
pub fn noop() -> BoxedNode {
    Box::new(Noop)
}

/// Creates a sequence node.
///
/// Shorthand for `Box::new(Sequence::new(children))`.
#[inline]
pub fn sequence(children: Vec<BoxedNode>) -> BoxedNode {
    Box::new(Sequence::new(children))
}

/// Creates a fallback node.
///
/// Shorthand for `Box::new(Fallback::new(children))`.
#[inline]
pub fn fallback(children: Vec<BoxedNode>) -> BoxedNode {
    Box::new(Fallback::new(children))
}

/// Creates a parallel node.
///
/// Shorthand for `Box::new(Parallel::new(threshold, children))`.
#[inline]
pub fn parallel(threshold: usize, children: Vec<BoxedNode>) -> BoxedNode {
    Box::new(Parallel::new(threshold, children))
}

/// Creates a decorator with a custom transform.
#[inline]
pub fn decorator(
    name: impl Into<String>,
    child: BoxedNode,
    transform: impl Fn(&TickContext, Status) -> Status + Send + Sync + 'static,
) -> BoxedNode {
    Box::new(Decorator::new(name, child, transform))
}

/// Names a subtree without changing its behavior.
#[inline]
pub fn label(name: impl Into<String>, child: BoxedNode) -> BoxedNode {
    Box::new(Decorator::label(name, child))
}

/// Creates an inverter node.
#[inline]
pub fn invert(child: BoxedNode) -> BoxedNode {
    Box::new(Decorator::invert(child))
}

/// Creates a node that runs `child` until it succeeds.
#[inline]
pub fn run_until_success(child: BoxedNode) -> BoxedNode {
    Box::new(Decorator::run_until_success(child))
}

/// Creates a node that runs `child` until it fails.
#[inline]
pub fn run_until_failure(child: BoxedNode) -> BoxedNode {
    Box::new(Decorator::run_until_failure(child))
}

/// Creates a dynamic node whose subtree is rebuilt on every tick.
#[inline]
pub fn dynamic(
    name: impl Into<String>,
    build: impl Fn(&TickContext) -> BoxedNode + Send + Sync + 'static,
) -> BoxedNode {
    Box::new(Dynamic::new(name, build))
}

/// If `predicate` then `when_true` else `when_false`.
///
/// Built as `Fallback[Sequence[predicate, when_true], when_false]`, so
/// `when_false` also runs when `when_true` itself fails, and a `Running`
/// predicate or `when_true` is returned as is.
pub fn ternary(predicate: BoxedNode, when_true: BoxedNode, when_false: BoxedNode) -> BoxedNode {
    fallback(vec![sequence(vec![predicate, when_true]), when_false])
}
