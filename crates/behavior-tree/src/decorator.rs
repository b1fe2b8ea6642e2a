//! Decorator behavior nodes.
//!
//! Decorators wrap a single child node and may remap its status. Every remap
//! changes how outcomes propagate to the ancestors, so each provided
//! decorator documents its exact mapping.

use std::slice;

use crate::leaf::non_empty;
use crate::{BoxedNode, Node, NodeKind, Status, TickContext};

/// Function remapping a child's status.
///
/// Must return one of `Running`, `Success` or `Failure`.
pub type Transform = Box<dyn Fn(&TickContext, Status) -> Status + Send + Sync>;

/// Wraps a single child and optionally transforms its status.
///
/// # Semantics
///
/// - The child is ticked exactly once per tick
/// - With a transform, the decorator returns `transform(ctx, child_status)`
/// - Without one, the child's status passes through unchanged and the
///   decorator only labels the subtree
pub struct Decorator {
    name: String,
    child: BoxedNode,
    transform: Option<Transform>,
}

impl Decorator {
    /// Creates a decorator with an arbitrary transform.
    pub fn new(
        name: impl Into<String>,
        child: BoxedNode,
        transform: impl Fn(&TickContext, Status) -> Status + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            child,
            transform: Some(Box::new(transform)),
        }
    }

    /// Names a subtree without changing its behavior.
    pub fn label(name: impl Into<String>, child: BoxedNode) -> Self {
        Self {
            name: name.into(),
            child,
            transform: None,
        }
    }

    /// Inverts the result of its child.
    ///
    /// # Semantics
    ///
    /// - `Success` becomes `Failure`
    /// - `Failure` becomes `Success`
    /// - `Running` passes through
    ///
    /// This is analogous to a logical NOT (!) operation.
    pub fn invert(child: BoxedNode) -> Self {
        Self::new("Invert result", child, |_, status: Status| status.invert())
    }

    /// Keeps running the child until it succeeds.
    ///
    /// # Semantics
    ///
    /// - `Success` stays `Success`
    /// - `Failure` and `Running` become `Running`
    ///
    /// Failures are masked as ongoing work, so ancestors never see this
    /// subtree fail.
    pub fn run_until_success(child: BoxedNode) -> Self {
        Self::new("Run until successful", child, |_, status: Status| {
            if status == Status::Success {
                Status::Success
            } else {
                Status::Running
            }
        })
    }

    /// Keeps running the child until it fails.
    ///
    /// # Semantics
    ///
    /// - `Failure` stays `Failure`
    /// - `Success` and `Running` become `Running`
    ///
    /// Successes are masked as ongoing work, so ancestors never see this
    /// subtree succeed.
    pub fn run_until_failure(child: BoxedNode) -> Self {
        Self::new("Run until failure", child, |_, status: Status| {
            if status == Status::Failure {
                Status::Failure
            } else {
                Status::Running
            }
        })
    }
}

impl Node for Decorator {
    fn tick(&self, ctx: &TickContext) -> Status {
        let status = ctx.tick(self.child.as_ref());
        match &self.transform {
            Some(transform) => transform(ctx, status),
            None => status,
        }
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Decorator {
            transforms: self.transform.is_some(),
        }
    }

    fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    fn children(&self) -> &[BoxedNode] {
        slice::from_ref(&self.child)
    }
}
