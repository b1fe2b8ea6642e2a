//! Core node trait.
//!
//! This module defines the [`Node`] trait, the fundamental abstraction for
//! every behavior tree node, together with the closed [`NodeKind`] tag used
//! by tracing and introspection.

use std::sync::Arc;

use crate::{Status, TickContext};

/// Owned, type-erased node. Composite nodes hold their children this way.
pub type BoxedNode = Box<dyn Node>;

/// A behavior tree node that can be ticked against a [`TickContext`].
///
/// Nodes are assembled once and ticked many times. The engine never mutates a
/// node; any state that must survive across ticks is owned by the node itself
/// behind interior mutability (atomics, mutexes) so that `tick` can take
/// `&self` and be called from [`Parallel`](crate::Parallel) worker threads.
pub trait Node: Send + Sync {
    /// Evaluate this node once.
    ///
    /// # Returns
    ///
    /// - `Status::Running` if the node needs further ticks
    /// - `Status::Success` if the node succeeded
    /// - `Status::Failure` if the node failed
    ///
    /// Returning `Status::Invalid` violates the node contract.
    fn tick(&self, ctx: &TickContext) -> Status;

    /// Kind tag used for tracing and rendering.
    ///
    /// User-defined leaves keep the default and are reported as tasks.
    fn kind(&self) -> NodeKind {
        NodeKind::Task
    }

    /// Display name for diagnostics, if any.
    fn name(&self) -> Option<&str> {
        None
    }

    /// Direct children, for tree introspection only. Execution never goes
    /// through this method.
    fn children(&self) -> &[BoxedNode] {
        &[]
    }
}

/// Blanket implementation for boxed nodes.
///
/// This allows `Box<dyn Node>` to also implement `Node`, enabling dynamic
/// dispatch and heterogeneous collections of nodes.
impl Node for BoxedNode {
    #[inline]
    fn tick(&self, ctx: &TickContext) -> Status {
        (**self).tick(ctx)
    }

    fn kind(&self) -> NodeKind {
        (**self).kind()
    }

    fn name(&self) -> Option<&str> {
        (**self).name()
    }

    fn children(&self) -> &[BoxedNode] {
        (**self).children()
    }
}

impl Node for Arc<dyn Node> {
    #[inline]
    fn tick(&self, ctx: &TickContext) -> Status {
        (**self).tick(ctx)
    }

    fn kind(&self) -> NodeKind {
        (**self).kind()
    }

    fn name(&self) -> Option<&str> {
        (**self).name()
    }

    fn children(&self) -> &[BoxedNode] {
        (**self).children()
    }
}

/// Closed set of node kinds.
///
/// Each variant carries only what rendering needs. The set is matched
/// exhaustively in [`print`](crate::print) and nowhere in the tick path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    Task,
    Conditional,
    Sequence,
    Fallback,
    Parallel {
        /// Minimum number of child successes.
        threshold: usize,
    },
    Decorator {
        /// `false` for pure labels that pass the child status through.
        transforms: bool,
    },
    Dynamic,
}

impl NodeKind {
    /// Static label for logs and diagnostics.
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
