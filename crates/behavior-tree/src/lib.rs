//! Tick-driven behavior tree engine.
//!
//! A tree of composable nodes is re-evaluated ("ticked") from the root until
//! it reaches a definite outcome. Every tick walks the tree top-down and folds
//! child statuses bottom-up; no progress is remembered between ticks other
//! than what individual leaves keep for themselves.
//!
//! - **No planning**: trees are assembled by hand, the engine only executes
//! - **No hidden state**: composites are stateless across ticks
//! - **Local execution**: only [`Parallel`] fans out, onto scoped threads
//!
//! # Architecture
//!
//! - [`Node`]: Core trait for all nodes, ticked against a [`TickContext`]
//! - [`Status`]: Running, Success or Failure (Invalid marks the unset value)
//! - Leaf nodes: [`Task`], [`Conditional`], [`Noop`]
//! - Composite nodes: [`Sequence`], [`Fallback`], [`Parallel`], [`Dynamic`]
//! - Decorator nodes: [`Decorator`] (invert, run-until, label, custom)
//! - Driver: [`run`] ticks a root at a cadence under a cancellable lifetime
//! - Observation: [`Tracer`] hooks and [`print::render`] for diagrams

pub mod builder;
pub mod composite;
pub mod context;
pub mod decorator;
pub mod error;
pub mod leaf;
pub mod node;
pub mod parallel;
pub mod print;
pub mod run;
pub mod status;
pub mod trace;

// Re-export core types for ergonomic API
pub use composite::{Dynamic, Fallback, Sequence};
pub use context::TickContext;
pub use decorator::{Decorator, Transform};
pub use error::{Result, RunError};
pub use leaf::{Conditional, Noop, Task};
pub use node::{BoxedNode, Node, NodeKind};
pub use parallel::{DEFAULT_MAX_WORKERS, Parallel};
pub use run::{DEFAULT_TICK_RATE, DEFAULT_TICK_TIMEOUT, RunConfig, run};
pub use status::Status;
pub use trace::{LogTracer, NoopTracer, TickInfo, Tracer};
