//! Errors surfaced by the run loop.
//!
//! Node outcomes are never errors; they are [`Status`](crate::Status) values.
//! A [`RunError`] means the tree could not be driven at all.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RunError>;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("root node returned an invalid status")]
    InvalidStatus,

    #[error("tick task failed to join")]
    TickJoin(#[source] tokio::task::JoinError),
}
