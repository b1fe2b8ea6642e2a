//! Tree driver.
//!
//! [`run`] ticks a root node at a fixed cadence until it resolves to a
//! definite outcome or the caller's lifetime is cancelled.

use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, debug_span, error, trace, warn};

use crate::error::{Result, RunError};
use crate::trace::{NoopTracer, Tracer, saturating_u64};
use crate::{Node, Status, TickContext};

/// Default wait between two ticks of a running tree.
pub const DEFAULT_TICK_RATE: Duration = Duration::from_secs(10);

/// Default bound on a single tick.
pub const DEFAULT_TICK_TIMEOUT: Duration = Duration::from_secs(1);

const TICK_RATE_ENV: &str = "BT_TICK_RATE_MS";
const TICK_TIMEOUT_ENV: &str = "BT_TICK_TIMEOUT_MS";

/// Run loop configuration.
#[derive(Clone)]
pub struct RunConfig {
    /// Wait between the end of a `Running` tick and the start of the next.
    pub tick_rate: Duration,
    /// Deadline applied to each tick. Advisory: leaves must poll
    /// [`TickContext::is_cancelled`] to honor it.
    pub tick_timeout: Duration,
    /// Observer invoked around every node tick.
    pub tracer: Arc<dyn Tracer>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
            tick_timeout: DEFAULT_TICK_TIMEOUT,
            tracer: Arc::new(NoopTracer),
        }
    }
}

impl RunConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BT_TICK_RATE_MS` - Wait between ticks in milliseconds (default: 10000)
    /// - `BT_TICK_TIMEOUT_MS` - Per-tick timeout in milliseconds (default: 1000)
    ///
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ms) = read_env::<u64>(TICK_RATE_ENV) {
            config.tick_rate = Duration::from_millis(ms);
        }

        if let Some(ms) = read_env::<u64>(TICK_TIMEOUT_ENV) {
            config.tick_timeout = Duration::from_millis(ms);
        }

        config
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_tick_timeout(mut self, tick_timeout: Duration) -> Self {
        self.tick_timeout = tick_timeout;
        self
    }

    pub fn with_tracer(mut self, tracer: Arc<dyn Tracer>) -> Self {
        self.tracer = tracer;
        self
    }
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("tick_rate", &self.tick_rate)
            .field("tick_timeout", &self.tick_timeout)
            .finish_non_exhaustive()
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Ticks `root` until it returns a non-`Running` status.
///
/// Each tick runs under a context derived from `lifetime` and bounded by
/// `config.tick_timeout`. After a `Running` tick the loop waits
/// `config.tick_rate`, measured from the end of that tick, or until
/// `lifetime` is cancelled, in which case it returns `Failure`.
///
/// Cancellation is only observed between ticks; a tick already in flight is
/// never interrupted. There is no tick limit.
///
/// # Errors
///
/// - [`RunError::InvalidStatus`] if the root returns `Status::Invalid`
/// - [`RunError::TickJoin`] if a tick panicked
pub async fn run(
    lifetime: &CancellationToken,
    root: impl Into<Arc<dyn Node>>,
    config: &RunConfig,
) -> Result<Status> {
    let root = root.into();

    debug!(
        target: "behavior_tree::run",
        tick_rate_ms = saturating_u64(config.tick_rate.as_millis()),
        tick_timeout_ms = saturating_u64(config.tick_timeout.as_millis()),
        "Starting behavior tree"
    );

    let mut ticks: u64 = 0;
    loop {
        ticks += 1;
        let status = tick_once(lifetime, &root, config, ticks).await?;

        match status {
            Status::Running => {
                trace!(target: "behavior_tree::run", tick = ticks, "Tree still running");
            }
            Status::Invalid => {
                error!(target: "behavior_tree::run", tick = ticks, "Root returned an invalid status");
                return Err(RunError::InvalidStatus);
            }
            done => {
                debug!(
                    target: "behavior_tree::run",
                    ticks,
                    status = done.as_str(),
                    "Behavior tree finished"
                );
                return Ok(done);
            }
        }

        tokio::select! {
            biased;
            _ = lifetime.cancelled() => {
                debug!(target: "behavior_tree::run", ticks, "Lifetime cancelled while running");
                return Ok(Status::Failure);
            }
            _ = sleep(config.tick_rate) => {}
        }
    }
}

/// Ticks the root once on the blocking pool under a bounded child lifetime.
async fn tick_once(
    lifetime: &CancellationToken,
    root: &Arc<dyn Node>,
    config: &RunConfig,
    tick: u64,
) -> Result<Status> {
    let bounded = lifetime.child_token();
    // Released when the tick returns, whether it finished early or overran.
    let _release = bounded.clone().drop_guard();

    let timer = {
        let bounded = bounded.clone();
        let timeout = config.tick_timeout;
        tokio::spawn(async move {
            sleep(timeout).await;
            bounded.cancel();
        })
    };

    let ctx = TickContext::new(bounded)
        .with_timeout(config.tick_timeout)
        .with_tracer(Arc::clone(&config.tracer));
    let root = Arc::clone(root);
    let span = debug_span!(target: "behavior_tree::run", "tick", tick);

    let started = Instant::now();
    let joined =
        tokio::task::spawn_blocking(move || span.in_scope(|| ctx.tick(root.as_ref()))).await;
    timer.abort();
    let status = joined.map_err(RunError::TickJoin)?;

    let elapsed = started.elapsed();
    if elapsed > config.tick_timeout {
        warn!(
            target: "behavior_tree::run",
            tick,
            elapsed_ms = saturating_u64(elapsed.as_millis()),
            timeout_ms = saturating_u64(config.tick_timeout.as_millis()),
            "Tick overran its timeout"
        );
    }

    Ok(status)
}
