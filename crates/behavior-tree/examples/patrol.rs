//! Patrol agent driven by the behavior tree run loop.
//!
//! ```text
//! RUST_LOG=behavior_tree=debug,behavior_tree::tick=trace BT_TICK_RATE_MS=200 \
//!     cargo run -p behavior-tree --example patrol
//! ```
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use behavior_tree::builder::*;
use behavior_tree::{LogTracer, RunConfig, Status, TickContext, print, run};
use tokio_util::sync::CancellationToken;

const WAYPOINTS: usize = 4;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RunConfig::from_env().with_tracer(Arc::new(LogTracer));
    let tree = patrol_tree();

    println!("{}", print::render(tree.as_ref()));

    let lifetime = CancellationToken::new();
    {
        let lifetime = lifetime.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                lifetime.cancel();
            }
        });
    }

    let status = run(&lifetime, tree, &config).await?;
    tracing::info!(status = status.as_str(), "Patrol finished");

    Ok(())
}

/// Visits every waypoint while keeping an eye on the battery.
fn patrol_tree() -> behavior_tree::BoxedNode {
    let reached = Arc::new(AtomicUsize::new(0));
    let battery = Arc::new(AtomicUsize::new(100));

    let low_battery = {
        let battery = Arc::clone(&battery);
        conditional("battery low", move |_| battery.load(Ordering::SeqCst) < 20)
    };

    let recharge = {
        let battery = Arc::clone(&battery);
        task("recharge", move |_| {
            battery.store(100, Ordering::SeqCst);
            Status::Success
        })
    };

    let advance = {
        let reached = Arc::clone(&reached);
        let battery = Arc::clone(&battery);
        task("advance", move |ctx: &TickContext| {
            if ctx.is_cancelled() {
                return Status::Failure;
            }
            battery.fetch_sub(15, Ordering::SeqCst);
            let at = reached.fetch_add(1, Ordering::SeqCst) + 1;
            tracing::info!(waypoint = at, "Reached waypoint");
            if at >= WAYPOINTS {
                Status::Success
            } else {
                Status::Running
            }
        })
    };

    let scan = dynamic("scan", move |_| {
        // Cheap sweep most of the time, full sweep on the last leg.
        if reached.load(Ordering::SeqCst) + 1 >= WAYPOINTS {
            parallel(
                2,
                vec![
                    task("lidar", |_| Status::Success),
                    task("camera", |_| Status::Success),
                    task("thermal", |_| Status::Failure),
                ],
            )
        } else {
            task("lidar", |_| Status::Success)
        }
    });

    label(
        "patrol",
        sequence(vec![
            fallback(vec![invert(low_battery), recharge]),
            scan,
            advance,
        ]),
    )
}
