use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use behavior_tree::builder::{parallel, run_until_success, sequence, task};
use behavior_tree::{Node, RunConfig, RunError, Status, TickContext, TickInfo, Tracer, run};
use tokio_util::sync::CancellationToken;

/// Returns `Running` for the first `max` ticks, then `Success`.
struct MaxTick {
    ticks: AtomicUsize,
    max: usize,
}

impl MaxTick {
    fn new(max: usize) -> Arc<Self> {
        Arc::new(Self {
            ticks: AtomicUsize::new(0),
            max,
        })
    }

    fn ticks(&self) -> usize {
        self.ticks.load(Ordering::SeqCst)
    }
}

impl Node for MaxTick {
    fn tick(&self, _ctx: &TickContext) -> Status {
        let seen = self.ticks.fetch_add(1, Ordering::SeqCst);
        if seen >= self.max {
            Status::Success
        } else {
            Status::Running
        }
    }
}

fn fast_config() -> RunConfig {
    RunConfig::default()
        .with_tick_rate(Duration::ZERO)
        .with_tick_timeout(Duration::from_secs(5))
}

#[tokio::test]
async fn stateful_leaf_succeeds_after_n_plus_one_ticks() {
    let leaf = MaxTick::new(10);
    let root: Arc<dyn Node> = leaf.clone();

    let status = run(&CancellationToken::new(), root, &fast_config())
        .await
        .expect("run should complete");

    assert_eq!(status, Status::Success);
    assert_eq!(leaf.ticks(), 11);
}

#[tokio::test]
async fn terminal_first_tick_returns_immediately() {
    let root = task("done", |_| Status::Failure);
    let config = RunConfig::default(); // 10s cadence would be noticed

    let started = Instant::now();
    let status = run(&CancellationToken::new(), root, &config)
        .await
        .expect("run should complete");

    assert_eq!(status, Status::Failure);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn lifetime_cancelled_before_completion_fails() {
    let leaf = MaxTick::new(1_000);
    let root: Arc<dyn Node> = leaf.clone();
    let config = fast_config().with_tick_rate(Duration::from_millis(10));

    let lifetime = CancellationToken::new();
    {
        let lifetime = lifetime.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            lifetime.cancel();
        });
    }

    let status = run(&lifetime, root, &config)
        .await
        .expect("run should complete");

    assert_eq!(status, Status::Failure);
    assert!(lifetime.is_cancelled());
    assert!(leaf.ticks() < 1_000);
}

#[tokio::test]
async fn cancelled_lifetime_still_allows_one_tick() {
    let leaf = MaxTick::new(5);
    let root: Arc<dyn Node> = leaf.clone();

    let lifetime = CancellationToken::new();
    lifetime.cancel();

    let status = run(&lifetime, root, &fast_config())
        .await
        .expect("run should complete");

    assert_eq!(status, Status::Failure);
    assert_eq!(leaf.ticks(), 1);
}

#[tokio::test]
async fn tick_timeout_reaches_cooperating_leaf() {
    let root = task("wait for deadline", |ctx: &TickContext| {
        while !ctx.is_cancelled() {
            thread::sleep(Duration::from_millis(1));
        }
        Status::Failure
    });
    let config = fast_config().with_tick_timeout(Duration::from_millis(20));

    let started = Instant::now();
    let status = run(&CancellationToken::new(), root, &config)
        .await
        .expect("run should complete");

    assert_eq!(status, Status::Failure);
    assert!(started.elapsed() >= Duration::from_millis(20));
}

#[tokio::test]
async fn tick_timeout_cancels_the_tick_token() {
    let root = task("watch token", |ctx: &TickContext| {
        while !ctx.token().is_cancelled() {
            thread::sleep(Duration::from_millis(1));
        }
        Status::Success
    });
    let config = fast_config().with_tick_timeout(Duration::from_millis(20));

    let status = run(&CancellationToken::new(), root, &config)
        .await
        .expect("run should complete");

    assert_eq!(status, Status::Success);
}

#[tokio::test]
async fn tick_timeout_does_not_preempt_leaf() {
    let root = task("stubborn", |_| {
        thread::sleep(Duration::from_millis(30));
        Status::Success
    });
    let config = fast_config().with_tick_timeout(Duration::from_millis(1));

    let status = run(&CancellationToken::new(), root, &config)
        .await
        .expect("run should complete");

    assert_eq!(status, Status::Success);
}

#[tokio::test]
async fn unbounded_tick_timeout_runs_normally() {
    let root = task("no deadline", |ctx: &TickContext| {
        assert_eq!(ctx.deadline(), None);
        Status::Success
    });
    let config = fast_config().with_tick_timeout(Duration::MAX);

    let status = run(&CancellationToken::new(), root, &config)
        .await
        .expect("run should complete");

    assert_eq!(status, Status::Success);
}

#[tokio::test]
async fn cadence_is_waited_after_each_running_tick() {
    const TICK: Duration = Duration::from_millis(10);
    const CADENCE: Duration = Duration::from_millis(30);

    let ticks = Arc::new(AtomicUsize::new(0));
    let root = {
        let ticks = Arc::clone(&ticks);
        task("slow", move |_| {
            thread::sleep(TICK);
            if ticks.fetch_add(1, Ordering::SeqCst) < 2 {
                Status::Running
            } else {
                Status::Success
            }
        })
    };
    let config = fast_config().with_tick_rate(CADENCE);

    let started = Instant::now();
    let status = run(&CancellationToken::new(), root, &config)
        .await
        .expect("run should complete");

    // Three ticks with a full cadence after each of the two running ones:
    // a cadence measured from tick start would finish sooner.
    assert_eq!(status, Status::Success);
    assert_eq!(ticks.load(Ordering::SeqCst), 3);
    assert!(started.elapsed() >= TICK * 3 + CADENCE * 2);
}

#[tokio::test]
async fn each_tick_gets_a_fresh_bounded_lifetime() {
    let ticks = Arc::new(AtomicUsize::new(0));
    let root = {
        let ticks = Arc::clone(&ticks);
        task("fresh", move |ctx: &TickContext| {
            assert!(!ctx.is_cancelled(), "tick started with a spent lifetime");
            if ticks.fetch_add(1, Ordering::SeqCst) < 3 {
                Status::Running
            } else {
                Status::Success
            }
        })
    };
    let config = fast_config().with_tick_timeout(Duration::from_millis(200));

    let status = run(&CancellationToken::new(), root, &config)
        .await
        .expect("run should complete");

    assert_eq!(status, Status::Success);
    assert_eq!(ticks.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn run_until_success_keeps_ticking_through_failures() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let root = {
        let attempts = Arc::clone(&attempts);
        run_until_success(task("flaky", move |_| {
            if attempts.fetch_add(1, Ordering::SeqCst) < 4 {
                Status::Failure
            } else {
                Status::Success
            }
        }))
    };

    let status = run(&CancellationToken::new(), root, &fast_config())
        .await
        .expect("run should complete");

    assert_eq!(status, Status::Success);
    assert_eq!(attempts.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn parallel_tree_runs_to_completion() {
    let first = MaxTick::new(2);
    let second = MaxTick::new(4);
    let root = sequence(vec![
        task("setup", |_| Status::Success),
        parallel(
            2,
            vec![
                Box::new(Arc::clone(&first) as Arc<dyn Node>),
                Box::new(Arc::clone(&second) as Arc<dyn Node>),
                task("idle", |_| Status::Running),
            ],
        ),
    ]);

    let status = run(&CancellationToken::new(), root, &fast_config())
        .await
        .expect("run should complete");

    assert_eq!(status, Status::Success);
    assert_eq!(first.ticks(), 5);
    assert_eq!(second.ticks(), 5);
}

#[derive(Default)]
struct CountingTracer {
    started: AtomicUsize,
    finished: AtomicUsize,
}

impl Tracer for CountingTracer {
    fn tick_started(&self, _node: TickInfo<'_>) {
        self.started.fetch_add(1, Ordering::SeqCst);
    }

    fn tick_finished(&self, _node: TickInfo<'_>, _status: Status, _elapsed: Duration) {
        self.finished.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn configured_tracer_sees_every_node_tick() {
    let tracer = Arc::new(CountingTracer::default());
    let leaf = MaxTick::new(2);
    let root = sequence(vec![
        task("check", |_| Status::Success),
        Box::new(Arc::clone(&leaf) as Arc<dyn Node>),
    ]);
    let config = fast_config().with_tracer(tracer.clone());

    let status = run(&CancellationToken::new(), root, &config)
        .await
        .expect("run should complete");

    // Three ticks of a root with two children.
    assert_eq!(status, Status::Success);
    assert_eq!(tracer.started.load(Ordering::SeqCst), 9);
    assert_eq!(tracer.finished.load(Ordering::SeqCst), 9);
}

#[tokio::test]
async fn invalid_root_status_is_an_error() {
    let root = task("broken", |_| Status::Invalid);

    let err = run(&CancellationToken::new(), root, &fast_config())
        .await
        .expect_err("invalid status must not be reported as an outcome");

    // Debug builds trip the contract assertion inside the tick itself.
    if cfg!(debug_assertions) {
        assert!(matches!(err, RunError::TickJoin(_)));
    } else {
        assert!(matches!(err, RunError::InvalidStatus));
    }
}
