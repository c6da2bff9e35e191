//! Periodic tick driver
//!
//! Owns the feed state and the subscriber registry. Each tick races the
//! upstream fetch against a timeout, falls back to the simulator on any
//! [`FetchError`], publishes the new snapshot and fans it out synchronously.
//! Ticks never overlap: every tick, timed or on demand, holds the tick guard
//! from fetch through fan-out.

use super::registry::{Subscription, SubscriptionRegistry};
use super::simulator::PriceSimulator;
use super::source::PriceSource;
use super::state::FeedState;
use super::types::{FeedError, FetchError, PriceSnapshot, TickError, TickOrigin};
use crate::config::{SchedulerConfig, SimulatorConfig, StartMode};
use crate::telemetry;
use futures_util::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::sync::{watch, Mutex as AsyncMutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Lifecycle of the tick loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// No timer registered yet
    Idle,
    /// Tick loop running
    Running,
    /// Shut down; will not start again
    Stopped,
}

enum Lifecycle {
    Idle,
    Running(JoinHandle<()>),
    Stopped,
}

struct Inner {
    source: Arc<dyn PriceSource>,
    simulator: PriceSimulator,
    state: Mutex<FeedState>,
    registry: SubscriptionRegistry,
    interval: Duration,
    fetch_timeout: Duration,
    start_mode: StartMode,
    runtime: Handle,
    lifecycle: Mutex<Lifecycle>,
    shutdown_tx: watch::Sender<bool>,
    ticks: AtomicU64,
    tick_guard: AsyncMutex<()>,
}

/// Shared handle to the gold price feed
///
/// Cheap to clone; every clone drives the same feed. The tick loop stops
/// once [`TickScheduler::shutdown`] is called or every handle is dropped.
#[derive(Clone)]
pub struct TickScheduler {
    inner: Arc<Inner>,
}

impl TickScheduler {
    /// Create the feed, seeded with `simulator.seed_price`
    ///
    /// Must be called from within a tokio runtime. With
    /// [`StartMode::Eager`] the tick loop starts immediately.
    pub fn new(
        scheduler: &SchedulerConfig,
        simulator: &SimulatorConfig,
        source: Arc<dyn PriceSource>,
    ) -> Result<Self, FeedError> {
        scheduler.validate()?;
        let simulator_model = PriceSimulator::new(simulator)?;
        let runtime = Handle::try_current().map_err(|_| FeedError::NoRuntime)?;

        let seed = PriceSnapshot::seed(simulator.seed_price);
        let state = FeedState::new(seed, simulator.floor).map_err(|_| {
            crate::config::ConfigError::SeedBelowFloor {
                seed: simulator.seed_price,
                floor: simulator.floor,
            }
        })?;

        let (shutdown_tx, _) = watch::channel(false);

        let feed = Self {
            inner: Arc::new(Inner {
                source,
                simulator: simulator_model,
                state: Mutex::new(state),
                registry: SubscriptionRegistry::new(),
                interval: scheduler.interval(),
                fetch_timeout: scheduler.fetch_timeout(),
                start_mode: scheduler.start,
                runtime,
                lifecycle: Mutex::new(Lifecycle::Idle),
                shutdown_tx,
                ticks: AtomicU64::new(0),
                tick_guard: AsyncMutex::new(()),
            }),
        };

        tracing::info!(
            interval_secs = scheduler.interval_secs,
            fetch_timeout_secs = scheduler.fetch_timeout_secs,
            start = ?scheduler.start,
            seed_price = %simulator.seed_price,
            floor = %simulator.floor,
            "Gold price feed created"
        );

        if scheduler.start == StartMode::Eager {
            feed.start();
        }

        Ok(feed)
    }

    /// Register a snapshot callback
    ///
    /// The current snapshot is delivered to `callback` before this returns.
    /// In lazy mode the first subscription starts the tick loop.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&PriceSnapshot) + Send + Sync + 'static,
    {
        let subscription = self.inner.registry.add(callback);
        let (sequence, snapshot) = self.inner.current();
        self.inner
            .registry
            .deliver_to(subscription.id(), sequence, &snapshot);

        if self.inner.start_mode == StartMode::Lazy {
            self.start();
        }

        subscription
    }

    /// Most recent snapshot
    pub fn latest(&self) -> PriceSnapshot {
        self.inner.current().1
    }

    /// Number of completed ticks
    pub fn tick_count(&self) -> u64 {
        self.inner.ticks.load(Ordering::Acquire)
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.registry.len()
    }

    pub fn state(&self) -> SchedulerState {
        match &*self.inner.lifecycle() {
            Lifecycle::Idle => SchedulerState::Idle,
            Lifecycle::Running(_) => SchedulerState::Running,
            Lifecycle::Stopped => SchedulerState::Stopped,
        }
    }

    /// Start the tick loop; no-op when already running or stopped
    pub fn start(&self) {
        let mut lifecycle = self.inner.lifecycle();
        if !matches!(*lifecycle, Lifecycle::Idle) {
            return;
        }

        let weak = Arc::downgrade(&self.inner);
        let shutdown_rx = self.inner.shutdown_tx.subscribe();
        let period = self.inner.interval;
        let handle = self
            .inner
            .runtime
            .spawn(run_tick_loop(weak, period, shutdown_rx));

        *lifecycle = Lifecycle::Running(handle);
        tracing::info!(interval = ?period, "Tick loop started");
    }

    /// Run one tick now, outside the timer
    ///
    /// Waits for an in-flight timed tick to finish first.
    pub async fn tick_now(&self) -> Result<PriceSnapshot, TickError> {
        self.inner.tick().await
    }

    /// Stop the tick loop and wait for an in-flight tick to finish
    pub async fn shutdown(&self) {
        let previous = std::mem::replace(&mut *self.inner.lifecycle(), Lifecycle::Stopped);
        let _ = self.inner.shutdown_tx.send(true);

        if let Lifecycle::Running(handle) = previous {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Tick loop ended abnormally");
            }
        }
        tracing::info!(ticks = self.tick_count(), "Tick loop stopped");
    }
}

impl Inner {
    fn lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn feed_state(&self) -> MutexGuard<'_, FeedState> {
        // FeedState is replaced whole, never left half-written
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current(&self) -> (u64, PriceSnapshot) {
        let state = self.feed_state();
        (state.sequence(), state.snapshot().clone())
    }

    /// Upstream fetch bounded by the fetch timeout, floor-checked
    async fn fetch_upstream(&self) -> Result<PriceSnapshot, FetchError> {
        let started = Instant::now();
        let result = match tokio::time::timeout(self.fetch_timeout, self.source.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.fetch_timeout)),
        };
        telemetry::record_fetch_latency(started.elapsed());

        let snapshot = result?;
        let floor = self.simulator.floor();
        if snapshot.price < floor {
            tracing::warn!(
                price = %snapshot.price.round_dp(4),
                %floor,
                "Upstream price below the floor, check source.conversion_rate"
            );
            return Err(FetchError::BelowFloor {
                price: snapshot.price,
                floor,
            });
        }
        Ok(snapshot)
    }

    async fn tick(&self) -> Result<PriceSnapshot, TickError> {
        let _guard = self.tick_guard.lock().await;

        let (snapshot, origin) = match self.fetch_upstream().await {
            Ok(snapshot) => (snapshot, TickOrigin::Upstream),
            Err(e) => {
                tracing::warn!(error = %e, "Upstream fetch failed, using simulated price");
                telemetry::record_fetch_failure(e.reason());
                let (_, previous) = self.current();
                (self.simulator.next(&previous), TickOrigin::Simulated)
            }
        };

        let sequence = self.feed_state().replace(snapshot.clone())?;
        let delivered = self.registry.notify(sequence, &snapshot);
        self.ticks.fetch_add(1, Ordering::AcqRel);

        telemetry::record_tick(origin);
        telemetry::set_price(snapshot.price);

        tracing::info!(
            origin = origin.as_str(),
            sequence,
            price = %snapshot.price.round_dp(4),
            change_percent = %snapshot.change_percent.round_dp(2),
            delivered,
            "Tick published"
        );

        Ok(snapshot)
    }
}

/// Timer loop; holds the feed weakly so dropping every handle ends it
async fn run_tick_loop(inner: Weak<Inner>, period: Duration, mut shutdown: watch::Receiver<bool>) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
                continue;
            }
        }

        let Some(inner) = inner.upgrade() else {
            tracing::debug!("Feed dropped, stopping tick loop");
            break;
        };

        match AssertUnwindSafe(inner.tick()).catch_unwind().await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => tracing::error!(error = %e, "Tick failed, skipping"),
            Err(_) => tracing::error!("Tick panicked, skipping"),
        }
    }
}
