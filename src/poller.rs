//! Repeating-refresh lifecycle for one resource kind.
//!
//! Each poller owns exactly one timer task and the held collection for its
//! resource. Consumers subscribe to a watch channel and receive a fresh
//! snapshot only when a refresh actually changed the data, so unchanged
//! fetches cost nothing downstream.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

use crate::feed::{AssetFeed, DataFeed, PredictionFeed, SensorFeed};

/// Period between automatic refreshes.
pub const REFRESH_PERIOD: Duration = Duration::from_secs(10);

/// Poller over the asset inventory.
pub type AssetPoller = Poller<AssetFeed>;
/// Poller over the sensor feed.
pub type SensorPoller = Poller<SensorFeed>;
/// Poller over the prediction stream.
pub type PredictionPoller = Poller<PredictionFeed>;

/// Lifecycle state of a poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    /// No timer armed, no data held.
    Idle,
    /// Timer armed, auto-refresh enabled.
    Running,
    /// Timer disarmed, held data retained.
    Paused,
}

/// Returns true when an incoming batch materially differs from the held
/// collection. Order-sensitive: a reordering counts as a change.
pub fn has_changed<T: PartialEq>(held: &[T], incoming: &[T]) -> bool {
    held != incoming
}

struct PollingState<T> {
    held: Vec<T>,
    last_refreshed: Option<Instant>,
    in_flight: bool,
    /// Bumped on pause/stop; a cycle whose generation no longer matches
    /// discards its result instead of applying it.
    generation: u64,
}

impl<T> PollingState<T> {
    fn new() -> Self {
        Self {
            held: Vec::new(),
            last_refreshed: None,
            in_flight: false,
            generation: 0,
        }
    }
}

/// Repeating-refresh driver for one [`DataFeed`].
pub struct Poller<F: DataFeed> {
    feed: Arc<F>,
    period: Duration,
    shared: Arc<Mutex<PollingState<F::Item>>>,
    updates: Arc<watch::Sender<Vec<F::Item>>>,
    timer: Option<JoinHandle<()>>,
    state: PollerState,
}

impl<F: DataFeed> Poller<F> {
    pub fn new(feed: F) -> Self {
        Self::with_period(feed, REFRESH_PERIOD)
    }

    pub fn with_period(feed: F, period: Duration) -> Self {
        let (updates, _) = watch::channel(Vec::new());
        Self {
            feed: Arc::new(feed),
            period,
            shared: Arc::new(Mutex::new(PollingState::new())),
            updates: Arc::new(updates),
            timer: None,
            state: PollerState::Idle,
        }
    }

    pub fn state(&self) -> PollerState {
        self.state
    }

    /// Snapshot of the held collection.
    pub fn items(&self) -> Vec<F::Item> {
        self.shared.lock().unwrap().held.clone()
    }

    /// When the last fetch cycle completed, if any.
    pub fn last_refreshed(&self) -> Option<Instant> {
        self.shared.lock().unwrap().last_refreshed
    }

    /// Subscribe to held-collection replacements. The channel only observes
    /// a new value when a refresh actually changed the data.
    pub fn subscribe(&self) -> watch::Receiver<Vec<F::Item>> {
        self.updates.subscribe()
    }

    /// Idle → Running: one immediate fetch, then the repeating timer.
    /// Ignored in any other state.
    pub async fn start(&mut self) {
        if self.state != PollerState::Idle {
            return;
        }
        run_cycle(&*self.feed, &self.shared, &self.updates).await;
        self.arm_timer();
        self.state = PollerState::Running;
    }

    /// Running → Paused: disarm the timer, keep the held collection. The
    /// timer cannot fire after this returns and any in-flight result is
    /// discarded.
    pub fn pause(&mut self) {
        if self.state != PollerState::Running {
            return;
        }
        self.disarm();
        self.state = PollerState::Paused;
    }

    /// Paused → Running: re-arm the timer. The next refresh happens at the
    /// next tick, one full period out; call [`refresh_now`](Self::refresh_now)
    /// for fresh data immediately after resuming.
    pub fn resume(&mut self) {
        if self.state != PollerState::Paused {
            return;
        }
        self.arm_timer();
        self.state = PollerState::Running;
    }

    /// Any state → Idle: disarm the timer and tear down the held data.
    pub fn stop(&mut self) {
        self.disarm();
        {
            let mut shared = self.shared.lock().unwrap();
            shared.held = Vec::new();
            shared.last_refreshed = None;
        }
        self.updates.send_if_modified(|held| {
            if held.is_empty() {
                false
            } else {
                *held = Vec::new();
                true
            }
        });
        self.state = PollerState::Idle;
    }

    /// One fetch cycle outside the timer cadence; the schedule is not
    /// disturbed. Callable in any state.
    pub async fn refresh_now(&self) {
        run_cycle(&*self.feed, &self.shared, &self.updates).await;
    }

    fn arm_timer(&mut self) {
        let feed = self.feed.clone();
        let shared = self.shared.clone();
        let updates = self.updates.clone();
        let period = self.period;
        self.timer = Some(tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                run_cycle(&*feed, &shared, &updates).await;
            }
        }));
    }

    fn disarm(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        let mut shared = self.shared.lock().unwrap();
        shared.generation += 1;
        shared.in_flight = false;
    }
}

impl<F: DataFeed> Drop for Poller<F> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// One fetch-and-apply cycle.
///
/// Skipped entirely when a cycle is already in flight, which bounds
/// concurrent requests to one per resource kind. The held collection is
/// replaced only when the normalized batch differs from it.
async fn run_cycle<F: DataFeed>(
    feed: &F,
    shared: &Mutex<PollingState<F::Item>>,
    updates: &watch::Sender<Vec<F::Item>>,
) {
    let generation = {
        let mut state = shared.lock().unwrap();
        if state.in_flight {
            debug!("refresh already in flight; skipping cycle");
            return;
        }
        state.in_flight = true;
        state.generation
    };

    let batch = feed.normalize(feed.fetch().await);

    let mut state = shared.lock().unwrap();
    if state.generation != generation {
        // The poller was paused or stopped while this fetch was outstanding.
        debug!("discarding stale refresh result");
        return;
    }
    state.in_flight = false;
    state.last_refreshed = Some(Instant::now());
    if has_changed(&state.held, &batch) {
        state.held = batch.clone();
        drop(state);
        let _ = updates.send(batch);
    }
}
