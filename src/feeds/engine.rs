use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::FeedPoller;
use crate::api::DrawSource;
use crate::events::Event;
use crate::state::{Countdown, EngineView, Observation, PollPhase};

const TICK: Duration = Duration::from_secs(1);

/// When to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Poll every `interval` regardless of round boundaries.
    /// `round_secs` only drives the displayed countdown.
    FixedInterval { interval: Duration, round_secs: u32 },

    /// Count down once per second and poll when the countdown hits zero,
    /// then start a new round. With `align_to_clock` the first round is
    /// shortened to end on a wall-clock round boundary.
    Countdown { round_secs: u32, align_to_clock: bool },
}

impl Schedule {
    pub fn round_secs(&self) -> u32 {
        match self {
            Schedule::FixedInterval { round_secs, .. } => *round_secs,
            Schedule::Countdown { round_secs, .. } => *round_secs,
        }
    }

    fn initial_countdown(&self, now_ms: i64) -> Countdown {
        match self {
            Schedule::Countdown {
                round_secs,
                align_to_clock: true,
            }
            | Schedule::FixedInterval { round_secs, .. } => Countdown::aligned(*round_secs, now_ms),
            Schedule::Countdown { round_secs, .. } => Countdown::new(*round_secs),
        }
    }
}

/// Poller plus cadence. `spawn` moves it onto its own task.
pub struct Engine<S> {
    poller: FeedPoller<S>,
    schedule: Schedule,
    clock: fn() -> i64,
}

impl<S> Engine<S>
where
    S: DrawSource + Send + Sync + 'static,
{
    pub fn new(poller: FeedPoller<S>, schedule: Schedule) -> Self {
        Self {
            poller,
            schedule,
            clock: now_ms,
        }
    }

    /// Replace the wall clock (unix millis) used to align the countdown.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    /// Start polling. Notifications go to `events`; state is read through
    /// the returned handle.
    pub fn spawn(self, events: mpsc::Sender<Event>) -> EngineHandle {
        let countdown = self.schedule.initial_countdown((self.clock)());
        let (view_tx, view_rx) = watch::channel(self.poller.view(countdown.remaining()));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let runner = Runner {
            poller: self.poller,
            schedule: self.schedule,
            countdown,
            clock: self.clock,
            events,
            view: view_tx,
        };
        let task = tokio::spawn(runner.run(shutdown_rx));

        EngineHandle {
            view: view_rx,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }
}

/// Owner side of a running engine.
///
/// Dropping the handle aborts the task, so no timer outlives it.
pub struct EngineHandle {
    view: watch::Receiver<EngineView>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl EngineHandle {
    /// Latest published state.
    pub fn view(&self) -> EngineView {
        self.view.borrow().clone()
    }

    /// Receiver that wakes on every publish.
    pub fn subscribe(&self) -> watch::Receiver<EngineView> {
        self.view.clone()
    }

    /// Stop the timer and wait for the task to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "engine task ended abnormally");
            }
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

struct Runner<S> {
    poller: FeedPoller<S>,
    schedule: Schedule,
    countdown: Countdown,
    clock: fn() -> i64,
    events: mpsc::Sender<Event>,
    view: watch::Sender<EngineView>,
}

// A tick that lands while a poll is pending is dropped, not queued
fn ticker(period: Duration) -> Interval {
    let period = period.max(Duration::from_millis(1));
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

impl<S> Runner<S>
where
    S: DrawSource + Send + Sync + 'static,
{
    async fn run(mut self, mut shutdown: oneshot::Receiver<()>) {
        info!(schedule = ?self.schedule, "engine started");

        tokio::select! {
            biased;
            _ = &mut shutdown => {}
            _ = self.run_ticks() => {}
        }

        info!("engine stopped");
        let _ = self.events.try_send(Event::Shutdown);
    }

    async fn run_ticks(&mut self) {
        // Baseline before the first tick
        self.poll().await;

        let mut seconds = ticker(TICK);
        match self.schedule {
            Schedule::Countdown { .. } => loop {
                seconds.tick().await;
                if self.countdown.tick() {
                    self.poll().await;
                    self.countdown.reset();
                }
                self.publish();
            },
            Schedule::FixedInterval {
                interval,
                round_secs,
            } => {
                let mut fetches = ticker(interval);
                loop {
                    // Handlers run outside the race, so a poll is never
                    // started while another is pending
                    tokio::select! {
                        _ = fetches.tick() => {
                            self.poll().await;
                            self.countdown = Countdown::aligned(round_secs, (self.clock)());
                        }
                        _ = seconds.tick() => {
                            if self.countdown.tick() {
                                self.countdown.reset();
                            }
                        }
                    }
                    self.publish();
                }
            }
        }
    }

    async fn poll(&mut self) {
        self.view.send_modify(|view| view.phase = PollPhase::Polling);

        match self.poller.poll_once().await {
            Ok(Observation::NewIssue { previous }) => {
                let issue = self
                    .poller
                    .snapshot()
                    .latest()
                    .map(|d| d.issue_number.clone())
                    .unwrap_or_default();
                self.notify(Event::NewIssue {
                    issue,
                    previous,
                    prediction: self.poller.prediction().cloned(),
                });
            }
            Ok(observation) => debug!(?observation, "poll complete"),
            Err(error) => self.notify(Event::FetchFailed { error }),
        }

        self.publish();
    }

    fn publish(&self) {
        self.view.send_replace(self.poller.view(self.countdown.remaining()));
    }

    // Never waits on a slow consumer; the schedule must keep going.
    fn notify(&self, event: Event) {
        if let Err(e) = self.events.try_send(event) {
            warn!(error = %e, "dropping engine event");
        }
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
