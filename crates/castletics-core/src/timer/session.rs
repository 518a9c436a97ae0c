//! A [`WorkoutTimer`] driven by a Tokio interval.
//!
//! The session owns at most one ticking task. Starting or resuming spawns
//! it; pausing, resetting, completing and dropping the session abort it.
//! All methods that may spawn must be called from inside a Tokio runtime.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::engine::WorkoutTimer;
use crate::events::Event;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

pub struct TimerSession {
    timer: Arc<Mutex<WorkoutTimer>>,
    ticker: Option<JoinHandle<()>>,
    notify: mpsc::UnboundedSender<Event>,
    tick_interval: Duration,
}

impl TimerSession {
    /// Wrap `timer` in a session. The receiver gets `MinimumReached` from
    /// the ticker and exactly one `WorkoutCompleted` per successful run.
    pub fn new(timer: WorkoutTimer) -> (Self, mpsc::UnboundedReceiver<Event>) {
        Self::with_tick_interval(timer, DEFAULT_TICK_INTERVAL)
    }

    /// Each tick still counts as one second; a shorter interval only speeds
    /// up the wall clock (useful for demos).
    pub fn with_tick_interval(
        timer: WorkoutTimer,
        tick_interval: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (notify, rx) = mpsc::unbounded_channel();
        let session = Self {
            timer: Arc::new(Mutex::new(timer)),
            ticker: None,
            notify,
            tick_interval: tick_interval.max(Duration::from_millis(1)),
        };
        (session, rx)
    }

    /// Copy of the current timer state.
    pub fn timer(&self) -> WorkoutTimer {
        self.lock().clone()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished())
    }

    pub fn start(&mut self) -> Option<Event> {
        let event = self.lock().start()?;
        self.spawn_ticker();
        Some(event)
    }

    pub fn pause(&mut self) -> Option<Event> {
        let event = self.lock().pause()?;
        self.stop_ticker();
        Some(event)
    }

    pub fn resume(&mut self) -> Option<Event> {
        let event = self.lock().resume()?;
        self.spawn_ticker();
        Some(event)
    }

    /// Completes the workout if the minimum is reached. The completion
    /// event is both returned and sent on the notification channel.
    pub fn complete(&mut self) -> Option<Event> {
        let event = self.lock().complete()?;
        self.stop_ticker();
        if self.notify.send(event.clone()).is_err() {
            tracing::debug!("completion receiver dropped");
        }
        let workout = self.lock().workout().to_string();
        tracing::info!(%workout, "workout completed");
        Some(event)
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.stop_ticker();
        self.lock().reset()
    }

    /// Swap in a newly selected workout. Any running session is torn down.
    pub fn replace(&mut self, timer: WorkoutTimer) {
        self.stop_ticker();
        *self.lock() = timer;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn lock(&self) -> MutexGuard<'_, WorkoutTimer> {
        self.timer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn spawn_ticker(&mut self) {
        self.stop_ticker();
        let timer = Arc::clone(&self.timer);
        let notify = self.notify.clone();
        let period = self.tick_interval;
        // Anchor the first deadline now, not when the task is first polled.
        let first = Instant::now() + period;

        self.ticker = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                interval.tick().await;
                let event = timer.lock().unwrap_or_else(PoisonError::into_inner).tick();
                if let Some(event) = event {
                    tracing::debug!(?event, "timer tick event");
                    if notify.send(event).is_err() {
                        tracing::debug!("tick receiver dropped");
                    }
                }
            }
        }));
    }

    fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }
}

impl Drop for TimerSession {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}
