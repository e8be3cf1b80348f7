//! One-second countdown scheduler.
//!
//! [`Countdown`] owns a snapshot of [`Settings`] and, once started, delivers a
//! [`Tick`] to the caller's callback every second until the remaining time
//! reaches zero.  The last tick has every field zeroed and `finished` set.
//!
//! ```text
//! start(time = 2)
//!   t = 0 s   callback(2 remaining, finished = false)   ← synchronous, inside start()
//!   t = 1 s   callback(1 remaining, finished = false)
//!   t = 2 s   callback(00 00 00 00, finished = true)    ← terminal
//! ```
//!
//! # Design decisions
//!
//! | Topic | Choice |
//! |---|---|
//! | Settings | Cloned into each countdown — two countdowns never share state |
//! | Re-scheduling | One spawned task driving a `tokio::time::interval`, not a chain of one-shot timers |
//! | Stopping early | [`CountdownHandle::cancel`] via a `CancellationToken`; no tick fires afterwards |
//! | Dropped handle | The task keeps running to completion (detached) |
//!
//! # Example
//! ```rust,ignore
//! let handle = Countdown::new(settings).start(|tick| println!("{tick}"));
//! let outcome = handle.wait().await?;
//! ```

pub mod error;

pub use error::{SettingsError, TimerError};

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::decompose::Tick;
use crate::settings::Settings;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Spacing between two ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

// ── Outcome ───────────────────────────────────────────────────────────────────

/// How a countdown task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Remaining time reached zero and the final tick was delivered.
    Finished,
    /// [`CountdownHandle::cancel`] was called first; no final tick.
    Cancelled,
}

// ── Countdown ─────────────────────────────────────────────────────────────────

/// A countdown that has not been started yet.
#[derive(Debug, Clone)]
pub struct Countdown {
    settings: Settings,
}

impl Countdown {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Deliver the first tick synchronously, then spawn the per-second task.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn start<F>(self, mut callback: F) -> CountdownHandle
    where
        F: FnMut(Tick) + Send + 'static,
    {
        let settings = self.settings;
        let token = CancellationToken::new();

        info!(
            time = settings.time,
            format = %settings.format,
            with_hour = settings.with_hour,
            with_day = settings.with_day,
            "Countdown started"
        );

        let first = Tick::running(settings.time, &settings);
        debug!(remaining = settings.time, tick = %first, "tick");
        callback(first);

        let started_at = Instant::now();
        let task = tokio::spawn(run_ticks(settings, started_at, token.clone(), callback));

        CountdownHandle { token, task }
    }
}

/// Body of the spawned task: every tick decrements, the tick that reaches zero
/// delivers the terminal tick and ends the loop.
async fn run_ticks<F>(
    settings: Settings,
    started_at: Instant,
    token: CancellationToken,
    mut callback: F,
) -> Outcome
where
    F: FnMut(Tick),
{
    let mut ticker = interval_at(started_at + TICK_PERIOD, TICK_PERIOD);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut remaining = settings.time;

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                info!(remaining, "Countdown cancelled");
                return Outcome::Cancelled;
            }
            _ = ticker.tick() => {}
        }

        remaining = remaining.saturating_sub(1);

        if remaining == 0 {
            let last = Tick::finished(settings.format);
            debug!(remaining, tick = %last, "final tick");
            callback(last);
            info!("Countdown finished");
            return Outcome::Finished;
        }

        let tick = Tick::running(remaining, &settings);
        debug!(remaining, tick = %tick, "tick");
        callback(tick);
    }
}

// ── CountdownHandle ───────────────────────────────────────────────────────────

/// Control handle for a running countdown.
///
/// Dropping the handle does not stop the countdown.
#[derive(Debug)]
pub struct CountdownHandle {
    token: CancellationToken,
    task: JoinHandle<Outcome>,
}

impl CountdownHandle {
    /// Stop the countdown before its next tick.  Idempotent; a no-op once the
    /// countdown has finished.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// A token that cancels this countdown when triggered, e.g. from a signal
    /// handler that does not own the handle.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Returns `true` once the task has ended (finished, cancelled or failed).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the countdown to end.
    ///
    /// # Errors
    /// [`TimerError::TaskFailed`] if the callback panicked.
    pub async fn wait(self) -> Result<Outcome, TimerError> {
        Ok(self.task.await?)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
