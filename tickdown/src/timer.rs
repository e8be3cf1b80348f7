/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Public entry points: `initialize`, `run` and `diff` on an owned [`Timer`].
//!
//! # Ownership model
//! A `Timer` owns its [`Settings`].  Every [`run`](Timer::run) snapshots them
//! into a fresh [`Countdown`], so re-initializing the timer while a countdown
//! is in flight never reaches into the running one, and two timers never see
//! each other's settings.
//!
//! ```text
//! Timer::new()            settings: None
//!   .initialize(patch)    settings: defaults ⊕ patch
//!   .diff(start, end)     settings.time = end - start
//!   .run(None, cb)   ──►  Countdown(settings.clone()).start(cb)  ──►  CountdownHandle
//! ```

use serde_yaml::Value;
use tracing::{debug, warn};

use crate::countdown::{Countdown, CountdownHandle, TimerError};
use crate::decompose::Tick;
use crate::settings::{Settings, SettingsPatch};

// ── Timer ─────────────────────────────────────────────────────────────────────

/// Owner of one set of countdown settings.
#[derive(Debug, Clone, Default)]
pub struct Timer {
    /// `None` until the first `initialize`, `run` or `diff`.
    settings: Option<Settings>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current settings, or `None` if the timer was never initialized.
    pub fn settings(&self) -> Option<&Settings> {
        self.settings.as_ref()
    }

    /// Replace the settings with the defaults overlaid by `patch`.
    ///
    /// `None` resets to the defaults.  Always merges over the defaults, not
    /// over the previous settings.
    pub fn initialize(&mut self, patch: Option<SettingsPatch>) -> &mut Self {
        let settings = Settings::merge(&patch.unwrap_or_default());
        debug!(?settings, "Timer initialized");
        self.settings = Some(settings);
        self
    }

    /// [`initialize`](Self::initialize) from an untyped mapping; unknown keys
    /// and malformed values are logged and dropped.
    pub fn initialize_from_value(&mut self, value: &Value) -> &mut Self {
        self.initialize(Some(SettingsPatch::from(value)))
    }

    /// Strict variant of [`initialize_from_value`](Self::initialize_from_value).
    ///
    /// # Errors
    /// [`TimerError::Settings`] for the first rejected key; the settings are
    /// left untouched in that case.
    pub fn try_initialize(&mut self, value: &Value) -> Result<&mut Self, TimerError> {
        let patch = SettingsPatch::parse_strict(value)?;
        Ok(self.initialize(Some(patch)))
    }

    /// Start a countdown with the timer's settings.
    ///
    /// Re-initializes first when `patch` is supplied or when the timer was
    /// never initialized.  The first tick is delivered before this returns.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn run<F>(&mut self, patch: Option<SettingsPatch>, callback: F) -> CountdownHandle
    where
        F: FnMut(Tick) + Send + 'static,
    {
        if patch.is_some() || self.settings.is_none() {
            self.initialize(patch);
        }
        let settings = self.settings.clone().unwrap_or_default();
        Countdown::new(settings).start(callback)
    }

    /// Set `time` to `end - start` when `start < end`; otherwise log and leave
    /// the settings unchanged.  Does not start a countdown.
    pub fn diff(&mut self, start: i64, end: i64) -> &mut Self {
        if let Err(e) = self.try_diff(start, end) {
            warn!("Ignoring diff: {e}");
        }
        self
    }

    /// Strict variant of [`diff`](Self::diff).
    ///
    /// An uninitialized timer picks up the defaults for every other key.
    ///
    /// # Errors
    /// [`TimerError::InvalidRange`] if `start >= end`.
    pub fn try_diff(&mut self, start: i64, end: i64) -> Result<&mut Self, TimerError> {
        if start >= end {
            return Err(TimerError::InvalidRange { start, end });
        }
        let time = end.abs_diff(start);
        self.settings.get_or_insert_with(Settings::default).time = time;
        debug!(start, end, time, "Time set from diff");
        Ok(self)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::Outcome;
    use crate::decompose::Component;
    use crate::settings::{Format, DEFAULT_TIME_SECS};
    use std::sync::{Arc, Mutex};

    fn yaml(content: &str) -> Value {
        serde_yaml::from_str(content).unwrap()
    }

    fn time_of(timer: &Timer) -> u64 {
        timer.settings().unwrap().time
    }

    // ── initialize ────────────────────────────────────────────────────────────

    #[test]
    fn new_timer_is_uninitialized() {
        assert!(Timer::new().settings().is_none());
    }

    #[test]
    fn initialize_without_patch_uses_defaults() {
        let mut timer = Timer::new();
        timer.initialize(None);
        assert_eq!(timer.settings(), Some(&Settings::default()));
    }

    #[test]
    fn initialize_drops_unknown_keys() {
        let mut timer = Timer::new();
        timer.initialize_from_value(&yaml("time: 30\nbogusKey: 1\n"));
        assert_eq!(time_of(&timer), 30);
        let text = serde_yaml::to_string(timer.settings().unwrap()).unwrap();
        assert!(!text.contains("bogusKey"));
    }

    #[test]
    fn initialize_rejects_non_integer_time() {
        let mut timer = Timer::new();
        timer.initialize_from_value(&yaml("time: abc\n"));
        assert_eq!(time_of(&timer), DEFAULT_TIME_SECS);
    }

    #[test]
    fn initialize_merges_over_defaults_not_previous() {
        let mut timer = Timer::new();
        timer.initialize(Some(SettingsPatch {
            format: Some(Format::Int),
            ..Default::default()
        }));
        timer.initialize(Some(SettingsPatch::with_time(5)));
        let s = timer.settings().unwrap();
        assert_eq!(s.time, 5);
        assert_eq!(s.format, Format::String);
    }

    #[test]
    fn try_initialize_reports_and_keeps_settings() {
        let mut timer = Timer::new();
        timer.initialize(Some(SettingsPatch::with_time(7)));

        let err = timer.try_initialize(&yaml("bogusKey: 1\n")).unwrap_err();
        assert!(matches!(err, TimerError::Settings(_)));
        assert_eq!(time_of(&timer), 7);

        timer.try_initialize(&yaml("time: 9\n")).unwrap();
        assert_eq!(time_of(&timer), 9);
    }

    // ── diff ──────────────────────────────────────────────────────────────────

    #[test]
    fn diff_sets_time_to_range_length() {
        let mut timer = Timer::new();
        timer.initialize(None).diff(10, 20);
        assert_eq!(time_of(&timer), 10);
    }

    #[test]
    fn diff_with_reversed_range_is_noop() {
        let mut timer = Timer::new();
        timer.initialize(None).diff(20, 10);
        assert_eq!(timer.settings(), Some(&Settings::default()));
    }

    #[test]
    fn diff_with_equal_bounds_is_noop() {
        let mut timer = Timer::new();
        timer.diff(5, 5);
        assert!(timer.settings().is_none());
    }

    #[test]
    fn diff_on_uninitialized_timer_fills_defaults() {
        let mut timer = Timer::new();
        timer.diff(1_700_000_000, 1_700_000_090);
        let s = timer.settings().unwrap();
        assert_eq!(s.time, 90);
        assert_eq!(s.format, Format::String);
    }

    #[test]
    fn try_diff_reports_invalid_range() {
        let mut timer = Timer::new();
        let err = timer.try_diff(20, 10).unwrap_err();
        assert!(matches!(
            err,
            TimerError::InvalidRange { start: 20, end: 10 }
        ));
    }

    #[test]
    fn diff_handles_extreme_bounds() {
        let mut timer = Timer::new();
        timer.diff(i64::MIN, i64::MAX);
        assert_eq!(time_of(&timer), u64::MAX);
    }

    // ── run ───────────────────────────────────────────────────────────────────

    fn collector() -> (Arc<Mutex<Vec<Tick>>>, impl FnMut(Tick) + Send + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |tick: Tick| sink.lock().unwrap().push(tick))
    }

    #[tokio::test(start_paused = true)]
    async fn run_without_initialize_uses_defaults() {
        let (seen, callback) = collector();
        let mut timer = Timer::new();
        let handle = timer.run(None, callback);

        assert_eq!(timer.settings(), Some(&Settings::default()));
        assert_eq!(handle.wait().await.unwrap(), Outcome::Finished);
        // 60, 59, ..., 1, then the finished tick
        assert_eq!(seen.lock().unwrap().len(), 61);
    }

    #[tokio::test(start_paused = true)]
    async fn run_keeps_time_set_by_diff() {
        let (seen, callback) = collector();
        let mut timer = Timer::new();
        timer.initialize(None).diff(100, 102);
        timer.run(None, callback).wait().await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].second, Component::Text("02".into()));
        assert!(seen[2].finished);
    }

    #[tokio::test(start_paused = true)]
    async fn run_with_patch_reinitializes() {
        let (seen, callback) = collector();
        let mut timer = Timer::new();
        timer.initialize(None).diff(0, 500);

        let patch = SettingsPatch {
            time: Some(1),
            format: Some(Format::Int),
            ..Default::default()
        };
        timer.run(Some(patch), callback).wait().await.unwrap();

        assert_eq!(time_of(&timer), 1);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].second, Component::Int(1));
        assert_eq!(seen[1], Tick::finished(Format::Int));
    }

    #[tokio::test(start_paused = true)]
    async fn reinitializing_does_not_affect_running_countdown() {
        let (seen, callback) = collector();
        let mut timer = Timer::new();
        let handle = timer.run(Some(SettingsPatch::with_time(2)), callback);

        timer.initialize(Some(SettingsPatch {
            time: Some(500),
            format: Some(Format::Int),
            ..Default::default()
        }));

        handle.wait().await.unwrap();
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|t| t.second.as_text().is_some()));
    }
}
