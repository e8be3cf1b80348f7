/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for Tickdown.
//!
//! Two error enums model the two failure layers:
//!
//! * [`SettingsError`] — why a single settings key was rejected (carries the
//!   offending key and a rendering of the value).
//! * [`TimerError`] — top-level failure returned from the strict entry points
//!   and from [`CountdownHandle::wait()`](super::CountdownHandle::wait).
//!
//! The permissive entry points never return these; they log the same
//! variants through `tracing::warn!` and carry on with the prior values.

use thiserror::Error;

// ── Settings rejection ────────────────────────────────────────────────────────

/// Reason a settings patch (or one of its keys) was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// The patch was not a key/value mapping at all (e.g. a bare string).
    #[error("settings must be a mapping, got {found}")]
    NotAMapping { found: String },

    /// The key is not part of the settings schema.
    #[error("unknown settings key '{key}' (valid: time, format, withHour, withDay)")]
    UnknownKey { key: String },

    /// `time` is present but is not a non-negative integer.
    #[error("time must be a non-negative integer number of seconds, got {value}")]
    InvalidTime { value: String },

    /// `format` is neither `"string"` nor `"int"`.
    #[error("format must be \"string\" or \"int\", got {value}")]
    InvalidFormat { value: String },

    /// `withHour` / `withDay` is not a boolean.
    #[error("{key} must be a boolean, got {value}")]
    InvalidFlag { key: String, value: String },
}

// ── Top-level timer errors ────────────────────────────────────────────────────

/// Top-level error type for the strict [`Timer`](crate::timer::Timer) entry
/// points and for awaiting a running countdown.
///
/// | Variant | Produced by |
/// |---|---|
/// | `InvalidRange` | `Timer::try_diff` |
/// | `Settings` | `Timer::try_initialize`, `SettingsPatch::parse_strict` callers |
/// | `TaskFailed` | `CountdownHandle::wait` |
#[derive(Debug, Error)]
pub enum TimerError {
    /// `diff(start, end)` was called with `start >= end`.
    #[error("invalid time range: start {start} must be before end {end}")]
    InvalidRange { start: i64, end: i64 },

    /// A settings patch failed strict validation.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// The countdown task did not run to completion on its own: the tick
    /// callback panicked or the task was aborted by the runtime.
    #[error("countdown task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}
