/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Tickdown – one-second countdown timer
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── settings/       – schema, defaults, patch filtering, YAML loading
//! ├── decompose/      – seconds → day/hour/minute/second, text or int rendering
//! ├── countdown/      – per-second ticker task + cancellation handle
//! │   └── error.rs    – SettingsError / TimerError
//! └── timer.rs        – initialize / run / diff entry points
//! ```

pub mod countdown;
pub mod decompose;
pub mod settings;
pub mod timer;

pub use countdown::{Countdown, CountdownHandle, Outcome};
pub use decompose::{decompose, Breakdown, Component, Tick};
pub use settings::{Format, Settings, SettingsPatch};
pub use timer::Timer;
