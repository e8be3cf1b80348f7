/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Pure arithmetic: split a second count into day/hour/minute/second.
//!
//! Free functions so the split can be tested without any settings or
//! rendering involved.

pub const SECS_PER_MINUTE: u64 = 60;
pub const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
pub const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Split `time` into `(day, hour, minute, second)`.
///
/// A disabled unit stays `0` and the next smaller unit absorbs its scale:
/// without days the hour count runs past 24, without hours the minute count
/// runs past 60.  The subtractions cannot underflow because every subtracted
/// term is a whole-unit floor of `time` itself.
pub fn split(time: u64, with_day: bool, with_hour: bool) -> (u64, u64, u64, u64) {
    let day = if with_day { time / SECS_PER_DAY } else { 0 };
    let hour = if with_hour {
        time / SECS_PER_HOUR - day * 24
    } else {
        0
    };
    let minute = time / SECS_PER_MINUTE - day * 24 * 60 - hour * 60;
    let second = time - day * SECS_PER_DAY - hour * SECS_PER_HOUR - minute * SECS_PER_MINUTE;

    (day, hour, minute, second)
}

/// Inverse of [`split`].  Saturates instead of overflowing.
pub fn join(day: u64, hour: u64, minute: u64, second: u64) -> u64 {
    day.saturating_mul(SECS_PER_DAY)
        .saturating_add(hour.saturating_mul(SECS_PER_HOUR))
        .saturating_add(minute.saturating_mul(SECS_PER_MINUTE))
        .saturating_add(second)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
