//! Time decomposition: seconds → (day, hour, minute, second) → rendered tick.
//!
//! ```text
//! time: u64 ──(math::split)──► Breakdown ──(Format)──► [Component; 4] ──► Tick
//!                               numeric                 text or int        + finished flag
//! ```
//!
//! With [`Format::String`] the hour, minute and second components are
//! zero-padded to two characters; the day is left unpadded.  With
//! [`Format::Int`] all four are plain integers.

pub mod math;

use crate::settings::{Format, Settings};

// ── Breakdown ─────────────────────────────────────────────────────────────────

/// Numeric split of a second count at the granularity chosen by the settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Breakdown {
    pub day: u64,
    pub hour: u64,
    pub minute: u64,
    pub second: u64,
}

impl Breakdown {
    /// Split `time` honouring `settings.with_day` / `settings.with_hour`.
    pub fn of(time: u64, settings: &Settings) -> Self {
        let (day, hour, minute, second) = math::split(time, settings.with_day, settings.with_hour);
        Self {
            day,
            hour,
            minute,
            second,
        }
    }

    /// Recompose the second count this breakdown came from.
    pub fn total_seconds(&self) -> u64 {
        math::join(self.day, self.hour, self.minute, self.second)
    }

    /// Render the four components in `format`.
    pub fn render(&self, format: Format) -> [Component; 4] {
        match format {
            Format::String => [
                Component::Text(self.day.to_string()),
                Component::Text(format!("{:02}", self.hour)),
                Component::Text(format!("{:02}", self.minute)),
                Component::Text(format!("{:02}", self.second)),
            ],
            Format::Int => [
                Component::Int(self.day),
                Component::Int(self.hour),
                Component::Int(self.minute),
                Component::Int(self.second),
            ],
        }
    }
}

/// Decompose `time` and render it with the given settings.
pub fn decompose(time: u64, settings: &Settings) -> [Component; 4] {
    Breakdown::of(time, settings).render(settings.format)
}

// ── Component ─────────────────────────────────────────────────────────────────

/// One rendered tick field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    Text(String),
    Int(u64),
}

impl Component {
    /// The zero value for `format`: `"00"` or `0`.
    pub fn zero(format: Format) -> Self {
        match format {
            Format::String => Component::Text("00".to_string()),
            Format::Int => Component::Int(0),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Component::Text(s) => Some(s),
            Component::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<u64> {
        match self {
            Component::Text(_) => None,
            Component::Int(v) => Some(*v),
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Component::Text(s) => f.write_str(s),
            Component::Int(v) => write!(f, "{v}"),
        }
    }
}

// ── Tick ──────────────────────────────────────────────────────────────────────

/// What the countdown callback receives once per second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub day: Component,
    pub hour: Component,
    pub minute: Component,
    pub second: Component,
    /// `true` only on the last tick of a countdown that ran to zero.
    pub finished: bool,
}

impl Tick {
    /// An in-progress tick for `time` seconds remaining.
    pub fn running(time: u64, settings: &Settings) -> Self {
        Self::from_parts(decompose(time, settings), false)
    }

    /// The terminal tick: all four fields zeroed, `finished` set.
    ///
    /// Note the day is `"00"` here even though running ticks leave it
    /// unpadded.
    pub fn finished(format: Format) -> Self {
        Self::from_parts(
            [
                Component::zero(format),
                Component::zero(format),
                Component::zero(format),
                Component::zero(format),
            ],
            true,
        )
    }

    fn from_parts(parts: [Component; 4], finished: bool) -> Self {
        let [day, hour, minute, second] = parts;
        Self {
            day,
            hour,
            minute,
            second,
            finished,
        }
    }
}

impl std::fmt::Display for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}d {}:{}:{}",
            self.day, self.hour, self.minute, self.second
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(format: Format, with_day: bool, with_hour: bool) -> Settings {
        Settings {
            time: 0,
            format,
            with_hour,
            with_day,
        }
    }

    fn text(parts: &[Component; 4]) -> Vec<&str> {
        parts.iter().map(|c| c.as_text().unwrap()).collect()
    }

    // ── Breakdown ─────────────────────────────────────────────────────────────

    #[test]
    fn breakdown_round_trips_total_seconds() {
        let s = Settings::default();
        for t in [0, 1, 59, 60, 3_599, 3_600, 86_399, 86_400, 1_000_000] {
            let b = Breakdown::of(t, &s);
            assert_eq!(b.total_seconds(), t);
            assert_eq!(b.day * 86_400 + b.hour * 3_600 + b.minute * 60 + b.second, t);
        }
    }

    // ── string format ─────────────────────────────────────────────────────────

    #[test]
    fn string_format_pads_hour_minute_second_only() {
        let parts = decompose(90_061, &settings(Format::String, true, true));
        assert_eq!(text(&parts), vec!["1", "01", "01", "01"]);
    }

    #[test]
    fn string_format_fields_are_two_chars() {
        let s = settings(Format::String, true, true);
        for t in (0..200_000u64).step_by(613) {
            let parts = decompose(t, &s);
            for c in &parts[1..] {
                assert_eq!(c.as_text().unwrap().len(), 2, "t={t} part={c}");
            }
        }
    }

    #[test]
    fn string_format_leaves_large_day_unpadded() {
        let parts = decompose(12 * 86_400 + 10, &settings(Format::String, true, true));
        assert_eq!(text(&parts), vec!["12", "00", "00", "10"]);
    }

    #[test]
    fn string_format_without_day_lets_hours_exceed_24() {
        let parts = decompose(5 * 86_400, &settings(Format::String, false, true));
        assert_eq!(text(&parts), vec!["0", "120", "00", "00"]);
    }

    #[test]
    fn string_format_zero_time() {
        let parts = decompose(0, &settings(Format::String, true, true));
        assert_eq!(text(&parts), vec!["0", "00", "00", "00"]);
    }

    // ── int format ────────────────────────────────────────────────────────────

    #[test]
    fn int_format_is_unpadded_integers() {
        let parts = decompose(3_725, &settings(Format::Int, true, true));
        let ints: Vec<u64> = parts.iter().map(|c| c.as_int().unwrap()).collect();
        assert_eq!(ints, vec![0, 1, 2, 5]);
        assert_eq!(parts[3].to_string(), "5");
    }

    #[test]
    fn int_format_without_hour_folds_into_minutes() {
        let parts = decompose(3_725, &settings(Format::Int, true, false));
        assert_eq!(parts[1], Component::Int(0));
        assert_eq!(parts[2], Component::Int(62));
        assert_eq!(parts[3], Component::Int(5));
    }

    // ── Tick ──────────────────────────────────────────────────────────────────

    #[test]
    fn finished_tick_is_all_zero() {
        let t = Tick::finished(Format::String);
        assert!(t.finished);
        assert_eq!(t.day, Component::Text("00".into()));
        assert_eq!(t.second, Component::Text("00".into()));

        let t = Tick::finished(Format::Int);
        assert_eq!(t.day, Component::Int(0));
        assert_eq!(t.hour, Component::Int(0));
    }

    #[test]
    fn running_tick_display() {
        let t = Tick::running(90_061, &Settings::default());
        assert!(!t.finished);
        assert_eq!(t.to_string(), "1d 01:01:01");
    }
}
