//! Countdown settings: schema, defaults, patch filtering and YAML loading.
//!
//! A settings patch arrives untyped (a YAML mapping, or anything else a caller
//! hands over) and is filtered against the fixed schema before it is merged
//! over the defaults:
//!
//! ```yaml
//! time: 90          # non-negative integer seconds
//! format: string    # "string" (zero-padded) or "int"
//! withHour: true
//! withDay: false
//! ```
//!
//! Keys outside the schema and values of the wrong shape are dropped with a
//! warning; the matching default stays in place.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::{debug, info, warn};

use crate::countdown::error::SettingsError;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Countdown length used when no `time` is supplied.
pub const DEFAULT_TIME_SECS: u64 = 60;

// ── Format ────────────────────────────────────────────────────────────────────

/// How the four tick components are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Text; hour/minute/second zero-padded to two characters.
    #[default]
    String,
    /// Plain unpadded integers.
    Int,
}

impl Format {
    /// Parse the settings spelling (`"string"` / `"int"`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Format::String),
            "int" => Some(Format::Int),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Format::String => "string",
            Format::Int => "int",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Settings ──────────────────────────────────────────────────────────────────

/// Fully-resolved settings owned by a [`Timer`](crate::timer::Timer) and
/// snapshotted into every countdown it starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Seconds remaining.
    pub time: u64,
    pub format: Format,
    /// Split out an hour component; otherwise minutes absorb the hours.
    pub with_hour: bool,
    /// Split out a day component; otherwise hours accumulate past 24.
    pub with_day: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            time: DEFAULT_TIME_SECS,
            format: Format::String,
            with_hour: true,
            with_day: true,
        }
    }
}

impl Settings {
    /// Defaults overlaid by `patch`; the patch wins on every key it carries.
    pub fn merge(patch: &SettingsPatch) -> Self {
        Self::default().overlaid(patch)
    }

    /// `self` overlaid by `patch`.
    pub fn overlaid(&self, patch: &SettingsPatch) -> Self {
        Self {
            time: patch.time.unwrap_or(self.time),
            format: patch.format.unwrap_or(self.format),
            with_hour: patch.with_hour.unwrap_or(self.with_hour),
            with_day: patch.with_day.unwrap_or(self.with_day),
        }
    }
}

// ── SettingsPatch ─────────────────────────────────────────────────────────────

/// A partial, already-validated settings object.
///
/// Build one directly when the values are typed, or through
/// [`from_value`](Self::from_value) / [`parse_strict`](Self::parse_strict)
/// when they come from an untyped source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub time: Option<u64>,
    pub format: Option<Format>,
    pub with_hour: Option<bool>,
    pub with_day: Option<bool>,
}

impl SettingsPatch {
    /// A patch that only sets `time`.
    pub fn with_time(secs: u64) -> Self {
        Self {
            time: Some(secs),
            ..Default::default()
        }
    }

    /// Returns `true` if the patch carries no keys.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Combine two patches; keys present in `other` win.
    pub fn overlay(self, other: SettingsPatch) -> Self {
        Self {
            time: other.time.or(self.time),
            format: other.format.or(self.format),
            with_hour: other.with_hour.or(self.with_hour),
            with_day: other.with_day.or(self.with_day),
        }
    }

    /// Permissive filter: every rejected key is logged and dropped.
    ///
    /// A non-mapping value yields an empty patch (defaults apply).
    pub fn from_value(value: &Value) -> Self {
        let (patch, rejected) = Self::filter(value);
        for err in &rejected {
            warn!("Dropping settings entry: {err}");
        }
        patch
    }

    /// Strict filter: the first rejected key is returned as an error.
    ///
    /// # Errors
    /// Any [`SettingsError`] variant describing the offending key.
    pub fn parse_strict(value: &Value) -> Result<Self, SettingsError> {
        let (patch, mut rejected) = Self::filter(value);
        if rejected.is_empty() {
            Ok(patch)
        } else {
            Err(rejected.swap_remove(0))
        }
    }

    /// Read a YAML settings file and filter it permissively.
    ///
    /// An empty file is an empty patch.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid YAML.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading settings from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open settings file: {}", path.display()))?;

        if content.trim().is_empty() {
            warn!("Settings file is empty, using defaults");
            return Ok(Self::default());
        }

        let value: Value = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?;

        let patch = Self::from_value(&value);
        debug!(?patch, "Settings file parsed");
        Ok(patch)
    }

    /// Split `value` into the accepted patch and the list of rejections.
    fn filter(value: &Value) -> (Self, Vec<SettingsError>) {
        let mut patch = Self::default();
        let mut rejected = Vec::new();

        let map = match value {
            Value::Mapping(map) => map,
            other => {
                rejected.push(SettingsError::NotAMapping {
                    found: describe(other),
                });
                return (patch, rejected);
            }
        };

        for (key, val) in map {
            let key = match key.as_str() {
                Some(k) => k,
                None => {
                    rejected.push(SettingsError::UnknownKey { key: describe(key) });
                    continue;
                }
            };

            match key {
                "time" => match parse_seconds(val) {
                    Some(secs) => patch.time = Some(secs),
                    None => rejected.push(SettingsError::InvalidTime {
                        value: describe(val),
                    }),
                },
                "format" => match val.as_str().and_then(Format::from_name) {
                    Some(format) => patch.format = Some(format),
                    None => rejected.push(SettingsError::InvalidFormat {
                        value: describe(val),
                    }),
                },
                "withHour" | "withDay" => match val.as_bool() {
                    Some(flag) if key == "withHour" => patch.with_hour = Some(flag),
                    Some(flag) => patch.with_day = Some(flag),
                    None => rejected.push(SettingsError::InvalidFlag {
                        key: key.to_string(),
                        value: describe(val),
                    }),
                },
                _ => rejected.push(SettingsError::UnknownKey {
                    key: key.to_string(),
                }),
            }
        }

        (patch, rejected)
    }
}

impl From<&Value> for SettingsPatch {
    /// Permissive conversion; see [`SettingsPatch::from_value`].
    fn from(value: &Value) -> Self {
        SettingsPatch::from_value(value)
    }
}

// ── Value helpers ─────────────────────────────────────────────────────────────

/// Accepts non-negative integers, including integral floats such as `30.0`.
fn parse_seconds(value: &Value) -> Option<u64> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(secs) = n.as_u64() {
        return Some(secs);
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => {
            Some(f as u64)
        }
        _ => None,
    }
}

/// Short human rendering of a YAML value for log and error messages.
fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("{s:?}"),
        Value::Sequence(_) => "a sequence".to_string(),
        Value::Mapping(_) => "a mapping".to_string(),
        Value::Tagged(t) => format!("a value tagged {}", t.tag),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
