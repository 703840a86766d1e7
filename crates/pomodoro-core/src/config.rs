//! Timer configuration
//!
//! Durations are validated once, at construction. The engine trusts a
//! `Config` it is handed and never re-checks it.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default focus loop length in minutes
pub const DEFAULT_FOCUS_MINUTES: u64 = 40;
/// Default rest loop length in minutes
pub const DEFAULT_REST_MINUTES: u64 = 10;
/// Default number of focus loops before the timer finishes
pub const DEFAULT_MAX_LOOPS: u32 = 8;
/// Longest accepted phase, one week
pub const MAX_PHASE_MINUTES: u64 = 7 * 24 * 60;
/// [`MAX_PHASE_MINUTES`] as a duration
pub const MAX_PHASE: Duration = Duration::from_secs(MAX_PHASE_MINUTES * 60);

/// Rejected startup values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("focus duration must be greater than zero")]
    ZeroFocus,

    #[error("rest duration must be greater than zero")]
    ZeroRest,

    #[error("loop count must be at least 1")]
    ZeroLoops,

    #[error("{0} minutes is too long, the limit is {limit}", limit = MAX_PHASE_MINUTES)]
    TooLong(u64),
}

/// Durations and loop budget for one timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "focus_secs", with = "duration_secs")]
    pub focus: Duration,
    #[serde(rename = "rest_secs", with = "duration_secs")]
    pub rest: Duration,
    pub max_loops: u32,
}

impl Config {
    /// Create a validated configuration
    pub fn new(focus: Duration, rest: Duration, max_loops: u32) -> Result<Self, ConfigError> {
        if focus.is_zero() {
            return Err(ConfigError::ZeroFocus);
        }
        if rest.is_zero() {
            return Err(ConfigError::ZeroRest);
        }
        if max_loops == 0 {
            return Err(ConfigError::ZeroLoops);
        }
        for duration in [focus, rest] {
            if duration > MAX_PHASE {
                return Err(ConfigError::TooLong(whole_minutes(duration)));
            }
        }
        Ok(Self {
            focus,
            rest,
            max_loops,
        })
    }

    /// Create a validated configuration from whole minutes
    pub fn from_minutes(focus: u64, rest: u64, max_loops: u32) -> Result<Self, ConfigError> {
        Self::new(minutes(focus)?, minutes(rest)?, max_loops)
    }

    pub fn focus_minutes(&self) -> u64 {
        whole_minutes(self.focus)
    }

    pub fn rest_minutes(&self) -> u64 {
        whole_minutes(self.rest)
    }

    /// Serialize back into the startup flags, e.g. for re-launching the
    /// timer after a reset.
    pub fn to_args(&self) -> Vec<String> {
        vec![
            format!("--focus={}", self.focus_minutes()),
            format!("--rest={}", self.rest_minutes()),
            format!("--loop-count={}", self.max_loops),
        ]
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            focus: Duration::from_secs(DEFAULT_FOCUS_MINUTES * 60),
            rest: Duration::from_secs(DEFAULT_REST_MINUTES * 60),
            max_loops: DEFAULT_MAX_LOOPS,
        }
    }
}

fn minutes(value: u64) -> Result<Duration, ConfigError> {
    if value > MAX_PHASE_MINUTES {
        return Err(ConfigError::TooLong(value));
    }
    Ok(Duration::from_secs(value * 60))
}

/// Rounds up so a sub-minute duration never serializes to zero.
fn whole_minutes(duration: Duration) -> u64 {
    let secs = duration
        .as_secs()
        .saturating_add(u64::from(duration.subsec_nanos() > 0));
    secs.div_ceil(60)
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
