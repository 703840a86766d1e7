//! The user's reply to a phase-end notification

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;

use crate::config::MAX_PHASE;

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"));

/// What the timer should do after a phase ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Terminate now
    Stop,
    /// Start over with the configuration as it currently stands
    Reset,
    /// Move on to the next phase, optionally with a new length for it
    Continue(Option<Duration>),
}

impl Decision {
    /// Continue, taking the next phase length from free-form user input
    pub fn continue_with(input: &str) -> Self {
        Decision::Continue(extract_minutes(input))
    }

    /// The new duration carried by this decision, if it carries a usable one.
    ///
    /// A zero duration counts as none; anything longer than
    /// [`MAX_PHASE`] is cut down to it.
    pub fn new_duration(&self) -> Option<Duration> {
        match self {
            Decision::Continue(Some(d)) if !d.is_zero() => Some((*d).min(MAX_PHASE)),
            _ => None,
        }
    }
}

/// Pull a minute count out of free-form input.
///
/// Takes the first run of decimal digits. Returns `None` when there is no
/// number, when it is zero, or when it does not fit.
pub fn extract_minutes(input: &str) -> Option<Duration> {
    let digits = DIGITS.find(input)?;
    let minutes: u64 = digits.as_str().parse().ok()?;
    if minutes == 0 {
        return None;
    }
    minutes.checked_mul(60).map(Duration::from_secs)
}
