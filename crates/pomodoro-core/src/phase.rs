//! Timer phases

use serde::{Deserialize, Serialize};
use std::fmt;

/// The segment of the cycle the timer is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Heads-down work
    Focus,
    /// Break between focus loops
    Rest,
    /// All focus loops done (terminal)
    Finished,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Focus => "focus",
            Phase::Rest => "rest",
            Phase::Finished => "finished",
        }
    }

    /// The phase that follows this one when the cycle keeps going.
    ///
    /// `Finished` is terminal and maps to itself.
    pub fn next(&self) -> Phase {
        match self {
            Phase::Focus => Phase::Rest,
            Phase::Rest => Phase::Focus,
            Phase::Finished => Phase::Finished,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
