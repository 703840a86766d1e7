//! pomodoro-core - The timer engine behind the pomodoro tool
//!
//! Alternates focus and rest phases, asks a [`Notifier`] what to do each time
//! a phase ends, and feeds the answer back into the running configuration.
//!
//! The pieces:
//! - [`Config`]: focus/rest durations and the number of focus loops
//! - [`Phase`]: focus, rest or finished
//! - [`Decision`]: the user's reply to a phase-end notification
//! - [`Notifier`]: anything that can turn a phase end into a decision
//! - [`Engine`]: the state machine driving it all

pub mod clock;
pub mod config;
pub mod decision;
pub mod engine;
pub mod notifier;
pub mod phase;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, ConfigError};
pub use decision::{extract_minutes, Decision};
pub use engine::{Engine, RunReport, Session, Termination};
pub use notifier::{Notifier, NotifierCall, ScriptedNotifier};
pub use phase::Phase;

/// Run one timer cycle with the system clock.
///
/// Shorthand for `Engine::new(config).run(notifier)`.
pub fn run(config: Config, notifier: &mut dyn Notifier) -> RunReport {
    Engine::new(config).run(notifier)
}
