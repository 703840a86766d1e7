//! The notifier protocol
//!
//! At every phase boundary the engine hands control to a [`Notifier`], which
//! tells the user what just happened and returns their [`Decision`]. The
//! call is synchronous and may block for as long as the user takes.

use std::collections::VecDeque;

use crate::{Config, Decision, Phase};

/// Trait for anything that can present a phase end and collect a decision.
///
/// Implementations must always produce a decision. Failures of the
/// underlying channel (a crashed dialog, unreadable input, a dismissed
/// window) are reported as [`Decision::Stop`].
pub trait Notifier {
    /// `completed` is the number of loops of `phase` finished so far.
    fn send(&mut self, phase: Phase, completed: u32, config: &Config) -> Decision;
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn send(&mut self, phase: Phase, completed: u32, config: &Config) -> Decision {
        (**self).send(phase, completed, config)
    }
}

/// One recorded notifier invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierCall {
    pub phase: Phase,
    pub completed: u32,
    pub config: Config,
}

/// Notifier that replays canned decisions and records every call.
///
/// Once the script runs out the last decision is repeated; an empty script
/// answers `Stop`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedNotifier {
    script: VecDeque<Decision>,
    last: Option<Decision>,
    calls: Vec<NotifierCall>,
}

impl ScriptedNotifier {
    pub fn new(script: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            script: script.into_iter().collect(),
            last: None,
            calls: Vec::new(),
        }
    }

    /// A notifier that gives the same answer every time
    pub fn always(decision: Decision) -> Self {
        Self::new([decision])
    }

    pub fn calls(&self) -> &[NotifierCall] {
        &self.calls
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    /// Phases of the recorded calls, in order
    pub fn phases(&self) -> Vec<Phase> {
        self.calls.iter().map(|c| c.phase).collect()
    }
}

impl Notifier for ScriptedNotifier {
    fn send(&mut self, phase: Phase, completed: u32, config: &Config) -> Decision {
        self.calls.push(NotifierCall {
            phase,
            completed,
            config: *config,
        });

        let decision = self
            .script
            .pop_front()
            .or(self.last)
            .unwrap_or(Decision::Stop);
        self.last = Some(decision);
        decision
    }
}
