//! The timer state machine
//!
//! One call to [`Engine::run`] drives a full cycle: focus, rest, focus, ...
//! until the user stops or resets, or the configured number of focus loops
//! is reached. Each completed phase is reported to the notifier exactly once,
//! and the returned decision is applied before the next phase starts.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::{Config, Decision, Notifier, Phase};

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    UserStopped,
    UserReset,
    MaxLoopsReached,
}

impl Termination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Termination::UserStopped => "user_stopped",
            Termination::UserReset => "user_reset",
            Termination::MaxLoopsReached => "max_loops_reached",
        }
    }
}

/// Outcome of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub reason: Termination,
    pub focus_count: u32,
    pub rest_count: u32,
    /// Configuration as it stood when the run ended
    pub config: Config,
}

/// Outcome of a run including any in-process restarts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub last: RunReport,
    pub restarts: u32,
}

/// Counters for the run in progress
#[derive(Debug, Default)]
struct Progress {
    focus_count: u32,
    rest_count: u32,
}

/// Main timer engine
pub struct Engine {
    config: Config,
    clock: Box<dyn Clock>,
}

impl Engine {
    /// Create an engine on the system clock
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    pub fn with_clock(config: Config, clock: Box<dyn Clock>) -> Self {
        Self { config, clock }
    }

    /// Current configuration, including changes applied by decisions
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one cycle until it terminates.
    ///
    /// Counters always start from zero. Durations changed by decisions stay
    /// changed after the run returns, so a reset can carry them over.
    pub fn run(&mut self, notifier: &mut dyn Notifier) -> RunReport {
        let mut progress = Progress::default();
        let mut phase = Phase::Focus;
        let mut loop_start = self.clock.now();

        info!(
            focus_secs = self.config.focus.as_secs(),
            rest_secs = self.config.rest.as_secs(),
            max_loops = self.config.max_loops,
            "Starting timer"
        );

        let reason = loop {
            match phase {
                Phase::Focus => {
                    self.wait_until_elapsed(loop_start, self.config.focus);
                    progress.focus_count += 1;
                    info!(count = progress.focus_count, "Focus loop passed");

                    let decision = notifier.send(Phase::Focus, progress.focus_count, &self.config);
                    if let Some(reason) = self.apply(Phase::Focus, decision) {
                        break reason;
                    }

                    phase = if progress.focus_count >= self.config.max_loops {
                        Phase::Finished
                    } else {
                        Phase::Rest
                    };
                }
                Phase::Rest => {
                    self.wait_until_elapsed(loop_start, self.config.rest);
                    progress.rest_count += 1;
                    info!(count = progress.rest_count, "Rest loop passed");

                    let decision = notifier.send(Phase::Rest, progress.rest_count, &self.config);
                    if let Some(reason) = self.apply(Phase::Rest, decision) {
                        break reason;
                    }

                    phase = Phase::Focus;
                }
                Phase::Finished => {
                    // The answer to the final notification changes nothing
                    let decision =
                        notifier.send(Phase::Finished, progress.focus_count, &self.config);
                    debug!(?decision, "Ignoring decision on finish");
                    break Termination::MaxLoopsReached;
                }
            }
            loop_start = self.clock.now();
        };

        info!(
            reason = reason.as_str(),
            focus_count = progress.focus_count,
            rest_count = progress.rest_count,
            "Timer ended"
        );

        RunReport {
            reason,
            focus_count: progress.focus_count,
            rest_count: progress.rest_count,
            config: self.config,
        }
    }

    /// Run, starting over on every reset until the user stops or the loops
    /// run out.
    pub fn run_with_restarts(&mut self, notifier: &mut dyn Notifier) -> Session {
        let mut restarts = 0;
        loop {
            let report = self.run(notifier);
            if report.reason != Termination::UserReset {
                return Session {
                    last: report,
                    restarts,
                };
            }
            restarts += 1;
            info!(restarts, "Restarting timer");
        }
    }

    /// Apply a decision taken at the end of `completed`.
    ///
    /// Returns the termination reason when the decision ends the run.
    fn apply(&mut self, completed: Phase, decision: Decision) -> Option<Termination> {
        debug!(phase = completed.as_str(), ?decision, "Applying decision");

        match decision {
            Decision::Stop => Some(Termination::UserStopped),
            Decision::Reset => Some(Termination::UserReset),
            Decision::Continue(_) => {
                // A new length applies to the phase about to start
                if let Some(duration) = decision.new_duration() {
                    match completed {
                        Phase::Focus => self.config.rest = duration,
                        Phase::Rest => self.config.focus = duration,
                        Phase::Finished => {}
                    }
                    debug!(
                        phase = completed.next().as_str(),
                        secs = duration.as_secs(),
                        "Next phase length changed"
                    );
                }
                None
            }
        }
    }

    fn wait_until_elapsed(&self, start: Instant, duration: Duration) {
        loop {
            let elapsed = self.clock.now().saturating_duration_since(start);
            if elapsed >= duration {
                return;
            }
            self.clock.sleep(duration - elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ManualClock, ScriptedNotifier};
    use std::sync::Arc;

    fn minutes(m: u64) -> Duration {
        Duration::from_secs(m * 60)
    }

    fn engine(focus: u64, rest: u64, loops: u32) -> (Engine, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let config = Config::from_minutes(focus, rest, loops).unwrap();
        (Engine::with_clock(config, Box::new(clock.clone())), clock)
    }

    #[test]
    fn test_full_cycle_call_count() {
        let (mut engine, _) = engine(1, 1, 3);
        let mut notifier = ScriptedNotifier::always(Decision::Continue(Some(minutes(1))));

        let report = engine.run(&mut notifier);

        assert_eq!(report.reason, Termination::MaxLoopsReached);
        assert_eq!(report.focus_count, 3);
        assert_eq!(report.rest_count, 2);
        assert_eq!(notifier.call_count(), 6);
        assert_eq!(
            notifier.phases(),
            vec![
                Phase::Focus,
                Phase::Rest,
                Phase::Focus,
                Phase::Rest,
                Phase::Focus,
                Phase::Finished,
            ]
        );
    }

    #[test]
    fn test_call_count_scales_with_loops() {
        for loops in 1..=6 {
            let (mut engine, _) = engine(1, 1, loops);
            let mut notifier = ScriptedNotifier::always(Decision::Continue(None));
            engine.run(&mut notifier);
            assert_eq!(notifier.call_count(), 2 * loops as usize);
        }
    }

    #[test]
    fn test_stop_on_first_call() {
        for loops in [1, 3, 10] {
            let (mut engine, _) = engine(25, 5, loops);
            let mut notifier = ScriptedNotifier::always(Decision::Stop);

            let report = engine.run(&mut notifier);

            assert_eq!(report.reason, Termination::UserStopped);
            assert_eq!(notifier.call_count(), 1);
            assert_eq!(report.focus_count, 1);
            assert_eq!(report.rest_count, 0);
        }
    }

    #[test]
    fn test_stop_then_reset_across_runs() {
        let (mut engine, _) = engine(25, 5, 4);
        let mut notifier = ScriptedNotifier::new([Decision::Stop, Decision::Reset]);

        let first = engine.run(&mut notifier);
        assert_eq!(first.reason, Termination::UserStopped);
        assert_eq!(notifier.call_count(), 1);

        let second = engine.run(&mut notifier);
        assert_eq!(second.reason, Termination::UserReset);
        assert_eq!(notifier.call_count(), 2);
    }

    #[test]
    fn test_focus_answer_sets_rest() {
        let (mut engine, _) = engine(25, 5, 2);
        let mut notifier = ScriptedNotifier::new([
            Decision::Continue(Some(minutes(12))),
            Decision::Stop,
        ]);

        let report = engine.run(&mut notifier);

        assert_eq!(report.config.rest, minutes(12));
        assert_eq!(report.config.focus, minutes(25));
        // The rest notification sees the new length
        assert_eq!(notifier.calls()[1].config.rest, minutes(12));
    }

    #[test]
    fn test_rest_answer_sets_focus() {
        let (mut engine, _) = engine(25, 5, 3);
        let mut notifier = ScriptedNotifier::new([
            Decision::Continue(None),
            Decision::Continue(Some(minutes(50))),
            Decision::Stop,
        ]);

        let report = engine.run(&mut notifier);

        assert_eq!(report.config.focus, minutes(50));
        assert_eq!(report.config.rest, minutes(5));
    }

    #[test]
    fn test_new_durations_are_waited_for() {
        let (mut engine, clock) = engine(25, 5, 2);
        let mut notifier = ScriptedNotifier::new([
            Decision::Continue(Some(minutes(15))),
            Decision::Continue(Some(minutes(40))),
            Decision::Continue(None),
        ]);

        engine.run(&mut notifier);

        // focus 25, rest 15, focus 40
        assert_eq!(clock.slept(), minutes(25 + 15 + 40));
    }

    #[test]
    fn test_huge_duration_is_capped_and_run_ends() {
        use crate::config::MAX_PHASE;

        let (mut engine, clock) = engine(25, 5, 2);
        let mut notifier = ScriptedNotifier::new([
            Decision::Continue(Some(Duration::MAX)),
            Decision::Continue(Some(Duration::MAX)),
            Decision::Continue(None),
        ]);

        let report = engine.run(&mut notifier);

        assert_eq!(report.reason, Termination::MaxLoopsReached);
        assert_eq!(report.config.rest, MAX_PHASE);
        assert_eq!(report.config.focus, MAX_PHASE);
        assert_eq!(clock.slept(), minutes(25) + MAX_PHASE * 2);
        assert_eq!(report.config.to_args()[1], format!("--rest={}", crate::config::MAX_PHASE_MINUTES));
    }

    #[test]
    fn test_zero_duration_is_plain_continue() {
        let (mut engine, _) = engine(25, 5, 2);
        let mut notifier = ScriptedNotifier::new([
            Decision::Continue(Some(Duration::ZERO)),
            Decision::Continue(Some(Duration::ZERO)),
        ]);

        let report = engine.run(&mut notifier);

        assert_eq!(report.config, Config::from_minutes(25, 5, 2).unwrap());
    }

    #[test]
    fn test_max_loops_skips_final_rest() {
        let (mut engine, clock) = engine(25, 5, 1);
        let mut notifier = ScriptedNotifier::always(Decision::Continue(None));

        let report = engine.run(&mut notifier);

        assert_eq!(report.reason, Termination::MaxLoopsReached);
        assert_eq!(report.rest_count, 0);
        assert_eq!(notifier.phases(), vec![Phase::Focus, Phase::Finished]);
        assert_eq!(clock.slept(), minutes(25));
    }

    #[test]
    fn test_finish_decision_is_ignored() {
        let (mut engine, _) = engine(25, 5, 1);
        let mut notifier = ScriptedNotifier::new([Decision::Continue(None), Decision::Reset]);

        let report = engine.run(&mut notifier);

        assert_eq!(report.reason, Termination::MaxLoopsReached);
        assert_eq!(notifier.call_count(), 2);
    }

    #[test]
    fn test_finish_reports_focus_count() {
        let (mut engine, _) = engine(1, 1, 3);
        let mut notifier = ScriptedNotifier::always(Decision::Continue(None));

        engine.run(&mut notifier);

        let last = notifier.calls().last().unwrap();
        assert_eq!(last.phase, Phase::Finished);
        assert_eq!(last.completed, 3);
    }

    #[test]
    fn test_reset_on_last_focus_wins_over_finish() {
        let (mut engine, _) = engine(25, 5, 1);
        let mut notifier = ScriptedNotifier::always(Decision::Reset);

        let report = engine.run(&mut notifier);

        assert_eq!(report.reason, Termination::UserReset);
        assert_eq!(notifier.call_count(), 1);
    }

    #[test]
    fn test_reset_discards_counters_keeps_config() {
        let (mut engine, _) = engine(25, 5, 4);
        let mut notifier = ScriptedNotifier::new([
            Decision::Continue(Some(minutes(8))),
            Decision::Continue(None),
            Decision::Reset,
            Decision::Stop,
        ]);

        let first = engine.run(&mut notifier);
        assert_eq!(first.reason, Termination::UserReset);
        assert_eq!(first.focus_count, 2);
        assert_eq!(first.rest_count, 1);

        let second = engine.run(&mut notifier);
        assert_eq!(second.reason, Termination::UserStopped);
        assert_eq!(second.focus_count, 1);
        assert_eq!(second.rest_count, 0);
        assert_eq!(second.config.rest, minutes(8));
        // Counting restarted from one
        assert_eq!(notifier.calls()[3].completed, 1);
    }

    #[test]
    fn test_run_with_restarts() {
        let (mut engine, _) = engine(25, 5, 2);
        let mut notifier = ScriptedNotifier::new([
            Decision::Reset,
            Decision::Continue(Some(minutes(3))),
            Decision::Reset,
            Decision::Continue(None),
            Decision::Continue(None),
            Decision::Continue(None),
            Decision::Continue(None),
        ]);

        let session = engine.run_with_restarts(&mut notifier);

        assert_eq!(session.restarts, 2);
        assert_eq!(session.last.reason, Termination::MaxLoopsReached);
        assert_eq!(session.last.focus_count, 2);
        assert_eq!(session.last.config.rest, minutes(3));
        assert_eq!(notifier.call_count(), 1 + 2 + 4);
    }

    #[test]
    fn test_run_is_repeatable() {
        let script = [
            Decision::Continue(Some(minutes(2))),
            Decision::Continue(None),
            Decision::Continue(Some(minutes(7))),
            Decision::Stop,
        ];

        let (mut a, _) = engine(25, 5, 5);
        let (mut b, _) = engine(25, 5, 5);
        let mut na = ScriptedNotifier::new(script);
        let mut nb = ScriptedNotifier::new(script);

        let ra = a.run(&mut na);
        let rb = b.run(&mut nb);

        assert_eq!(ra, rb);
        assert_eq!(na.calls(), nb.calls());
    }

    #[test]
    fn test_no_notification_before_phase_elapses() {
        let (mut engine, clock) = engine(25, 5, 1);
        clock.advance(minutes(10));
        let mut notifier = ScriptedNotifier::always(Decision::Stop);

        engine.run(&mut notifier);

        // The full focus length was waited from the run's own start
        assert_eq!(clock.slept(), minutes(25));
    }

    #[test]
    fn test_report_json() {
        let (mut engine, _) = engine(25, 5, 1);
        let report = engine.run(&mut ScriptedNotifier::always(Decision::Stop));

        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json["reason"], "user_stopped");
        assert_eq!(json["focus_count"], 1);
        assert_eq!(json["config"]["focus_secs"], 1500);
    }
}
