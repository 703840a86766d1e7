//! Command-line flags

use clap::{Parser, ValueEnum};
use pomodoro_core::config::{DEFAULT_FOCUS_MINUTES, DEFAULT_MAX_LOOPS, DEFAULT_REST_MINUTES};
use pomodoro_core::{Config, ConfigError};
use pomodoro_notify::Backend;

/// pomodoro - Focus and rest loops with a dialog at every switch
#[derive(Parser, Debug)]
#[command(name = "pomodoro")]
#[command(version)]
#[command(about = "Pomodoro timer that asks before every switch between focus and rest")]
#[command(after_help = r#"HOW IT WORKS:
    The timer starts with a focus loop. When it ends a dialog asks how long
    the rest should be; when the rest ends it asks how long to focus next.
    After --loop-count focus loops the timer finishes.

DIALOG BUTTONS:
    ok        Continue, using the minutes typed for the next loop
    Reset     Start over from the first focus loop with the current lengths
    Off       Stop the timer

EXAMPLES:
    pomodoro                              # 40 min focus, 10 min rest, 8 loops
    pomodoro --focus 25 --rest 5          # Classic pomodoro
    pomodoro --loop-count 4 --dialog terminal
    pomodoro --on-reset restart --json

LOGGING:
    RUST_LOG=debug pomodoro               # Show every decision on stderr
"#)]
pub struct Cli {
    /// Focus loop length in minutes
    #[arg(long, value_name = "MINUTES", default_value_t = DEFAULT_FOCUS_MINUTES)]
    pub focus: u64,

    /// Rest loop length in minutes
    #[arg(long, value_name = "MINUTES", default_value_t = DEFAULT_REST_MINUTES)]
    pub rest: u64,

    /// Number of focus loops before the timer finishes
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_LOOPS)]
    pub loop_count: u32,

    /// How to ask between loops
    #[arg(long, value_enum, default_value_t = DialogChoice::Auto)]
    pub dialog: DialogChoice,

    /// What Reset does: start a fresh process, or restart in this one
    #[arg(long, value_enum, default_value_t = OnReset::Relaunch)]
    pub on_reset: OnReset,

    /// Print the final report as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn config(&self) -> Result<Config, ConfigError> {
        Config::from_minutes(self.focus, self.rest, self.loop_count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DialogChoice {
    /// Pick the best available
    Auto,
    Zenity,
    Osascript,
    Terminal,
}

impl DialogChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogChoice::Auto => "auto",
            DialogChoice::Zenity => "zenity",
            DialogChoice::Osascript => "osascript",
            DialogChoice::Terminal => "terminal",
        }
    }

    /// The backend asked for by name. `None` for auto-detection.
    pub fn backend(&self) -> Option<Backend> {
        match self {
            DialogChoice::Auto => None,
            DialogChoice::Zenity => Some(Backend::Zenity),
            DialogChoice::Osascript => Some(Backend::Osascript),
            DialogChoice::Terminal => Some(Backend::Terminal),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnReset {
    /// Re-run the executable with the current lengths
    Relaunch,
    /// Restart inside the running process
    Restart,
}

impl OnReset {
    /// Whether a reset restarts inside this process with `backend`.
    ///
    /// A terminal prompt always restarts in-process: a relaunched child
    /// loses the terminal once this process exits.
    pub fn in_process(&self, backend: Backend) -> bool {
        *self == OnReset::Restart || backend == Backend::Terminal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["pomodoro"]).unwrap();
        assert_eq!(cli.focus, 40);
        assert_eq!(cli.rest, 10);
        assert_eq!(cli.loop_count, 8);
        assert_eq!(cli.dialog, DialogChoice::Auto);
        assert_eq!(cli.on_reset, OnReset::Relaunch);
        assert!(!cli.json);
    }

    #[test]
    fn test_parses_relaunch_args() {
        let config = Config::from_minutes(25, 12, 3).unwrap();
        let mut args = vec!["pomodoro".to_string()];
        args.extend(config.to_args());
        args.push("--dialog=terminal".to_string());

        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config().unwrap(), config);
        assert_eq!(cli.dialog, DialogChoice::Terminal);
    }

    #[test]
    fn test_config_from_flags() {
        let cli =
            Cli::try_parse_from(["pomodoro", "--focus", "25", "--rest", "5", "--loop-count", "4"])
                .unwrap();
        let config = cli.config().unwrap();
        assert_eq!(config.focus, Duration::from_secs(25 * 60));
        assert_eq!(config.rest, Duration::from_secs(5 * 60));
        assert_eq!(config.max_loops, 4);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(Cli::try_parse_from(["pomodoro", "--focus", "-1"]).is_err());
        assert!(Cli::try_parse_from(["pomodoro", "--dialog", "kdialog"]).is_err());

        let cli = Cli::try_parse_from(["pomodoro", "--loop-count", "0"]).unwrap();
        assert_eq!(cli.config(), Err(ConfigError::ZeroLoops));
    }

    #[test]
    fn test_explicit_backends() {
        assert_eq!(DialogChoice::Auto.backend(), None);
        assert_eq!(DialogChoice::Zenity.backend(), Some(Backend::Zenity));
        assert_eq!(DialogChoice::Terminal.backend(), Some(Backend::Terminal));
        assert_eq!(DialogChoice::Osascript.as_str(), "osascript");
    }

    #[test]
    fn test_terminal_resets_in_process() {
        assert!(OnReset::Relaunch.in_process(Backend::Terminal));
        assert!(!OnReset::Relaunch.in_process(Backend::Zenity));
        assert!(!OnReset::Relaunch.in_process(Backend::Osascript));
        assert!(OnReset::Restart.in_process(Backend::Zenity));
    }
}
