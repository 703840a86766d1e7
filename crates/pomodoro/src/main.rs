//! pomodoro - Focus and rest loops with a dialog at every switch
//!
//! Usage:
//!   pomodoro                          40 min focus, 10 min rest, 8 loops
//!   pomodoro --focus 25 --rest 5      Custom lengths
//!   pomodoro --loop-count 4           Finish after 4 focus loops
//!   pomodoro --dialog terminal        Ask on the terminal instead of a window
//!   pomodoro --on-reset restart       Restart in-process on Reset

mod cli;
mod relaunch;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::Parser;
use pomodoro_core::{Engine, RunReport, Termination};
use pomodoro_notify::DialogNotifier;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;

// ANSI color codes
const GREEN: &str = "\x1b[0;32m";
const CYAN: &str = "\x1b[0;36m";
const MAGENTA: &str = "\x1b[0;35m";
const BOLD: &str = "\x1b[1m";
const NC: &str = "\x1b[0m";

/// Check if stdout is a TTY and colors should be used
fn use_colors() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stdout())
}

/// Conditionally apply color
fn color(code: &str, text: &str) -> String {
    if use_colors() {
        format!("{}{}{}", code, text, NC)
    } else {
        text.to_string()
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config().context("Invalid timer configuration")?;

    let mut notifier = match cli.dialog.backend() {
        Some(backend) => DialogNotifier::new(backend),
        None => DialogNotifier::detect(),
    };
    let backend = notifier.backend();
    info!(backend = backend.name(), "Using dialog backend");

    let started: DateTime<Local> = Local::now();
    let mut engine = Engine::new(config);

    let report = if cli.on_reset.in_process(backend) {
        engine.run_with_restarts(&mut notifier).last
    } else {
        engine.run(&mut notifier)
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, started);
    }

    if report.reason == Termination::UserReset {
        match relaunch::relaunch(&report.config, cli.dialog, cli.json) {
            Ok(pid) => info!(pid, "Started new timer"),
            Err(e) => {
                error!(error = %e, "Can't create new pomodoro timer");
                return Err(e);
            }
        }
    }

    Ok(())
}

/// First line of the summary, saying why the run ended
fn headline(report: &RunReport) -> String {
    match report.reason {
        Termination::MaxLoopsReached => format!(
            "{} All {} focus loops finished",
            color(GREEN, "[ok]"),
            report.focus_count
        ),
        Termination::UserStopped => format!("{} Timer stopped", color(CYAN, "[info]")),
        Termination::UserReset => format!(
            "{} Timer reset, starting over with: {}",
            color(CYAN, "[info]"),
            report.config.to_args().join(" ")
        ),
    }
}

/// Human summary of a finished run
fn print_report(report: &RunReport, started: DateTime<Local>) {
    println!("{}", headline(report));
    println!();
    println!("{}", color(&format!("{}{}", BOLD, MAGENTA), "POMODORO"));
    println!();
    println!(
        "  {}  {} of {}",
        color(CYAN, "Focus loops:"),
        report.focus_count,
        report.config.max_loops
    );
    println!("  {}   {}", color(CYAN, "Rest loops:"), report.rest_count);
    println!(
        "  {}        {} minutes",
        color(CYAN, "Focus:"),
        report.config.focus_minutes()
    );
    println!(
        "  {}         {} minutes",
        color(CYAN, "Rest:"),
        report.config.rest_minutes()
    );
    println!(
        "  {}   {} - {}",
        color(CYAN, "Time span:"),
        started.format("%H:%M"),
        Local::now().format("%H:%M")
    );
}
