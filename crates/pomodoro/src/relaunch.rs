//! Starting a fresh timer process after a reset

use anyhow::{Context, Result};
use pomodoro_core::Config;
use std::process::Command;

use crate::cli::DialogChoice;

/// Flags for the new process: the current lengths plus the user's dialog
/// and output choices
pub fn relaunch_args(config: &Config, dialog: DialogChoice, json: bool) -> Vec<String> {
    let mut args = config.to_args();
    args.push(format!("--dialog={}", dialog.as_str()));
    if json {
        args.push("--json".to_string());
    }
    args
}

/// Spawn a new timer with `config` and return its pid. The child is not
/// waited for; it outlives this process.
pub fn relaunch(config: &Config, dialog: DialogChoice, json: bool) -> Result<u32> {
    let exe = std::env::current_exe().context("Can't locate the pomodoro executable")?;

    let child = Command::new(&exe)
        .args(relaunch_args(config, dialog, json))
        .spawn()
        .with_context(|| format!("Can't create new pomodoro timer ({})", exe.display()))?;

    Ok(child.id())
}
