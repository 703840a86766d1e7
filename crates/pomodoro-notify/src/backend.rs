//! Dialog backends for different platforms

use std::process::Command;
use tracing::debug;

use crate::terminal::TerminalDialog;
use crate::{Dialog, NotifyError, Prompt, Reply};

/// Available dialog backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// GTK dialogs via zenity
    Zenity,
    /// macOS `display dialog` via osascript
    Osascript,
    /// Question on stdin/stdout
    Terminal,
}

impl Backend {
    /// Detect the best available backend for the current platform
    pub fn detect() -> Self {
        #[cfg(target_os = "macos")]
        {
            return Self::Osascript;
        }

        #[cfg(not(target_os = "macos"))]
        {
            if Self::command_exists("zenity") {
                return Self::Zenity;
            }
            Self::Terminal
        }
    }

    /// Check if a command exists
    #[cfg_attr(target_os = "macos", allow(dead_code))]
    fn command_exists(cmd: &str) -> bool {
        Command::new("which")
            .arg(cmd)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    /// Get the name of this backend
    pub fn name(&self) -> &'static str {
        match self {
            Self::Zenity => "zenity",
            Self::Osascript => "osascript",
            Self::Terminal => "terminal",
        }
    }

    fn show_zenity(&self, prompt: &Prompt) -> Result<Reply, NotifyError> {
        let output = Command::new("zenity")
            .args(zenity_args(prompt))
            .output()
            .map_err(|source| NotifyError::Spawn {
                program: "zenity",
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!(status = %output.status, stdout = %stdout.trim(), "zenity returned");

        match output.status.code() {
            Some(0) => Ok(Reply::Accepted(stdout.into_owned())),
            // 1: cancel or extra button, 5: timeout
            Some(1) | Some(5) => Ok(zenity_button(&stdout, prompt)),
            _ => Err(NotifyError::Failed {
                program: "zenity",
                status: output.status,
            }),
        }
    }

    fn show_osascript(&self, prompt: &Prompt) -> Result<Reply, NotifyError> {
        let output = Command::new("osascript")
            .args(["-e", &osascript_script(prompt)])
            .output()
            .map_err(|source| NotifyError::Spawn {
                program: "osascript",
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!(status = %output.status, stdout = %stdout.trim(), "osascript returned");

        if output.status.success() {
            return Ok(osascript_reply(&stdout, prompt));
        }

        // -128 is "User canceled", i.e. the cancel button
        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.contains("(-128)") {
            Ok(Reply::Dismissed)
        } else {
            Err(NotifyError::Failed {
                program: "osascript",
                status: output.status,
            })
        }
    }
}

impl Dialog for Backend {
    fn show(&mut self, prompt: &Prompt) -> Result<Reply, NotifyError> {
        match self {
            Self::Zenity => self.show_zenity(prompt),
            Self::Osascript => self.show_osascript(prompt),
            Self::Terminal => TerminalDialog::stdio().show(prompt),
        }
    }
}

/// Command-line arguments for a zenity entry dialog
pub fn zenity_args(prompt: &Prompt) -> Vec<String> {
    let mut args = vec![
        "--entry".to_string(),
        format!("--title={}", prompt.title),
        format!("--text={}", prompt.text),
        format!("--ok-label={}", prompt.ok_label),
    ];
    if let Some(entry) = &prompt.entry {
        args.push(format!("--entry-text={}", entry));
    }
    args.push(format!("--cancel-label={}", prompt.stop_label));
    args.push(format!("--extra-button={}", prompt.reset_label));
    args
}

/// Interpret a non-zero zenity exit. The extra button prints its label.
fn zenity_button(stdout: &str, prompt: &Prompt) -> Reply {
    if stdout.trim() == prompt.reset_label {
        Reply::Reset
    } else {
        Reply::Dismissed
    }
}

/// AppleScript for a three-button dialog with an optional text field
pub fn osascript_script(prompt: &Prompt) -> String {
    let quote = |s: &str| format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""));

    let mut script = format!(
        "display dialog {} with title {}",
        quote(&prompt.text),
        quote(&prompt.title)
    );
    if let Some(entry) = &prompt.entry {
        script.push_str(&format!(" default answer {}", quote(entry)));
    }
    script.push_str(&format!(
        " buttons {{{}, {}, {}}} default button 3 cancel button 1",
        quote(&prompt.stop_label),
        quote(&prompt.reset_label),
        quote(&prompt.ok_label)
    ));
    script
}

/// Parse `button returned:<label>[, text returned:<text>]`
fn osascript_reply(stdout: &str, prompt: &Prompt) -> Reply {
    let line = stdout.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.strip_prefix("button returned:") else {
        return Reply::Dismissed;
    };
    let (button, text) = match rest.split_once(", text returned:") {
        Some((button, text)) => (button, text),
        None => (rest, ""),
    };

    if button == prompt.ok_label {
        Reply::Accepted(text.to_string())
    } else if button == prompt.reset_label {
        Reply::Reset
    } else {
        Reply::Dismissed
    }
}
