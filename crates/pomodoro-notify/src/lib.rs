//! pomodoro-notify - Dialog notifiers for the pomodoro timer
//!
//! Shows a dialog at each phase end and turns the button pressed (and any
//! minutes typed) into a [`Decision`]. Works with zenity (Linux), osascript
//! (macOS) or a plain terminal prompt.
//!
//! Whatever goes wrong while asking, the answer is `Stop`.

mod backend;
mod error;
mod prompt;
mod terminal;

pub use backend::{osascript_script, zenity_args, Backend};
pub use error::NotifyError;
pub use prompt::Prompt;
pub use terminal::TerminalDialog;

use pomodoro_core::{Config, Decision, Notifier, Phase};
use tracing::{debug, warn};

/// What the user did with a dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Pressed the continue button; carries whatever was typed
    Accepted(String),
    /// Pressed the reset button
    Reset,
    /// Pressed off, closed the window or gave no answer
    Dismissed,
}

impl Reply {
    pub fn into_decision(self) -> Decision {
        match self {
            Reply::Accepted(text) => Decision::continue_with(&text),
            Reply::Reset => Decision::Reset,
            Reply::Dismissed => Decision::Stop,
        }
    }
}

/// Trait for anything that can show a prompt and wait for an answer
pub trait Dialog {
    fn show(&mut self, prompt: &Prompt) -> Result<Reply, NotifyError>;
}

/// Notifier that asks through a [`Dialog`]
pub struct DialogNotifier<D = Backend> {
    dialog: D,
}

impl DialogNotifier<Backend> {
    /// Use the best backend for this machine
    pub fn detect() -> Self {
        Self::new(Backend::detect())
    }

    pub fn backend(&self) -> Backend {
        self.dialog
    }
}

impl<D: Dialog> DialogNotifier<D> {
    pub fn new(dialog: D) -> Self {
        Self { dialog }
    }
}

impl<D: Dialog> Notifier for DialogNotifier<D> {
    fn send(&mut self, phase: Phase, completed: u32, config: &Config) -> Decision {
        let prompt = Prompt::for_phase(phase, completed, config);

        match self.dialog.show(&prompt) {
            Ok(reply) => {
                debug!(?reply, "Dialog answered");
                reply.into_decision()
            }
            Err(e) => {
                warn!(error = %e, "Dialog failed, stopping timer");
                Decision::Stop
            }
        }
    }
}
