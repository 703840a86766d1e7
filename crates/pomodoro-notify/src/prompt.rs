//! Dialog text for each phase end

use pomodoro_core::{Config, Phase};

pub const ENTRY_TEXT: &str = "Next loop will be (minutes)";
pub const STOP_LABEL: &str = "Off";
pub const RESET_LABEL: &str = "Reset 🔄";

/// Everything a backend needs to show one phase-end dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub text: String,
    /// Label of the "keep going" button
    pub ok_label: String,
    pub stop_label: String,
    pub reset_label: String,
    /// Pre-filled minutes for the next phase. `None` on finish.
    pub entry: Option<String>,
}

impl Prompt {
    pub fn for_phase(phase: Phase, completed: u32, config: &Config) -> Self {
        let headline = match phase {
            Phase::Focus => format!("{} focus loop passed.", completed),
            Phase::Rest => format!("{} rest loop passed.", completed),
            Phase::Finished => format!("All {} focus loops finished. Congrats!", completed),
        };
        let ok = match phase {
            Phase::Focus => "Take a break",
            Phase::Rest => "Focus",
            Phase::Finished => "Finish",
        };
        // Offer the length of the phase that comes next
        let entry = match phase {
            Phase::Focus => Some(config.rest_minutes().to_string()),
            Phase::Rest => Some(config.focus_minutes().to_string()),
            Phase::Finished => None,
        };

        Self {
            title: format!("Pomodoro {}", headline),
            text: ENTRY_TEXT.to_string(),
            ok_label: format!("{} ✅", ok),
            stop_label: STOP_LABEL.to_string(),
            reset_label: RESET_LABEL.to_string(),
            entry,
        }
    }
}
