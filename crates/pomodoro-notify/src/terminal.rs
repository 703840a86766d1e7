//! Plain terminal prompt, for machines without a dialog program

use std::io::{self, BufRead, Write};

use crate::{Dialog, NotifyError, Prompt, Reply};

/// Asks on a line-based stream pair, stdin/stdout by default
pub struct TerminalDialog<R, W> {
    input: R,
    output: W,
}

impl TerminalDialog<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalDialog<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Dialog for TerminalDialog<R, W> {
    fn show(&mut self, prompt: &Prompt) -> Result<Reply, NotifyError> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", prompt.title)?;
        match &prompt.entry {
            Some(entry) => {
                writeln!(self.output, "{} [{}]", prompt.text, entry)?;
                writeln!(
                    self.output,
                    "Enter = {}, number = minutes, r = {}, q = {}",
                    prompt.ok_label, prompt.reset_label, prompt.stop_label
                )?;
            }
            None => writeln!(
                self.output,
                "Enter = {}, r = {}, q = {}",
                prompt.ok_label, prompt.reset_label, prompt.stop_label
            )?,
        }
        write!(self.output, "> ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            // EOF: nobody is there to answer
            return Ok(Reply::Dismissed);
        }

        let answer = line.trim();
        let reply = match answer.to_lowercase().as_str() {
            "" => Reply::Accepted(prompt.entry.clone().unwrap_or_default()),
            "r" | "reset" => Reply::Reset,
            "q" | "off" | "stop" | "quit" => Reply::Dismissed,
            _ => Reply::Accepted(answer.to_string()),
        };
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomodoro_core::{Config, Phase};
    use std::io::Cursor;

    fn ask(input: &str, phase: Phase) -> (Reply, String) {
        let config = Config::from_minutes(25, 5, 4).unwrap();
        let prompt = Prompt::for_phase(phase, 1, &config);
        let mut dialog = TerminalDialog::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let reply = dialog.show(&prompt).unwrap();
        let output = String::from_utf8(dialog.into_output()).unwrap();
        (reply, output)
    }

    #[test]
    fn test_enter_accepts_default() {
        let (reply, output) = ask("\n", Phase::Focus);
        assert_eq!(reply, Reply::Accepted("5".to_string()));
        assert!(output.contains("Pomodoro 1 focus loop passed."));
        assert!(output.contains("Next loop will be (minutes) [5]"));
    }

    #[test]
    fn test_number_is_accepted() {
        let (reply, _) = ask("12\n", Phase::Rest);
        assert_eq!(reply, Reply::Accepted("12".to_string()));
    }

    #[test]
    fn test_reset_and_quit() {
        assert_eq!(ask("r\n", Phase::Focus).0, Reply::Reset);
        assert_eq!(ask("RESET\n", Phase::Focus).0, Reply::Reset);
        assert_eq!(ask("q\n", Phase::Focus).0, Reply::Dismissed);
        assert_eq!(ask("off\n", Phase::Rest).0, Reply::Dismissed);
    }

    #[test]
    fn test_eof_dismisses() {
        assert_eq!(ask("", Phase::Focus).0, Reply::Dismissed);
    }

    #[test]
    fn test_finish_has_no_entry() {
        let (reply, output) = ask("\n", Phase::Finished);
        assert_eq!(reply, Reply::Accepted(String::new()));
        assert!(!output.contains("number = minutes"));
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let config = Config::default();
        let prompt = Prompt::for_phase(Phase::Focus, 1, &config);
        let mut dialog = TerminalDialog::new(Cursor::new(vec![0xff, 0xfe, b'\n']), Vec::new());
        assert!(matches!(dialog.show(&prompt), Err(NotifyError::Io(_))));
    }
}
