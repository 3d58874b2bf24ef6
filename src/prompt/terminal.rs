//! Terminal yes/no prompt

use std::io::{self, BufRead, Write};

use super::Prompt;

/// Reads answers line by line from `input`, writing questions to `output`
///
/// Only `yes` or `y` (any case) counts as agreement. End of input, a read
/// error or anything else is a decline.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the process's stdin/stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the output sink (tests inspect what was asked)
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        if write!(self.output, "{} (yes/no): ", message)
            .and_then(|_| self.output.flush())
            .is_err()
        {
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "yes" | "y"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_yes_accepted() {
        let mut prompt = TerminalPrompt::new(Cursor::new("YES\n"), Vec::new());
        assert!(prompt.confirm("Restore?"));
        let asked = String::from_utf8(prompt.into_output()).unwrap();
        assert_eq!(asked, "Restore? (yes/no): ");
    }

    #[test]
    fn test_short_answer_accepted() {
        let mut prompt = TerminalPrompt::new(Cursor::new("y\n"), Vec::new());
        assert!(prompt.confirm("Restore?"));
    }

    #[test]
    fn test_other_answers_declined() {
        let mut prompt = TerminalPrompt::new(Cursor::new("no\nsure\n\n"), Vec::new());
        assert!(!prompt.confirm("one"));
        assert!(!prompt.confirm("two"));
        assert!(!prompt.confirm("three"));
    }

    #[test]
    fn test_end_of_input_declines() {
        let mut prompt = TerminalPrompt::new(Cursor::new(""), Vec::new());
        assert!(!prompt.confirm("Erase?"));
    }
}
