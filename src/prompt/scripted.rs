//! Pre-recorded prompt answers

use std::collections::VecDeque;

use super::Prompt;

/// Answers questions from a fixed script, recording each question asked
///
/// Once the script runs out every further question is declined.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<bool>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Agree to the next 64 questions
    pub fn always_yes() -> Self {
        Self::new(std::iter::repeat(true).take(64))
    }

    /// Questions asked so far, in order
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.answers.pop_front().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_then_decline() {
        let mut prompt = ScriptedPrompt::new([true, false]);
        assert!(prompt.confirm("a"));
        assert!(!prompt.confirm("b"));
        assert!(!prompt.confirm("c"));
        assert_eq!(prompt.asked(), ["a", "b", "c"]);
    }
}
