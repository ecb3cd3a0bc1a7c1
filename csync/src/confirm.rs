//! Operator confirmation capability.
//!
//! Skeptical mode asks before every match, merge, and create. The driver
//! depends on this trait rather than on stdin, so tests script the answers.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Yes/no confirmation prompt.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Blocking stdin prompt: `<prompt> (Y/n): `. Only 'y' (any case) counts
/// as yes; read failures count as no.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{} (Y/n): ", prompt);
        let _ = io::stdout().flush();

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        line.trim().eq_ignore_ascii_case("y")
    }
}

/// Pre-recorded answers for tests. An exhausted queue answers no.
#[derive(Debug, Default)]
pub struct ScriptedConfirm {
    answers: VecDeque<bool>,
    asked: Vec<String>,
}

impl ScriptedConfirm {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        ScriptedConfirm {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Prompts seen so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.asked.push(prompt.to_string());
        self.answers.pop_front().unwrap_or(false)
    }
}
