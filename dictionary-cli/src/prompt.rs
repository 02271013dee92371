//! User confirmation and notices
//!
//! Workflows ask questions and report outcomes through [`Prompter`] so the
//! terminal can be swapped for a scripted fake in tests.

use colored::*;
use dialoguer::Confirm;
use dialoguer::theme::ColorfulTheme;
use is_terminal::IsTerminal;

/// A message reported to the user at the end of a workflow step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Informational; nothing went wrong
    Info(String),
    Success(String),
    /// Something failed; the text is the cause as reported
    Failure(String),
}

pub trait Prompter: Send + Sync {
    /// Blocking yes/no question; `false` means the user declined
    fn confirm(&self, message: &str) -> bool;

    fn notify(&self, notice: Notice);
}

/// Prompts on the controlling terminal
#[derive(Debug, Clone, Default)]
pub struct TerminalPrompter {
    assume_yes: bool,
}

impl TerminalPrompter {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            println!("{}", message);
            println!("{}", "Confirmed (--yes)".dimmed());
            return true;
        }

        if !std::io::stdin().is_terminal() {
            log::warn!("Not attached to a terminal, treating confirmation as declined");
            eprintln!(
                "{}",
                "Cannot ask for confirmation without a terminal, rerun with --yes to proceed."
                    .yellow()
            );
            return false;
        }

        match Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .default(false)
            .interact()
        {
            Ok(answer) => answer,
            Err(e) => {
                log::warn!("Confirmation prompt failed: {}", e);
                false
            }
        }
    }

    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Info(text) => println!("{}", text.cyan()),
            Notice::Success(text) => println!("{}", text.bright_green()),
            Notice::Failure(text) => eprintln!("{} {}", "Error:".bright_red().bold(), text),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Answers confirmations from a script and records everything it is shown
    #[derive(Debug, Default)]
    pub struct ScriptedPrompter {
        answers: Mutex<VecDeque<bool>>,
        pub questions: Mutex<Vec<String>>,
        pub notices: Mutex<Vec<Notice>>,
    }

    impl ScriptedPrompter {
        pub fn answering(answers: &[bool]) -> Self {
            Self {
                answers: Mutex::new(answers.iter().copied().collect()),
                ..Default::default()
            }
        }

        pub fn questions(&self) -> Vec<String> {
            self.questions.lock().unwrap().clone()
        }

        pub fn notices(&self) -> Vec<Notice> {
            self.notices.lock().unwrap().clone()
        }
    }

    impl Prompter for ScriptedPrompter {
        fn confirm(&self, message: &str) -> bool {
            self.questions.lock().unwrap().push(message.to_string());
            // Running out of answers counts as declining
            self.answers.lock().unwrap().pop_front().unwrap_or(false)
        }

        fn notify(&self, notice: Notice) {
            self.notices.lock().unwrap().push(notice);
        }
    }
}
