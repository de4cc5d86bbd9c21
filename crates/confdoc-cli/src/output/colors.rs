//! Terminal color support detection and formatting.
//!
//! Colors are off when `NO_COLOR` is set or when stdout or stderr is not a
//! terminal, so piped output (`confdoc get ... | jq`) stays clean.

use std::env;
use std::io::{self, IsTerminal};

const GREEN: &str = "32";
const YELLOW: &str = "33";
const RED: &str = "31";
const CYAN: &str = "36";
const DIM: &str = "2";

/// Color support detection and formatting
#[derive(Debug, Clone, Copy)]
pub struct ColorSupport {
    enabled: bool,
}

impl ColorSupport {
    /// Detect color support automatically
    pub fn detect() -> Self {
        Self::from_env(
            env::var_os("NO_COLOR").is_some(),
            io::stderr().is_terminal() && io::stdout().is_terminal(),
        )
    }

    fn from_env(no_color: bool, terminal: bool) -> Self {
        Self {
            enabled: !no_color && terminal,
        }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }

    pub fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    pub fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    pub fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    /// Key paths and file names
    pub fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }
}
