//! Parse options and outcomes.

use confdoc_core::ParsedConfig;
use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;

/// How unrecognised input lines are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Skip the line, record a diagnostic and keep going
    #[default]
    Lenient,
    /// Fail on the first skipped line
    Strict,
}

/// Options accepted by [`parse_with`](crate::parse_with)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub mode: ParseMode,
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self {
            mode: ParseMode::Strict,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.mode == ParseMode::Strict
    }
}

/// Parsed document plus everything the parser had to skip
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    pub document: ParsedConfig,
    pub diagnostics: Vec<Diagnostic>,
}
