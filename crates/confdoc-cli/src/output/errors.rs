//! Error message formatting with actionable suggestions.

use super::colors::ColorSupport;
use confdoc_core::ConfdocError;
use std::error::Error;

/// Error formatter with suggestions
pub struct ErrorFormatter {
    colors: ColorSupport,
}

impl ErrorFormatter {
    pub fn new() -> Self {
        Self {
            colors: ColorSupport::detect(),
        }
    }

    pub fn with_colors(colors: ColorSupport) -> Self {
        Self { colors }
    }

    /// Format an error with its location, suggestion and source chain
    pub fn format_error(&self, error: &ConfdocError) -> String {
        self.format_error_in(error, None)
    }

    /// Like [`format_error`](Self::format_error), naming the file the error came from
    pub fn format_error_in(&self, error: &ConfdocError, file: Option<&str>) -> String {
        let mut output = String::new();

        output.push_str(&self.colors.red("error"));
        output.push_str(": ");
        output.push_str(&error.to_string());
        output.push('\n');

        let location = match error {
            ConfdocError::JsonParse { line, column, .. } => Some((*line, *column)),
            ConfdocError::SkippedLine { line, .. } => Some((*line, 1)),
            _ => None,
        };
        if let (Some(file), Some((line, column))) = (file, location) {
            output.push_str(&self.format_location(file, line, column));
            output.push('\n');
        }

        if let Some(suggestion) = error.suggestion() {
            output.push('\n');
            output.push_str(&self.colors.dim("help"));
            output.push_str(": ");
            output.push_str(suggestion);
            output.push('\n');
        }

        let mut source = error.source();
        while let Some(err) = source {
            output.push('\n');
            output.push_str(&self.colors.dim("caused by"));
            output.push_str(": ");
            output.push_str(&err.to_string());
            source = err.source();
        }

        output
    }

    /// Format file location context
    pub fn format_location(&self, file: &str, line: usize, column: usize) -> String {
        format!("  {} {}:{}:{}", self.colors.dim("-->"), file, line, column)
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> ErrorFormatter {
        ErrorFormatter::with_colors(ColorSupport::disabled())
    }

    #[test]
    fn test_parse_errors_show_location_and_help() {
        let error = ConfdocError::JsonParse {
            message: "expected value".to_string(),
            line: 3,
            column: 9,
        };
        let text = plain().format_error_in(&error, Some("options.json"));
        assert!(text.starts_with("error: Failed to parse JSON document"));
        assert!(text.contains("--> options.json:3:9"));
        assert!(text.contains("help: Fix the JSON syntax"));
    }

    #[test]
    fn test_io_errors_show_cause() {
        let error = ConfdocError::io(
            "Failed to read a.toml".to_string(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        let text = plain().format_error(&error);
        assert!(text.contains("caused by: no such file"));
        assert!(!text.contains("-->"));
    }
}
