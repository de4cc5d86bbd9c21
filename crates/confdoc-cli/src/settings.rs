//! CLI settings layering: defaults, then `CONFDOC_*` environment variables,
//! then command-line flags.

use camino::Utf8Path;
use confdoc_core::{ConfdocError, ConfdocResult, FormatTag};
use confdoc_formats::{ParseMode, ParseOptions};
use std::collections::HashMap;

use crate::GlobalArgs;

const ENV_PREFIX: &str = "CONFDOC_";
const ENV_FORMAT: &str = "CONFDOC_FORMAT";
const ENV_STRICT: &str = "CONFDOC_STRICT";
const ENV_LOG: &str = "CONFDOC_LOG";

/// Effective settings for one CLI invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliSettings {
    /// Format override; `None` means detect from the file extension
    pub format: Option<FormatTag>,
    pub mode: ParseMode,
    /// `tracing_subscriber::EnvFilter` directives
    pub log_filter: String,
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            format: None,
            mode: ParseMode::Lenient,
            log_filter: default_filter(false),
        }
    }
}

fn default_filter(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!(
        "confdoc={level},confdoc_core={level},confdoc_formats={level},confdoc_editor={level}"
    )
}

impl CliSettings {
    /// Merge environment overrides and flags over the defaults
    pub fn from_layers(env_overrides: &HashMap<String, String>, flags: &GlobalArgs) -> ConfdocResult<Self> {
        let mut settings = Self::default();
        settings.apply_env_overrides(env_overrides)?;
        settings.apply_flags(flags);
        Ok(settings)
    }

    fn apply_env_overrides(&mut self, overrides: &HashMap<String, String>) -> ConfdocResult<()> {
        for (key, value) in overrides {
            match key.as_str() {
                ENV_FORMAT => {
                    let format = value.parse::<FormatTag>().map_err(|e| invalid_env(key, value, &e.to_string()))?;
                    self.format = Some(format);
                },
                ENV_STRICT => {
                    self.mode = if parse_flag(value).ok_or_else(|| invalid_env(key, value, "expected true or false"))? {
                        ParseMode::Strict
                    } else {
                        ParseMode::Lenient
                    };
                },
                ENV_LOG => self.log_filter = value.clone(),
                _ => {
                    // Unknown environment variable, ignore
                },
            }
        }
        Ok(())
    }

    fn apply_flags(&mut self, flags: &GlobalArgs) {
        if let Some(format) = flags.format {
            self.format = Some(format);
        }
        if flags.strict {
            self.mode = ParseMode::Strict;
        }
        // --verbose beats CONFDOC_LOG
        if flags.verbose {
            self.log_filter = default_filter(true);
        }
    }

    /// Collect `CONFDOC_*` environment variables
    pub fn collect_env_overrides() -> HashMap<String, String> {
        std::env::vars().filter(|(key, _)| key.starts_with(ENV_PREFIX)).collect()
    }

    /// Format for `path`: the override if set, else extension detection
    pub fn format_for(&self, path: &Utf8Path) -> FormatTag {
        self.format.unwrap_or_else(|| confdoc_formats::detect_format(path))
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions { mode: self.mode }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn invalid_env(key: &str, value: &str, reason: &str) -> ConfdocError {
    ConfdocError::InvalidInput {
        path: key.to_string(),
        input: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_defaults() {
        let settings = CliSettings::from_layers(&HashMap::new(), &GlobalArgs::default()).unwrap();
        assert_eq!(settings, CliSettings::default());
        assert_eq!(settings.format_for(Utf8Path::new("server.properties")), FormatTag::Properties);
        assert!(!settings.parse_options().is_strict());
    }

    #[test]
    fn test_env_overrides_defaults() {
        let overrides = env(&[("CONFDOC_FORMAT", "yaml"), ("CONFDOC_STRICT", "1"), ("CONFDOC_LOG", "trace")]);
        let settings = CliSettings::from_layers(&overrides, &GlobalArgs::default()).unwrap();
        assert_eq!(settings.format, Some(FormatTag::Yaml));
        assert_eq!(settings.mode, ParseMode::Strict);
        assert_eq!(settings.log_filter, "trace");
        assert_eq!(settings.format_for(Utf8Path::new("a.json")), FormatTag::Yaml);
    }

    #[test]
    fn test_flags_override_env() {
        let overrides = env(&[("CONFDOC_FORMAT", "yaml"), ("CONFDOC_LOG", "warn")]);
        let flags = GlobalArgs {
            format: Some(FormatTag::Toml),
            strict: true,
            verbose: true,
        };
        let settings = CliSettings::from_layers(&overrides, &flags).unwrap();
        assert_eq!(settings.format, Some(FormatTag::Toml));
        assert_eq!(settings.mode, ParseMode::Strict);
        assert!(settings.log_filter.contains("confdoc=debug"));
    }

    #[test]
    fn test_invalid_env_values_fail() {
        let error = CliSettings::from_layers(&env(&[("CONFDOC_FORMAT", "ini")]), &GlobalArgs::default()).unwrap_err();
        assert!(matches!(error, ConfdocError::InvalidInput { .. }));

        let error = CliSettings::from_layers(&env(&[("CONFDOC_STRICT", "maybe")]), &GlobalArgs::default()).unwrap_err();
        assert!(matches!(error, ConfdocError::InvalidInput { .. }));
    }

    #[test]
    fn test_unknown_variables_are_ignored() {
        let settings = CliSettings::from_layers(&env(&[("CONFDOC_COLOR", "x")]), &GlobalArgs::default()).unwrap();
        assert_eq!(settings, CliSettings::default());
    }
}
