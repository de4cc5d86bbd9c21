//! Format tags identifying the surface syntax of a buffer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::utils::path::get_extension;

/// Surface syntax of a configuration buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatTag {
    Json,
    Toml,
    Yaml,
    Properties,
    /// Unstructured; no tree editor is offered
    Text,
}

/// Error returned when a format name is not recognised
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown format '{name}' (expected json, toml, yaml, properties or text)")]
pub struct UnknownFormat {
    pub name: String,
}

impl FormatTag {
    pub const ALL: [FormatTag; 5] = [
        FormatTag::Json,
        FormatTag::Toml,
        FormatTag::Yaml,
        FormatTag::Properties,
        FormatTag::Text,
    ];

    /// Detect the format from a file extension, case-insensitively
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match get_extension(path.as_ref()).as_deref() {
            Some("json") | Some("json5") => FormatTag::Json,
            Some("toml") => FormatTag::Toml,
            Some("yml") | Some("yaml") => FormatTag::Yaml,
            Some("properties") => FormatTag::Properties,
            _ => FormatTag::Text,
        }
    }

    /// Whether the structured tree editor can be used for this format
    pub fn supports_structured_edit(self) -> bool {
        !matches!(self, FormatTag::Text)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FormatTag::Json => "json",
            FormatTag::Toml => "toml",
            FormatTag::Yaml => "yaml",
            FormatTag::Properties => "properties",
            FormatTag::Text => "text",
        }
    }

    /// Conventional file extension when writing a converted document
    pub fn extension(self) -> &'static str {
        match self {
            FormatTag::Json => "json",
            FormatTag::Toml => "toml",
            FormatTag::Yaml => "yaml",
            FormatTag::Properties => "properties",
            FormatTag::Text => "txt",
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatTag {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" | "json5" => Ok(FormatTag::Json),
            "toml" => Ok(FormatTag::Toml),
            "yaml" | "yml" => Ok(FormatTag::Yaml),
            "properties" => Ok(FormatTag::Properties),
            "text" | "txt" => Ok(FormatTag::Text),
            _ => Err(UnknownFormat { name: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_is_case_insensitive() {
        assert_eq!(FormatTag::from_path("options.JSON"), FormatTag::Json);
        assert_eq!(FormatTag::from_path("mods/config.json5"), FormatTag::Json);
        assert_eq!(FormatTag::from_path("server.Toml"), FormatTag::Toml);
        assert_eq!(FormatTag::from_path("a/b/c.yml"), FormatTag::Yaml);
        assert_eq!(FormatTag::from_path("c.YAML"), FormatTag::Yaml);
        assert_eq!(FormatTag::from_path("server.properties"), FormatTag::Properties);
    }

    #[test]
    fn test_from_path_falls_back_to_text() {
        assert_eq!(FormatTag::from_path("latest.log"), FormatTag::Text);
        assert_eq!(FormatTag::from_path("README"), FormatTag::Text);
        assert_eq!(FormatTag::from_path(".gitignore"), FormatTag::Text);
    }

    #[test]
    fn test_dotfiles_use_the_text_after_the_dot() {
        assert_eq!(FormatTag::from_path(".json"), FormatTag::Json);
        assert_eq!(FormatTag::from_path("config/.yaml"), FormatTag::Yaml);
    }

    #[test]
    fn test_structured_edit_support() {
        for format in FormatTag::ALL {
            assert_eq!(format.supports_structured_edit(), format != FormatTag::Text);
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("YAML".parse::<FormatTag>().unwrap(), FormatTag::Yaml);
        assert_eq!("properties".parse::<FormatTag>().unwrap(), FormatTag::Properties);
        assert!("ini".parse::<FormatTag>().is_err());
    }
}
