//! Editor widget selection driven by a value's runtime type.

use confdoc_core::ConfigValue;
use serde::Serialize;

/// Numbers in this range get a slider next to the numeric input
pub const SLIDER_MIN: f64 = 0.0;
pub const SLIDER_MAX: f64 = 1000.0;

/// Strings longer than this (in characters) get a multi-line editor
pub const TEXT_AREA_THRESHOLD: usize = 50;

/// Bounds of a numeric slider
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Slider {
    pub min: f64,
    pub max: f64,
}

/// The kind of editor shown for a value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum EditorKind {
    Toggle,
    Number { slider: Option<Slider> },
    TextLine,
    TextArea,
    /// Nulls are display-only
    ReadOnly,
    List { len: usize },
    Group { len: usize },
}

impl EditorKind {
    pub fn for_value(value: &ConfigValue) -> Self {
        match value {
            ConfigValue::Bool(_) => EditorKind::Toggle,
            ConfigValue::Number(n) => EditorKind::Number {
                slider: (SLIDER_MIN..=SLIDER_MAX).contains(n).then_some(Slider {
                    min: SLIDER_MIN,
                    max: SLIDER_MAX,
                }),
            },
            ConfigValue::String(s) if s.chars().count() > TEXT_AREA_THRESHOLD || s.contains('\n') => {
                EditorKind::TextArea
            },
            ConfigValue::String(_) => EditorKind::TextLine,
            ConfigValue::Null => EditorKind::ReadOnly,
            ConfigValue::Array(items) => EditorKind::List { len: items.len() },
            ConfigValue::Object(map) => EditorKind::Group { len: map.len() },
        }
    }

    /// Short label for listings
    pub fn label(&self) -> &'static str {
        match self {
            EditorKind::Toggle => "toggle",
            EditorKind::Number { slider: Some(_) } => "slider",
            EditorKind::Number { slider: None } => "number",
            EditorKind::TextLine => "text",
            EditorKind::TextArea => "textarea",
            EditorKind::ReadOnly => "read-only",
            EditorKind::List { .. } => "list",
            EditorKind::Group { .. } => "group",
        }
    }

    /// Check if the value can be changed through `Edit::Input` or `Edit::Toggle`
    pub fn is_editable(&self) -> bool {
        !matches!(
            self,
            EditorKind::ReadOnly | EditorKind::List { .. } | EditorKind::Group { .. }
        )
    }
}
