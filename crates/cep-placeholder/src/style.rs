//! Style modes
//!
//! Only `StyleMode::None` is realised: the author ships the stylesheet.
//! `Embedded` (inline style on the element) and `Dynamic` (generated
//! `<style>` tag) are accepted in configuration but apply nothing.

use cep_dom::NodeId;
use serde::{Deserialize, Serialize};

use crate::handlers::{ACTIVE_KEY, PLACEHOLDER_KEY};

/// How placeholder styling is provided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleMode {
    /// Inline style on each target element
    #[default]
    #[serde(alias = "embeded")]
    Embedded,
    /// Generated stylesheet
    Dynamic,
    /// No styling; the page provides its own rule
    None,
}

/// Whether a style mode does anything yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleSupport {
    Implemented,
    NotYetImplemented,
}

impl StyleMode {
    pub fn support(self) -> StyleSupport {
        match self {
            StyleMode::None => StyleSupport::Implemented,
            StyleMode::Embedded | StyleMode::Dynamic => StyleSupport::NotYetImplemented,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StyleMode::Embedded => "embedded",
            StyleMode::Dynamic => "dynamic",
            StyleMode::None => "none",
        }
    }
}

/// Declarations applied to the `::before` pseudo-element
pub const PLACEHOLDER_STYLE: &[(&str, &str)] = &[
    ("content", "attr(data-placeholder)"),
    ("opacity", "0.5"),
];

/// Rule an author adds to the page when using `StyleMode::None`
pub fn recommended_stylesheet() -> String {
    let declarations: Vec<String> = PLACEHOLDER_STYLE
        .iter()
        .map(|(property, value)| format!("{}: {};", property, value))
        .collect();
    format!(
        "[data-{}][data-{}=true]::before {{ {} }}",
        PLACEHOLDER_KEY,
        ACTIVE_KEY,
        declarations.join(" ")
    )
}

/// Apply the configured style mode to freshly bound elements
pub(crate) fn apply(mode: StyleMode, elements: &[NodeId]) -> StyleSupport {
    let support = mode.support();
    if support == StyleSupport::NotYetImplemented && !elements.is_empty() {
        tracing::debug!(
            "Style mode '{}' is not implemented; {} elements left unstyled",
            mode.as_str(),
            elements.len()
        );
    }
    support
}
