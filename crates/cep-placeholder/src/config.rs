//! Controller configuration
//!
//! `Config` holds the effective settings; `ConfigOverrides` is the partial
//! record callers pass at registration. Merges accumulate: a key left out of
//! an override keeps whatever an earlier merge set.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::StyleMode;

/// Errors building overrides from JSON text
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Options must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Effective controller settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Events that hide the placeholder
    pub inactive_events: Vec<String>,
    /// Event that shows the placeholder (when the element is empty)
    pub active_event: String,
    /// Selector used when registration names none
    pub default_selector: String,
    pub style_mode: StyleMode,
    /// Emit `placeholderactive` / `placeholderinactive` on the document
    pub is_trigger: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inactive_events: ["change", "keydown", "keypress", "input"]
                .map(String::from)
                .to_vec(),
            active_event: "blur".to_string(),
            default_selector: "[data-placeholder]".to_string(),
            style_mode: StyleMode::Embedded,
            is_trigger: true,
        }
    }
}

impl Config {
    /// Load a full configuration; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Inactive events as one space separated string
    pub fn inactive_event_names(&self) -> String {
        self.inactive_events.join(" ")
    }

    /// Merge overrides in place; set fields win
    pub fn merge(&mut self, overrides: &ConfigOverrides) {
        if let Some(events) = &overrides.inactive_event {
            let mut parsed: Vec<String> = Vec::new();
            for name in events.split_whitespace() {
                if !parsed.iter().any(|p| p == name) {
                    parsed.push(name.to_string());
                }
            }
            if parsed.is_empty() {
                tracing::warn!("Empty inactiveEvent override; placeholder will never hide");
            }
            self.inactive_events = parsed;
        }
        if let Some(event) = &overrides.active_event {
            self.active_event = event.trim().to_string();
        }
        if let Some(selector) = &overrides.default_selector {
            self.default_selector = selector.clone();
        }
        if let Some(mode) = overrides.style_mode {
            self.style_mode = mode;
        }
        if let Some(trigger) = overrides.is_trigger {
            self.is_trigger = trigger;
        }
    }

    /// Copy with overrides applied
    pub fn merged(mut self, overrides: &ConfigOverrides) -> Self {
        self.merge(overrides);
        self
    }
}

/// Partial configuration supplied at registration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigOverrides {
    /// Space separated event names
    #[serde(alias = "inativeEvent", skip_serializing_if = "Option::is_none")]
    pub inactive_event: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_event: Option<String>,
    #[serde(alias = "defautlSelector", skip_serializing_if = "Option::is_none")]
    pub default_selector: Option<String>,
    #[serde(alias = "isClasActivate", skip_serializing_if = "Option::is_none")]
    pub style_mode: Option<StyleMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_trigger: Option<bool>,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inactive_event(mut self, events: impl Into<String>) -> Self {
        self.inactive_event = Some(events.into());
        self
    }

    pub fn active_event(mut self, event: impl Into<String>) -> Self {
        self.active_event = Some(event.into());
        self
    }

    pub fn default_selector(mut self, selector: impl Into<String>) -> Self {
        self.default_selector = Some(selector.into());
        self
    }

    pub fn style_mode(mut self, mode: StyleMode) -> Self {
        self.style_mode = Some(mode);
        self
    }

    pub fn is_trigger(mut self, trigger: bool) -> Self {
        self.is_trigger = Some(trigger);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Parse JSON text. Fails only for malformed JSON or a non-object;
    /// bad keys and values inside the object are skipped with a warning.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(json)?;
        match value {
            Value::Object(map) => Ok(Self::from_map(&map)),
            other => Err(ConfigError::NotAnObject(json_kind(&other))),
        }
    }

    /// Tolerant conversion: objects are read key by key, `null` is empty,
    /// anything else is ignored with a warning
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::from_map(map),
            Value::Null => Self::default(),
            other => {
                tracing::warn!("Ignoring {} passed as placeholder options", json_kind(other));
                Self::default()
            }
        }
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        let mut overrides = Self::default();
        for (key, value) in map {
            match key.as_str() {
                "inactiveEvent" | "inativeEvent" => {
                    overrides.inactive_event = field(key, value).or(overrides.inactive_event);
                }
                "activeEvent" => {
                    overrides.active_event = field(key, value).or(overrides.active_event);
                }
                "defaultSelector" | "defautlSelector" => {
                    overrides.default_selector = field(key, value).or(overrides.default_selector);
                }
                "styleMode" | "isClasActivate" => {
                    overrides.style_mode = field(key, value).or(overrides.style_mode);
                }
                "isTrigger" => {
                    overrides.is_trigger = field(key, value).or(overrides.is_trigger);
                }
                _ => tracing::warn!("Ignoring unknown placeholder option '{}'", key),
            }
        }
        overrides
    }
}

fn field<T: DeserializeOwned>(key: &str, value: &Value) -> Option<T> {
    match T::deserialize(value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            tracing::warn!("Ignoring placeholder option '{}': {}", key, err);
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
