//! Logger configuration
//!
//! [`LoggerConfig`] describes a logger's starting state. It can be built in
//! code, deserialized from JSON, and overridden from `FANCYLOG_*` environment
//! variables. Once a logger exists its toggles are changed through the
//! logger's own setters.

use super::error::{LoggerError, Result};
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::env;

/// How a logger's name is decorated in the name column
///
/// The template's first `{}` is replaced with the name; the default
/// template is `<{}>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFormat {
    before: String,
    after: String,
}

impl NameFormat {
    pub fn parse(template: &str) -> Result<Self> {
        let (before, after) = template.split_once("{}").ok_or_else(|| {
            LoggerError::config(
                "NameFormat",
                format!("template '{}' has no '{{}}' placeholder", template),
            )
        })?;
        Ok(Self {
            before: before.to_string(),
            after: after.to_string(),
        })
    }

    /// `{name}`, used by the HTTP logger
    pub fn braces() -> Self {
        Self {
            before: "{".to_string(),
            after: "}".to_string(),
        }
    }

    pub fn render(&self, name: &str) -> String {
        format!("{}{}{}", self.before, name, self.after)
    }
}

impl Default for NameFormat {
    fn default() -> Self {
        Self {
            before: "<".to_string(),
            after: ">".to_string(),
        }
    }
}

impl Serialize for NameFormat {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{}{{}}{}", self.before, self.after))
    }
}

impl<'de> Deserialize<'de> for NameFormat {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let template = String::deserialize(deserializer)?;
        NameFormat::parse(&template).map_err(serde::de::Error::custom)
    }
}

/// Rendering of one nested value shape inside a field map
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NestedMode {
    /// `key[ inner:value  other:value ]`
    #[default]
    Bracketed,
    /// `key=map[inner:value other:value]`
    Inline,
}

/// Per-shape rendering rules for nested field values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldRenderRules {
    pub nested_maps: NestedMode,
    pub string_lists: NestedMode,
}

/// Starting configuration for a logger
///
/// # Example
///
/// ```
/// use fancy_logger::LoggerConfig;
///
/// let config = LoggerConfig::from_json(r#"{"name": "api", "debug": true, "color": false}"#).unwrap();
/// assert_eq!(config.name, "api");
/// assert!(config.debug);
/// assert!(config.timestamp);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub name: String,
    pub name_format: Option<NameFormat>,
    /// `None` detects color support from the output sink
    pub color: Option<bool>,
    pub debug: bool,
    pub trace: bool,
    pub timestamp: bool,
    pub timestamp_format: TimestampFormat,
    pub quiet: bool,
    pub field_rules: FieldRenderRules,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            name_format: None,
            color: None,
            debug: false,
            trace: false,
            timestamp: true,
            timestamp_format: TimestampFormat::default(),
            quiet: false,
            field_rules: FieldRenderRules::default(),
        }
    }
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply `FANCYLOG_{COLOR,DEBUG,TRACE,TIMESTAMP,QUIET}` overrides
    ///
    /// Accepted values are `1/0`, `true/false`, `yes/no` and `on/off`.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("FANCYLOG_COLOR") {
            self.color = Some(parse_flag("FANCYLOG_COLOR", &value)?);
        }
        let toggles: [(&str, &mut bool); 4] = [
            ("FANCYLOG_DEBUG", &mut self.debug),
            ("FANCYLOG_TRACE", &mut self.trace),
            ("FANCYLOG_TIMESTAMP", &mut self.timestamp),
            ("FANCYLOG_QUIET", &mut self.quiet),
        ];
        for (key, slot) in toggles {
            if let Some(value) = lookup(key) {
                *slot = parse_flag(key, &value)?;
            }
        }
        Ok(())
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(LoggerError::config(
            key,
            format!("expected a boolean, got '{}'", other),
        )),
    }
}
