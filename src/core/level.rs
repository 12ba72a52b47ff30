//! Severity labels and their display prefixes

use super::color::Color;
use super::error::LoggerError;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// A severity label such as `INFO`
///
/// The six standard levels are associated constants; any other label
/// (`Level::new("GET")`) is a custom level. Gating is decided per level by the
/// logger, never by comparing ranks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Level(Cow<'static, str>);

impl Level {
    pub const FATAL: Level = Level(Cow::Borrowed("FATAL"));
    pub const ERROR: Level = Level(Cow::Borrowed("ERROR"));
    pub const WARN: Level = Level(Cow::Borrowed("WARN"));
    pub const INFO: Level = Level(Cow::Borrowed("INFO"));
    pub const DEBUG: Level = Level(Cow::Borrowed("DEBUG"));
    pub const TRACE: Level = Level(Cow::Borrowed("TRACE"));

    pub const STANDARD: [Level; 6] = [
        Level::FATAL,
        Level::ERROR,
        Level::WARN,
        Level::INFO,
        Level::DEBUG,
        Level::TRACE,
    ];

    /// A custom level; the label is used verbatim
    pub fn new(label: impl Into<Cow<'static, str>>) -> Self {
        Level(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display width of the label, in characters
    pub fn width(&self) -> usize {
        self.0.chars().count()
    }

    /// `[LABEL]`
    pub fn to_prefix(&self) -> String {
        format!("[{}]", self.0)
    }

    /// Severity rank of a standard level, highest for `FATAL`
    pub fn rank(&self) -> Option<u8> {
        match self.as_str() {
            "TRACE" => Some(0),
            "DEBUG" => Some(1),
            "INFO" => Some(2),
            "WARN" => Some(3),
            "ERROR" => Some(4),
            "FATAL" => Some(5),
            _ => None,
        }
    }

    pub fn is_standard(&self) -> bool {
        self.rank().is_some()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    /// Standard names match case-insensitively (`warning` is accepted for
    /// `WARN`); anything else becomes a custom level as written.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty()
            || trimmed
                .chars()
                .any(|c| c.is_whitespace() || c == '[' || c == ']')
        {
            return Err(LoggerError::invalid_level(s));
        }
        let level = match trimmed.to_uppercase().as_str() {
            "TRACE" => Level::TRACE,
            "DEBUG" => Level::DEBUG,
            "INFO" => Level::INFO,
            "WARN" | "WARNING" => Level::WARN,
            "ERROR" => Level::ERROR,
            "FATAL" => Level::FATAL,
            _ => Level::new(trimmed.to_string()),
        };
        Ok(level)
    }
}

/// A level bound to its display color and stack-trace flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefix {
    pub level: Level,
    pub color: Color,
    pub requires_stack_trace: bool,
}

impl Prefix {
    pub fn new(level: Level, color: Color) -> Self {
        Self {
            level,
            color,
            requires_stack_trace: false,
        }
    }

    #[must_use]
    pub fn with_stack_trace(mut self, enabled: bool) -> Self {
        self.requires_stack_trace = enabled;
        self
    }

    /// Default prefix for one of the standard levels
    ///
    /// FATAL, ERROR and DEBUG capture the call site; see `Registry` for
    /// reconfiguring that table.
    pub fn standard(level: &Level) -> Option<Prefix> {
        let (color, trace) = match level.as_str() {
            "FATAL" => (Color::FATAL_RED, true),
            "ERROR" => (Color::RED, true),
            "WARN" => (Color::ORANGE, false),
            "INFO" => (Color::GREEN, false),
            "DEBUG" => (Color::PURPLE, true),
            "TRACE" => (Color::CYAN, false),
            _ => return None,
        };
        Some(Prefix::new(level.clone(), color).with_stack_trace(trace))
    }
}
