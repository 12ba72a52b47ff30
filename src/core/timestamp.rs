//! Timestamp layouts and time sources
//!
//! A logger asks its [`TimeSource`] for the current instant together with the
//! layout to print it in. The default source yields `Utc::now()` in RFC 3339
//! with whole seconds.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use std::sync::Arc;

/// Timestamp layout options
///
/// # Examples
///
/// ```
/// use fancy_logger::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::Rfc3339.format(&at), "2025-01-08T10:30:45Z");
/// assert_eq!(TimestampFormat::custom("%H:%M").unwrap().format(&at), "10:30");
/// assert!(TimestampFormat::custom("%Q").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampFormat {
    /// RFC 3339 with whole seconds: `2025-01-08T10:30:45Z`
    #[default]
    Rfc3339,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601Millis,

    /// Time of day only: `10:30:45`
    Kitchen,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Any strftime-compatible layout; build it with [`TimestampFormat::custom`]
    /// to have the layout checked up front
    Custom(String),
}

impl TimestampFormat {
    /// A strftime layout, rejected if chrono cannot parse every specifier
    pub fn custom(layout: impl Into<String>) -> Result<Self> {
        let format = TimestampFormat::Custom(layout.into());
        format.validate()?;
        Ok(format)
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            TimestampFormat::Custom(layout)
                if StrftimeItems::new(layout).any(|item| matches!(item, Item::Error)) =>
            {
                Err(LoggerError::config(
                    "TimestampFormat",
                    format!("'{}' is not a valid strftime layout", layout),
                ))
            }
            _ => Ok(()),
        }
    }

    /// Renders `datetime`; an unparsable custom layout falls back to RFC 3339
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Rfc3339 => datetime.to_rfc3339_opts(SecondsFormat::Secs, true),
            TimestampFormat::Iso8601Millis => {
                datetime.to_rfc3339_opts(SecondsFormat::Millis, true)
            }
            TimestampFormat::Kitchen => datetime.format("%H:%M:%S").to_string(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(layout) => {
                let mut out = String::new();
                match write!(out, "{}", datetime.format(layout)) {
                    Ok(()) => out,
                    Err(_) => datetime.to_rfc3339_opts(SecondsFormat::Secs, true),
                }
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawTimestampFormat {
    Rfc3339,
    Iso8601Millis,
    Kitchen,
    Unix,
    UnixMillis,
    Custom(String),
}

impl<'de> Deserialize<'de> for TimestampFormat {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let format = match RawTimestampFormat::deserialize(deserializer)? {
            RawTimestampFormat::Rfc3339 => TimestampFormat::Rfc3339,
            RawTimestampFormat::Iso8601Millis => TimestampFormat::Iso8601Millis,
            RawTimestampFormat::Kitchen => TimestampFormat::Kitchen,
            RawTimestampFormat::Unix => TimestampFormat::Unix,
            RawTimestampFormat::UnixMillis => TimestampFormat::UnixMillis,
            RawTimestampFormat::Custom(layout) => TimestampFormat::Custom(layout),
        };
        format.validate().map_err(serde::de::Error::custom)?;
        Ok(format)
    }
}

/// Produces the instant and layout for the timestamp column
#[derive(Clone)]
pub struct TimeSource(Arc<dyn Fn() -> (DateTime<Utc>, TimestampFormat) + Send + Sync>);

impl TimeSource {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> (DateTime<Utc>, TimestampFormat) + Send + Sync + 'static,
    {
        TimeSource(Arc::new(f))
    }

    /// Wall clock in the given layout
    pub fn system(format: TimestampFormat) -> Self {
        TimeSource::new(move || (Utc::now(), format.clone()))
    }

    /// Always reports the same instant; handy for reproducible output
    pub fn fixed(at: DateTime<Utc>, format: TimestampFormat) -> Self {
        TimeSource::new(move || (at, format.clone()))
    }

    pub fn now(&self) -> (DateTime<Utc>, TimestampFormat) {
        (self.0)()
    }
}

impl Default for TimeSource {
    fn default() -> Self {
        TimeSource::system(TimestampFormat::default())
    }
}

impl fmt::Debug for TimeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TimeSource(..)")
    }
}
