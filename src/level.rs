//! Severity levels and their normalization
//!
//! Levels follow the eight RFC 5424 severities, each with a numeric code.
//! Ordering is by code, so `Debug < Info < ... < Emergency`.

use crate::error::{IntrospectionError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log record
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    /// Detailed debug information
    #[default]
    Debug = 100,
    /// Interesting events
    Info = 200,
    /// Normal but significant events
    Notice = 250,
    /// Exceptional occurrences that are not errors
    Warning = 300,
    /// Runtime errors that do not require immediate action
    Error = 400,
    /// Critical conditions
    Critical = 500,
    /// Action must be taken immediately
    Alert = 550,
    /// System is unusable
    Emergency = 600,
}

impl Level {
    pub const ALL: [Level; 8] = [
        Level::Debug,
        Level::Info,
        Level::Notice,
        Level::Warning,
        Level::Error,
        Level::Critical,
        Level::Alert,
        Level::Emergency,
    ];

    /// Numeric code of the level
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Canonical upper-case name
    pub fn name(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Notice => "NOTICE",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
            Level::Alert => "ALERT",
            Level::Emergency => "EMERGENCY",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u16> for Level {
    type Error = IntrospectionError;

    fn try_from(code: u16) -> Result<Self> {
        Level::ALL
            .into_iter()
            .find(|level| level.code() == code)
            .ok_or_else(|| IntrospectionError::InvalidSeverity(code.to_string()))
    }
}

impl FromStr for Level {
    type Err = IntrospectionError;

    fn from_str(s: &str) -> Result<Self> {
        StandardSeverity.normalize(s)
    }
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN => Level::Warning,
            tracing::Level::INFO => Level::Info,
            _ => Level::Debug,
        }
    }
}

/// Maps configuration input onto the canonical [`Level`] ordering
///
/// Hosts with their own level vocabulary implement this to feed the
/// enricher a threshold.
pub trait SeverityOrdering: Send + Sync {
    /// The most verbose level, used when no threshold is configured
    fn lowest(&self) -> Level {
        Level::Debug
    }

    /// Normalize `input` or fail with [`IntrospectionError::InvalidSeverity`]
    fn normalize(&self, input: &str) -> Result<Level>;
}

/// Accepts level names (any case, with common aliases) and numeric codes
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardSeverity;

impl SeverityOrdering for StandardSeverity {
    fn normalize(&self, input: &str) -> Result<Level> {
        let trimmed = input.trim();

        if let Ok(code) = trimmed.parse::<u16>() {
            return Level::try_from(code);
        }

        match trimmed.to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "NOTICE" => Ok(Level::Notice),
            "WARNING" | "WARN" => Ok(Level::Warning),
            "ERROR" | "ERR" => Ok(Level::Error),
            "CRITICAL" | "CRIT" => Ok(Level::Critical),
            "ALERT" => Ok(Level::Alert),
            "EMERGENCY" | "EMERG" => Ok(Level::Emergency),
            _ => Err(IntrospectionError::InvalidSeverity(input.to_string())),
        }
    }
}
