//! Log record shape consumed by processing stages

use crate::level::Level;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A structured log entry as it flows through the processor chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Human-readable message
    pub message: String,

    /// Logger channel the record was emitted on (e.g., "app", "http")
    pub channel: String,

    /// Severity of the record
    pub severity: Level,

    /// Values supplied by the caller at the log call site
    #[serde(default)]
    pub context: Map<String, Value>,

    /// Values added by processors
    #[serde(default)]
    pub metadata: Map<String, Value>,

    /// When the record was created
    pub datetime: DateTime<Utc>,
}

impl LogRecord {
    /// Create a record with empty context and metadata, timestamped now
    pub fn new(channel: impl Into<String>, severity: Level, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            channel: channel.into(),
            severity,
            context: Map::new(),
            metadata: Map::new(),
            datetime: Utc::now(),
        }
    }

    /// Add a metadata entry, replacing any previous value under `key`
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Add a context entry, replacing any previous value under `key`
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}
