//! Processing stages for log records
//!
//! A host logging pipeline applies an ordered list of [`Processor`]s to
//! every record before handing it to its sinks.
//!
//! # Example
//!
//! ```ignore
//! let enricher = StackTraceEnricher::with_level("warning")?;
//! let record = enricher.process(LogRecord::new("app", Level::Error, "payment failed"));
//! assert!(record.metadata.contains_key("trace"));
//! ```

use crate::config::Settings;
use crate::error::{IntrospectionError, Result};
use crate::level::{Level, SeverityOrdering, StandardSeverity};
use crate::logging::log_error;
use crate::record::LogRecord;
use crate::trace::{BacktraceCapture, CaptureCallStack, StackFrame, render_trace};
use serde_json::Value;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Metadata key the rendered trace is stored under
pub const TRACE_KEY: &str = "trace";

/// Leading frames dropped from every snapshot: the enricher's own
/// `process` and the pipeline call that dispatched to it
pub const SKIPPED_FRAMES: usize = 2;

/// A stage in a log processing pipeline
pub trait Processor: Send + Sync {
    /// Processor name for identification and logging
    fn name(&self) -> &'static str;

    /// Process a record, returning it (possibly modified)
    fn process(&self, record: LogRecord) -> LogRecord;
}

/// Attaches the caller's stack trace to records at or above a threshold
///
/// Records below the threshold pass through untouched. For the rest, the
/// trace is stored as a string under [`TRACE_KEY`] in the record metadata,
/// one `#<n> <file>(<line>): <function>` line per frame.
///
/// The trace reflects the stack at the moment `process` runs. Behind a
/// buffering handler that replays records later, every record gets the
/// stack of the replaying call.
///
/// A failed or panicking capture leaves an empty trace and emits a `warn`
/// event through `tracing`. When the host pipeline is itself fed by a
/// `tracing` subscriber, that event enters the pipeline again, so filter
/// the `full_introspection` target out of it.
#[derive(Debug, Clone)]
pub struct StackTraceEnricher<C = BacktraceCapture> {
    level: Level,
    max_depth: Option<usize>,
    capture: C,
}

impl StackTraceEnricher<BacktraceCapture> {
    /// Enricher for every level, using native backtraces
    pub fn new() -> Self {
        Self::with_capture(StandardSeverity.lowest(), BacktraceCapture)
    }

    /// Enricher with a threshold given as a level name or numeric code
    pub fn with_level(level: &str) -> Result<Self> {
        Self::with_ordering(&StandardSeverity, level)
    }

    /// Enricher with a threshold normalized by a host-provided ordering
    pub fn with_ordering(ordering: &dyn SeverityOrdering, level: &str) -> Result<Self> {
        Self::with_ordering_and_capture(ordering, level, BacktraceCapture)
    }

    /// Enricher configured from [`Settings`]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_capture(settings.level, BacktraceCapture).with_max_depth(settings.max_depth)
    }
}

impl Default for StackTraceEnricher<BacktraceCapture> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: CaptureCallStack> StackTraceEnricher<C> {
    /// Enricher with an explicit threshold and capture adapter
    pub fn with_capture(level: Level, capture: C) -> Self {
        tracing::debug!(level = %level, "Stack trace enricher configured");
        Self {
            level,
            max_depth: None,
            capture,
        }
    }

    /// Enricher with a host-provided ordering and capture adapter
    pub fn with_ordering_and_capture(
        ordering: &dyn SeverityOrdering,
        level: &str,
        capture: C,
    ) -> Result<Self> {
        let level = ordering.normalize(level)?;
        Ok(Self::with_capture(level, capture))
    }

    /// Limit the number of rendered frames
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Render a snapshot, minus the infrastructure frames
    fn render_snapshot(&self, frames: Vec<StackFrame>) -> String {
        let depth = self.max_depth.unwrap_or(usize::MAX);
        let frames: Vec<_> = frames.into_iter().skip(SKIPPED_FRAMES).take(depth).collect();
        render_trace(&frames)
    }
}

impl<C: CaptureCallStack> Processor for StackTraceEnricher<C> {
    fn name(&self) -> &'static str {
        "stack_trace"
    }

    #[inline(never)]
    fn process(&self, mut record: LogRecord) -> LogRecord {
        if record.severity < self.level {
            return record;
        }

        // Captured here, not in a helper, so `process` is the first frame
        // past the closure and unwind plumbing
        let captured = panic::catch_unwind(AssertUnwindSafe(|| self.capture.capture(false)));
        let trace = match captured {
            Ok(Ok(frames)) => self.render_snapshot(frames),
            Ok(Err(e)) => {
                log_error("capture_stack", &e);
                String::new()
            }
            Err(payload) => {
                let e = IntrospectionError::Capture(panic_message(payload.as_ref()));
                log_error("capture_stack", &e);
                String::new()
            }
        };
        record
            .metadata
            .insert(TRACE_KEY.to_string(), Value::String(trace));
        record
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("adapter panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("adapter panicked: {}", message)
    } else {
        "adapter panicked".to_string()
    }
}
