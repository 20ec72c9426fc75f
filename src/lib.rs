//! Log processing stage that attaches the full call stack to records
//!
//! [`StackTraceEnricher`] is a [`Processor`]: give it a record at or above
//! its threshold and it stores the rendered stack under `trace` in the
//! record's metadata.

pub mod config;
pub mod error;
pub mod level;
pub mod logging;
pub mod processor;
pub mod record;
pub mod trace;

pub use error::{IntrospectionError, Result};
pub use level::{Level, SeverityOrdering, StandardSeverity};
pub use processor::{Processor, StackTraceEnricher, TRACE_KEY};
pub use record::LogRecord;
pub use trace::{BacktraceCapture, CaptureCallStack, StackFrame};
