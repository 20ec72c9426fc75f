//! Call-stack frame types

use serde::{Deserialize, Serialize};

/// Connector rendered between receiver and function for instance calls
pub const INSTANCE_CALL: &str = "->";

/// Connector rendered between receiver and function for static calls
pub const STATIC_CALL: &str = "::";

/// Where a frame's code lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
}

/// The type a frame's function was called on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receiver {
    /// Type name (e.g., "Worker")
    pub class: String,

    /// Literal connector string, usually [`INSTANCE_CALL`] or [`STATIC_CALL`]
    pub call_type: String,
}

/// One entry of a captured call stack
///
/// Frames without a location are calls into code with no source
/// information, rendered as `[internal function]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackFrame {
    pub location: Option<SourceLocation>,
    pub receiver: Option<Receiver>,
    pub function: String,
}

impl StackFrame {
    /// A free function frame with no source location
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            location: None,
            receiver: None,
            function: function.into(),
        }
    }

    /// Attach a source location
    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.location = Some(SourceLocation {
            file: file.into(),
            line,
        });
        self
    }

    /// Attach a receiver type and the connector used to call it
    pub fn on(mut self, class: impl Into<String>, call_type: impl Into<String>) -> Self {
        self.receiver = Some(Receiver {
            class: class.into(),
            call_type: call_type.into(),
        });
        self
    }

    pub fn file(&self) -> Option<&str> {
        self.location.as_ref().map(|l| l.file.as_str())
    }

    pub fn line(&self) -> Option<u32> {
        self.location.as_ref().map(|l| l.line)
    }

    pub fn class(&self) -> Option<&str> {
        self.receiver.as_ref().map(|r| r.class.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_paired_fields() {
        let frame = StackFrame::new("create").at("f.go", 7).on("Factory", STATIC_CALL);

        assert_eq!(frame.file(), Some("f.go"));
        assert_eq!(frame.line(), Some(7));
        assert_eq!(frame.class(), Some("Factory"));
        assert_eq!(frame.function, "create");
    }

    #[test]
    fn test_bare_frame_has_no_location() {
        let frame = StackFrame::new("main");

        assert_eq!(frame.file(), None);
        assert_eq!(frame.line(), None);
        assert_eq!(frame.class(), None);
    }
}
