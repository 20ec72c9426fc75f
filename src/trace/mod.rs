//! Call-stack capture and rendering
//!
//! Capture is behind the [`CaptureCallStack`] trait so hosts can plug in
//! their own runtime adapter; rendering is pure and shared by all of them.

mod capture;
mod frame;
mod render;

pub use capture::{BacktraceCapture, CaptureCallStack};
pub use frame::{INSTANCE_CALL, Receiver, STATIC_CALL, SourceLocation, StackFrame};
pub use render::{render_frame, render_trace};
