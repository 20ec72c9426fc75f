//! Rendering of captured frames into a trace string
//!
//! Each frame becomes one line:
//!
//! ```text
//! #0 src/worker.rs(42): Worker::run
//! #1 [internal function]: start_thread
//! ```

use crate::trace::frame::StackFrame;
use std::fmt::Write;

/// Render frames into one string, numbering from `#0`
///
/// An empty slice renders as the empty string.
pub fn render_trace(frames: &[StackFrame]) -> String {
    let mut out = String::new();
    for (position, frame) in frames.iter().enumerate() {
        write_frame(&mut out, position, frame);
    }
    out
}

/// Render a single frame at `position`, including the trailing newline
pub fn render_frame(position: usize, frame: &StackFrame) -> String {
    let mut out = String::new();
    write_frame(&mut out, position, frame);
    out
}

fn write_frame(out: &mut String, position: usize, frame: &StackFrame) {
    // Writing into a String cannot fail
    let _ = write!(out, "#{} ", position);

    match &frame.location {
        Some(location) => {
            let _ = write!(out, "{}({}): ", location.file, location.line);
        }
        None => out.push_str("[internal function]: "),
    }

    if let Some(receiver) = &frame.receiver {
        out.push_str(&receiver.class);
        out.push_str(&receiver.call_type);
    }

    out.push_str(&frame.function);
    out.push('\n');
}
