//! Call-stack capture

use crate::error::Result;
use crate::trace::frame::{STATIC_CALL, StackFrame};
use regex::Regex;
use std::sync::LazyLock;

// `<Type as Trait>::method`
static TRAIT_METHOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<(?P<class>.+?) as .+>::(?P<function>[^:]+)$").expect("valid trait method regex")
});

/// Source of call-stack snapshots
///
/// Implementations return frames innermost first, where frame 0 is the
/// function that called `capture`. Closures and panic-catching frames
/// wrapped around the call do not count as callers.
///
/// A panicking adapter does not take the host down: the enricher catches
/// the unwind and records an empty trace.
pub trait CaptureCallStack: Send + Sync {
    /// Capture the current call stack
    ///
    /// `include_arguments` asks for argument values where the runtime can
    /// provide them. The enricher always passes `false`.
    fn capture(&self, include_arguments: bool) -> Result<Vec<StackFrame>>;
}

/// Captures the native stack with the `backtrace` crate
///
/// Rust backtraces never carry argument values, so `include_arguments`
/// has no effect.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceCapture;

impl CaptureCallStack for BacktraceCapture {
    #[inline(never)]
    fn capture(&self, _include_arguments: bool) -> Result<Vec<StackFrame>> {
        let backtrace = backtrace::Backtrace::new();

        let mut symbols = Vec::new();
        for frame in backtrace.frames() {
            for symbol in frame.symbols() {
                let Some(name) = symbol.name() else {
                    continue;
                };
                let location = match (symbol.filename(), symbol.lineno()) {
                    (Some(file), Some(line)) => Some((file.display().to_string(), line)),
                    _ => None,
                };
                symbols.push(ResolvedSymbol {
                    name: format!("{:#}", name),
                    location,
                });
            }
        }

        Ok(drop_capture_frames(symbols)
            .into_iter()
            .map(ResolvedSymbol::into_frame)
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ResolvedSymbol {
    name: String,
    location: Option<(String, u32)>,
}

impl ResolvedSymbol {
    fn into_frame(self) -> StackFrame {
        let mut frame = split_symbol(&self.name);
        if let Some((file, line)) = self.location {
            frame = frame.at(file, line);
        }
        frame
    }
}

/// Remove the frames of the capture machinery, then any closure and
/// unwind plumbing around the call, so the caller of `capture` comes first
fn drop_capture_frames(symbols: Vec<ResolvedSymbol>) -> Vec<ResolvedSymbol> {
    let cut = symbols
        .iter()
        .rposition(|s| s.name.contains("BacktraceCapture") && s.name.ends_with("::capture"))
        .or_else(|| {
            symbols
                .iter()
                .rposition(|s| s.name.starts_with("backtrace::"))
        });

    let start = cut.map_or(0, |index| index + 1);
    symbols
        .into_iter()
        .skip(start)
        .skip_while(|s| is_call_plumbing(&s.name))
        .collect()
}

fn is_call_plumbing(name: &str) -> bool {
    let path = name.strip_prefix('<').unwrap_or(name);
    name.ends_with("{{closure}}")
        || name.starts_with("__rust_try")
        || path.starts_with("std::panicking::")
        || path.starts_with("std::panic::")
        || path.starts_with("core::panic::")
        || path.starts_with("core::ops::function::")
}

/// Split a demangled symbol into receiver type and function name
///
/// `<Worker as Job>::run` and `app::Worker::run` both become
/// `Worker`/`app::Worker` + `::` + `run`. Paths whose parent segment is
/// not a type name stay whole as free functions.
fn split_symbol(name: &str) -> StackFrame {
    if let Some(caps) = TRAIT_METHOD_RE.captures(name) {
        return StackFrame::new(&caps["function"]).on(&caps["class"], STATIC_CALL);
    }

    if let Some((parent, function)) = name.rsplit_once("::") {
        // A `::` inside generic arguments is not a path separator
        let balanced = parent.matches('<').count() == parent.matches('>').count();
        let parent_segment = parent.rsplit("::").next().unwrap_or(parent);
        let is_type = parent_segment
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase());
        if balanced && is_type && !function.starts_with('{') {
            return StackFrame::new(function).on(parent, STATIC_CALL);
        }
    }

    StackFrame::new(name)
}
