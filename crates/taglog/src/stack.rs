//! Call-site resolution.
//!
//! Every accepted logging call captures the location that issued it. The
//! resolved fields feed the `{stack(...)}` template placeholder and are
//! handed to custom sinks.

use backtrace::Backtrace;

/// The resolved call site of a logging call.
///
/// Every field degrades independently to its sentinel (empty string or zero)
/// when the backtrace cannot supply it; resolution itself never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackInfo {
    /// Source-file path of the frame.
    pub addr: String,
    /// 1-based line, or 0 when unavailable.
    pub row: u32,
    /// 1-based column, or 0 when unavailable.
    pub col: u32,
    /// Name of the enclosing function, or empty when unavailable.
    pub trigger: String,
}

impl StackInfo {
    /// The all-sentinel value returned when no usable frame exists.
    #[must_use]
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Capture the call site `skip` frames above the caller.
    ///
    /// Walks the current backtrace, skipping the capture machinery and every
    /// frame that belongs to this crate, and returns the first remaining
    /// frame. Falls back to [`StackInfo::unknown`] when the stack is
    /// shallower than requested or symbols cannot be resolved.
    ///
    /// Resolving a backtrace is expensive relative to the rest of a logging
    /// call; it runs once per accepted call.
    #[must_use]
    pub fn capture(skip: usize) -> Self {
        Self::try_capture(skip).unwrap_or_else(Self::unknown)
    }

    fn try_capture(skip: usize) -> Option<Self> {
        let bt = Backtrace::new();

        // Skip frames from the backtrace crate + our own logging machinery
        // Typical stack: backtrace::capture -> StackInfo::capture -> log -> info/warn/etc -> user code
        let skip_total = skip + 4;

        for frame in bt.frames().iter().skip(skip_total) {
            for symbol in frame.symbols() {
                let fn_name = symbol
                    .name()
                    .map(|n| n.to_string())
                    .unwrap_or_default();

                // Skip frames from the logging crate itself
                if fn_name.contains("taglog::") || fn_name.contains("backtrace::") {
                    continue;
                }

                let addr = symbol
                    .filename()
                    .and_then(|p| p.to_str())
                    .unwrap_or_default()
                    .to_string();

                return Some(Self {
                    addr,
                    row: symbol.lineno().unwrap_or(0),
                    col: symbol.colno().unwrap_or(0),
                    trigger: fn_name,
                });
            }
        }

        None
    }
}
