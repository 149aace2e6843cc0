//! Console output port.
//!
//! The console sink writes through a trait with one method per level, so
//! hosts can redirect or silence console output without touching the rest
//! of the pipeline.

use std::io::Write;

use crate::level::Level;

/// Destination for console lines.
///
/// Implementations must be `Send + Sync`; a logger and its derived loggers
/// share one port.
pub trait ConsolePort: Send + Sync {
    /// Write an error-level line.
    fn error(&self, line: &str);
    /// Write a warn-level line.
    fn warn(&self, line: &str);
    /// Write an info-level line.
    fn info(&self, line: &str);
    /// Write a debug-level line.
    fn debug(&self, line: &str);

    /// Dispatch `line` to the method for `level`.
    fn write(&self, level: Level, line: &str) {
        match level {
            Level::Error => self.error(line),
            Level::Warn => self.warn(line),
            Level::Info => self.info(line),
            Level::Debug => self.debug(line),
        }
    }
}

/// The process's standard streams: error and warn lines go to stderr, info
/// and debug lines to stdout. Write failures are ignored; logging never
/// fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdConsole;

impl StdConsole {
    fn to_stderr(line: &str) {
        let mut out = std::io::stderr().lock();
        let _ = writeln!(out, "{line}");
    }

    fn to_stdout(line: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{line}");
    }
}

impl ConsolePort for StdConsole {
    fn error(&self, line: &str) {
        Self::to_stderr(line);
    }

    fn warn(&self, line: &str) {
        Self::to_stderr(line);
    }

    fn info(&self, line: &str) {
        Self::to_stdout(line);
    }

    fn debug(&self, line: &str) {
        Self::to_stdout(line);
    }
}

/// Discards every line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullConsole;

impl ConsolePort for NullConsole {
    fn error(&self, _line: &str) {}
    fn warn(&self, _line: &str) {}
    fn info(&self, _line: &str) {}
    fn debug(&self, _line: &str) {}
}
