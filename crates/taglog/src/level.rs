//! Log levels, per-level enablement, and per-level call counters.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use bashstyle::Color;
use thiserror::Error;

/// Log severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
}

impl Level {
    /// All levels, most to least severe.
    pub const ALL: [Self; 4] = [Self::Error, Self::Warn, Self::Info, Self::Debug];

    /// Lowercase level name, as used in file paths and parsing.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    /// Uppercase level name, as rendered by the `{level}` placeholder.
    #[must_use]
    pub fn upper(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }

    /// The display color for this level.
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Self::Error => Color::Red,
            Self::Warn => Color::Yellow,
            Self::Info => Color::Primary,
            Self::Debug => Color::Magenta,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an invalid level string.
#[derive(Debug, Clone, Error)]
#[error("invalid level: {0}")]
pub struct ParseLevelError(pub String);

/// Result type for level parsing.
pub type ParseResult<T> = Result<T, ParseLevelError>;

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// Per-level enablement flags. All levels are enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Levels {
    pub error: bool,
    pub warn: bool,
    pub info: bool,
    pub debug: bool,
}

impl Default for Levels {
    fn default() -> Self {
        Self::all(true)
    }
}

impl Levels {
    /// Every level set to `value`.
    #[must_use]
    pub fn all(value: bool) -> Self {
        Self {
            error: value,
            warn: value,
            info: value,
            debug: value,
        }
    }

    /// Whether `level` is enabled.
    #[must_use]
    pub fn enabled(self, level: Level) -> bool {
        match level {
            Level::Error => self.error,
            Level::Warn => self.warn,
            Level::Info => self.info,
            Level::Debug => self.debug,
        }
    }
}

/// Monotonic per-level call counters.
///
/// Incremented once per accepted logging call. Counters never reset; a
/// derived logger starts from a fresh set of zeros.
#[derive(Debug, Default)]
pub struct Counters {
    error: AtomicU64,
    warn: AtomicU64,
    info: AtomicU64,
    debug: AtomicU64,
}

impl Counters {
    /// A fresh set of zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, level: Level) -> &AtomicU64 {
        match level {
            Level::Error => &self.error,
            Level::Warn => &self.warn,
            Level::Info => &self.info,
            Level::Debug => &self.debug,
        }
    }

    /// Record one accepted call at `level`.
    pub(crate) fn bump(&self, level: Level) {
        self.slot(level).fetch_add(1, Ordering::Relaxed);
    }

    /// Current count for `level`.
    #[must_use]
    pub fn get(&self, level: Level) -> u64 {
        self.slot(level).load(Ordering::Relaxed)
    }
}
