#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Taglog
//!
//! A tagged, leveled logger built around a user-visible message template.
//!
//! Every accepted call renders the template once into two synchronized
//! strings: a styled one for interactive consoles and a plain one for
//! everything else. Stripping the escape sequences from the styled string
//! always yields the plain string. The pair is dispatched to up to three
//! sinks:
//!
//! - **Console**: per-level channels (error/warn to stderr, info/debug to
//!   stdout), styled or plain depending on the color option
//! - **File**: append-only, with the directory and filename themselves
//!   rendered from templates
//! - **Custom**: caller-supplied hooks receiving the plain line and the
//!   resolved call site
//!
//! Loggers carry a tag chain and per-level counters; [`Logger::derive`]
//! branches a child logger with an extended chain, a snapshot of the
//! parent's options, and fresh counters.
//!
//! ## Template placeholders
//!
//! - `{date(<pattern>)}` — call timestamp; pattern tokens `yyyy`, `mm`,
//!   `dd`, `hh`, `min`, `ss`, `ms`
//! - `{stack(<subtemplate>)}` — call site; tokens `addr`, `row`, `col`,
//!   `trigger`
//! - `{level}`, `{tag}`, `{content}` — level name, tag chain, arguments
//!
//! The default template is
//! `{date(yyyy-mm-dd hh:min:ss.ms)} [{level}] [{tag}] {content} {stack(addr:row:col)}`.
//!
//! ## Example
//!
//! ```rust
//! use taglog::{Config, Logger, SinkSetting, args};
//!
//! let log = Logger::with_tag_and_config(
//!     "app",
//!     Config {
//!         file: Some(SinkSetting::Switch(false)),
//!         ..Config::default()
//!     },
//! );
//! log.info(&args!["service starting"]);
//!
//! let db = log.derive("db");
//! db.warn(&args!["pool nearly exhausted"]);
//! assert_eq!(db.tag(), "app db");
//! ```

pub mod append;
pub mod arg;
pub mod config;
pub mod console;
pub mod datefmt;
pub mod level;
pub mod logger;
pub mod stack;
pub mod template;

pub use append::{Appender, DiskAppender, ErrorHandler, SpoolAppender};
pub use arg::Arg;
pub use config::{
    Config, ConfigError, ConfigSaveError, ConsoleConfig, ConsoleOptions, CustomHooks,
    DEFAULT_FILENAME, DEFAULT_OUTPATH, DEFAULT_PRINT_FORMAT, FileConfig, FileOptions, LevelHook,
    LevelsConfig, Options, PrintHook, SinkSetting,
};
pub use console::{ConsolePort, NullConsole, StdConsole};
pub use level::{Counters, Level, Levels, ParseLevelError, ParseResult};
pub use logger::Logger;
pub use stack::StackInfo;
pub use template::{Record, Rendering, Template};

/// Commonly used types and functions.
pub mod prelude {
    pub use crate::{Arg, Config, Level, Logger, SinkSetting, StackInfo, args};
}
