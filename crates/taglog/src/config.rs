//! Logger configuration.
//!
//! [`Config`] is the user-facing surface: every field is optional, and the
//! console/file sinks accept either a bare boolean or a partial table.
//! Construction resolves a `Config` into an immutable [`Options`] snapshot;
//! the snapshot is value-copied when a logger is derived, so loggers never
//! share mutable configuration.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::level::{Level, Levels};
use crate::stack::StackInfo;

/// Default message template.
pub const DEFAULT_PRINT_FORMAT: &str =
    "{date(yyyy-mm-dd hh:min:ss.ms)} [{level}] [{tag}] {content} {stack(addr:row:col)}";

/// Default log-file directory.
pub const DEFAULT_OUTPATH: &str = ".";

/// Default log-file name template.
pub const DEFAULT_FILENAME: &str = "{date(yyyy-mm-dd)}.{tag}.{level}.log";

/// Resolved console sink settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleOptions {
    /// Write the styled rendering instead of the plain one.
    pub color: bool,
    /// Resolve and render the `{stack(...)}` placeholder.
    pub call_detail: bool,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self {
            color: true,
            call_detail: true,
        }
    }
}

/// Resolved file sink settings. Both fields are templates; see
/// [`Template::render_path`](crate::template::Template::render_path) for the
/// path field semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOptions {
    pub outpath: String,
    pub filename: String,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            outpath: DEFAULT_OUTPATH.to_string(),
            filename: DEFAULT_FILENAME.to_string(),
        }
    }
}

/// Hook invoked for every accepted call: `(level, plain line, call site)`.
pub type PrintHook = Arc<dyn Fn(Level, &str, &StackInfo) + Send + Sync>;

/// Hook invoked for accepted calls of one level: `(plain line, call site)`.
pub type LevelHook = Arc<dyn Fn(&str, &StackInfo) + Send + Sync>;

/// Custom sink callbacks.
///
/// The generic hook fires for every accepted call; a per-level hook fires
/// only for its level, after the generic one. Hooks run synchronously on the
/// logging thread and receive the plain rendering.
#[derive(Clone, Default)]
pub struct CustomHooks {
    pub on_print: Option<PrintHook>,
    pub on_print_error: Option<LevelHook>,
    pub on_print_warn: Option<LevelHook>,
    pub on_print_info: Option<LevelHook>,
    pub on_print_debug: Option<LevelHook>,
}

impl CustomHooks {
    /// Whether no hook is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.on_print.is_none()
            && self.on_print_error.is_none()
            && self.on_print_warn.is_none()
            && self.on_print_info.is_none()
            && self.on_print_debug.is_none()
    }

    pub(crate) fn level_hook(&self, level: Level) -> Option<&LevelHook> {
        match level {
            Level::Error => self.on_print_error.as_ref(),
            Level::Warn => self.on_print_warn.as_ref(),
            Level::Info => self.on_print_info.as_ref(),
            Level::Debug => self.on_print_debug.as_ref(),
        }
    }
}

impl fmt::Debug for CustomHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomHooks")
            .field("on_print", &self.on_print.is_some())
            .field("on_print_error", &self.on_print_error.is_some())
            .field("on_print_warn", &self.on_print_warn.is_some())
            .field("on_print_info", &self.on_print_info.is_some())
            .field("on_print_debug", &self.on_print_debug.is_some())
            .finish()
    }
}

/// The complete, resolved configuration snapshot held by a logger.
///
/// Immutable after construction. `None` for a sink means that sink is
/// disabled. Console and file are both enabled by default.
#[derive(Debug, Clone)]
pub struct Options {
    pub console: Option<ConsoleOptions>,
    pub file: Option<FileOptions>,
    pub custom: CustomHooks,
    pub levels: Levels,
    pub print_format: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            console: Some(ConsoleOptions::default()),
            file: Some(FileOptions::default()),
            custom: CustomHooks::default(),
            levels: Levels::default(),
            print_format: DEFAULT_PRINT_FORMAT.to_string(),
        }
    }
}

/// A sink setting that is either a bare switch or a partial table.
///
/// `false` fully disables the sink; `true` selects the full defaults; a
/// table overlays the defaults field-by-field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SinkSetting<T> {
    Switch(bool),
    Table(T),
}

/// Partial console settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
    #[serde(alias = "callDetail", skip_serializing_if = "Option::is_none")]
    pub call_detail: Option<bool>,
}

/// Partial file settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outpath: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// Partial per-level enablement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warn: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
}

/// User-facing logger configuration. Every field is optional; unspecified
/// fields keep their defaults.
///
/// ```rust
/// use taglog::{Config, LevelsConfig, SinkSetting};
///
/// let config = Config {
///     file: Some(SinkSetting::Switch(false)),
///     levels: Some(LevelsConfig {
///         debug: Some(false),
///         ..LevelsConfig::default()
///     }),
///     ..Config::default()
/// };
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console: Option<SinkSetting<ConsoleConfig>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<SinkSetting<FileConfig>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levels: Option<LevelsConfig>,
    #[serde(alias = "printFormat", skip_serializing_if = "Option::is_none")]
    pub print_format: Option<String>,
    /// Custom sink callbacks; set programmatically only.
    #[serde(skip)]
    pub custom: CustomHooks,
}

impl Config {
    /// An empty configuration (full defaults).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the generic custom hook.
    #[must_use]
    pub fn on_print<F>(mut self, hook: F) -> Self
    where
        F: Fn(Level, &str, &StackInfo) + Send + Sync + 'static,
    {
        self.custom.on_print = Some(Arc::new(hook));
        self
    }

    /// Attach the error-level custom hook.
    #[must_use]
    pub fn on_print_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, &StackInfo) + Send + Sync + 'static,
    {
        self.custom.on_print_error = Some(Arc::new(hook));
        self
    }

    /// Attach the warn-level custom hook.
    #[must_use]
    pub fn on_print_warn<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, &StackInfo) + Send + Sync + 'static,
    {
        self.custom.on_print_warn = Some(Arc::new(hook));
        self
    }

    /// Attach the info-level custom hook.
    #[must_use]
    pub fn on_print_info<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, &StackInfo) + Send + Sync + 'static,
    {
        self.custom.on_print_info = Some(Arc::new(hook));
        self
    }

    /// Attach the debug-level custom hook.
    #[must_use]
    pub fn on_print_debug<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, &StackInfo) + Send + Sync + 'static,
    {
        self.custom.on_print_debug = Some(Arc::new(hook));
        self
    }
}

impl From<Config> for Options {
    fn from(config: Config) -> Self {
        let console = match config.console {
            None | Some(SinkSetting::Switch(true)) => Some(ConsoleOptions::default()),
            Some(SinkSetting::Switch(false)) => None,
            Some(SinkSetting::Table(partial)) => {
                let defaults = ConsoleOptions::default();
                Some(ConsoleOptions {
                    color: partial.color.unwrap_or(defaults.color),
                    call_detail: partial.call_detail.unwrap_or(defaults.call_detail),
                })
            }
        };

        let file = match config.file {
            None | Some(SinkSetting::Switch(true)) => Some(FileOptions::default()),
            Some(SinkSetting::Switch(false)) => None,
            Some(SinkSetting::Table(partial)) => {
                let defaults = FileOptions::default();
                Some(FileOptions {
                    outpath: partial.outpath.unwrap_or(defaults.outpath),
                    filename: partial.filename.unwrap_or(defaults.filename),
                })
            }
        };

        let levels = config.levels.map_or_else(Levels::default, |partial| {
            let defaults = Levels::default();
            Levels {
                error: partial.error.unwrap_or(defaults.error),
                warn: partial.warn.unwrap_or(defaults.warn),
                info: partial.info.unwrap_or(defaults.info),
                debug: partial.debug.unwrap_or(defaults.debug),
            }
        });

        Self {
            console,
            file,
            custom: config.custom,
            levels,
            print_format: config
                .print_format
                .unwrap_or_else(|| DEFAULT_PRINT_FORMAT.to_string()),
        }
    }
}

/// Errors loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Errors serializing a configuration.
#[derive(Debug, Error)]
pub enum ConfigSaveError {
    #[error("failed to serialize JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to serialize TOML config: {0}")]
    Toml(#[from] toml::ser::Error),
}

impl Config {
    /// Load a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load a configuration from a file, dispatching on its extension
    /// (`.json` or `.toml`).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            Some("toml") => Self::from_toml(&content),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigSaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigSaveError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
