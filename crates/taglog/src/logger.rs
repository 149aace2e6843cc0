//! The logger: tag chain, option snapshot, counters, and sink dispatch.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use chrono::Local;

use crate::append::{Appender, DiskAppender};
use crate::arg::{self, Arg};
use crate::config::{Config, Options};
use crate::console::{ConsolePort, StdConsole};
use crate::level::{Counters, Level};
use crate::stack::StackInfo;
use crate::template::{Record, Template};

/// File sink templates, parsed once at construction.
struct FileTemplates {
    outpath: Template,
    filename: Template,
}

/// A tagged, leveled logger.
///
/// Each accepted call renders the message template once into a styled and a
/// plain string and dispatches them to the configured sinks: console, file,
/// and custom hooks. State is immutable after construction apart from the
/// atomic per-level counters, so a logger can be shared across threads
/// behind an [`Arc`].
///
/// Branching is done with [`Logger::derive`], which extends the tag chain,
/// snapshots the options, and starts fresh counters.
///
/// ```rust
/// use taglog::{Config, Logger, SinkSetting, args};
///
/// let log = Logger::with_tag_and_config(
///     "app",
///     Config {
///         file: Some(SinkSetting::Switch(false)),
///         ..Config::default()
///     },
/// );
/// log.info(&args!["service starting"]);
/// assert_eq!(log.count(taglog::Level::Info), 1);
/// ```
pub struct Logger {
    tags: Vec<String>,
    display_tag: String,
    options: Options,
    template: Template,
    file_templates: Option<FileTemplates>,
    counters: Counters,
    console: Arc<dyn ConsolePort>,
    appender: Arc<dyn Appender>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("tags", &self.tags)
            .field("options", &self.options)
            .field("counters", &self.counters)
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Root logger with an empty tag chain and full defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::build(Vec::new(), Options::default())
    }

    /// Root logger with one initial tag and full defaults.
    #[must_use]
    pub fn with_tag(tag: impl Into<String>) -> Self {
        Self::build(vec![tag.into()], Options::default())
    }

    /// Root logger with an empty tag chain and the given configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self::build(Vec::new(), Options::from(config))
    }

    /// Root logger with one initial tag and the given configuration.
    #[must_use]
    pub fn with_tag_and_config(tag: impl Into<String>, config: Config) -> Self {
        Self::build(vec![tag.into()], Options::from(config))
    }

    fn build(tags: Vec<String>, options: Options) -> Self {
        let template = Template::parse(&options.print_format);
        let file_templates = options.file.as_ref().map(|file| FileTemplates {
            outpath: Template::parse(&file.outpath),
            filename: Template::parse(&file.filename),
        });
        Self {
            display_tag: tags.join(" "),
            tags,
            options,
            template,
            file_templates,
            counters: Counters::new(),
            console: Arc::new(StdConsole),
            appender: Arc::new(DiskAppender::new()),
        }
    }

    /// Replace the console port. Derived loggers share the replacement.
    #[must_use]
    pub fn console_port(mut self, port: Arc<dyn ConsolePort>) -> Self {
        self.console = port;
        self
    }

    /// Replace the file appender. Derived loggers share the replacement.
    #[must_use]
    pub fn appender(mut self, appender: Arc<dyn Appender>) -> Self {
        self.appender = appender;
        self
    }

    /// Log at error level.
    pub fn error(&self, args: &[Arg]) {
        self.log(Level::Error, args);
    }

    /// Log at warn level.
    pub fn warn(&self, args: &[Arg]) {
        self.log(Level::Warn, args);
    }

    /// Log at info level.
    pub fn info(&self, args: &[Arg]) {
        self.log(Level::Info, args);
    }

    /// Log at debug level.
    pub fn debug(&self, args: &[Arg]) {
        self.log(Level::Debug, args);
    }

    /// Log `args` at `level`.
    ///
    /// A disabled level returns immediately; nothing else observable
    /// happens. An accepted call increments the level's counter, captures
    /// the call site, renders the template once, and dispatches to the
    /// console, file, and custom sinks in that order. Sink failures never
    /// reach the caller; hook panics do, since hooks are caller-owned code.
    pub fn log(&self, level: Level, args: &[Arg]) {
        if !self.options.levels.enabled(level) {
            return;
        }
        self.counters.bump(level);

        let content = arg::join(args);
        let stack = StackInfo::capture(0);
        let record = Record {
            timestamp: Local::now().naive_local(),
            level,
            tag: &self.display_tag,
            content: &content,
            stack: &stack,
        };

        let call_detail = self.options.console.is_some_and(|c| c.call_detail);
        let rendering = self.template.render(&record, call_detail);

        if let Some(console) = &self.options.console {
            let line = if console.color {
                &rendering.styled
            } else {
                &rendering.plain
            };
            self.console.write(level, line);
        }

        if let Some(templates) = &self.file_templates {
            let dir = templates.outpath.render_path(&record);
            let filename = templates.filename.render_path(&record);
            let text = format!("{}\n", rendering.plain);
            self.appender.append(Path::new(&dir), &filename, &text);
        }

        if let Some(hook) = &self.options.custom.on_print {
            hook(level, &rendering.plain, &stack);
        }
        if let Some(hook) = self.options.custom.level_hook(level) {
            hook(&rendering.plain, &stack);
        }
    }

    /// Child logger: the tag chain grows by `child_tag`, the options are
    /// value-copied, the counters start at zero, and the console port and
    /// appender are shared with the parent.
    #[must_use]
    pub fn derive(&self, child_tag: impl Into<String>) -> Self {
        let mut tags = self.tags.clone();
        tags.push(child_tag.into());
        let mut child = Self::build(tags, self.options.clone());
        child.console = Arc::clone(&self.console);
        child.appender = Arc::clone(&self.appender);
        child
    }

    /// The space-joined tag chain.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.display_tag
    }

    /// Number of accepted calls at `level` since this logger was created.
    #[must_use]
    pub fn count(&self, level: Level) -> u64 {
        self.counters.get(level)
    }

    /// The resolved option snapshot.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SinkSetting;
    use crate::console::NullConsole;

    fn quiet_config() -> Config {
        Config {
            console: Some(SinkSetting::Switch(false)),
            file: Some(SinkSetting::Switch(false)),
            ..Config::default()
        }
    }

    #[test]
    fn derive_extends_tag_chain() {
        let base = Logger::with_tag_and_config("a", quiet_config());
        let child = base.derive("b");
        assert_eq!(base.tag(), "a");
        assert_eq!(child.tag(), "a b");
        assert_eq!(child.derive("c").tag(), "a b c");
    }

    #[test]
    fn derive_starts_fresh_counters() {
        let base = Logger::with_config(quiet_config());
        base.info(&[Arg::from("x")]);
        base.info(&[Arg::from("y")]);
        let child = base.derive("child");
        assert_eq!(base.count(Level::Info), 2);
        assert_eq!(child.count(Level::Info), 0);
    }

    #[test]
    fn disabled_level_skips_counter() {
        let config = Config {
            levels: Some(crate::config::LevelsConfig {
                debug: Some(false),
                ..Default::default()
            }),
            ..quiet_config()
        };
        let log = Logger::with_config(config);
        log.debug(&[Arg::from("dropped")]);
        assert_eq!(log.count(Level::Debug), 0);
    }

    #[test]
    fn logger_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Logger>();

        let log = Arc::new(
            Logger::with_config(quiet_config()).console_port(Arc::new(NullConsole)),
        );
        let mut handles = Vec::new();
        for _ in 0..4 {
            let log = Arc::clone(&log);
            handles.push(std::thread::spawn(move || {
                for _ in 0..25 {
                    log.info(&[Arg::from("tick")]);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(log.count(Level::Info), 100);
    }
}
