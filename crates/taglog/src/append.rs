//! Durable file appends.
//!
//! The file sink hands each rendered line to an [`Appender`]. Appenders own
//! durability and ordering; no appender error ever surfaces through the
//! logging call.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

/// Destination for log-file lines.
///
/// `append` must not propagate errors; appends to the same target file must
/// land in call order.
pub trait Appender: Send + Sync {
    /// Append `text` to `filename` inside `dir`.
    fn append(&self, dir: &Path, filename: &str, text: &str);
}

/// Handler for I/O failures during appends.
pub type ErrorHandler = Arc<dyn Fn(io::Error) + Send + Sync>;

/// Synchronous filesystem appender.
///
/// Appends with create-on-open; when the open fails because the directory
/// does not exist yet, the directory chain is created and the append retried
/// exactly once. The first failure and any directory-creation failure are
/// reported through the error handler (stderr by default); a retry failure
/// is swallowed. An internal mutex serializes appends so per-file write
/// order matches call order.
pub struct DiskAppender {
    lock: Mutex<()>,
    error_handler: Option<ErrorHandler>,
}

impl DiskAppender {
    #[must_use]
    pub fn new() -> Self {
        Self {
            lock: Mutex::new(()),
            error_handler: None,
        }
    }

    /// Replace the default stderr failure reporting.
    #[must_use]
    pub fn with_error_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(io::Error) + Send + Sync + 'static,
    {
        self.error_handler = Some(Arc::new(handler));
        self
    }

    fn report(&self, err: io::Error) {
        match &self.error_handler {
            Some(handler) => handler(err),
            None => {
                let mut out = io::stderr().lock();
                let _ = writeln!(out, "log append failed: {err}");
            }
        }
    }

    fn try_append(path: &Path, text: &str) -> io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(text.as_bytes())
    }
}

impl Default for DiskAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for DiskAppender {
    fn append(&self, dir: &Path, filename: &str, text: &str) {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        let path = dir.join(filename);
        if let Err(err) = Self::try_append(&path, text) {
            let missing_dir = err.kind() == io::ErrorKind::NotFound;
            self.report(err);
            if missing_dir {
                if let Err(err) = fs::create_dir_all(dir) {
                    self.report(err);
                    return;
                }
                let _ = Self::try_append(&path, text);
            }
        }
    }
}

struct Job {
    dir: PathBuf,
    filename: String,
    text: String,
}

/// Queued appender: jobs go onto an unbounded channel and a worker thread
/// applies them FIFO through the wrapped appender, so the logging call
/// returns without touching the filesystem while per-file order is
/// preserved. Dropping the appender drains the queue and joins the worker.
pub struct SpoolAppender {
    sender: Option<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
}

impl SpoolAppender {
    #[must_use]
    pub fn new(inner: Arc<dyn Appender>) -> Self {
        let (sender, receiver) = mpsc::channel::<Job>();
        let worker = thread::spawn(move || {
            while let Ok(job) = receiver.recv() {
                inner.append(&job.dir, &job.filename, &job.text);
            }
        });
        Self {
            sender: Some(sender),
            worker: Some(worker),
        }
    }
}

impl Appender for SpoolAppender {
    fn append(&self, dir: &Path, filename: &str, text: &str) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(Job {
                dir: dir.to_path_buf(),
                filename: filename.to_string(),
                text: text.to_string(),
            });
        }
    }
}

impl Drop for SpoolAppender {
    fn drop(&mut self) {
        drop(self.sender.take());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
