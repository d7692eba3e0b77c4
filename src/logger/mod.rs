//! Append Logger Module
//!
//! A line logger that many threads and processes can point at the same file.
//!
//! ## Responsibilities
//! - Own exactly one read/write handle to the log file
//! - Serialize in-process writers with a mutex
//! - Serialize cross-process writers with an advisory whole-file lock
//! - Append each line at end-of-file, flushed to storage
//!
//! ## File Format
//! ```text
//! ┌───────────────────────────┐
//! │ line 1 (UTF-8) │ \r │ \n │
//! ├───────────────────────────┤
//! │ line 2 (UTF-8) │ \r │ \n │
//! └───────────────────────────┘
//! ```
//!
//! ## Lock Ordering
//! `file` mutex → advisory file lock. The mutex is held for the whole retry
//! window so two local threads never race for the file lock.

mod lock;
mod template;

use std::fmt::{self, Display, Write as _};
use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::config::LoggerConfig;
use crate::error::{LoggerError, Result};

/// Line terminator appended to every record
pub const LINE_TERMINATOR: &str = "\r\n";

/// Cross-process-safe append-only line logger
///
/// ## Concurrency:
/// - `file`: Mutex serializes every thread sharing this instance. `None`
///   once the logger is closed.
/// - Other instances and processes are kept out by the advisory lock taken
///   inside the mutex for each write.
/// - All methods use `&self`; share across threads with `Arc`.
pub struct AppendLogger {
    /// Path the logger was opened with
    path: PathBuf,

    /// The one open handle, guarded by the in-process lock
    file: Mutex<Option<File>>,

    /// Lock retry policy
    config: LoggerConfig,
}

impl AppendLogger {
    /// Open or create the log file with the default retry policy
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, LoggerConfig::default())
    }

    /// Open or create the log file with a custom retry policy
    ///
    /// Existing content is never truncated. The handle does not request
    /// exclusive access, so other processes may open the same path.
    pub fn open_with_config(path: impl AsRef<Path>, config: LoggerConfig) -> Result<Self> {
        config.validate()?;

        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;

        tracing::debug!(path = %path.display(), "Opened append log");

        Ok(Self {
            path,
            file: Mutex::new(Some(file)),
            config,
        })
    }

    /// Append `text` followed by CRLF
    ///
    /// Returns `false` on any failure: lock contention past the retry budget,
    /// I/O errors, or a closed logger. Never panics.
    pub fn try_write_line(&self, text: &str) -> bool {
        let data = encode_line(text);
        self.report(self.append(data.as_bytes()))
    }

    /// Append a line built from compile-time format arguments
    ///
    /// ```no_run
    /// # let logger = sharedlog::AppendLogger::open("app.log").unwrap();
    /// logger.try_write_fmt(format_args!("{}-{}", "job", 7));
    /// ```
    pub fn try_write_fmt(&self, args: fmt::Arguments<'_>) -> bool {
        let mut text = String::new();
        if let Err(e) = text.write_fmt(args) {
            return self.report(Err(e.into()));
        }
        self.try_write_line(&text)
    }

    /// Append a line built from a runtime template with `{N}` placeholders
    ///
    /// Supports `{N}`, `{N,W}` (right-aligned to width `W`, left-aligned when
    /// `W` is negative) and the `{{` / `}}` escapes. Format strings such as
    /// `{0:x}` are not supported. A missing argument or malformed template
    /// returns `false` and leaves the file untouched.
    pub fn try_write_template(&self, template: &str, args: &[&dyn Display]) -> bool {
        match template::render(template, args) {
            Ok(text) => self.try_write_line(&text),
            Err(e) => self.report(Err(e)),
        }
    }

    /// Release the file handle
    ///
    /// Safe to call more than once; only the first call has effect. Waits for
    /// an in-flight write on another thread to finish.
    pub fn close(&self) {
        let mut handle = self.file.lock();
        if handle.take().is_some() {
            tracing::debug!(path = %self.path.display(), "Closed append log");
        }
    }

    /// Whether `close` has been called
    pub fn is_closed(&self) -> bool {
        self.file.lock().is_none()
    }

    /// The path this logger writes to
    pub fn path(&self) -> &Path {
        &self.path
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// The critical section: mutex, advisory lock, seek/write/flush
    fn append(&self, data: &[u8]) -> Result<()> {
        let handle = self.file.lock();
        let file = handle.as_ref().ok_or(LoggerError::Closed)?;

        let _guard = lock::acquire(file, &self.config)?;

        let mut out: &File = file;
        out.seek(SeekFrom::End(0))?;
        out.write_all(data)?;
        out.flush()?;
        out.sync_data()?;

        Ok(())
    }

    /// Flatten a write result to a bool, logging the reason for a failure
    fn report(&self, result: Result<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(LoggerError::Closed) => {
                tracing::debug!(path = %self.path.display(), "Write to closed append log");
                false
            }
            Err(e @ LoggerError::Format(_)) => {
                tracing::debug!(path = %self.path.display(), "Dropped log line: {}", e);
                false
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Dropped log line: {}", e);
                false
            }
        }
    }
}

impl Drop for AppendLogger {
    fn drop(&mut self) {
        self.close();
    }
}

/// Line content plus terminator, built before any lock is taken
fn encode_line(text: &str) -> String {
    let mut line = String::with_capacity(text.len() + LINE_TERMINATOR.len());
    line.push_str(text);
    line.push_str(LINE_TERMINATOR);
    line
}
