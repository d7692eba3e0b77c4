//! Advisory file lock acquisition
//!
//! Wraps the platform's whole-file advisory lock (`flock` on Unix,
//! `LockFileEx` on Windows, both via `fs2`) in a bounded retry loop.
//! Only contention is retried; any other lock error aborts at once.

use std::fs::File;
use std::io;
use std::thread;
use std::time::Duration;

use fs2::FileExt;
use rand::Rng;

use crate::config::LoggerConfig;
use crate::error::{LoggerError, Result};

/// Holds the advisory lock; unlocks on drop, on every exit path
pub struct FileLockGuard<'a> {
    file: &'a File,
}

impl Drop for FileLockGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(self.file) {
            tracing::warn!("Failed to release file lock: {}", e);
        }
    }
}

/// Computes the wait between lock attempts
pub struct Backoff<'a> {
    config: &'a LoggerConfig,
}

impl<'a> Backoff<'a> {
    pub fn new(config: &'a LoggerConfig) -> Self {
        Self { config }
    }

    /// Wait after failed attempt number `attempt` (zero based)
    ///
    /// Early attempts wait `attempt` units; the rest wait a random number of
    /// units in `[0, max_jitter_units)`. Saturates instead of overflowing,
    /// so an unvalidated policy still cannot panic the write path.
    pub fn delay(&self, attempt: u32) -> Duration {
        if attempt < self.config.linear_attempts {
            return self.config.time_unit.saturating_mul(attempt);
        }
        if self.config.max_jitter_units == 0 {
            return Duration::ZERO;
        }
        let units = rand::rng().random_range(0..self.config.max_jitter_units);
        self.config.time_unit.saturating_mul(units)
    }
}

/// True when the error means "someone else holds the lock"
pub fn is_contended(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::WouldBlock {
        return true;
    }
    match (err.raw_os_error(), fs2::lock_contended_error().raw_os_error()) {
        (Some(code), Some(contended)) => code == contended,
        _ => false,
    }
}

/// Acquire an exclusive lock on `file`, sleeping between attempts
pub fn acquire<'a>(file: &'a File, config: &LoggerConfig) -> Result<FileLockGuard<'a>> {
    acquire_with(file, config, thread::sleep)
}

/// Retry loop with an injectable sleep, so attempt counts can be observed
pub(crate) fn acquire_with<'a, S>(
    file: &'a File,
    config: &LoggerConfig,
    mut sleep: S,
) -> Result<FileLockGuard<'a>>
where
    S: FnMut(Duration),
{
    let backoff = Backoff::new(config);

    for attempt in 0..config.max_lock_attempts {
        match FileExt::try_lock_exclusive(file) {
            Ok(()) => return Ok(FileLockGuard { file }),
            Err(e) if is_contended(&e) => {
                tracing::trace!(attempt, "File lock contended, backing off");
                // No point sleeping once the budget is spent
                if attempt + 1 < config.max_lock_attempts {
                    sleep(backoff.delay(attempt));
                }
            }
            Err(e) => return Err(LoggerError::Io(e)),
        }
    }

    Err(LoggerError::LockContended {
        attempts: config.max_lock_attempts,
    })
}
