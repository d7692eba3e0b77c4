//! Error types for sharedlog
//!
//! Provides a unified error type for all operations. The public write API
//! flattens these to a `bool`; they stay distinct internally so the lock
//! retry loop can tell contention apart from real faults.

use thiserror::Error;

/// Result type alias using LoggerError
pub type Result<T> = std::result::Result<T, LoggerError>;

/// Unified error type for sharedlog operations
#[derive(Debug, Error)]
pub enum LoggerError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Locking Errors
    // -------------------------------------------------------------------------
    #[error("File lock still contended after {attempts} attempts")]
    LockContended { attempts: u32 },

    // -------------------------------------------------------------------------
    // Formatting Errors
    // -------------------------------------------------------------------------
    #[error("Format error: {0}")]
    Format(String),

    // -------------------------------------------------------------------------
    // Lifecycle Errors
    // -------------------------------------------------------------------------
    #[error("Logger is closed")]
    Closed,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::fmt::Error> for LoggerError {
    fn from(_: std::fmt::Error) -> Self {
        LoggerError::Format("a formatting trait implementation returned an error".to_string())
    }
}
