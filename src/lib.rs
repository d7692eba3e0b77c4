//! # sharedlog
//!
//! A cross-process-safe, append-only line logger:
//! - One open handle per logger, shared-access so other processes can open it
//! - In-process writers serialized by a mutex
//! - Cross-process writers serialized by an advisory whole-file lock
//! - Bounded retry with backoff when the file lock is contended
//! - Writes never fail loudly: every write returns `bool`
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │          Threads (this process)    Other processes           │
//! └──────────────┬─────────────────────────────┬────────────────┘
//!                │                             │
//! ┌──────────────▼──────────────┐              │
//! │  AppendLogger mutex         │              │
//! │  (in-process, blocking)     │              │
//! └──────────────┬──────────────┘              │
//!                │                             │
//! ┌──────────────▼─────────────────────────────▼────────────────┐
//! │        Advisory file lock (24 attempts, backoff)             │
//! └──────────────┬──────────────────────────────────────────────┘
//!                │
//!                ▼
//!        seek(End) → write → flush → unlock
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use sharedlog::AppendLogger;
//!
//! let logger = AppendLogger::open("app.log")?;
//! logger.try_write_line("service started");
//! logger.try_write_template("{0} took {1}ms", &[&"flush", &12]);
//! logger.close();
//! # Ok::<(), sharedlog::LoggerError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod logger;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LoggerError, Result};
pub use config::LoggerConfig;
pub use logger::AppendLogger;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of sharedlog
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
