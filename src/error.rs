//! # Error Types
//!
//! This module provides the error type used throughout the crate. A single
//! `AvtpError` enum covers both the codec's field-access failures and the
//! CRF daemon's session-level failures, so callers only ever need to match
//! on one error type regardless of which layer produced it.
//!
//! ## Example
//!
//! ```rust
//! use avtp_rs::error::{AvtpError, Result};
//!
//! fn check_not_empty(data: &[u8]) -> Result<()> {
//!     if data.is_empty() {
//!         return Err(AvtpError::ShortBuffer { needed: 1, actual: 0 });
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Primary error type for the crate.
#[derive(Error, Debug)]
pub enum AvtpError {
    /// A field identifier is not defined for this subtype's accessor.
    #[error("field not recognized for this subtype")]
    InvalidField,

    /// A subtype-specific initializer argument is out of its valid range.
    #[error("invalid initializer argument: {0}")]
    InvalidArgument(String),

    /// The supplied buffer is too short to contain the word a field resolves to.
    #[error("buffer too short: need at least {needed} bytes, got {actual}")]
    ShortBuffer {
        /// Minimum buffer length required for the access that failed.
        needed: usize,
        /// Actual length of the buffer that was supplied.
        actual: usize,
    },

    /// A CRF daemon socket delivered fewer bytes than a fixed-size record.
    #[error("short read: expected {expected} bytes, got {actual}")]
    ShortRead {
        /// Number of bytes the record format requires.
        expected: usize,
        /// Number of bytes actually read.
        actual: usize,
    },

    /// A CRF daemon socket accepted fewer bytes than were submitted for write.
    #[error("short write: expected {expected} bytes, wrote {actual}")]
    ShortWrite {
        /// Number of bytes that were submitted for write.
        expected: usize,
        /// Number of bytes the socket actually accepted.
        actual: usize,
    },

    /// The peer closed the connection in an orderly fashion.
    #[error("peer closed connection")]
    PeerClosed,

    /// An I/O error from the underlying socket that isn't one of the above.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for crate operations.
pub type Result<T> = std::result::Result<T, AvtpError>;
