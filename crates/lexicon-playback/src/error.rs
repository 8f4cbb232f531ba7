//! Error type for the playback core.
//!
//! Every failure a playback request can hit maps to one [`Error`] variant, and
//! each variant carries enough context for [`Error::http_status`] to pick the
//! response status.

use std::fmt;

/// Failure modes of a playback request.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The catalog has no record for the identifier, or the record's file is
    /// gone from storage.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// What was looked up ("video" for catalog records, "file" for storage).
        entity: String,
        /// The identifier or path that was looked up.
        id: String,
    },

    /// A `Range` header was present but could not be parsed.
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// The range starts at or past the end of the resource.
    #[error("Range start {start} out of bounds for size {size}")]
    RangeOutOfBounds {
        /// Requested first byte.
        start: u64,
        /// Size of the resource in bytes.
        size: u64,
    },

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Map this error to the HTTP status the client sees.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::NotFound { .. } => 404,
            Error::InvalidRange(_) => 416,
            Error::RangeOutOfBounds { .. } => 416,
            Error::Io { .. } => 500,
        }
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::InvalidRange`].
    pub fn invalid_range(msg: impl Into<String>) -> Self {
        Error::InvalidRange(msg.into())
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
