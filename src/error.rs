use std::io;

use thiserror::Error;

/// Configuration-time validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A MIME mapping was registered for an empty extension.
    #[error("MIME extension cannot be empty")]
    EmptyExtension,
    /// A MIME mapping was registered for an extension that is not a single segment.
    #[error("invalid MIME extension `{extension}`")]
    InvalidExtension {
        /// The rejected extension.
        extension: String,
    },
    /// A content type does not parse as a MIME type.
    #[error("invalid MIME type `{value}`")]
    InvalidMimeType {
        /// The rejected content type.
        value: String,
    },
    /// A multipart boundary violates RFC 2046.
    #[error("invalid multipart boundary: {reason}")]
    InvalidBoundary {
        /// Why the boundary was rejected.
        reason: &'static str,
    },
}

/// Runtime error type used by `multipart-helpers`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MultipartError {
    /// Opening, reading or writing failed. The underlying error is kept as is,
    /// so callers can still tell `NotFound` apart from a failed write.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Configuration error surfaced at runtime.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A part was requested from a writer that has already been closed.
    #[error("multipart writer is already closed")]
    WriterClosed,
    /// A computed header value cannot be carried by an HTTP header.
    #[error("header `{name}` has an invalid value")]
    InvalidHeaderValue {
        /// Name of the header that could not be built.
        name: String,
    },
}

impl MultipartError {
    /// Returns the I/O error kind when this error came from I/O.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Io(err) => Some(err.kind()),
            _ => None,
        }
    }
}
