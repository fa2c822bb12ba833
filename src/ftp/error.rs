//! Categorised error type for the upload layer.

use crate::ftp::types::SourceKind;
use thiserror::Error;

pub type FtpResult<T> = Result<T, FtpError>;

/// Error surfaced by factory and client operations. Never retried; every
/// failure is also logged at error severity where it occurs.
#[derive(Debug, Error)]
pub enum FtpError {
    /// Connection options failed schema validation at construction.
    #[error("invalid connection options: {0}")]
    Configuration(String),

    /// An operation requiring a live session ran while disconnected.
    #[error("client is not connected")]
    NotConnected,

    /// An upload request field failed validation.
    #[error("invalid upload request: {field} {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// The source string exceeds the system filename length limit — it
    /// cannot be a path, and content this large should come from a file.
    #[error("source exceeds the system path length limit, try uploading from a temporary file")]
    SourceTooLarge,

    /// Directory sources are rejected; only files and raw content upload.
    #[error("directory source '{0}' is not supported")]
    DirectorySource(String),

    /// The engine failed to establish the session.
    #[error("connection to {host} failed: {message}")]
    Connect { host: String, message: String },

    /// The engine reported an upload failure.
    #[error("cannot upload {source_kind} to {destination}: {message}")]
    Transfer {
        source_kind: SourceKind,
        destination: String,
        message: String,
    },

    /// Raw engine-level failure, produced inside the transport and
    /// contextualised by the client.
    #[error("ftp engine: {0}")]
    Engine(String),
}

impl FtpError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine(message.into())
    }
}

impl From<std::io::Error> for FtpError {
    fn from(e: std::io::Error) -> Self {
        Self::Engine(e.to_string())
    }
}

impl From<suppaftp::FtpError> for FtpError {
    fn from(e: suppaftp::FtpError) -> Self {
        Self::Engine(e.to_string())
    }
}
