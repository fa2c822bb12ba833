//! # ftpush
//!
//! Thin asynchronous convenience layer over an FTP engine providing:
//!   • Validated connection options with sane defaults
//!   • Async connect / put / disconnect workflow
//!   • Uploads from a file path or from literal string content
//!   • Per-chunk upload progress events
//!   • Graceful and hard disconnect
//!
//! The FTP wire protocol itself (handshake, PASV/PORT negotiation, data
//! sockets) lives in the `suppaftp` engine behind the
//! [`ftp::transport::FtpTransport`] seam, so the workflow layer never
//! touches protocol details and tests can substitute their own transport.

pub mod ftp;

pub use ftp::client::FtpClient;
pub use ftp::error::{FtpError, FtpResult};
pub use ftp::factory::ConnectionFactory;
pub use ftp::types::{FtpConnectionOptions, ProgressEvent, SourceKind, UploadRequest};
