//! FTP upload convenience layer.
//!
//! Architecture:
//! - `types` — connection options, upload request, progress event
//! - `error` — categorised error type
//! - `transport` — engine seam + suppaftp-backed implementation
//! - `client` — connect / put / fast_put / disconnect workflow
//! - `factory` — options validation and client construction

pub mod types;
pub mod error;
pub mod transport;
pub mod client;
pub mod factory;

// Re-exports for lib.rs consumers
pub use client::FtpClient;
pub use error::{FtpError, FtpResult};
pub use factory::ConnectionFactory;
pub use types::*;
