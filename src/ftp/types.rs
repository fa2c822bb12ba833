//! Shared types for the FTP upload layer.

use crate::ftp::error::{FtpError, FtpResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ─── Connection ──────────────────────────────────────────────────────

/// Options for a single FTP connection. Immutable once validated.
///
/// Unknown keys are rejected during deserialization, except inside
/// `secure_options`, which is forwarded to the engine as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FtpConnectionOptions {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default = "default_password")]
    pub password: String,
    /// Control-connection timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub conn_timeout: u64,
    /// Passive data-connection timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub pasv_timeout: u64,
    /// Keepalive interval in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub keepalive: u64,
    /// Opaque TLS options, passed through to the engine untouched.
    #[serde(default)]
    pub secure_options: HashMap<String, serde_json::Value>,
}

fn default_port() -> u16 {
    21
}
fn default_user() -> String {
    "anonymous".into()
}
fn default_password() -> String {
    "anonymous@".into()
}
fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for FtpConnectionOptions {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: default_port(),
            user: default_user(),
            password: default_password(),
            conn_timeout: default_timeout_ms(),
            pasv_timeout: default_timeout_ms(),
            keepalive: default_timeout_ms(),
            secure_options: HashMap::new(),
        }
    }
}

impl FtpConnectionOptions {
    /// Options for `host` with every other field defaulted.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    /// Check what the types alone cannot express. Negative ports and
    /// timeouts are already unrepresentable; the host must be present.
    pub fn validate(&self) -> FtpResult<()> {
        if self.host.is_empty() {
            return Err(FtpError::Configuration("host must not be empty".into()));
        }
        Ok(())
    }
}

// ─── Upload ──────────────────────────────────────────────────────────

/// A single upload request. Transient, validated per call, not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// Filesystem path, or literal content when the path does not stat.
    pub source: String,
    /// Remote destination path.
    pub destination: String,
    #[serde(default)]
    pub compression: bool,
}

impl UploadRequest {
    pub fn validate(&self) -> FtpResult<()> {
        if self.source.is_empty() {
            return Err(FtpError::validation("source", "must not be empty"));
        }
        if self.destination.is_empty() {
            return Err(FtpError::validation("destination", "must not be empty"));
        }
        Ok(())
    }
}

/// Whether an upload source resolved to a filesystem path or raw content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceKind {
    File,
    Data,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Data => write!(f, "data"),
        }
    }
}

// ─── Progress ────────────────────────────────────────────────────────

/// Live progress snapshot for a single upload, emitted once per chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    /// Rounded 0–100.
    pub percent: u8,
    pub total_bytes: u64,
    pub current_bytes: u64,
}
