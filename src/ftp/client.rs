//! Async FTP client — connect / put / fast_put / disconnect workflow.
//!
//! Owns one engine transport exclusively. Upload progress is delivered
//! through the `mpsc` channel obtained from
//! [`FtpClient::progress_events`], subscribed before issuing `put`.

use crate::ftp::error::{FtpError, FtpResult};
use crate::ftp::transport::FtpTransport;
use crate::ftp::types::{FtpConnectionOptions, ProgressEvent, SourceKind, UploadRequest};
use chrono::Utc;
use log::{debug, error, warn};
use std::io::{Cursor, ErrorKind, Read};
use tokio::sync::mpsc;

/// A client bound to one FTP connection.
pub struct FtpClient {
    transport: Box<dyn FtpTransport>,
    /// Human-readable connection name, always timestamp-suffixed.
    pub name: String,
    /// Flips true on successful connect, false on disconnect.
    pub connected: bool,
    pub options: FtpConnectionOptions,
    progress_tx: Option<mpsc::UnboundedSender<ProgressEvent>>,
}

impl FtpClient {
    /// Build a client over an explicit transport. [`ConnectionFactory`]
    /// is the usual entry point; tests inject their own transport here.
    ///
    /// [`ConnectionFactory`]: crate::ftp::factory::ConnectionFactory
    pub fn with_transport(
        transport: Box<dyn FtpTransport>,
        options: FtpConnectionOptions,
        name: Option<&str>,
    ) -> Self {
        let base = match name {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => format!("{}@{}:{}", options.user, options.host, options.port),
        };
        let name = format!("{}-{}", base, Utc::now().format("%Y%m%d-%H%M%S"));

        Self {
            transport,
            name,
            connected: false,
            options,
            progress_tx: None,
        }
    }

    /// Subscribe to upload progress. Call before `put`; when nobody
    /// subscribed (or the receiver was dropped) events are discarded.
    pub fn progress_events(&mut self) -> mpsc::UnboundedReceiver<ProgressEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.progress_tx = Some(tx);
        rx
    }

    // ─── Connection lifecycle ────────────────────────────────────

    /// Open the engine connection with the stored options. No retry;
    /// double connect is not guarded.
    pub async fn connect(&mut self) -> FtpResult<()> {
        match self.transport.connect(&self.options) {
            Ok(()) => {
                if let Some(greeting) = self.transport.welcome() {
                    debug!("[FtpClient::connect] - greeting: {}", greeting);
                }
                debug!(
                    "[FtpClient::connect] - connection succeed on {}:{} as {} (password {}) for connection: {}",
                    self.options.host,
                    self.options.port,
                    self.options.user,
                    "*".repeat(self.options.password.len()),
                    self.name
                );
                self.connected = true;
                Ok(())
            }
            Err(e) => {
                error!(
                    "[FtpClient::connect] - an error occured on {}: {}",
                    self.options.host, e
                );
                Err(FtpError::Connect {
                    host: self.options.host.clone(),
                    message: e.to_string(),
                })
            }
        }
    }

    /// Abrupt transport teardown without the protocol goodbye.
    pub fn hard_disconnect(&mut self) {
        debug!("[FtpClient::hard_disconnect] - a hard disconnection was asked");
        self.transport.destroy();
        self.connected = false;
    }

    /// Protocol-level goodbye (QUIT). Engine errors during teardown are
    /// logged, not surfaced.
    pub fn graceful_disconnect(&mut self) {
        debug!("[FtpClient::graceful_disconnect] - a gracefull disconnection was asked");
        if let Err(e) = self.transport.end() {
            warn!(
                "[FtpClient::graceful_disconnect] - engine goodbye failed on {}: {}",
                self.options.host, e
            );
        }
        debug!(
            "[FtpClient::graceful_disconnect] - connection was closed on {}",
            self.options.host
        );
        self.connected = false;
    }

    // ─── Upload ──────────────────────────────────────────────────

    /// Upload `source` to `destination`. `source` is tried as a
    /// filesystem path first; when the stat fails it is uploaded as
    /// literal content.
    pub async fn put(
        &mut self,
        source: &str,
        destination: &str,
        compression: bool,
    ) -> FtpResult<()> {
        if !self.connected {
            error!(
                "[FtpClient::put] - cannot upload on {}, client is not connected",
                self.options.host
            );
            return Err(FtpError::NotConnected);
        }

        let request = UploadRequest {
            source: source.to_string(),
            destination: destination.to_string(),
            compression,
        };
        if let Err(e) = request.validate() {
            error!(
                "[FtpClient::put] - cannot upload on {}, input is not valid: {}",
                self.options.host, e
            );
            return Err(e);
        }

        // Resolve whether the source is a path or raw content.
        let (mut reader, size, kind): (Box<dyn Read + Send>, u64, SourceKind) =
            match tokio::fs::metadata(&request.source).await {
                Err(e) if e.kind() == ErrorKind::InvalidFilename => {
                    error!(
                        "[FtpClient::put] - given source is too big, maybe try to upload \
                         from a temporary file ({})",
                        e
                    );
                    return Err(FtpError::SourceTooLarge);
                }
                Err(_) => {
                    warn!(
                        "[FtpClient::put] - given source is not a file, uploading data from string"
                    );
                    let bytes = request.source.clone().into_bytes();
                    let size = bytes.len() as u64;
                    (Box::new(Cursor::new(bytes)), size, SourceKind::Data)
                }
                Ok(meta) if meta.is_dir() => {
                    warn!(
                        "[FtpClient::put] - directory sources are not supported: {}",
                        request.source
                    );
                    return Err(FtpError::DirectorySource(request.source));
                }
                Ok(meta) => {
                    let file = std::fs::File::open(&request.source).map_err(FtpError::from)?;
                    (Box::new(file), meta.len(), SourceKind::File)
                }
            };

        debug!("[FtpClient::put] - {} size is: {} bytes", kind, size);

        let tx = self.progress_tx.clone();
        let total = size.max(1);
        let mut transferred: u64 = 0;
        let mut on_chunk = |n: usize| {
            transferred += n as u64;
            // Capped: a file growing between stat and read must not push
            // events past 100%.
            let percent = ((transferred as f64 / total as f64) * 100.0).round().min(100.0) as u8;
            debug!("[FtpClient::put] - uploading, progress is: {}%", percent);
            if let Some(tx) = &tx {
                let _ = tx.send(ProgressEvent {
                    percent,
                    total_bytes: size,
                    current_bytes: transferred,
                });
            }
        };

        match self.transport.upload(
            &mut reader,
            &request.destination,
            request.compression,
            &mut on_chunk,
        ) {
            Ok(_) => {
                debug!(
                    "[FtpClient::put] - uploaded {} on {}/{} succeed",
                    kind, self.options.host, request.destination
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    "[FtpClient::put] - cannot upload {} on {}/{}: {}",
                    kind, self.options.host, request.destination, e
                );
                Err(FtpError::Transfer {
                    source_kind: kind,
                    destination: request.destination,
                    message: e.to_string(),
                })
            }
        }
    }

    /// connect → put → graceful disconnect as a single unit. The
    /// disconnect always runs, once, after the rest settles; the caller
    /// sees the connect/put outcome, never the disconnect's.
    pub async fn fast_put(
        &mut self,
        source: &str,
        destination: &str,
        compression: bool,
    ) -> FtpResult<()> {
        debug!("[FtpClient::fast_put] - try to run a fast put request");

        if let Err(e) = self.connect().await {
            self.graceful_disconnect();
            return Err(e);
        }

        let outcome = self.put(source, destination, compression).await;
        self.graceful_disconnect();
        outcome
    }
}
