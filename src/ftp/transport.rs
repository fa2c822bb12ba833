//! Engine seam — the FTP wire protocol lives behind this trait.
//!
//! The production implementation wraps `suppaftp::FtpStream`. Tests swap
//! in their own transport, which is why the client only ever talks to
//! `dyn FtpTransport`.

use crate::ftp::error::{FtpError, FtpResult};
use crate::ftp::types::FtpConnectionOptions;
use log::warn;
use std::io::{Read, Write};
use std::net::{Shutdown, ToSocketAddrs};
use std::time::Duration;
use suppaftp::types::FileType;
use suppaftp::FtpStream;

/// Chunk size for streaming uploads (64 KiB).
pub const UPLOAD_CHUNK: usize = 65_536;

/// Contract with the underlying FTP engine.
pub trait FtpTransport: Send {
    /// Open the control connection, authenticate and switch to binary type.
    fn connect(&mut self, options: &FtpConnectionOptions) -> FtpResult<()>;

    /// Server greeting, when the engine exposes one.
    fn welcome(&self) -> Option<String>;

    /// Stream `source` to `destination`, invoking `on_chunk` with the size
    /// of every chunk written. Returns the number of bytes written.
    fn upload(
        &mut self,
        source: &mut dyn Read,
        destination: &str,
        compression: bool,
        on_chunk: &mut dyn FnMut(usize),
    ) -> FtpResult<u64>;

    /// Protocol-level goodbye (QUIT).
    fn end(&mut self) -> FtpResult<()>;

    /// Abrupt transport teardown, no goodbye.
    fn destroy(&mut self);
}

/// Production transport backed by `suppaftp`.
///
/// Options honored on connect: `host`, `port`, `user`, `password`, and
/// `pasv_timeout` (applied as the socket read timeout). The engine's
/// sync connector cannot bound the TCP connect, so `conn_timeout` is not
/// enforced; `keepalive` is left to the engine session; `secure_options`
/// is not consumed — sessions are plain FTP, not FTPS.
#[derive(Default)]
pub struct SuppaftpTransport {
    stream: Option<FtpStream>,
}

impl SuppaftpTransport {
    pub fn new() -> Self {
        Self { stream: None }
    }

    fn stream_mut(&mut self) -> FtpResult<&mut FtpStream> {
        self.stream.as_mut().ok_or(FtpError::NotConnected)
    }
}

impl FtpTransport for SuppaftpTransport {
    fn connect(&mut self, options: &FtpConnectionOptions) -> FtpResult<()> {
        let addr = (options.host.as_str(), options.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                FtpError::engine(format!(
                    "cannot resolve {}:{}",
                    options.host, options.port
                ))
            })?;

        let mut stream = FtpStream::connect(addr)?;

        // Reads on the control socket inherit the passive timeout.
        stream
            .get_ref()
            .set_read_timeout(Some(Duration::from_millis(options.pasv_timeout)))?;

        stream.login(&options.user, &options.password)?;
        stream.transfer_type(FileType::Binary)?;

        self.stream = Some(stream);
        Ok(())
    }

    fn welcome(&self) -> Option<String> {
        self.stream
            .as_ref()
            .and_then(|s| s.get_welcome_msg().map(|m| m.to_string()))
    }

    fn upload(
        &mut self,
        source: &mut dyn Read,
        destination: &str,
        compression: bool,
        on_chunk: &mut dyn FnMut(usize),
    ) -> FtpResult<u64> {
        if compression {
            // suppaftp has no MODE Z; the transfer proceeds uncompressed.
            warn!(
                "[SuppaftpTransport::upload] - compression requested but the engine \
                 does not support MODE Z, uploading uncompressed"
            );
        }

        let stream = self.stream_mut()?;
        let mut data = stream.put_with_stream(destination)?;

        let mut written: u64 = 0;
        let mut buf = vec![0u8; UPLOAD_CHUNK];
        loop {
            let n = source.read(&mut buf)?;
            if n == 0 {
                break;
            }
            data.write_all(&buf[..n])?;
            written += n as u64;
            on_chunk(n);
        }
        data.flush()?;

        self.stream_mut()?.finalize_put_stream(data)?;
        Ok(written)
    }

    fn end(&mut self) -> FtpResult<()> {
        if let Some(mut stream) = self.stream.take() {
            stream.quit()?;
        }
        Ok(())
    }

    fn destroy(&mut self) {
        if let Some(stream) = self.stream.take() {
            // Drop the socket without the protocol goodbye.
            let _ = stream.get_ref().shutdown(Shutdown::Both);
        }
    }
}
