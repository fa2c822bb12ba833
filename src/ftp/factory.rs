//! Connection factory — validates options and constructs clients.

use crate::ftp::client::FtpClient;
use crate::ftp::error::{FtpError, FtpResult};
use crate::ftp::transport::SuppaftpTransport;
use crate::ftp::types::FtpConnectionOptions;
use log::error;

/// Factory for FTP clients. No client is produced from invalid options.
#[derive(Debug, Default)]
pub struct ConnectionFactory;

impl ConnectionFactory {
    pub fn new() -> Self {
        Self
    }

    /// Create a client from typed options, with a derived name when none
    /// is supplied.
    pub fn create_connection(
        &self,
        options: FtpConnectionOptions,
        name: Option<&str>,
    ) -> FtpResult<FtpClient> {
        if let Err(e) = options.validate() {
            error!(
                "[ConnectionFactory::create_connection] - invalid schema given, cannot \
                 create a new connection: {}",
                e
            );
            return Err(e);
        }

        Ok(FtpClient::with_transport(
            Box::new(SuppaftpTransport::new()),
            options,
            name,
        ))
    }

    /// Create a client from an untyped options map (e.g. parsed config).
    /// Defaults are applied; unknown keys are rejected except inside
    /// `secureOptions`.
    pub fn create_connection_from_json(
        &self,
        value: serde_json::Value,
        name: Option<&str>,
    ) -> FtpResult<FtpClient> {
        let options: FtpConnectionOptions =
            serde_json::from_value(value).map_err(|e| FtpError::Configuration(e.to_string()))?;
        self.create_connection(options, name)
    }
}
