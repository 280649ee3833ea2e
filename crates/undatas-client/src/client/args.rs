//! Command-line and environment configuration.

use std::time::Duration;

use clap::Args;

use super::{DEFAULT_BASE_URL, UdClient, UdConfig, UdCredentials};
use crate::Result;

/// Connection settings for the UnDatasIO API.
///
/// # Environment Variables
///
/// - `UNDATAS_API_TOKEN` - API token (required)
/// - `UNDATAS_BASE_URL` - API base URL
/// - `UNDATAS_READ_TIMEOUT` - GET timeout in seconds (default: 10)
/// - `UNDATAS_WRITE_TIMEOUT` - JSON POST timeout in seconds (default: 30)
/// - `UNDATAS_UPLOAD_TIMEOUT` - upload timeout in seconds (default: 60)
#[derive(Debug, Clone, Args)]
pub struct UdArgs {
    /// API token sent as the Authorization header.
    #[arg(long, env = "UNDATAS_API_TOKEN", hide_env_values = true)]
    pub api_token: String,

    /// Base URL of the API.
    #[arg(long, env = "UNDATAS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Timeout in seconds for listing and result requests.
    #[arg(long, env = "UNDATAS_READ_TIMEOUT", default_value_t = 10)]
    pub read_timeout: u64,

    /// Timeout in seconds for JSON write requests.
    #[arg(long, env = "UNDATAS_WRITE_TIMEOUT", default_value_t = 30)]
    pub write_timeout: u64,

    /// Timeout in seconds for file uploads.
    #[arg(long, env = "UNDATAS_UPLOAD_TIMEOUT", default_value_t = 60)]
    pub upload_timeout: u64,
}

impl UdArgs {
    /// Builds the client configuration.
    pub fn to_config(&self) -> Result<UdConfig> {
        let config = UdConfig::builder()
            .with_base_url(&self.base_url)?
            .with_read_timeout(Duration::from_secs(self.read_timeout))
            .with_write_timeout(Duration::from_secs(self.write_timeout))
            .with_upload_timeout(Duration::from_secs(self.upload_timeout))
            .build()?;
        Ok(config)
    }

    /// Builds the credentials.
    pub fn to_credentials(&self) -> Result<UdCredentials> {
        UdCredentials::new(self.api_token.clone())
    }

    /// Builds a client with the reqwest transport.
    pub fn into_client(self) -> Result<UdClient> {
        UdClient::new(self.to_config()?, self.to_credentials()?)
    }
}
