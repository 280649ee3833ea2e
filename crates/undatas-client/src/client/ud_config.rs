//! Client configuration.

use std::time::Duration;

use derive_builder::Builder;
use url::Url;

use crate::{Error, Result};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://temp.undatas.io/apikey";

/// Configuration for the UnDatasIO client.
///
/// Each request class has its own fixed timeout: listing and result reads,
/// JSON writes, and file uploads.
///
/// # Examples
///
/// ```ignore
/// use std::time::Duration;
/// use undatas_client::UdConfig;
///
/// let config = UdConfig::builder()
///     .with_base_url("https://temp.undatas.io/apikey")?
///     .with_upload_timeout(Duration::from_secs(120))
///     .build()?;
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(
    name = "UdBuilder",
    pattern = "owned",
    setter(into, prefix = "with"),
    build_fn(validate = "Self::validate_config")
)]
pub struct UdConfig {
    /// Base URL; endpoint paths are appended to it verbatim.
    #[builder(setter(custom), default = "UdConfig::default_base_url()")]
    pub base_url: Url,
    /// Timeout for GET requests.
    #[builder(default = "Duration::from_secs(10)")]
    pub read_timeout: Duration,
    /// Timeout for JSON POST requests.
    #[builder(default = "Duration::from_secs(30)")]
    pub write_timeout: Duration,
    /// Timeout for multipart file uploads.
    #[builder(default = "Duration::from_secs(60)")]
    pub upload_timeout: Duration,
    /// User agent string for requests
    #[builder(default = "UdConfig::default_user_agent()")]
    pub user_agent: String,
}

impl Default for UdConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            read_timeout: Duration::from_secs(10),
            write_timeout: Duration::from_secs(30),
            upload_timeout: Duration::from_secs(60),
            user_agent: Self::default_user_agent(),
        }
    }
}

impl UdConfig {
    /// Create a new configuration builder
    pub fn builder() -> UdBuilder {
        UdBuilder::default()
    }

    /// Resolves an endpoint path against the base URL.
    ///
    /// The path is appended to the base rather than joined, so a base of
    /// `https://host/apikey` and `/task/list` yield `https://host/apikey/task/list`.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{}{}", base, endpoint)).map_err(|e| {
            Error::config(format!("Failed to construct URL for '{}': {}", endpoint, e))
        })
    }

    fn default_base_url() -> Url {
        DEFAULT_BASE_URL.parse().expect("Valid default URL")
    }

    fn default_user_agent() -> String {
        format!("undatas-client/{}", env!("CARGO_PKG_VERSION"))
    }
}

impl UdBuilder {
    /// Set the base URL of the API.
    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        let parsed: Url = url
            .parse()
            .map_err(|e| Error::config(format!("Invalid base URL '{}': {}", url, e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "Invalid base URL '{}': scheme must be http or https",
                url
            )));
        }

        self.base_url = Some(parsed);
        Ok(self)
    }

    fn validate_config(&self) -> std::result::Result<(), String> {
        let timeouts = [
            ("Read timeout", &self.read_timeout),
            ("Write timeout", &self.write_timeout),
            ("Upload timeout", &self.upload_timeout),
        ];

        for (name, timeout) in timeouts {
            if let Some(timeout) = timeout
                && timeout.is_zero()
            {
                return Err(format!("{} must be greater than 0", name));
            }
        }

        Ok(())
    }
}

impl From<UdBuilderError> for Error {
    fn from(err: UdBuilderError) -> Self {
        Error::config(err.to_string())
    }
}
