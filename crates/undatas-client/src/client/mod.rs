//! UnDatasIO HTTP client module.
//!
//! This module provides the client, its configuration and the credential
//! type sent with every request.

#[cfg(feature = "config")]
mod args;
mod credentials;
mod ud_client;
mod ud_config;

#[cfg(feature = "config")]
#[cfg_attr(docsrs, doc(cfg(feature = "config")))]
pub use args::UdArgs;
pub use credentials::UdCredentials;
pub use ud_client::UdClient;
pub use ud_config::{DEFAULT_BASE_URL, UdBuilder, UdConfig};
