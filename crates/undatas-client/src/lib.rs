#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

//! # undatas-client
//!
//! An HTTP client for the UnDatasIO document parsing API.
//!
//! Every operation is a single round trip against a fixed endpoint. Responses
//! arrive wrapped in a `{code, msg, data}` envelope; `code == 200` yields the
//! payload, anything else becomes an [`Error`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use undatas_client::{ParseConfig, ResultExt, UdClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), undatas_client::Error> {
//!     let client = UdClient::from_token("my-api-token")?;
//!
//!     let uploaded = client.upload_file("task-1", "invoice.pdf").await.succeeded()?;
//!     let files = client.list_task_files("task-1").await?;
//!     let ids: Vec<String> = files.iter().filter_map(|f| f.file_id()).map(String::from).collect();
//!
//!     client.parse_files("task-1", &ids, None, ParseConfig::default()).await?;
//!     let url = client.request_download_url("task-1", &ids).await.absent()?;
//!     println!("{uploaded} {url:?}");
//!
//!     Ok(())
//! }
//! ```

/// Logging target for client operations.
pub const TRACING_TARGET_CLIENT: &str = "undatas_client::client";

/// Logging target for HTTP requests and responses.
pub const TRACING_TARGET_HTTP: &str = "undatas_client::http";

mod client;
mod error;
pub mod transport;
pub mod types;

pub use crate::client::{DEFAULT_BASE_URL, UdBuilder, UdClient, UdConfig, UdCredentials};
#[cfg(feature = "config")]
pub use crate::client::UdArgs;
pub use crate::error::{Error, Result, ResultExt};
pub use crate::transport::{ReqwestTransport, Transport};
pub use crate::types::{
    DownloadLink, Envelope, ParseConfig, ParseResult, Task, TaskFile, Workspace,
};
