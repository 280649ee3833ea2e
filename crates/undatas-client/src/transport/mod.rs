//! HTTP transport abstraction.
//!
//! [`UdClient`](crate::UdClient) describes each call as an [`ApiRequest`] and
//! hands it to a [`Transport`], which performs the round trip and decodes the
//! response [`Envelope`]. [`ReqwestTransport`] is the production
//! implementation.

mod reqwest_transport;

use std::fmt;
use std::time::Duration;

use reqwest::header::HeaderMap;
use serde_json::Value;
use url::Url;

pub use self::reqwest_transport::ReqwestTransport;
use crate::Result;
use crate::types::Envelope;

/// HTTP method of an [`ApiRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// A file attached to a multipart request.
#[derive(Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name.
    pub field: String,
    /// File name reported to the server.
    pub file_name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("field", &self.field)
            .field("file_name", &self.file_name)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Body of an [`ApiRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No body; parameters travel in the URL query.
    Empty,
    /// A JSON document.
    Json(Value),
    /// A multipart form with text fields and one file.
    Multipart {
        fields: Vec<(String, String)>,
        file: FilePart,
    },
}

/// A fully prepared request against one endpoint.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Endpoint path relative to the base URL, e.g. `/task/list`.
    pub endpoint: &'static str,
    /// Absolute URL including any query parameters.
    pub url: Url,
    pub headers: HeaderMap,
    /// Per-call timeout.
    pub timeout: Duration,
    pub body: RequestBody,
}

impl ApiRequest {
    /// Returns the JSON body, if this is a JSON request.
    pub fn json(&self) -> Option<&Value> {
        match &self.body {
            RequestBody::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the value of a query parameter.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Returns a header value as a string.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// Performs a single HTTP round trip and decodes the response envelope.
///
/// Implementations must not retry. A non-2xx status maps to
/// [`Error::Status`](crate::Error::Status); an undecodable body maps to
/// [`Error::InvalidResponse`](crate::Error::InvalidResponse). The envelope
/// code is left for the caller to interpret.
#[async_trait::async_trait]
pub trait Transport: fmt::Debug + Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Envelope>;
}
