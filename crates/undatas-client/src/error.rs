//! Error types for undatas-client.

/// Result type for all UnDatasIO operations in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error types for UnDatasIO operations.
///
/// Failures fall into three classes: caller errors ([`Error::InvalidInput`],
/// [`Error::Config`]) raised before any network activity, transport failures
/// (connection, timeout, non-2xx status, malformed body, unreadable local
/// file), and business failures reported by the envelope ([`Error::Api`]).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP client errors (connection, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx HTTP status.
    #[error("HTTP status {status}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body, if it could be read
        body: Option<String>,
    },

    /// The envelope carried a code other than 200.
    #[error("API error (code {}): {message}", .code.map_or_else(|| "none".to_string(), |c| c.to_string()))]
    Api {
        /// Business code from the envelope, if present
        code: Option<i64>,
        /// Message from the envelope
        message: String,
    },

    /// Invalid or malformed API response
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Description of what's invalid
        message: String,
        /// Optional raw response body for debugging
        body: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// Local file I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input data
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of what's invalid
        message: String,
    },
}

impl Error {
    /// Create an API error
    pub fn api(code: Option<i64>, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
        }
    }

    /// Create a status error
    pub fn status(status: u16, body: Option<String>) -> Self {
        Self::Status { status, body }
    }

    /// Create an invalid response error
    pub fn invalid_response(message: impl Into<String>, body: Option<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
            body,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Returns `true` for errors caused by the caller rather than the service.
    ///
    /// These are raised before any request is sent and are never collapsed
    /// by [`ResultExt`].
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput { .. } | Error::Config { .. })
    }

    /// Returns `true` if the service answered but rejected the request.
    pub fn is_api_error(&self) -> bool {
        matches!(self, Error::Api { .. })
    }

    /// Get the HTTP status code if this is an HTTP/status error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get the raw response body, if one was captured.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Error::Status { body, .. } | Error::InvalidResponse { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Error::Http(_) => "http",
            Error::Status { .. } => "status",
            Error::Api { .. } => "api",
            Error::InvalidResponse { .. } => "invalid_response",
            Error::Serialization(_) => "serialization",
            Error::Config { .. } => "config",
            Error::Io(_) => "io",
            Error::InvalidInput { .. } => "invalid_input",
        }
    }
}

/// Collapses transport and business failures into absent values.
///
/// Caller errors ([`Error::is_invalid_input`]) still propagate, so a
/// misuse of the API is never mistaken for an unavailable service.
///
/// ```ignore
/// let files = client.list_task_files("task-1").await.absent()?;
/// let accepted = client.parse_files("task-1", &ids, None, config).await.succeeded()?;
/// ```
pub trait ResultExt<T> {
    /// Maps transport and business failures to `Ok(None)`.
    fn absent(self) -> Result<Option<T>>;

    /// Maps success to `Ok(true)` and transport or business failures to `Ok(false)`.
    fn succeeded(self) -> Result<bool>;
}

impl<T> ResultExt<T> for Result<T> {
    fn absent(self) -> Result<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_invalid_input() => Err(err),
            Err(_) => Ok(None),
        }
    }

    fn succeeded(self) -> Result<bool> {
        self.absent().map(|value| value.is_some())
    }
}
