//! The `{code, msg, data}` wrapper returned by every endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Uniform response envelope.
///
/// `code == 200` signals success. A missing code is treated as a failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Business status code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,

    /// Human readable status message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,

    /// Endpoint specific payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Envelope {
    /// Business code signalling success.
    pub const SUCCESS_CODE: i64 = 200;

    /// Creates a successful envelope carrying `data`.
    pub fn success(data: impl Into<Value>) -> Self {
        Self {
            code: Some(Self::SUCCESS_CODE),
            msg: Some("success".to_string()),
            data: Some(data.into()),
        }
    }

    /// Creates a failed envelope with the given code and message.
    pub fn failure(code: i64, msg: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            msg: Some(msg.into()),
            data: None,
        }
    }

    /// Returns `true` if the envelope carries the success code.
    pub fn is_success(&self) -> bool {
        self.code == Some(Self::SUCCESS_CODE)
    }

    /// Unwraps the payload, turning a non-success code into [`Error::Api`].
    ///
    /// A successful envelope without `data` yields [`Value::Null`].
    pub fn into_data(self) -> Result<Value> {
        if self.is_success() {
            Ok(self.data.unwrap_or(Value::Null))
        } else {
            Err(Error::api(
                self.code,
                self.msg.unwrap_or_else(|| "Unknown error".to_string()),
            ))
        }
    }
}
