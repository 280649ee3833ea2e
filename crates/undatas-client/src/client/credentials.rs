//! API token credentials.

use std::fmt;

use reqwest::header::HeaderValue;

use crate::{Error, Result};

/// Static API token for the UnDatasIO service.
///
/// The token is sent verbatim as the `Authorization` header value. It is
/// never printed by [`Debug`].
#[derive(Clone, PartialEq, Eq)]
pub struct UdCredentials {
    token: String,
}

impl UdCredentials {
    /// Creates credentials from a token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(Error::invalid_input("API token cannot be empty"));
        }
        Ok(Self { token })
    }

    /// Returns the raw token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Builds the `Authorization` header value, marked as sensitive.
    pub(crate) fn header_value(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&self.token).map_err(|_| {
            Error::invalid_input("API token contains characters not allowed in an HTTP header")
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for UdCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UdCredentials")
            .field("token", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_rejected() {
        let err = UdCredentials::new("").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_header_value_is_raw_token() {
        let credentials = UdCredentials::new("abc123").unwrap();
        let value = credentials.header_value().unwrap();
        assert_eq!(value.to_str().unwrap(), "abc123");
        assert!(value.is_sensitive());
    }

    #[test]
    fn test_invalid_header_characters() {
        let credentials = UdCredentials::new("bad\ntoken").unwrap();
        assert!(credentials.header_value().unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_debug_redacts_token() {
        let credentials = UdCredentials::new("secret-token").unwrap();
        let printed = format!("{credentials:?}");
        assert!(!printed.contains("secret-token"));
    }
}
