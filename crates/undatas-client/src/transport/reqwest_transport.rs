//! Reqwest-based transport.

use reqwest::Client;
use reqwest::multipart::{Form, Part};

use super::{ApiRequest, Method, RequestBody, Transport};
use crate::types::Envelope;
use crate::{Error, Result, TRACING_TARGET_HTTP, UdConfig};

/// [`Transport`] backed by a pooled [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Creates a transport using the user agent from `config`.
    ///
    /// Timeouts are applied per request, so the pooled client has none.
    pub fn new(config: &UdConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http })
    }

    /// Creates a transport around an existing client.
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<Envelope> {
        let ApiRequest {
            method,
            endpoint,
            url,
            headers,
            timeout,
            body,
        } = request;

        tracing::debug!(
            target: TRACING_TARGET_HTTP,
            %method,
            endpoint,
            url = %url,
            timeout_ms = timeout.as_millis(),
            "Sending request"
        );

        let builder = match method {
            Method::Get => self.http.get(url),
            Method::Post => self.http.post(url),
        }
        .headers(headers)
        .timeout(timeout);

        let builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart { fields, file } => {
                let form = fields
                    .into_iter()
                    .fold(Form::new(), |form, (name, value)| form.text(name, value));
                let part = Part::bytes(file.bytes).file_name(file.file_name);
                builder.multipart(form.part(file.field, part))
            }
        };

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        tracing::debug!(
            target: TRACING_TARGET_HTTP,
            endpoint,
            status = status.as_u16(),
            size = text.len(),
            "Received response"
        );

        if !status.is_success() {
            return Err(Error::status(status.as_u16(), Some(text)));
        }

        serde_json::from_str::<Envelope>(&text).map_err(|e| {
            Error::invalid_response(format!("Failed to parse response envelope: {}", e), Some(text))
        })
    }
}
