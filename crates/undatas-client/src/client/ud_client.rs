//! UnDatasIO HTTP client implementation.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info};

use super::{UdConfig, UdCredentials};
use crate::transport::{ApiRequest, FilePart, Method, RequestBody, ReqwestTransport, Transport};
use crate::types::{
    DownloadLink, DownloadRequest, ParseConfig, ParseFilesRequest, ParseResult,
    ParseResultRequest, Task, TaskFile, Workspace, require_id,
};
use crate::{Error, Result, TRACING_TARGET_CLIENT};

const WORKSPACE_LIST: &str = "/workspace/list";
const TASK_LIST: &str = "/task/list";
const TASK_FILE_LIST: &str = "/task/parse/list";
const TASK_UPLOAD: &str = "/task/parse/upload";
const TASK_PARSE: &str = "/task/parse/multiple";
const TASK_RESULT: &str = "/task/parse/result";
const TASK_DOWNLOAD: &str = "/task/parse/download";

/// Inner client that holds the transport and configuration.
struct UdClientInner {
    config: UdConfig,
    authorization: HeaderValue,
    transport: Arc<dyn Transport>,
}

/// HTTP client for the UnDatasIO document parsing API.
///
/// Each method issues exactly one request and never retries. Caller errors
/// (empty identifiers) are returned before any request is sent; transport
/// and business failures are logged at error level and returned as
/// [`Error`]. Use [`ResultExt`](crate::ResultExt) to collapse the latter
/// into `None` / `false`.
///
/// The client is cheap to clone and safe to share between tasks.
///
/// # Examples
///
/// ```ignore
/// use undatas_client::{ResultExt, UdClient};
///
/// let client = UdClient::from_token("my-api-token")?;
/// for workspace in client.list_workspaces().await? {
///     println!("{:?}", workspace.work_id());
/// }
///
/// let uploaded = client.upload_file("task-1", "report.pdf").await.succeeded()?;
/// ```
#[derive(Clone)]
pub struct UdClient {
    inner: Arc<UdClientInner>,
}

impl std::fmt::Debug for UdClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UdClient")
            .field("config", &self.inner.config)
            .field("transport", &self.inner.transport)
            .finish_non_exhaustive()
    }
}

impl UdClient {
    /// Creates a client using the reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be used as a header value or the
    /// HTTP client cannot be created.
    pub fn new(config: UdConfig, credentials: UdCredentials) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, credentials, transport)
    }

    /// Creates a client with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `token` is empty.
    pub fn from_token(token: impl Into<String>) -> Result<Self> {
        Self::new(UdConfig::default(), UdCredentials::new(token)?)
    }

    /// Creates a client that sends requests through `transport`.
    pub fn with_transport(
        config: UdConfig,
        credentials: UdCredentials,
        transport: impl Transport + 'static,
    ) -> Result<Self> {
        let authorization = credentials.header_value()?;

        debug!(
            target: TRACING_TARGET_CLIENT,
            base_url = %config.base_url,
            read_timeout = ?config.read_timeout,
            write_timeout = ?config.write_timeout,
            upload_timeout = ?config.upload_timeout,
            "UnDatasIO client initialized"
        );

        let inner = UdClientInner {
            config,
            authorization,
            transport: Arc::new(transport),
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Get a reference to the client configuration.
    pub fn config(&self) -> &UdConfig {
        &self.inner.config
    }

    /// Lists the workspaces visible to the token.
    ///
    /// A successful envelope without data fails with
    /// [`Error::InvalidResponse`], as do the other listings.
    pub async fn list_workspaces(&self) -> Result<Vec<Workspace>> {
        let data = self.get(WORKSPACE_LIST, &[]).await?;
        decode_list(WORKSPACE_LIST, data)
    }

    /// Lists the tasks of a workspace.
    pub async fn list_tasks(&self, work_id: &str) -> Result<Vec<Task>> {
        require_id("work_id", work_id)?;
        let data = self.get(TASK_LIST, &[("work_id", work_id)]).await?;
        decode_list(TASK_LIST, data)
    }

    /// Lists the files uploaded to a task.
    pub async fn list_task_files(&self, task_id: &str) -> Result<Vec<TaskFile>> {
        require_id("task_id", task_id)?;
        let data = self.get(TASK_FILE_LIST, &[("task_id", task_id)]).await?;
        decode_list(TASK_FILE_LIST, data)
    }

    /// Uploads a local file to a task.
    ///
    /// The file is read before the request is built and its handle is closed
    /// before the upload starts. A missing or unreadable file fails with
    /// [`Error::Io`] without contacting the service.
    pub async fn upload_file(&self, task_id: &str, file_path: impl AsRef<Path>) -> Result<()> {
        require_id("task_id", task_id)?;
        let file_path = file_path.as_ref();

        let file_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::invalid_input(format!("'{}' does not name a file", file_path.display()))
            })?;

        let bytes = tokio::fs::read(file_path).await.map_err(|e| {
            error!(
                target: TRACING_TARGET_CLIENT,
                path = %file_path.display(),
                error = %e,
                "Failed to read file for upload"
            );
            Error::Io(e)
        })?;

        info!(
            target: TRACING_TARGET_CLIENT,
            file_name = %file_name,
            task_id,
            size = bytes.len(),
            "Uploading file"
        );

        let body = RequestBody::Multipart {
            fields: vec![("task_id".to_string(), task_id.to_string())],
            file: FilePart {
                field: "file".to_string(),
                file_name: file_name.clone(),
                bytes,
            },
        };

        let url = self.inner.config.endpoint_url(TASK_UPLOAD)?;
        let timeout = self.inner.config.upload_timeout;
        self.execute(Method::Post, TASK_UPLOAD, url, timeout, body)
            .await?;

        info!(
            target: TRACING_TARGET_CLIENT,
            file_name = %file_name,
            task_id,
            "File uploaded successfully"
        );
        Ok(())
    }

    /// Requests parsing of uploaded files.
    ///
    /// `ds_id` defaults to [`DEFAULT_DS_ID`](crate::types::DEFAULT_DS_ID).
    /// Success only means the server accepted the request; poll
    /// [`get_parse_result`](Self::get_parse_result) for the output. A
    /// successful envelope without data is not an acceptance and fails with
    /// [`Error::InvalidResponse`].
    pub async fn parse_files<S: AsRef<str>>(
        &self,
        task_id: &str,
        file_ids: &[S],
        ds_id: Option<&str>,
        parse_config: ParseConfig,
    ) -> Result<()> {
        let request = ParseFilesRequest::new(
            task_id,
            to_owned_ids(file_ids),
            ds_id.map(str::to_string),
            parse_config,
        );
        request.validate()?;

        let data = self.post(TASK_PARSE, &request).await?;
        require_data(TASK_PARSE, data)?;
        Ok(())
    }

    /// Fetches the parsed records of one file.
    ///
    /// A successful envelope without data means no result is available and
    /// fails with [`Error::InvalidResponse`].
    pub async fn get_parse_result(&self, task_id: &str, file_id: &str) -> Result<ParseResult> {
        let request = ParseResultRequest::new(task_id, file_id);
        request.validate()?;

        let data = self.post(TASK_RESULT, &request).await?;
        decode(TASK_RESULT, require_data(TASK_RESULT, data)?)
    }

    /// Resolves the download URL of the parsed output of `file_ids`.
    pub async fn request_download_url<S: AsRef<str>>(
        &self,
        task_id: &str,
        file_ids: &[S],
    ) -> Result<String> {
        let request = DownloadRequest::new(task_id, to_owned_ids(file_ids));
        request.validate()?;

        info!(
            target: TRACING_TARGET_CLIENT,
            task_id,
            "Requesting download URL"
        );

        let data = self.post(TASK_DOWNLOAD, &request).await?;
        let link: DownloadLink = decode(TASK_DOWNLOAD, data)?;

        info!(
            target: TRACING_TARGET_CLIENT,
            download_url = %link.download_url,
            "Obtained download URL"
        );
        Ok(link.download_url)
    }

    /// Sends a GET request with query parameters and returns the envelope data.
    async fn get(&self, endpoint: &'static str, params: &[(&str, &str)]) -> Result<Value> {
        let mut url = self.inner.config.endpoint_url(endpoint)?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        let timeout = self.inner.config.read_timeout;
        self.execute(Method::Get, endpoint, url, timeout, RequestBody::Empty)
            .await
    }

    /// Sends a JSON POST request and returns the envelope data.
    async fn post<T: Serialize>(&self, endpoint: &'static str, payload: &T) -> Result<Value> {
        let url = self.inner.config.endpoint_url(endpoint)?;
        let body = RequestBody::Json(serde_json::to_value(payload)?);

        let timeout = self.inner.config.write_timeout;
        self.execute(Method::Post, endpoint, url, timeout, body)
            .await
    }

    /// Sends one request and unwraps the envelope, logging any failure.
    async fn execute(
        &self,
        method: Method,
        endpoint: &'static str,
        url: url::Url,
        timeout: Duration,
        body: RequestBody,
    ) -> Result<Value> {
        debug!(
            target: TRACING_TARGET_CLIENT,
            %method,
            url = %url,
            "Sending request"
        );

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.inner.authorization.clone());

        let request = ApiRequest {
            method,
            endpoint,
            url,
            headers,
            timeout,
            body,
        };

        self.inner
            .transport
            .send(request)
            .await
            .and_then(|envelope| envelope.into_data())
            .map_err(|err| log_failure(method, endpoint, err))
    }
}

/// Logs a transport or business failure and hands the error back.
fn log_failure(method: Method, endpoint: &str, err: Error) -> Error {
    match &err {
        Error::Api { code, message } => error!(
            target: TRACING_TARGET_CLIENT,
            %method,
            endpoint,
            code = ?code,
            msg = %message,
            "API business error"
        ),
        Error::Status { status, body } => error!(
            target: TRACING_TARGET_CLIENT,
            %method,
            endpoint,
            status,
            body = body.as_deref().unwrap_or_default(),
            "Request rejected"
        ),
        _ => error!(
            target: TRACING_TARGET_CLIENT,
            %method,
            endpoint,
            category = err.category(),
            error = %err,
            "Request failed"
        ),
    }
    err
}

fn log_invalid(err: Error) -> Error {
    error!(
        target: TRACING_TARGET_CLIENT,
        error = %err,
        "Unexpected response payload"
    );
    err
}

/// Rejects a successful envelope that carried no `data`.
fn require_data(endpoint: &str, data: Value) -> Result<Value> {
    if data.is_null() {
        return Err(log_invalid(Error::invalid_response(
            format!("{} returned no data", endpoint),
            None,
        )));
    }
    Ok(data)
}

/// Decodes an array payload; a `null` payload is not a listing.
fn decode_list<T: DeserializeOwned>(endpoint: &str, data: Value) -> Result<Vec<T>> {
    decode(endpoint, require_data(endpoint, data)?)
}

fn decode<T: DeserializeOwned>(endpoint: &str, data: Value) -> Result<T> {
    serde_json::from_value(data.clone()).map_err(|e| {
        log_invalid(Error::invalid_response(
            format!("Unexpected payload from {}: {}", endpoint, e),
            Some(data.to_string()),
        ))
    })
}

fn to_owned_ids<S: AsRef<str>>(ids: &[S]) -> Vec<String> {
    ids.iter().map(|id| id.as_ref().to_string()).collect()
}
