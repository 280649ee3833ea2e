//! Request bodies for the JSON endpoints.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Data source id sent when the caller does not pick one.
pub const DEFAULT_DS_ID: &str = "default";

/// Language and strategy hints forwarded to the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseConfig {
    /// Parsing language hint.
    pub lang: String,
    /// Parsing strategy hint.
    pub parse_mode: String,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            lang: "ch".to_string(),
            parse_mode: "fast".to_string(),
        }
    }
}

impl ParseConfig {
    /// Set the language hint.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Set the parsing strategy hint.
    pub fn with_parse_mode(mut self, parse_mode: impl Into<String>) -> Self {
        self.parse_mode = parse_mode.into();
        self
    }
}

/// Body of `POST /task/parse/multiple`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseFilesRequest {
    /// Task owning the files.
    pub task_id: String,
    /// Files to parse, in the order given.
    pub file_ids: Vec<String>,
    /// Data source id.
    pub ds_id: String,
    /// Parser hints.
    pub parse_config: ParseConfig,
}

impl ParseFilesRequest {
    /// Builds a request using [`DEFAULT_DS_ID`] when `ds_id` is `None`.
    pub fn new(
        task_id: impl Into<String>,
        file_ids: Vec<String>,
        ds_id: Option<String>,
        parse_config: ParseConfig,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            file_ids,
            ds_id: ds_id.unwrap_or_else(|| DEFAULT_DS_ID.to_string()),
            parse_config,
        }
    }

    /// Fails with [`Error::InvalidInput`] on an empty task id, an empty
    /// id list, or an empty id inside the list.
    pub fn validate(&self) -> Result<()> {
        require_id("task_id", &self.task_id)?;
        require_ids("file_ids", &self.file_ids)
    }
}

/// Body of `POST /task/parse/result`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResultRequest {
    /// Task owning the file.
    pub task_id: String,
    /// File whose parsed records are requested.
    pub file_id: String,
}

impl ParseResultRequest {
    /// Builds a request for one file.
    pub fn new(task_id: impl Into<String>, file_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            file_id: file_id.into(),
        }
    }

    /// Fails with [`Error::InvalidInput`] if either id is empty.
    pub fn validate(&self) -> Result<()> {
        require_id("task_id", &self.task_id)?;
        require_id("file_id", &self.file_id)
    }
}

/// Body of `POST /task/parse/download`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadRequest {
    /// Task owning the files.
    pub task_id: String,
    /// Files whose parsed output goes into the archive.
    pub file_ids: Vec<String>,
}

impl DownloadRequest {
    /// Builds a request for the given files.
    pub fn new(task_id: impl Into<String>, file_ids: Vec<String>) -> Self {
        Self {
            task_id: task_id.into(),
            file_ids,
        }
    }

    /// Same checks as [`ParseFilesRequest::validate`].
    pub fn validate(&self) -> Result<()> {
        require_id("task_id", &self.task_id)?;
        require_ids("file_ids", &self.file_ids)
    }
}

/// Payload of the download endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DownloadLink {
    /// Location of the archive with the parsed output.
    pub download_url: String,
}

/// Rejects empty identifiers.
pub(crate) fn require_id(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::invalid_input(format!("{name} cannot be empty")));
    }
    Ok(())
}

/// Rejects empty identifier lists and lists containing an empty identifier.
pub(crate) fn require_ids(name: &str, values: &[String]) -> Result<()> {
    if values.is_empty() {
        return Err(Error::invalid_input(format!("{name} cannot be empty")));
    }
    if values.iter().any(|value| value.is_empty()) {
        return Err(Error::invalid_input(format!(
            "{name} cannot contain empty identifiers"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_request_defaults() {
        let request = ParseFilesRequest::new(
            "t1",
            vec!["f1".into(), "f2".into()],
            None,
            ParseConfig::default(),
        );

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "task_id": "t1",
                "file_ids": ["f1", "f2"],
                "ds_id": "default",
                "parse_config": {"lang": "ch", "parse_mode": "fast"}
            })
        );
    }

    #[test]
    fn test_parse_config_overrides() {
        let config = ParseConfig::default()
            .with_lang("en")
            .with_parse_mode("accurate");
        assert_eq!(config.lang, "en");
        assert_eq!(config.parse_mode, "accurate");
    }

    #[test]
    fn test_validation() {
        assert!(ParseResultRequest::new("t1", "f1").validate().is_ok());
        assert!(ParseResultRequest::new("", "f1").validate().is_err());
        assert!(ParseResultRequest::new("t1", "").validate().is_err());

        assert!(DownloadRequest::new("t1", vec![]).validate().is_err());
        assert!(
            DownloadRequest::new("t1", vec!["f1".into(), "".into()])
                .validate()
                .unwrap_err()
                .is_invalid_input()
        );
    }

    #[test]
    fn test_download_link() {
        let link: DownloadLink =
            serde_json::from_value(json!({"download_url": "https://x/y.zip", "size": 3})).unwrap();
        assert_eq!(link.download_url, "https://x/y.zip");
    }
}
