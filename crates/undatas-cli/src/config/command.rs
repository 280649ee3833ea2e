//! Subcommands, one per client operation.

use std::path::PathBuf;

use clap::Subcommand;
use serde_json::{Value, json};
use undatas_client::{ParseConfig, Result, UdClient};

/// Client operation selected on the command line.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List workspaces.
    Workspaces,

    /// List the tasks of a workspace.
    Tasks {
        #[arg(long)]
        work_id: String,
    },

    /// List the files uploaded to a task.
    Files {
        #[arg(long)]
        task_id: String,
    },

    /// Upload a local file to a task.
    Upload {
        #[arg(long)]
        task_id: String,
        /// Path of the file to upload.
        path: PathBuf,
    },

    /// Request parsing of uploaded files.
    Parse {
        #[arg(long)]
        task_id: String,
        /// File id to parse; repeat for several files.
        #[arg(long = "file-id", required = true)]
        file_ids: Vec<String>,
        /// Data source id (server default: "default").
        #[arg(long)]
        ds_id: Option<String>,
        /// Parsing language hint.
        #[arg(long, default_value = "ch")]
        lang: String,
        /// Parsing strategy hint.
        #[arg(long, default_value = "fast")]
        parse_mode: String,
    },

    /// Fetch the parse result of one file.
    #[command(name = "result")]
    ParseResult {
        #[arg(long)]
        task_id: String,
        #[arg(long)]
        file_id: String,
    },

    /// Resolve the download URL of parsed output.
    DownloadUrl {
        #[arg(long)]
        task_id: String,
        /// File id to include; repeat for several files.
        #[arg(long = "file-id", required = true)]
        file_ids: Vec<String>,
    },
}

impl Command {
    /// Returns the subcommand name used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Workspaces => "workspaces",
            Command::Tasks { .. } => "tasks",
            Command::Files { .. } => "files",
            Command::Upload { .. } => "upload",
            Command::Parse { .. } => "parse",
            Command::ParseResult { .. } => "result",
            Command::DownloadUrl { .. } => "download-url",
        }
    }

    /// Runs the operation and returns its output as JSON.
    pub async fn run(self, client: &UdClient) -> Result<Value> {
        let output = match self {
            Command::Workspaces => serde_json::to_value(client.list_workspaces().await?)?,
            Command::Tasks { work_id } => serde_json::to_value(client.list_tasks(&work_id).await?)?,
            Command::Files { task_id } => {
                serde_json::to_value(client.list_task_files(&task_id).await?)?
            }
            Command::Upload { task_id, path } => {
                client.upload_file(&task_id, &path).await?;
                json!({
                    "uploaded": true,
                    "task_id": task_id,
                    "path": path.display().to_string()
                })
            }
            Command::Parse {
                task_id,
                file_ids,
                ds_id,
                lang,
                parse_mode,
            } => {
                let config = ParseConfig::default()
                    .with_lang(lang)
                    .with_parse_mode(parse_mode);
                client
                    .parse_files(&task_id, &file_ids, ds_id.as_deref(), config)
                    .await?;
                json!({ "accepted": true, "task_id": task_id, "file_ids": file_ids })
            }
            Command::ParseResult { task_id, file_id } => {
                Value::Array(client.get_parse_result(&task_id, &file_id).await?)
            }
            Command::DownloadUrl { task_id, file_ids } => {
                let url = client.request_download_url(&task_id, &file_ids).await?;
                json!({ "download_url": url })
            }
        };

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use undatas_test::{MockTransport, create_mock_client};

    use super::*;

    #[tokio::test]
    async fn test_run_download_url() {
        let mock = MockTransport::new();
        mock.push_success(json!({"download_url": "https://x/y.zip"}));
        let client = create_mock_client(&mock);

        let command = Command::DownloadUrl {
            task_id: "t1".into(),
            file_ids: vec!["f1".into()],
        };
        let output = command.run(&client).await.unwrap();

        assert_eq!(output, json!({"download_url": "https://x/y.zip"}));
    }

    #[tokio::test]
    async fn test_run_parse_uses_options() {
        let mock = MockTransport::new();
        mock.push_success(json!({}));
        let client = create_mock_client(&mock);

        let command = Command::Parse {
            task_id: "t1".into(),
            file_ids: vec!["f1".into()],
            ds_id: Some("ds".into()),
            lang: "en".into(),
            parse_mode: "accurate".into(),
        };
        let output = command.run(&client).await.unwrap();

        assert_eq!(output["accepted"], true);
        let body = mock.last_request().unwrap().json().cloned().unwrap();
        assert_eq!(
            body,
            json!({
                "task_id": "t1",
                "file_ids": ["f1"],
                "ds_id": "ds",
                "parse_config": {"lang": "en", "parse_mode": "accurate"}
            })
        );
    }

    #[tokio::test]
    async fn test_run_business_failure() {
        let mock = MockTransport::new();
        mock.push_failure(401, "bad token");
        let client = create_mock_client(&mock);

        let err = Command::Workspaces.run(&client).await.unwrap_err();
        assert!(err.is_api_error());
    }
}
