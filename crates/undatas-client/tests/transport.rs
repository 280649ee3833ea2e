//! Wire behavior of `ReqwestTransport` against a local HTTP server.

use std::io::Write;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use undatas_client::{
    Error, ParseConfig, ReqwestTransport, ResultExt, UdClient, UdConfig, UdCredentials,
};

const TOKEN: &str = "tok123";

/// A one-shot server answering the first connection with a canned response.
struct TestServer {
    base_url: String,
    request: JoinHandle<String>,
}

impl TestServer {
    async fn start(status: &'static str, body: &'static str) -> Self {
        Self::start_delayed(status, body, Duration::ZERO).await
    }

    async fn start_delayed(status: &'static str, body: &'static str, delay: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let request = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            tokio::time::sleep(delay).await;

            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
            request
        });

        Self {
            base_url: format!("http://{addr}/apikey"),
            request,
        }
    }

    fn client(&self, read_timeout: Duration) -> UdClient {
        let config = UdConfig::builder()
            .with_base_url(&self.base_url)
            .unwrap()
            .with_read_timeout(read_timeout)
            .build()
            .unwrap();
        let http = reqwest::Client::builder().no_proxy().build().unwrap();

        UdClient::with_transport(
            config,
            UdCredentials::new(TOKEN).unwrap(),
            ReqwestTransport::with_client(http),
        )
        .unwrap()
    }

    /// Raw request text as received by the server.
    async fn received(self) -> String {
        self.request.await.unwrap()
    }
}

/// Reads one full HTTP/1.1 request, honoring content-length or chunked bodies.
async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
        if head.contains("transfer-encoding: chunked") {
            if buf.ends_with(b"0\r\n\r\n") {
                break;
            }
            continue;
        }

        let length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= end + 4 + length {
            break;
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

#[tokio::test]
async fn test_success_envelope_is_decoded() {
    let server = TestServer::start(
        "200 OK",
        r#"{"code":200,"msg":"ok","data":[{"work_id":"w1"}]}"#,
    )
    .await;
    let client = server.client(Duration::from_secs(5));

    let workspaces = client.list_workspaces().await.unwrap();
    assert_eq!(workspaces[0].work_id(), Some("w1"));

    let request = server.received().await;
    assert!(request.starts_with("GET /apikey/workspace/list HTTP/1.1\r\n"));
}

#[tokio::test]
async fn test_authorization_is_raw_token() {
    let server = TestServer::start("200 OK", r#"{"code":200,"data":[]}"#).await;
    let client = server.client(Duration::from_secs(5));

    client.list_workspaces().await.unwrap();

    let request = server.received().await.to_lowercase();
    assert!(request.contains(&format!("\r\nauthorization: {TOKEN}\r\n")));
    assert!(!request.contains("bearer"));
}

#[tokio::test]
async fn test_query_string_is_encoded() {
    let server = TestServer::start("200 OK", r#"{"code":200,"data":[]}"#).await;
    let client = server.client(Duration::from_secs(5));

    client.list_tasks("w 1&x").await.unwrap();

    let request = server.received().await;
    assert!(request.starts_with("GET /apikey/task/list?work_id=w+1%26x HTTP/1.1\r\n"));
}

#[tokio::test]
async fn test_non_success_status_keeps_body() {
    let server = TestServer::start("500 Internal Server Error", "boom").await;
    let client = server.client(Duration::from_secs(5));

    let err = client.list_workspaces().await.unwrap_err();

    assert!(matches!(err, Error::Status { status: 500, .. }));
    assert_eq!(err.response_body(), Some("boom"));
    server.received().await;
}

#[tokio::test]
async fn test_non_json_body_is_invalid_response() {
    let server = TestServer::start("200 OK", "not json").await;
    let client = server.client(Duration::from_secs(5));

    let err = client.list_workspaces().await.unwrap_err();

    assert_eq!(err.category(), "invalid_response");
    assert_eq!(err.response_body(), Some("not json"));
    server.received().await;
}

#[tokio::test]
async fn test_business_failure_over_http() {
    let server = TestServer::start("200 OK", r#"{"code":401,"msg":"bad token"}"#).await;
    let client = server.client(Duration::from_secs(5));

    let err = client.list_workspaces().await.unwrap_err();

    assert!(matches!(err, Error::Api { code: Some(401), ref message } if message == "bad token"));
    server.received().await;
}

#[tokio::test]
async fn test_json_post_body() {
    let server = TestServer::start("200 OK", r#"{"code":200,"data":{}}"#).await;
    let client = server.client(Duration::from_secs(5));

    let accepted = client
        .parse_files("t1", &["f1"], None, ParseConfig::default())
        .await
        .succeeded()
        .unwrap();
    assert!(accepted);

    let request = server.received().await;
    assert!(request.starts_with("POST /apikey/task/parse/multiple HTTP/1.1\r\n"));
    assert!(request.to_lowercase().contains("content-type: application/json"));

    let (_, body) = request.split_once("\r\n\r\n").unwrap();
    let body: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "task_id": "t1",
            "file_ids": ["f1"],
            "ds_id": "default",
            "parse_config": {"lang": "ch", "parse_mode": "fast"}
        })
    );
}

#[tokio::test]
async fn test_null_data_over_http_is_not_accepted() {
    let server = TestServer::start("200 OK", r#"{"code":200,"msg":"ok","data":null}"#).await;
    let client = server.client(Duration::from_secs(5));

    let accepted = client
        .parse_files("t1", &["f1"], None, ParseConfig::default())
        .await
        .succeeded()
        .unwrap();

    assert!(!accepted);
    server.received().await;
}

#[tokio::test]
async fn test_upload_sends_multipart_form() {
    let server = TestServer::start("200 OK", r#"{"code":200,"msg":"ok"}"#).await;
    let client = server.client(Duration::from_secs(5));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.pdf");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(b"%PDF-1.7 body")
        .unwrap();

    client.upload_file("t1", &path).await.unwrap();

    let request = server.received().await;
    assert!(request.starts_with("POST /apikey/task/parse/upload HTTP/1.1\r\n"));
    assert!(request.to_lowercase().contains("content-type: multipart/form-data; boundary="));
    assert!(request.contains(r#"name="task_id""#));
    assert!(request.contains(r#"name="file"; filename="doc.pdf""#));
    assert!(request.contains("%PDF-1.7 body"));
}

#[tokio::test]
async fn test_timeout_is_http_error() {
    let server = TestServer::start_delayed(
        "200 OK",
        r#"{"code":200,"data":[]}"#,
        Duration::from_secs(5),
    )
    .await;
    let client = server.client(Duration::from_millis(200));

    let err = client.list_workspaces().await.unwrap_err();

    match &err {
        Error::Http(inner) => assert!(inner.is_timeout()),
        other => panic!("expected HTTP error, got {other:?}"),
    }
    assert!(!err.is_invalid_input());
    server.request.abort();
}
