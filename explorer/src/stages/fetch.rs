//! Fetch stage: one HTTP GET for a user profile.

use async_trait::async_trait;
use std::error::Error as _;
use tracing::{debug, warn};

use crate::config::FetchConfig;
use crate::core::RawBody;
use crate::errors::{ConfigError, PipelineError};

/// Source of raw profile documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetches the raw profile for `identifier`.
    ///
    /// The identifier is not validated; empty or odd identifiers are left
    /// to the remote service to answer.
    async fn fetch(&self, identifier: &str) -> Result<RawBody, PipelineError>;
}

/// Maps a response status to the fetch result.
///
/// Only 404 is treated as a failure. Every other status, including 5xx,
/// hands the body on to the decoder, which then rejects content that is not
/// a profile.
pub fn classify_response(
    identifier: &str,
    status: u16,
    body: String,
) -> Result<RawBody, PipelineError> {
    if status == 404 {
        return Err(PipelineError::user_not_found(identifier));
    }
    if !(200..300).contains(&status) {
        warn!(identifier, status, "Passing non-success response to decoder");
    }
    Ok(RawBody::from(body))
}

/// Renders a transport error with its whole source chain.
fn describe_transport_error(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// [`ProfileSource`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpProfileSource {
    client: reqwest::Client,
    config: FetchConfig,
}

impl HttpProfileSource {
    /// Builds the HTTP client for the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client, config })
    }

    /// Gets the configuration.
    #[must_use]
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait]
impl ProfileSource for HttpProfileSource {
    async fn fetch(&self, identifier: &str) -> Result<RawBody, PipelineError> {
        let url = self.config.profile_url(identifier);
        debug!(url = %url, "Fetching profile");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PipelineError::connection_failed(describe_transport_error(&e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| PipelineError::connection_failed(describe_transport_error(&e)))?;

        debug!(status, bytes = body.len(), "Profile response received");
        classify_response(identifier, status, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serves a single canned HTTP response and returns the request head.
    async fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        (base_url, handle)
    }

    fn source_for(base_url: &str) -> HttpProfileSource {
        HttpProfileSource::new(FetchConfig::new().with_base_url(base_url).with_timeout(5.0))
            .unwrap()
    }

    #[test]
    fn test_classify_not_found() {
        let err = classify_response("ghost", 404, String::new()).unwrap_err();
        assert_eq!(err, PipelineError::user_not_found("ghost"));
    }

    #[test]
    fn test_classify_success_passes_body() {
        let body = classify_response("alice", 200, "{}".to_string()).unwrap();
        assert_eq!(body.as_str(), "{}");
    }

    #[test]
    fn test_classify_server_error_passes_through() {
        let body = classify_response("alice", 500, "oops".to_string()).unwrap();
        assert_eq!(body.as_str(), "oops");

        let body =
            classify_response("alice", 403, r#"{"message":"rate limited"}"#.to_string()).unwrap();
        assert!(body.as_str().contains("rate limited"));
    }

    #[tokio::test]
    async fn test_http_fetch_success() {
        let payload = r#"{"login":"alice","public_repos":5,"id":42}"#;
        let (base_url, server) = serve_once("200 OK", payload).await;

        let body = source_for(&base_url).fetch("alice").await.unwrap();
        assert_eq!(body.as_str(), payload);

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /users/alice HTTP/1.1"));
        assert!(request.to_ascii_lowercase().contains("user-agent: explorer/"));
    }

    #[tokio::test]
    async fn test_http_fetch_not_found() {
        let (base_url, server) = serve_once("404 Not Found", r#"{"message":"Not Found"}"#).await;

        let err = source_for(&base_url).fetch("ghost").await.unwrap_err();
        assert_eq!(err, PipelineError::user_not_found("ghost"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_http_fetch_server_error_is_not_a_fetch_failure() {
        let (base_url, server) = serve_once("500 Internal Server Error", "boom").await;

        let body = source_for(&base_url).fetch("alice").await.unwrap();
        assert_eq!(body.as_str(), "boom");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_http_fetch_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let err = source_for(&base_url).fetch("alice").await.unwrap_err();
        assert!(matches!(err, PipelineError::ConnectionFailed { .. }));
        assert!(!err.diagnostic().is_empty());
    }
}
