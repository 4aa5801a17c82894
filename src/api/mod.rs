//! HTTP client for the pipeline data endpoint.

use std::time::Duration;

use crate::pipeline::PipelineSnapshot;

/// Endpoint used when neither the config file nor the command line names one.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5001/api/pipeline-data";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server responded with HTTP {0}")]
    Status(u16),

    #[error("unexpected payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Reads pipeline snapshots from one fixed URL.
#[derive(Debug, Clone)]
pub struct PipelineClient {
    http_client: reqwest::Client,
    endpoint: reqwest::Url,
}

impl PipelineClient {
    /// Build a client. `timeout` of `None` means the request may wait forever.
    pub fn new(endpoint: reqwest::Url, timeout: Option<Duration>) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        // Builder only fails on TLS backend init; the plain client is equivalent here
        let http_client = builder.build().unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http_client,
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }

    /// GET the endpoint once and decode the body.
    pub async fn fetch_snapshot(&self) -> Result<PipelineSnapshot, FetchError> {
        let response = self.http_client.get(self.endpoint.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        tracing::debug!("Received {} bytes from {}", body.len(), self.endpoint);

        Ok(PipelineSnapshot::from_json(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, route: &str) -> PipelineClient {
        let url = reqwest::Url::parse(&format!("{}{}", server.uri(), route)).unwrap();
        PipelineClient::new(url, None)
    }

    #[tokio::test]
    async fn test_fetch_decodes_snapshot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/pipeline-data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "inputs": [{"filename": "sample.fastq", "type": "FASTQ", "size": "2.1GB"}],
                "outputs": [{"filename": "sample.vcf", "type": "VCF", "size": "14MB"}],
                "pipeline_status": [{"stage": "Alignment", "status": "Complete"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, "/api/pipeline-data");
        let snapshot = client.fetch_snapshot().await.expect("fetch ok");

        assert_eq!(snapshot.inputs[0].label(), "sample.fastq (FASTQ, 2.1GB)");
        assert_eq!(snapshot.outputs[0].filename, "sample.vcf");
        assert_eq!(snapshot.pipeline_status[0].status, "Complete");
    }

    #[tokio::test]
    async fn test_fetch_fails_on_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/pipeline-data"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server, "/api/pipeline-data");
        let err = client.fetch_snapshot().await.unwrap_err();
        assert!(matches!(err, FetchError::Status(503)));
    }

    #[tokio::test]
    async fn test_fetch_fails_on_malformed_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/pipeline-data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "inputs": "not a list"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, "/api/pipeline-data");
        let err = client.fetch_snapshot().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_fetch_fails_when_server_unreachable() {
        // Grab a free port and release it so nothing is listening there
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = reqwest::Url::parse(&format!("http://127.0.0.1:{port}/api/pipeline-data")).unwrap();
        let client = PipelineClient::new(url, None);

        let err = client.fetch_snapshot().await.unwrap_err();
        assert!(matches!(err, FetchError::Request(_)));
    }

    #[tokio::test]
    async fn test_fetch_honours_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(500))
                    .set_body_string("{}"),
            )
            .mount(&server)
            .await;

        let url = reqwest::Url::parse(&format!("{}/slow", server.uri())).unwrap();
        let client = PipelineClient::new(url, Some(Duration::from_millis(50)));
        let err = client.fetch_snapshot().await.unwrap_err();
        match err {
            FetchError::Request(e) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
