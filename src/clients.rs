//! Client interfaces for the two external collaborators.
//!
//! The recognition service and the artifact store are consumed through
//! explicitly constructed, dependency-injected trait objects; there is no
//! process-wide client state. Production implementations speak HTTP; a
//! filesystem-backed store covers local runs and tests.

use std::path::PathBuf;

use url::Url;

use crate::error::{UpstreamError, WriteError};
use crate::types::{JobId, ResultPage};

/// Abstraction over fetching one page of a job's recognition result.
///
/// Implementations are stateless handles, safe to share across messages.
#[async_trait::async_trait]
pub trait TextDetectionClient: Send + Sync {
    /// Fetch the first page (no token) or a continuation page (token from the
    /// previous page) of the job's result.
    async fn get_result(
        &self,
        job_id: &JobId,
        continuation_token: Option<&str>,
    ) -> Result<ResultPage, UpstreamError>;
}

/// Abstraction over persisting one text artifact.
///
/// A put must unconditionally overwrite any existing object at the key, so
/// redelivered messages re-write identical content with no visible effect.
#[async_trait::async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Write `body` under `key` in `bucket`, overwriting any existing object.
    async fn put(&self, bucket: &str, key: &str, body: &[u8]) -> Result<(), WriteError>;
}

/// Wire request for a result-page fetch
#[derive(serde::Serialize)]
struct GetResultRequest<'a> {
    #[serde(rename = "JobId")]
    job_id: &'a str,
    #[serde(rename = "ContinuationToken", skip_serializing_if = "Option::is_none")]
    continuation_token: Option<&'a str>,
}

/// Production [`TextDetectionClient`] speaking JSON-over-HTTP to the
/// recognition service's result endpoint.
pub struct HttpTextDetectionClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpTextDetectionClient {
    /// Create a client for the given result endpoint
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Create a client reusing a preconfigured `reqwest` client
    /// (timeouts, proxies, TLS settings)
    pub fn with_client(endpoint: Url, http: reqwest::Client) -> Self {
        Self { http, endpoint }
    }
}

#[async_trait::async_trait]
impl TextDetectionClient for HttpTextDetectionClient {
    async fn get_result(
        &self,
        job_id: &JobId,
        continuation_token: Option<&str>,
    ) -> Result<ResultPage, UpstreamError> {
        let request = GetResultRequest {
            job_id: job_id.as_str(),
            continuation_token,
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| UpstreamError::Fetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| UpstreamError::Fetch(e.to_string()))?;

        response
            .json::<ResultPage>()
            .await
            .map_err(|e| UpstreamError::Fetch(e.to_string()))
    }
}

/// Production [`ArtifactStore`] writing to an HTTP object store
/// (`PUT {endpoint}/{bucket}/{key}`).
pub struct HttpArtifactStore {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpArtifactStore {
    /// Create a store for the given object-store endpoint
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Create a store reusing a preconfigured `reqwest` client
    pub fn with_client(endpoint: Url, http: reqwest::Client) -> Self {
        Self { http, endpoint }
    }
}

#[async_trait::async_trait]
impl ArtifactStore for HttpArtifactStore {
    async fn put(&self, bucket: &str, key: &str, body: &[u8]) -> Result<(), WriteError> {
        let url = format!(
            "{}/{}/{}",
            self.endpoint.as_str().trim_end_matches('/'),
            bucket,
            key
        );

        self.http
            .put(&url)
            .body(body.to_vec())
            .send()
            .await
            .map_err(|e| WriteError::Put {
                key: key.to_string(),
                message: e.to_string(),
            })?
            .error_for_status()
            .map_err(|e| WriteError::Put {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        Ok(())
    }
}

/// [`ArtifactStore`] backed by a local directory; artifacts land at
/// `{root}/{bucket}/{key}`. Intended for local runs and tests.
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    /// Create a store rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait::async_trait]
impl ArtifactStore for FsArtifactStore {
    async fn put(&self, bucket: &str, key: &str, body: &[u8]) -> Result<(), WriteError> {
        let path = self.root.join(bucket).join(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, body).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn endpoint(server: &MockServer) -> Url {
        Url::parse(&server.uri()).unwrap()
    }

    // -----------------------------------------------------------------------
    // HttpTextDetectionClient
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn detection_client_parses_result_page() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(serde_json::json!({ "JobId": "123" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Status": "SUCCEEDED",
                "Blocks": [
                    { "Id": "p1", "BlockType": "PAGE", "ChildIds": ["l1"] },
                    { "Id": "l1", "BlockType": "LINE", "Text": "Hello" }
                ],
                "ContinuationToken": "abc"
            })))
            .mount(&server)
            .await;

        let client = HttpTextDetectionClient::new(endpoint(&server));
        let page = client.get_result(&JobId::from("123"), None).await.unwrap();

        assert_eq!(page.blocks.len(), 2);
        assert_eq!(page.continuation_token.as_deref(), Some("abc"));
        assert_eq!(
            page.job_status,
            Some(crate::types::JobStatus::Succeeded)
        );
    }

    #[tokio::test]
    async fn detection_client_sends_continuation_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(serde_json::json!({
                "JobId": "123",
                "ContinuationToken": "abc"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "Blocks": [] })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpTextDetectionClient::new(endpoint(&server));
        let page = client
            .get_result(&JobId::from("123"), Some("abc"))
            .await
            .unwrap();

        assert!(page.blocks.is_empty());
        assert!(page.continuation_token.is_none());
    }

    #[tokio::test]
    async fn detection_client_maps_service_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = HttpTextDetectionClient::new(endpoint(&server));
        let err = client
            .get_result(&JobId::from("123"), None)
            .await
            .unwrap_err();

        assert!(matches!(err, UpstreamError::Fetch(_)));
    }

    // -----------------------------------------------------------------------
    // HttpArtifactStore
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn http_store_puts_to_bucket_and_key() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/output-bucket/test-123.txt"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let store = HttpArtifactStore::new(endpoint(&server));
        store
            .put("output-bucket", "test-123.txt", b"Hello\nWorld")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn http_store_maps_rejections_to_put_errors() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let store = HttpArtifactStore::new(endpoint(&server));
        let err = store
            .put("output-bucket", "test-123.txt", b"")
            .await
            .unwrap_err();

        match err {
            WriteError::Put { key, .. } => assert_eq!(key, "test-123.txt"),
            other => panic!("expected Put error, got {other:?}"),
        }
    }

    // -----------------------------------------------------------------------
    // FsArtifactStore
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn fs_store_writes_under_root_bucket_key() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(temp_dir.path());

        store
            .put("output-bucket", "test-123.txt", b"Hello\nWorld")
            .await
            .unwrap();

        let written =
            std::fs::read_to_string(temp_dir.path().join("output-bucket/test-123.txt")).unwrap();
        assert_eq!(written, "Hello\nWorld");
    }

    #[tokio::test]
    async fn fs_store_overwrites_existing_object() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(temp_dir.path());

        store.put("b", "k.txt", b"first").await.unwrap();
        store.put("b", "k.txt", b"second").await.unwrap();

        let written = std::fs::read_to_string(temp_dir.path().join("b/k.txt")).unwrap();
        assert_eq!(written, "second", "second put should overwrite the first");
    }

    #[tokio::test]
    async fn fs_store_accepts_empty_bodies() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(temp_dir.path());

        store.put("b", "empty-1.txt", b"").await.unwrap();

        let written = std::fs::read(temp_dir.path().join("b/empty-1.txt")).unwrap();
        assert!(written.is_empty());
    }
}
