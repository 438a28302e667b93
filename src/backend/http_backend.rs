use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, warn};

use super::traits::{BackendError, BackendResult, DownloadBackend};
use super::types::{DownloadRequest, DownloadResponse, ProgressSnapshot, ServerConfig};

/// `DownloadBackend` over plain HTTP/JSON.
///
/// The client carries no request timeout: the download submission blocks
/// until the server resolves the job, however long that takes.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Pass a successful response through; turn anything else into
    /// `Rejected`, probing the body for a server-supplied `detail` message.
    async fn check(resp: Response) -> BackendResult<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let detail = resp
            .json::<Value>()
            .await
            .ok()
            .as_ref()
            .and_then(|body| body.get("detail"))
            .and_then(Value::as_str)
            .map(str::to_string);

        warn!(
            "backend rejected request status={} detail={:?}",
            status.as_u16(),
            detail
        );
        Err(BackendError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }
}

#[async_trait]
impl DownloadBackend for HttpBackend {
    async fn start_download(&self, request: &DownloadRequest) -> BackendResult<DownloadResponse> {
        debug!("submitting download url={}", request.url);
        let resp = self
            .client
            .post(self.endpoint("/api/download"))
            .json(request)
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json().await?)
    }

    async fn progress(&self) -> BackendResult<ProgressSnapshot> {
        let resp = self.client.get(self.endpoint("/api/progress")).send().await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json().await?)
    }

    async fn cancel(&self) -> BackendResult<()> {
        let resp = self.client.post(self.endpoint("/api/cancel")).send().await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn heartbeat(&self) -> BackendResult<()> {
        let resp = self.client.get(self.endpoint("/api/heartbeat")).send().await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn fetch_config(&self) -> BackendResult<ServerConfig> {
        let resp = self.client.get(self.endpoint("/api/config")).send().await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json().await?)
    }

    async fn select_folder(&self) -> BackendResult<Option<String>> {
        let resp = self
            .client
            .get(self.endpoint("/api/select_folder"))
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        let body: Value = resp.json().await?;
        let path = body
            .get("path")
            .and_then(Value::as_str)
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        Ok(path)
    }

    async fn set_quality(&self, quality: &str) -> BackendResult<()> {
        let resp = self
            .client
            .post(self.endpoint("/api/set_quality"))
            .json(&serde_json::json!({ "quality": quality }))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn open_folder(&self, file_path: &str) -> BackendResult<()> {
        let resp = self
            .client
            .post(self.endpoint("/api/open_folder"))
            .json(&serde_json::json!({ "file_path": file_path }))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let backend = HttpBackend::new("http://127.0.0.1:4321/");
        assert_eq!(
            backend.endpoint("/api/progress"),
            "http://127.0.0.1:4321/api/progress"
        );
    }
}
