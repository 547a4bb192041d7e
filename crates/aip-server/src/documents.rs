// SPDX-License-Identifier: Apache-2.0

use crate::security::SecurityHeaders;
use crate::store::RetryPolicy;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

const SERVICE_AUTHORIZATION: &str = "ServiceAuthorization";

#[derive(Debug, Clone)]
pub struct DocumentServiceError(pub String);

impl std::fmt::Display for DocumentServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for DocumentServiceError {}

/// What an upload leaves behind: the store url the case record will carry
/// and the display name the pages show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    pub url: String,
    pub name: String,
}

/// Document store seam. Uploaded bytes live in the external store; the
/// session only ever holds the url (behind a document-map key).
#[async_trait]
pub trait DocumentService: Send + Sync + 'static {
    async fn upload(
        &self,
        name: &str,
        bytes: Vec<u8>,
        security: &SecurityHeaders,
    ) -> Result<StoredDocument, DocumentServiceError>;

    async fn fetch_binary(
        &self,
        url: &str,
        security: &SecurityHeaders,
    ) -> Result<Vec<u8>, DocumentServiceError>;

    async fn delete(
        &self,
        url: &str,
        security: &SecurityHeaders,
    ) -> Result<(), DocumentServiceError>;
}

pub struct HttpDocumentService {
    base_url: String,
    retry: RetryPolicy,
    timeout: Duration,
}

impl HttpDocumentService {
    #[must_use]
    pub fn new(base_url: String, retry: RetryPolicy) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            retry,
            timeout: Duration::from_secs(20),
        }
    }

    fn client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_else(|_| reqwest::Client::new())
    }

    fn auth_headers(&self, security: &SecurityHeaders) -> Result<HeaderMap, DocumentServiceError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", security.user_token))
            .map_err(|e| DocumentServiceError(format!("invalid user token header: {e}")))?;
        headers.insert(AUTHORIZATION, bearer);
        let service = HeaderValue::from_str(&security.service_token)
            .map_err(|e| DocumentServiceError(format!("invalid service token header: {e}")))?;
        headers.insert(SERVICE_AUTHORIZATION, service);
        Ok(headers)
    }
}

#[async_trait]
impl DocumentService for HttpDocumentService {
    async fn upload(
        &self,
        name: &str,
        bytes: Vec<u8>,
        security: &SecurityHeaders,
    ) -> Result<StoredDocument, DocumentServiceError> {
        let headers = self.auth_headers(security)?;
        let url = format!("{}/documents", self.base_url);
        let client = self.client();
        let mut attempt = 0;
        loop {
            attempt += 1;
            let part = reqwest::multipart::Part::bytes(bytes.clone()).file_name(name.to_string());
            let form = reqwest::multipart::Form::new()
                .part("files", part)
                .text("classification", "PUBLIC");
            match client
                .post(&url)
                .headers(headers.clone())
                .multipart(form)
                .send()
                .await
            {
                Ok(resp) if resp.status().is_success() => {
                    let body: serde_json::Value = resp
                        .json()
                        .await
                        .map_err(|e| DocumentServiceError(format!("read body failed: {e}")))?;
                    let stored_url = body["_embedded"]["documents"][0]["_links"]["self"]["href"]
                        .as_str()
                        .ok_or_else(|| {
                            DocumentServiceError("upload response missing document url".to_string())
                        })?
                        .to_string();
                    return Ok(StoredDocument {
                        url: stored_url,
                        name: name.to_string(),
                    });
                }
                Ok(resp) => {
                    if attempt >= self.retry.max_attempts {
                        return Err(DocumentServiceError(format!(
                            "upload failed status={} url={url}",
                            resp.status()
                        )));
                    }
                }
                Err(e) => {
                    if attempt >= self.retry.max_attempts {
                        return Err(DocumentServiceError(format!("upload failed url={url}: {e}")));
                    }
                }
            }
            tokio::time::sleep(Duration::from_millis(
                self.retry.base_backoff_ms.saturating_mul(attempt as u64),
            ))
            .await;
        }
    }

    async fn fetch_binary(
        &self,
        url: &str,
        security: &SecurityHeaders,
    ) -> Result<Vec<u8>, DocumentServiceError> {
        let headers = self.auth_headers(security)?;
        let binary_url = format!("{url}/binary");
        let resp = self
            .client()
            .get(&binary_url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| DocumentServiceError(format!("fetch failed url={binary_url}: {e}")))?;
        if !resp.status().is_success() {
            return Err(DocumentServiceError(format!(
                "fetch failed status={} url={binary_url}",
                resp.status()
            )));
        }
        resp.bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| DocumentServiceError(format!("read body failed: {e}")))
    }

    async fn delete(
        &self,
        url: &str,
        security: &SecurityHeaders,
    ) -> Result<(), DocumentServiceError> {
        let headers = self.auth_headers(security)?;
        let resp = self
            .client()
            .delete(url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| DocumentServiceError(format!("delete failed url={url}: {e}")))?;
        if !resp.status().is_success() {
            return Err(DocumentServiceError(format!(
                "delete failed status={} url={url}",
                resp.status()
            )));
        }
        Ok(())
    }
}

/// In-memory document store for tests and local dev.
pub struct FakeDocumentService {
    pub files: Mutex<HashMap<String, Vec<u8>>>,
    next_id: AtomicU64,
}

impl Default for FakeDocumentService {
    fn default() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl DocumentService for FakeDocumentService {
    async fn upload(
        &self,
        name: &str,
        bytes: Vec<u8>,
        _security: &SecurityHeaders,
    ) -> Result<StoredDocument, DocumentServiceError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let url = format!("http://dm-store/documents/{id}");
        self.files.lock().await.insert(url.clone(), bytes);
        Ok(StoredDocument {
            url,
            name: name.to_string(),
        })
    }

    async fn fetch_binary(
        &self,
        url: &str,
        _security: &SecurityHeaders,
    ) -> Result<Vec<u8>, DocumentServiceError> {
        self.files
            .lock()
            .await
            .get(url)
            .cloned()
            .ok_or_else(|| DocumentServiceError(format!("document missing: {url}")))
    }

    async fn delete(
        &self,
        url: &str,
        _security: &SecurityHeaders,
    ) -> Result<(), DocumentServiceError> {
        self.files
            .lock()
            .await
            .remove(url)
            .map(|_| ())
            .ok_or_else(|| DocumentServiceError(format!("document missing: {url}")))
    }
}
