// SPDX-License-Identifier: Apache-2.0

use crate::security::SecurityHeaders;
use crate::store::{CaseStoreBackend, CaseStoreError, RetryPolicy};
use aip_case::{CaseData, CaseDetails, Event, JOURNEY_TYPE_AIP};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::instrument;

const SERVICE_AUTHORIZATION: &str = "ServiceAuthorization";
const JURISDICTION: &str = "IA";
const CASE_TYPE: &str = "Asylum";

#[derive(Debug, Deserialize)]
struct StartEventResponse {
    token: String,
}

/// Case store client against the citizen-case REST surface: list the user's
/// cases, fetch an event token, submit the event with the new record.
pub struct HttpCaseStore {
    base_url: String,
    retry: RetryPolicy,
    timeout: Duration,
}

impl HttpCaseStore {
    #[must_use]
    pub fn new(base_url: String, retry: RetryPolicy) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            retry,
            timeout: Duration::from_secs(15),
        }
    }

    fn citizen_url(&self, user_id: &str) -> String {
        format!(
            "{}/citizens/{user_id}/jurisdictions/{JURISDICTION}/case-types/{CASE_TYPE}",
            self.base_url
        )
    }

    fn client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_else(|_| reqwest::Client::new())
    }

    fn auth_headers(&self, security: &SecurityHeaders) -> Result<HeaderMap, CaseStoreError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", security.user_token))
            .map_err(|e| CaseStoreError(format!("invalid user token header: {e}")))?;
        headers.insert(AUTHORIZATION, bearer);
        let service = HeaderValue::from_str(&security.service_token)
            .map_err(|e| CaseStoreError(format!("invalid service token header: {e}")))?;
        headers.insert(SERVICE_AUTHORIZATION, service);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    #[instrument(name = "case_store_get_with_retry", skip(self, headers))]
    async fn get_json_with_retry(
        &self,
        url: &str,
        headers: &HeaderMap,
    ) -> Result<serde_json::Value, CaseStoreError> {
        let client = self.client();
        let mut attempt = 0;
        loop {
            attempt += 1;
            match client.get(url).headers(headers.clone()).send().await {
                Ok(resp) if resp.status().is_success() => {
                    return resp
                        .json::<serde_json::Value>()
                        .await
                        .map_err(|e| CaseStoreError(format!("read body failed: {e}")));
                }
                Ok(resp) => {
                    if attempt >= self.retry.max_attempts {
                        return Err(CaseStoreError(format!(
                            "case store request failed status={} url={url}",
                            resp.status()
                        )));
                    }
                }
                Err(e) => {
                    if attempt >= self.retry.max_attempts {
                        return Err(CaseStoreError(format!(
                            "case store request failed url={url}: {e}"
                        )));
                    }
                }
            }
            tokio::time::sleep(Duration::from_millis(
                self.retry.base_backoff_ms.saturating_mul(attempt as u64),
            ))
            .await;
        }
    }

    #[instrument(name = "case_store_post_with_retry", skip(self, headers, body))]
    async fn post_json_with_retry(
        &self,
        url: &str,
        headers: &HeaderMap,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, CaseStoreError> {
        let client = self.client();
        let mut attempt = 0;
        loop {
            attempt += 1;
            match client
                .post(url)
                .headers(headers.clone())
                .json(body)
                .send()
                .await
            {
                Ok(resp) if resp.status().is_success() => {
                    return resp
                        .json::<serde_json::Value>()
                        .await
                        .map_err(|e| CaseStoreError(format!("read body failed: {e}")));
                }
                Ok(resp) => {
                    if attempt >= self.retry.max_attempts {
                        return Err(CaseStoreError(format!(
                            "case store submit failed status={} url={url}",
                            resp.status()
                        )));
                    }
                }
                Err(e) => {
                    if attempt >= self.retry.max_attempts {
                        return Err(CaseStoreError(format!(
                            "case store submit failed url={url}: {e}"
                        )));
                    }
                }
            }
            tokio::time::sleep(Duration::from_millis(
                self.retry.base_backoff_ms.saturating_mul(attempt as u64),
            ))
            .await;
        }
    }

    async fn start_event_token(
        &self,
        event: Event,
        url: &str,
        headers: &HeaderMap,
    ) -> Result<String, CaseStoreError> {
        let token_url = format!("{url}/event-triggers/{}/token", event.id());
        let raw = self.get_json_with_retry(&token_url, headers).await?;
        let start: StartEventResponse = serde_json::from_value(raw)
            .map_err(|e| CaseStoreError(format!("event token parse failed: {e}")))?;
        Ok(start.token)
    }

    fn event_body(event: Event, token: &str, data: &CaseData) -> Result<serde_json::Value, CaseStoreError> {
        let data = serde_json::to_value(data)
            .map_err(|e| CaseStoreError(format!("case data serialize failed: {e}")))?;
        Ok(json!({
            "event": { "id": event.id(), "summary": event.summary(), "description": event.summary() },
            "data": data,
            "event_token": token,
            "ignore_warning": true,
        }))
    }

    async fn create_case(
        &self,
        user_id: &str,
        headers: &HeaderMap,
    ) -> Result<CaseDetails, CaseStoreError> {
        let base = self.citizen_url(user_id);
        let token = self
            .start_event_token(Event::StartAppeal, &base, headers)
            .await?;
        let data = CaseData {
            journey_type: Some(JOURNEY_TYPE_AIP.to_string()),
            ..CaseData::default()
        };
        let body = Self::event_body(Event::StartAppeal, &token, &data)?;
        let raw = self
            .post_json_with_retry(&format!("{base}/cases"), headers, &body)
            .await?;
        serde_json::from_value(raw)
            .map_err(|e| CaseStoreError(format!("created case parse failed: {e}")))
    }
}

#[async_trait]
impl CaseStoreBackend for HttpCaseStore {
    fn backend_tag(&self) -> &'static str {
        "http_ccd"
    }

    async fn load_or_create(
        &self,
        user_id: &str,
        security: &SecurityHeaders,
    ) -> Result<CaseDetails, CaseStoreError> {
        let headers = self.auth_headers(security)?;
        let base = self.citizen_url(user_id);
        let raw = self
            .get_json_with_retry(&format!("{base}/cases"), &headers)
            .await?;
        let mut cases: Vec<CaseDetails> = serde_json::from_value(raw)
            .map_err(|e| CaseStoreError(format!("case list parse failed: {e}")))?;
        match cases.pop() {
            Some(details) => Ok(details),
            None => self.create_case(user_id, &headers).await,
        }
    }

    async fn update(
        &self,
        event: Event,
        user_id: &str,
        case_id: &str,
        case_data: &CaseData,
        security: &SecurityHeaders,
    ) -> Result<CaseDetails, CaseStoreError> {
        let headers = self.auth_headers(security)?;
        let base = format!("{}/cases/{case_id}", self.citizen_url(user_id));
        let token = self.start_event_token(event, &base, &headers).await?;
        let body = Self::event_body(event, &token, case_data)?;
        let raw = self
            .post_json_with_retry(&format!("{base}/events"), &headers, &body)
            .await?;
        serde_json::from_value(raw)
            .map_err(|e| CaseStoreError(format!("updated case parse failed: {e}")))
    }
}
