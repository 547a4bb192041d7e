// SPDX-License-Identifier: Apache-2.0

use crate::security::SecurityHeaders;
use aip_case::{CaseData, CaseDetails, Event};
use async_trait::async_trait;

pub mod fake;
pub mod http;

pub use fake::FakeCaseStore;
pub use http::HttpCaseStore;

#[derive(Debug, Clone)]
pub struct CaseStoreError(pub String);

impl std::fmt::Display for CaseStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for CaseStoreError {}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_backoff_ms: 120,
        }
    }
}

/// The remote case store, seen through the two calls the wizard needs.
#[async_trait]
pub trait CaseStoreBackend: Send + Sync + 'static {
    fn backend_tag(&self) -> &'static str;

    /// Returns the user's case, starting a fresh `appealStarted` one when the
    /// user has none yet.
    async fn load_or_create(
        &self,
        user_id: &str,
        security: &SecurityHeaders,
    ) -> Result<CaseDetails, CaseStoreError>;

    /// Event-scoped update. The store owns the state machine, so the
    /// returned details carry the post-event state.
    async fn update(
        &self,
        event: Event,
        user_id: &str,
        case_id: &str,
        case_data: &CaseData,
        security: &SecurityHeaders,
    ) -> Result<CaseDetails, CaseStoreError>;
}
