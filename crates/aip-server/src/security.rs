// SPDX-License-Identifier: Apache-2.0

use crate::store::CaseStoreError;
use async_trait::async_trait;

/// The two tokens every call to the case or document store must carry: the
/// signed-in user's bearer token and the service-to-service token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityHeaders {
    pub user_token: String,
    pub service_token: String,
}

/// Token acquisition seam. The production deployment plugs an identity
/// provider in here; tests and local dev use [`StaticTokenProvider`].
#[async_trait]
pub trait TokenProvider: Send + Sync + 'static {
    async fn security_headers(&self) -> Result<SecurityHeaders, CaseStoreError>;
}

pub struct StaticTokenProvider {
    headers: SecurityHeaders,
}

impl StaticTokenProvider {
    #[must_use]
    pub fn new(user_token: impl Into<String>, service_token: impl Into<String>) -> Self {
        Self {
            headers: SecurityHeaders {
                user_token: user_token.into(),
                service_token: service_token.into(),
            },
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn security_headers(&self) -> Result<SecurityHeaders, CaseStoreError> {
        Ok(self.headers.clone())
    }
}
