// SPDX-License-Identifier: Apache-2.0

use crate::security::TokenProvider;
use crate::store::{CaseStoreBackend, CaseStoreError};
use aip_case::{appeal_to_case, case_to_appeal, Event};
use aip_model::Appeal;
use std::sync::Arc;
use tracing::info;

/// Glue between the session appeal and the remote case record: load decodes
/// the stored case into a fresh session appeal, submit encodes the session
/// and re-syncs it from whatever the store persisted.
pub struct UpdateAppealService {
    store: Arc<dyn CaseStoreBackend>,
    tokens: Arc<dyn TokenProvider>,
}

impl UpdateAppealService {
    #[must_use]
    pub fn new(store: Arc<dyn CaseStoreBackend>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self { store, tokens }
    }

    pub async fn load_appeal(&self, user_id: &str) -> Result<Appeal, CaseStoreError> {
        let security = self.tokens.security_headers().await?;
        let details = self.store.load_or_create(user_id, &security).await?;
        info!(case_id = %details.id, state = %details.state, "appeal loaded");
        Ok(case_to_appeal(&details))
    }

    pub async fn submit_event(
        &self,
        event: Event,
        user_id: &str,
        appeal: &Appeal,
    ) -> Result<Appeal, CaseStoreError> {
        let case_id = appeal
            .ccd_case_id
            .clone()
            .ok_or_else(|| CaseStoreError("no case loaded for this session".to_string()))?;
        let case_data =
            appeal_to_case(appeal).map_err(|e| CaseStoreError(format!("encode failed: {e}")))?;
        let security = self.tokens.security_headers().await?;
        let details = self
            .store
            .update(event, user_id, &case_id, &case_data, &security)
            .await?;
        info!(case_id = %details.id, event = %event, state = %details.state, "appeal saved");
        Ok(case_to_appeal(&details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::StaticTokenProvider;
    use crate::store::FakeCaseStore;

    fn service(store: Arc<FakeCaseStore>) -> UpdateAppealService {
        UpdateAppealService::new(store, Arc::new(StaticTokenProvider::new("u", "s")))
    }

    #[tokio::test]
    async fn load_creates_a_case_on_first_visit() {
        let store = Arc::new(FakeCaseStore::default());
        let appeal = service(Arc::clone(&store)).load_appeal("user").await.unwrap();
        assert!(appeal.ccd_case_id.is_some());
        assert_eq!(appeal.appeal_status, aip_model::AppealState::AppealStarted);
        assert_eq!(store.cases.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn submit_round_trips_the_session_through_the_store() {
        let store = Arc::new(FakeCaseStore::default());
        let service = service(Arc::clone(&store));
        let mut appeal = service.load_appeal("user").await.unwrap();
        appeal.application.home_office_ref_number = Some("A1234567".to_string());

        let saved = service
            .submit_event(Event::EditAppeal, "user", &appeal)
            .await
            .unwrap();
        assert_eq!(
            saved.application.home_office_ref_number.as_deref(),
            Some("A1234567")
        );
        let persisted = store.cases.lock().await;
        let details = persisted.get("user").unwrap();
        assert_eq!(
            details.case_data.home_office_reference_number.as_deref(),
            Some("A1234567")
        );
        assert_eq!(details.state, "appealStarted");
    }

    #[tokio::test]
    async fn submitting_reasons_moves_the_state_forward() {
        let store = Arc::new(FakeCaseStore::default());
        let service = service(store);
        let appeal = service.load_appeal("user").await.unwrap();
        let saved = service
            .submit_event(Event::SubmitReasonsForAppeal, "user", &appeal)
            .await
            .unwrap();
        assert_eq!(
            saved.appeal_status,
            aip_model::AppealState::ReasonsForAppealSubmitted
        );
    }

    #[tokio::test]
    async fn submit_without_a_loaded_case_is_an_error() {
        let store = Arc::new(FakeCaseStore::default());
        let service = service(store);
        let err = service
            .submit_event(Event::EditAppeal, "user", &Appeal::default())
            .await
            .unwrap_err();
        assert!(err.0.contains("no case loaded"));
    }
}
