// SPDX-License-Identifier: Apache-2.0

use crate::security::SecurityHeaders;
use crate::store::{CaseStoreBackend, CaseStoreError};
use aip_case::{CaseData, CaseDetails, Event, JOURNEY_TYPE_AIP};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// In-memory case store for tests and local dev. Mirrors the remote store's
/// state machine for the submit events the wizard fires.
pub struct FakeCaseStore {
    pub cases: Mutex<HashMap<String, CaseDetails>>,
    pub update_calls: AtomicU64,
    pub fail_updates: bool,
    next_id: AtomicU64,
}

impl Default for FakeCaseStore {
    fn default() -> Self {
        Self {
            cases: Mutex::new(HashMap::new()),
            update_calls: AtomicU64::new(0),
            fail_updates: false,
            next_id: AtomicU64::new(1),
        }
    }
}

impl FakeCaseStore {
    pub async fn seed(&self, user_id: &str, details: CaseDetails) {
        self.cases.lock().await.insert(user_id.to_string(), details);
    }

    fn state_after(event: Event, current: &str) -> String {
        match event {
            Event::SubmitAppeal => "appealSubmitted".to_string(),
            Event::SubmitReasonsForAppeal => "reasonsForAppealSubmitted".to_string(),
            Event::SubmitClarifyingQuestionAnswers => {
                "clarifyingQuestionsAnswersSubmitted".to_string()
            }
            Event::SubmitCmaRequirements => "cmaRequirementsSubmitted".to_string(),
            _ => current.to_string(),
        }
    }
}

#[async_trait]
impl CaseStoreBackend for FakeCaseStore {
    fn backend_tag(&self) -> &'static str {
        "fake"
    }

    async fn load_or_create(
        &self,
        user_id: &str,
        _security: &SecurityHeaders,
    ) -> Result<CaseDetails, CaseStoreError> {
        let mut cases = self.cases.lock().await;
        if let Some(details) = cases.get(user_id) {
            return Ok(details.clone());
        }
        let details = CaseDetails {
            id: self.next_id.fetch_add(1, Ordering::Relaxed).to_string(),
            state: "appealStarted".to_string(),
            case_data: CaseData {
                journey_type: Some(JOURNEY_TYPE_AIP.to_string()),
                ..CaseData::default()
            },
        };
        cases.insert(user_id.to_string(), details.clone());
        Ok(details)
    }

    async fn update(
        &self,
        event: Event,
        user_id: &str,
        case_id: &str,
        case_data: &CaseData,
        _security: &SecurityHeaders,
    ) -> Result<CaseDetails, CaseStoreError> {
        self.update_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_updates {
            return Err(CaseStoreError("case store unavailable".to_string()));
        }
        let mut cases = self.cases.lock().await;
        let details = cases
            .get_mut(user_id)
            .filter(|d| d.id == case_id)
            .ok_or_else(|| CaseStoreError(format!("no case {case_id} for user {user_id}")))?;
        let mut next = case_data.clone();
        // Tribunal-owned collections never appear in a wizard payload; keep
        // whatever the record already holds, as the remote store does.
        let prior = &details.case_data;
        if next.directions.is_none() {
            next.directions = prior.directions.clone();
        }
        if next.respondent_documents.is_none() {
            next.respondent_documents = prior.respondent_documents.clone();
        }
        if next.time_extensions.is_none() {
            next.time_extensions = prior.time_extensions.clone();
        }
        if next.draft_clarifying_questions_answers.is_none() {
            next.draft_clarifying_questions_answers =
                prior.draft_clarifying_questions_answers.clone();
        }
        if matches!(event, Event::SubmitClarifyingQuestionAnswers) {
            next.draft_clarifying_questions_answers = None;
        }
        details.case_data = next;
        details.state = Self::state_after(event, &details.state);
        Ok(details.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aip_case::{IdValue, WireClarifyingAnswer, WireDirection, WireTimeExtension};

    fn security() -> SecurityHeaders {
        SecurityHeaders {
            user_token: "user-token".to_string(),
            service_token: "service-token".to_string(),
        }
    }

    fn reasons_direction() -> IdValue<WireDirection> {
        IdValue::new(WireDirection {
            tag: "requestReasonsForAppeal".to_string(),
            date_sent: Some("2026-08-01".to_string()),
            date_due: Some("2026-08-29".to_string()),
            ..WireDirection::default()
        })
    }

    #[tokio::test]
    async fn edit_save_keeps_tribunal_owned_collections() {
        let store = FakeCaseStore::default();
        let sec = security();
        store
            .seed(
                "user-1",
                CaseDetails {
                    id: "41".to_string(),
                    state: "awaitingReasonsForAppeal".to_string(),
                    case_data: CaseData {
                        journey_type: Some(JOURNEY_TYPE_AIP.to_string()),
                        directions: Some(vec![reasons_direction()]),
                        time_extensions: Some(vec![IdValue::new(WireTimeExtension {
                            status: Some("granted".to_string()),
                            ..WireTimeExtension::default()
                        })]),
                        ..CaseData::default()
                    },
                },
            )
            .await;

        // A wizard save never carries the tribunal's collections.
        let payload = CaseData {
            journey_type: Some(JOURNEY_TYPE_AIP.to_string()),
            home_office_reference_number: Some("A1234567".to_string()),
            ..CaseData::default()
        };
        let saved = store
            .update(Event::EditAppeal, "user-1", "41", &payload, &sec)
            .await
            .expect("update");

        assert_eq!(
            saved.case_data.home_office_reference_number.as_deref(),
            Some("A1234567")
        );
        assert_eq!(saved.case_data.directions.as_deref().map(<[_]>::len), Some(1));
        assert_eq!(
            saved.case_data.time_extensions.as_deref().map(<[_]>::len),
            Some(1)
        );
    }

    #[tokio::test]
    async fn submitting_answers_clears_the_stored_drafts() {
        let store = FakeCaseStore::default();
        let sec = security();
        store
            .seed(
                "user-1",
                CaseDetails {
                    id: "42".to_string(),
                    state: "awaitingClarifyingQuestionsAnswers".to_string(),
                    case_data: CaseData {
                        draft_clarifying_questions_answers: Some(vec![IdValue::new(
                            WireClarifyingAnswer {
                                question: "Why now?".to_string(),
                                ..WireClarifyingAnswer::default()
                            },
                        )]),
                        ..CaseData::default()
                    },
                },
            )
            .await;

        let payload = CaseData {
            clarifying_questions_answers: Some(vec![IdValue::new(WireClarifyingAnswer {
                question: "Why now?".to_string(),
                answer: Some("Because circumstances changed".to_string()),
                ..WireClarifyingAnswer::default()
            })]),
            ..CaseData::default()
        };
        let saved = store
            .update(
                Event::SubmitClarifyingQuestionAnswers,
                "user-1",
                "42",
                &payload,
                &sec,
            )
            .await
            .expect("update");

        assert_eq!(saved.state, "clarifyingQuestionsAnswersSubmitted");
        assert!(saved.case_data.draft_clarifying_questions_answers.is_none());
        assert_eq!(
            saved
                .case_data
                .clarifying_questions_answers
                .as_deref()
                .map(<[_]>::len),
            Some(1)
        );
    }
}
