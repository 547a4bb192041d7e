// SPDX-License-Identifier: Apache-2.0

//! Appeal overview: one "do this next" block derived from the case state,
//! refined by how far the current section has got, with the deadline pulled
//! from the matching tribunal direction.

use super::{page, page_session};
use crate::paths::{appeal_started, clarifying_questions, cma_requirements, reasons_for_appeal};
use crate::{AppError, AppState};
use aip_model::{Appeal, AppealState};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DoThisNext {
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

fn direction_due(appeal: &Appeal, tag: &str) -> Option<String> {
    appeal
        .directions
        .iter()
        .find(|d| d.tag == tag)
        .and_then(|d| d.date_due.clone())
}

fn started_home_office_details(appeal: &Appeal) -> bool {
    appeal.application.home_office_ref_number.is_some()
        || appeal.application.date_letter_sent.is_complete()
}

fn started_reasons(appeal: &Appeal) -> bool {
    appeal.reasons_for_appeal.application_reason.is_some()
        || !appeal.reasons_for_appeal.evidences.is_empty()
}

/// State to next-step mapping. Unknown states fall through to a neutral
/// "nothing to do" block rather than failing the page.
pub(crate) fn do_this_next(appeal: &Appeal) -> DoThisNext {
    match &appeal.appeal_status {
        AppealState::AppealStarted => DoThisNext {
            description: if started_home_office_details(appeal) {
                "Continue telling us about your appeal"
            } else {
                "Tell us about your appeal"
            },
            url: Some(appeal_started::TASK_LIST),
            deadline: None,
        },
        AppealState::AppealSubmitted | AppealState::AwaitingRespondentEvidence => DoThisNext {
            description: "Your appeal details have been sent. There is nothing to do next",
            url: None,
            deadline: None,
        },
        AppealState::AwaitingReasonsForAppeal => DoThisNext {
            description: if started_reasons(appeal) {
                "Finish telling us why you think the Home Office decision is wrong"
            } else {
                "Tell us why you think the Home Office decision is wrong"
            },
            url: Some(reasons_for_appeal::DECISION),
            deadline: direction_due(appeal, "requestReasonsForAppeal"),
        },
        AppealState::AwaitingClarifyingQuestionsAnswers => DoThisNext {
            description: "Answer the Tribunal's questions about your appeal",
            url: Some(clarifying_questions::QUESTIONS_LIST),
            deadline: direction_due(appeal, "requestClarifyingQuestions"),
        },
        AppealState::AwaitingCmaRequirements => DoThisNext {
            description: "Tell us if you will need anything at your appointment",
            url: Some(cma_requirements::TASK_LIST),
            deadline: direction_due(appeal, "requestCmaRequirements"),
        },
        AppealState::ReasonsForAppealSubmitted
        | AppealState::ClarifyingQuestionsAnswersSubmitted
        | AppealState::CmaRequirementsSubmitted
        | AppealState::CmaAdjustmentsAgreed => DoThisNext {
            description: "The Tribunal is looking at what you sent. There is nothing to do next",
            url: None,
            deadline: None,
        },
        AppealState::CmaListed => DoThisNext {
            description: "Your case management appointment details are below",
            url: None,
            deadline: None,
        },
        AppealState::Other(_) => DoThisNext {
            description: "There is nothing to do next",
            url: None,
            deadline: None,
        },
    }
}

pub(crate) async fn overview_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let appeal = &session.appeal;
    let name = [
        appeal.application.personal_details.given_names.as_deref(),
        appeal.application.personal_details.family_name.as_deref(),
    ]
    .iter()
    .flatten()
    .copied()
    .collect::<Vec<_>>()
    .join(" ");
    let data = json!({
        "name": (!name.is_empty()).then_some(name),
        "state": appeal.appeal_status.as_str(),
        "doThisNext": do_this_next(appeal),
        "askForMoreTimeInFlight": appeal.ask_for_more_time.in_flight,
    });
    Ok(page(&session, "appeal-overview", data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aip_model::Direction;

    #[test]
    fn fresh_appeal_points_at_the_task_list() {
        let next = do_this_next(&Appeal::default());
        assert_eq!(next.url, Some(appeal_started::TASK_LIST));
        assert_eq!(next.description, "Tell us about your appeal");
        assert!(next.deadline.is_none());
    }

    #[test]
    fn partially_saved_details_switch_to_the_continue_copy() {
        let mut appeal = Appeal::default();
        appeal.application.home_office_ref_number = Some("A1234567".to_string());
        let next = do_this_next(&appeal);
        assert_eq!(next.description, "Continue telling us about your appeal");
    }

    #[test]
    fn reasons_deadline_comes_from_the_matching_direction() {
        let mut appeal = Appeal::default();
        appeal.appeal_status = AppealState::AwaitingReasonsForAppeal;
        appeal.directions.push(Direction {
            tag: "requestReasonsForAppeal".to_string(),
            date_due: Some("2020-04-21".to_string()),
            ..Direction::default()
        });
        let next = do_this_next(&appeal);
        assert_eq!(next.url, Some(reasons_for_appeal::DECISION));
        assert_eq!(next.deadline.as_deref(), Some("2020-04-21"));
    }

    #[test]
    fn unknown_states_fall_back_to_nothing_to_do() {
        let mut appeal = Appeal::default();
        appeal.appeal_status = AppealState::Other("decisionPending".to_string());
        let next = do_this_next(&appeal);
        assert!(next.url.is_none());
    }
}
