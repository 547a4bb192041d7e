// SPDX-License-Identifier: Apache-2.0

//! Ask for more time: a reason, optional evidence, then a time-extension
//! submit. Collected in the session until the final send.

use super::reasons::YesNoForm;
use super::{
    discard_upload, evidence_rows, page, page_session, persist, receive_upload, see_other,
    stash, validation_failed, PageSession,
};
use crate::paths::ask_for_more_time;
use crate::{AppError, AppState};
use aip_case::Event;
use aip_model::validate_required_text;
use axum::extract::{Multipart, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Form;
use serde::Deserialize;
use serde_json::json;

pub(crate) async fn get_reason(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let data = json!({ "reason": session.appeal.ask_for_more_time.reason });
    Ok(page(&session, "ask-for-more-time", data))
}

#[derive(Debug, Deserialize)]
pub(crate) struct MoreTimeReasonForm {
    #[serde(default, rename = "askForMoreTime")]
    ask_for_more_time: String,
}

pub(crate) async fn post_reason(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<MoreTimeReasonForm>,
) -> Result<Response, AppError> {
    let mut session = page_session(&state, &headers).await?;
    match validate_required_text(
        "askForMoreTime",
        &form.ask_for_more_time,
        "Enter how much time you need and why you need it",
    ) {
        Ok(reason) => {
            session.appeal.ask_for_more_time.reason = Some(reason);
            stash(&state, &session, session.appeal.clone()).await;
            Ok(see_other(&session, ask_for_more_time::EVIDENCE_YES_NO))
        }
        Err(error) => Ok(validation_failed(
            &session,
            "ask-for-more-time",
            vec![error],
            json!({ "askForMoreTime": form.ask_for_more_time }),
        )),
    }
}

pub(crate) async fn get_evidence_yes_no(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    Ok(page(&session, "supporting-evidence-more-time", json!({})))
}

pub(crate) async fn post_evidence_yes_no(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<YesNoForm>,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    match form.as_bool("Select Yes if you want to provide supporting evidence") {
        Ok(true) => Ok(see_other(&session, ask_for_more_time::EVIDENCE_UPLOAD)),
        Ok(false) => Ok(see_other(&session, ask_for_more_time::CHECK_AND_SEND)),
        Err(error) => Ok(validation_failed(
            &session,
            "supporting-evidence-more-time",
            vec![error],
            json!({}),
        )),
    }
}

fn upload_data(session: &PageSession) -> serde_json::Value {
    json!({ "evidences": evidence_rows(&session.appeal.ask_for_more_time.evidence) })
}

pub(crate) async fn get_evidence_upload(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let data = upload_data(&session);
    Ok(page(&session, "provide-supporting-evidence-more-time", data))
}

pub(crate) async fn post_upload_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut session = page_session(&state, &headers).await?;
    match receive_upload(&state, &mut session.appeal, &mut multipart).await? {
        Ok(evidence) => {
            session.appeal.ask_for_more_time.evidence.push(evidence);
            stash(&state, &session, session.appeal.clone()).await;
            Ok(see_other(&session, ask_for_more_time::EVIDENCE_UPLOAD))
        }
        Err(error) => {
            let data = upload_data(&session);
            Ok(validation_failed(
                &session,
                "provide-supporting-evidence-more-time",
                vec![error],
                data,
            ))
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteFileForm {
    #[serde(default)]
    id: String,
}

pub(crate) async fn post_delete_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<DeleteFileForm>,
) -> Result<Response, AppError> {
    let mut session = page_session(&state, &headers).await?;
    discard_upload(&state, &mut session.appeal, &form.id).await?;
    session
        .appeal
        .ask_for_more_time
        .evidence
        .retain(|e| e.file_id != form.id);
    stash(&state, &session, session.appeal.clone()).await;
    Ok(see_other(&session, ask_for_more_time::EVIDENCE_UPLOAD))
}

pub(crate) async fn get_check_and_send(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let more_time = &session.appeal.ask_for_more_time;
    let data = json!({
        "reason": more_time.reason,
        "evidences": evidence_rows(&more_time.evidence),
    });
    Ok(page(&session, "check-answer-more-time", data))
}

pub(crate) async fn post_check_and_send(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let mut session = page_session(&state, &headers).await?;
    if session.appeal.ask_for_more_time.reason.is_none() {
        return Ok(see_other(&session, ask_for_more_time::REASON));
    }
    session.appeal.ask_for_more_time.request_date =
        Some(chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string());
    persist(
        &state,
        &session,
        Event::SubmitTimeExtension,
        &session.appeal.clone(),
    )
    .await?;
    Ok(see_other(&session, ask_for_more_time::CONFIRMATION))
}

pub(crate) async fn confirmation_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let data = json!({ "title": "Your request for more time has been sent" });
    Ok(page(&session, "request-more-time-sent", data))
}
