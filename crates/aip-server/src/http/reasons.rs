// SPDX-License-Identifier: Apache-2.0

//! Case building: why the Home Office decision is wrong, plus optional
//! supporting evidence, submitted as one answer.

use super::{
    discard_upload, evidence_rows, page, page_session, persist, receive_upload, see_other,
    validation_failed, PageSession,
};
use crate::paths::reasons_for_appeal;
use crate::{AppError, AppState};
use aip_case::Event;
use aip_model::validate_required_text;
use axum::extract::{Multipart, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Form;
use serde::Deserialize;
use serde_json::json;

pub(crate) async fn get_decision(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let data = json!({
        "applicationReason": session.appeal.reasons_for_appeal.application_reason,
    });
    Ok(page(&session, "home-office-decision-wrong", data))
}

#[derive(Debug, Deserialize)]
pub(crate) struct DecisionForm {
    #[serde(default, rename = "applicationReason")]
    application_reason: String,
}

pub(crate) async fn post_decision(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<DecisionForm>,
) -> Result<Response, AppError> {
    let mut session = page_session(&state, &headers).await?;
    match validate_required_text(
        "applicationReason",
        &form.application_reason,
        "Enter the reasons you think the Home Office decision is wrong",
    ) {
        Ok(reason) => {
            session.appeal.reasons_for_appeal.application_reason = Some(reason);
            persist(&state, &session, Event::EditAppeal, &session.appeal.clone()).await?;
            Ok(see_other(&session, reasons_for_appeal::SUPPORTING_EVIDENCE))
        }
        Err(error) => Ok(validation_failed(
            &session,
            "home-office-decision-wrong",
            vec![error],
            json!({ "applicationReason": form.application_reason }),
        )),
    }
}

pub(crate) async fn get_supporting_evidence(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    Ok(page(&session, "supporting-evidence", json!({})))
}

#[derive(Debug, Deserialize)]
pub(crate) struct YesNoForm {
    #[serde(default)]
    pub(crate) answer: String,
}

impl YesNoForm {
    /// Radio-group answer, or a field error when neither option was picked.
    pub(crate) fn as_bool(&self, message: &str) -> Result<bool, aip_model::FieldError> {
        match self.answer.as_str() {
            "yes" => Ok(true),
            "no" => Ok(false),
            _ => Err(aip_model::FieldError::new("answer", message)),
        }
    }
}

pub(crate) async fn post_supporting_evidence(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<YesNoForm>,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    match form.as_bool("Select Yes if you want to provide supporting evidence") {
        Ok(true) => Ok(see_other(
            &session,
            reasons_for_appeal::SUPPORTING_EVIDENCE_UPLOAD,
        )),
        Ok(false) => Ok(see_other(&session, reasons_for_appeal::CHECK_AND_SEND)),
        Err(error) => Ok(validation_failed(
            &session,
            "supporting-evidence",
            vec![error],
            json!({}),
        )),
    }
}

fn upload_data(session: &PageSession) -> serde_json::Value {
    json!({ "evidences": evidence_rows(&session.appeal.reasons_for_appeal.evidences) })
}

pub(crate) async fn get_evidence_upload(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let data = upload_data(&session);
    Ok(page(&session, "provide-supporting-evidence", data))
}

pub(crate) async fn post_upload_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut session = page_session(&state, &headers).await?;
    match receive_upload(&state, &mut session.appeal, &mut multipart).await? {
        Ok(evidence) => {
            session.appeal.reasons_for_appeal.evidences.push(evidence);
            persist(&state, &session, Event::EditAppeal, &session.appeal.clone()).await?;
            Ok(see_other(
                &session,
                reasons_for_appeal::SUPPORTING_EVIDENCE_UPLOAD,
            ))
        }
        Err(error) => {
            let data = upload_data(&session);
            Ok(validation_failed(
                &session,
                "provide-supporting-evidence",
                vec![error],
                data,
            ))
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteFileForm {
    #[serde(default)]
    pub(crate) id: String,
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
        .reasons_for_appeal
        .evidences
        .retain(|e| e.file_id != form.id);
    persist(&state, &session, Event::EditAppeal, &session.appeal.clone()).await?;
    Ok(see_other(
        &session,
        reasons_for_appeal::SUPPORTING_EVIDENCE_UPLOAD,
    ))
}

pub(crate) async fn get_check_and_send(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let reasons = &session.appeal.reasons_for_appeal;
    let data = json!({
        "applicationReason": reasons.application_reason,
        "evidences": evidence_rows(&reasons.evidences),
    });
    Ok(page(&session, "reasons-check-answer", data))
}

pub(crate) async fn post_check_and_send(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let mut session = page_session(&state, &headers).await?;
    if session
        .appeal
        .reasons_for_appeal
        .application_reason
        .is_none()
    {
        return Ok(see_other(&session, reasons_for_appeal::DECISION));
    }
    session.appeal.reasons_for_appeal.upload_date =
        Some(chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string());
    persist(
        &state,
        &session,
        Event::SubmitReasonsForAppeal,
        &session.appeal.clone(),
    )
    .await?;
    Ok(see_other(&session, reasons_for_appeal::CONFIRMATION))
}

pub(crate) async fn confirmation_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let data = json!({ "title": "We've got your answer" });
    Ok(page(&session, "answer-sent", data))
}
