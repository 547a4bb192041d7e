// SPDX-License-Identifier: Apache-2.0

//! Home Office details: reference number, letter-sent date with the late
//! branch, and the late-appeal reason with optional evidence.

use super::{
    discard_upload, page, page_session, persist, receive_upload, see_other, validation_failed,
    PageSession,
};
use crate::config::DAYS_TO_APPEAL;
use crate::paths::appeal_started;
use crate::{AppError, AppState};
use aip_case::Event;
use aip_model::{
    validate_home_office_reference, validate_parted_date, validate_required_text, DateRule,
    LateAppeal, PartedDate,
};
use axum::extract::{Multipart, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Form;
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::json;

pub(crate) async fn task_list_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let application = &session.appeal.application;
    let details_done =
        application.home_office_ref_number.is_some() && application.date_letter_sent.is_complete();
    Ok(page(
        &session,
        "task-list",
        json!({
            "homeOfficeDetailsCompleted": details_done,
            "isAppealLate": application.is_appeal_late,
        }),
    ))
}

fn details_data(session: &PageSession) -> serde_json::Value {
    json!({
        "homeOfficeRefNumber": session.appeal.application.home_office_ref_number,
    })
}

pub(crate) async fn get_reference_number(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let data = details_data(&session);
    Ok(page(&session, "home-office-reference-number", data))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReferenceNumberForm {
    #[serde(default, rename = "homeOfficeRefNumber")]
    home_office_ref_number: String,
}

pub(crate) async fn post_reference_number(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ReferenceNumberForm>,
) -> Result<Response, AppError> {
    let mut session = page_session(&state, &headers).await?;
    match validate_home_office_reference(&form.home_office_ref_number) {
        Ok(reference) => {
            session.appeal.application.home_office_ref_number = Some(reference);
            persist(&state, &session, Event::EditAppeal, &session.appeal.clone()).await?;
            Ok(see_other(&session, appeal_started::LETTER_SENT))
        }
        Err(error) => Ok(validation_failed(
            &session,
            "home-office-reference-number",
            vec![error],
            json!({ "homeOfficeRefNumber": form.home_office_ref_number }),
        )),
    }
}

fn letter_sent_data(date: &PartedDate) -> serde_json::Value {
    json!({ "day": date.day, "month": date.month, "year": date.year })
}

pub(crate) async fn get_letter_sent(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let data = letter_sent_data(&session.appeal.application.date_letter_sent);
    Ok(page(&session, "date-letter-sent", data))
}

#[derive(Debug, Deserialize)]
pub(crate) struct PartedDateForm {
    #[serde(default)]
    day: String,
    #[serde(default)]
    month: String,
    #[serde(default)]
    year: String,
}

impl PartedDateForm {
    pub(crate) fn into_date(self) -> PartedDate {
        PartedDate::new(self.year, self.month, self.day)
    }
}

pub(crate) async fn post_letter_sent(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<PartedDateForm>,
) -> Result<Response, AppError> {
    let mut session = page_session(&state, &headers).await?;
    let date = form.into_date();
    if let Err(errors) = validate_parted_date(&date, DateRule::NotInFuture) {
        let data = letter_sent_data(&date);
        return Ok(validation_failed(&session, "date-letter-sent", errors, data));
    }
    // validate_parted_date proved the parts form a real calendar date
    let Some(sent) = date.as_naive_date() else {
        return Err(AppError("letter-sent date failed to parse".to_string()));
    };
    let is_late = Utc::now().date_naive() > sent + Duration::days(DAYS_TO_APPEAL);
    session.appeal.application.date_letter_sent = date;
    session.appeal.application.is_appeal_late = is_late;
    if !is_late {
        session.appeal.application.late_appeal = None;
    }
    persist(&state, &session, Event::EditAppeal, &session.appeal.clone()).await?;
    let next = if is_late {
        appeal_started::APPEAL_LATE
    } else {
        appeal_started::TASK_LIST
    };
    Ok(see_other(&session, next))
}

fn appeal_late_data(session: &PageSession) -> serde_json::Value {
    let late = session.appeal.application.late_appeal.as_ref();
    json!({
        "appealLateReason": late.and_then(|l| l.reason.clone()),
        "evidence": late
            .and_then(|l| l.evidence.as_ref())
            .map(|e| json!({ "fileId": e.file_id, "name": e.name })),
    })
}

pub(crate) async fn get_appeal_late(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let data = appeal_late_data(&session);
    Ok(page(&session, "late-appeal", data))
}

#[derive(Debug, Deserialize)]
pub(crate) struct AppealLateForm {
    #[serde(default, rename = "appealLateReason")]
    appeal_late_reason: String,
}

pub(crate) async fn post_appeal_late(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<AppealLateForm>,
) -> Result<Response, AppError> {
    let mut session = page_session(&state, &headers).await?;
    match validate_required_text(
        "appealLateReason",
        &form.appeal_late_reason,
        "Enter the reason your appeal is late",
    ) {
        Ok(reason) => {
            let late = session
                .appeal
                .application
                .late_appeal
                .get_or_insert_with(LateAppeal::default);
            late.reason = Some(reason);
            persist(&state, &session, Event::EditAppeal, &session.appeal.clone()).await?;
            Ok(see_other(&session, appeal_started::TASK_LIST))
        }
        Err(error) => Ok(validation_failed(
            &session,
            "late-appeal",
            vec![error],
            json!({ "appealLateReason": form.appeal_late_reason }),
        )),
    }
}

pub(crate) async fn post_upload_evidence(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut session = page_session(&state, &headers).await?;
    match receive_upload(&state, &mut session.appeal, &mut multipart).await? {
        Ok(evidence) => {
            let late = session
                .appeal
                .application
                .late_appeal
                .get_or_insert_with(LateAppeal::default);
            late.evidence = Some(evidence);
            persist(&state, &session, Event::EditAppeal, &session.appeal.clone()).await?;
            Ok(see_other(&session, appeal_started::APPEAL_LATE))
        }
        Err(error) => {
            let data = appeal_late_data(&session);
            Ok(validation_failed(&session, "late-appeal", vec![error], data))
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteFileForm {
    #[serde(default)]
    pub(crate) id: String,
}

pub(crate) async fn post_delete_evidence(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<DeleteFileForm>,
) -> Result<Response, AppError> {
    let mut session = page_session(&state, &headers).await?;
    discard_upload(&state, &mut session.appeal, &form.id).await?;
    if let Some(late) = session.appeal.application.late_appeal.as_mut() {
        if late.evidence.as_ref().is_some_and(|e| e.file_id == form.id) {
            late.evidence = None;
        }
    }
    persist(&state, &session, Event::EditAppeal, &session.appeal.clone()).await?;
    Ok(see_other(&session, appeal_started::APPEAL_LATE))
}
