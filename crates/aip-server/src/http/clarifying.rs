// SPDX-License-Identifier: Apache-2.0

//! Clarifying questions sent by the tribunal. Answers accumulate as drafts
//! in the session and only reach the case record on the final submit, so
//! every page here works on the draft list.

use super::{
    discard_upload, evidence_rows, page, page_session, persist, receive_upload, see_other,
    stash, validation_failed, PageSession,
};
use crate::paths::clarifying_questions;
use crate::{AppError, AppState};
use aip_case::Event;
use aip_model::{validate_required_text, ClarifyingQuestion};
use axum::extract::{Multipart, Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Form;
use serde::Deserialize;
use serde_json::json;

/// 1-based page index into the draft list, as carried in the url.
fn question_at(session: &PageSession, id: &str) -> Option<(usize, ClarifyingQuestion)> {
    let index = id.parse::<usize>().ok()?.checked_sub(1)?;
    let question = session
        .appeal
        .draft_clarifying_questions_answers
        .as_ref()?
        .get(index)?
        .clone();
    Some((index, question))
}

fn supporting_evidence_path(id: &str) -> String {
    clarifying_questions::SUPPORTING_EVIDENCE.replace(":id", id)
}

fn evidence_upload_path(id: &str) -> String {
    clarifying_questions::SUPPORTING_EVIDENCE_UPLOAD.replace(":id", id)
}

pub(crate) async fn questions_list_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let questions = session
        .appeal
        .draft_clarifying_questions_answers
        .as_deref()
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(i, q)| {
            json!({
                "id": i + 1,
                "question": q.value.question,
                "answered": q.value.answer.as_deref().is_some_and(|a| !a.is_empty()),
            })
        })
        .collect::<Vec<_>>();
    Ok(page(
        &session,
        "questions-about-appeal",
        json!({ "questions": questions }),
    ))
}

pub(crate) async fn get_question(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let Some((_, question)) = question_at(&session, &id) else {
        return Ok(see_other(&session, clarifying_questions::QUESTIONS_LIST));
    };
    let data = json!({
        "id": id,
        "question": question.value.question,
        "answer": question.value.answer,
    });
    Ok(page(&session, "question", data))
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnswerForm {
    #[serde(default)]
    answer: String,
}

pub(crate) async fn post_question(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Form(form): Form<AnswerForm>,
) -> Result<Response, AppError> {
    let mut session = page_session(&state, &headers).await?;
    let Some((index, question)) = question_at(&session, &id) else {
        return Ok(see_other(&session, clarifying_questions::QUESTIONS_LIST));
    };
    match validate_required_text("answer", &form.answer, "Enter your answer") {
        Ok(answer) => {
            if let Some(drafts) = session.appeal.draft_clarifying_questions_answers.as_mut() {
                if let Some(draft) = drafts.get_mut(index) {
                    draft.value.answer = Some(answer);
                }
            }
            stash(&state, &session, session.appeal.clone()).await;
            Ok(see_other(&session, &supporting_evidence_path(&id)))
        }
        Err(error) => Ok(validation_failed(
            &session,
            "question",
            vec![error],
            json!({
                "id": id,
                "question": question.value.question,
                "answer": form.answer,
            }),
        )),
    }
}

pub(crate) async fn get_supporting_evidence(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    if question_at(&session, &id).is_none() {
        return Ok(see_other(&session, clarifying_questions::QUESTIONS_LIST));
    }
    Ok(page(
        &session,
        "clarifying-supporting-evidence",
        json!({ "id": id }),
    ))
}

pub(crate) async fn post_supporting_evidence(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Form(form): Form<super::reasons::YesNoForm>,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    if question_at(&session, &id).is_none() {
        return Ok(see_other(&session, clarifying_questions::QUESTIONS_LIST));
    }
    match form.as_bool("Select Yes if you want to provide supporting evidence") {
        Ok(true) => Ok(see_other(&session, &evidence_upload_path(&id))),
        Ok(false) => Ok(see_other(&session, clarifying_questions::QUESTIONS_LIST)),
        Err(error) => Ok(validation_failed(
            &session,
            "clarifying-supporting-evidence",
            vec![error],
            json!({ "id": id }),
        )),
    }
}

fn upload_data(session: &PageSession, index: usize, id: &str) -> serde_json::Value {
    let evidences = session
        .appeal
        .draft_clarifying_questions_answers
        .as_deref()
        .unwrap_or_default()
        .get(index)
        .and_then(|q| q.value.supporting_evidence.as_deref())
        .unwrap_or_default();
    json!({ "id": id, "evidences": evidence_rows(evidences) })
}

pub(crate) async fn get_evidence_upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let Some((index, _)) = question_at(&session, &id) else {
        return Ok(see_other(&session, clarifying_questions::QUESTIONS_LIST));
    };
    let data = upload_data(&session, index, &id);
    Ok(page(&session, "clarifying-upload-evidence", data))
}

pub(crate) async fn post_upload_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut session = page_session(&state, &headers).await?;
    let Some((index, _)) = question_at(&session, &id) else {
        return Ok(see_other(&session, clarifying_questions::QUESTIONS_LIST));
    };
    match receive_upload(&state, &mut session.appeal, &mut multipart).await? {
        Ok(evidence) => {
            if let Some(draft) = session
                .appeal
                .draft_clarifying_questions_answers
                .as_mut()
                .and_then(|drafts| drafts.get_mut(index))
            {
                draft
                    .value
                    .supporting_evidence
                    .get_or_insert_with(Vec::new)
                    .push(evidence);
            }
            stash(&state, &session, session.appeal.clone()).await;
            Ok(see_other(&session, &evidence_upload_path(&id)))
        }
        Err(error) => {
            let data = upload_data(&session, index, &id);
            Ok(validation_failed(
                &session,
                "clarifying-upload-evidence",
                vec![error],
                data,
            ))
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteEvidenceForm {
    #[serde(default)]
    id: String,
}

pub(crate) async fn post_delete_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(question_id): Path<String>,
    Form(form): Form<DeleteEvidenceForm>,
) -> Result<Response, AppError> {
    let mut session = page_session(&state, &headers).await?;
    let Some((index, _)) = question_at(&session, &question_id) else {
        return Ok(see_other(&session, clarifying_questions::QUESTIONS_LIST));
    };
    discard_upload(&state, &mut session.appeal, &form.id).await?;
    if let Some(evidence) = session
        .appeal
        .draft_clarifying_questions_answers
        .as_mut()
        .and_then(|drafts| drafts.get_mut(index))
        .and_then(|draft| draft.value.supporting_evidence.as_mut())
    {
        evidence.retain(|e| e.file_id != form.id);
    }
    stash(&state, &session, session.appeal.clone()).await;
    Ok(see_other(&session, &evidence_upload_path(&question_id)))
}

pub(crate) async fn get_check_and_send(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let answers = session
        .appeal
        .draft_clarifying_questions_answers
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|q| {
            json!({
                "question": q.value.question,
                "answer": q.value.answer,
                "evidences": evidence_rows(q.value.supporting_evidence.as_deref().unwrap_or_default()),
            })
        })
        .collect::<Vec<_>>();
    Ok(page(
        &session,
        "check-your-answers",
        json!({ "answers": answers }),
    ))
}

pub(crate) async fn post_check_and_send(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let mut session = page_session(&state, &headers).await?;
    let Some(drafts) = session.appeal.draft_clarifying_questions_answers.clone() else {
        return Ok(see_other(&session, clarifying_questions::QUESTIONS_LIST));
    };
    session.appeal.clarifying_questions_answers = Some(drafts);
    persist(
        &state,
        &session,
        Event::SubmitClarifyingQuestionAnswers,
        &session.appeal.clone(),
    )
    .await?;
    Ok(see_other(&session, clarifying_questions::CONFIRMATION))
}

pub(crate) async fn confirmation_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let data = json!({ "title": "Your answers have been sent" });
    Ok(page(&session, "clarifying-questions-sent", data))
}
