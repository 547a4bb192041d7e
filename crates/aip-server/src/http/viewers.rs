// SPDX-License-Identifier: Apache-2.0

//! Read-only detail pages, plus the document passthrough that streams a
//! stored file back by its session key.

use super::{evidence_rows, page, page_session, see_other};
use crate::paths::common;
use crate::{AppError, AppState};
use aip_case::DocumentMap;
use aip_model::{Appeal, Evidence};
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub(crate) async fn appeal_details_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let application = &session.appeal.application;
    let personal = &application.personal_details;
    let data = json!({
        "homeOfficeRefNumber": application.home_office_ref_number,
        "dateLetterSent": application.date_letter_sent.to_iso(),
        "name": personal.given_names,
        "familyName": personal.family_name,
        "dateOfBirth": personal.dob.to_iso(),
        "nationality": personal.nationality,
        "address": personal.address.as_ref().map(|a| json!({
            "line1": a.line1,
            "line2": a.line2,
            "city": a.city,
            "county": a.county,
            "postcode": a.postcode,
        })),
        "contactEmail": application.contact_details.email,
        "contactPhone": application.contact_details.phone,
    });
    Ok(page(&session, "appeal-details", data))
}

pub(crate) async fn reasons_for_appeal_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let reasons = &session.appeal.reasons_for_appeal;
    let data = json!({
        "applicationReason": reasons.application_reason,
        "evidences": evidence_rows(&reasons.evidences),
        "uploadDate": reasons.upload_date,
    });
    Ok(page(&session, "appeal-reasons", data))
}

pub(crate) async fn cma_requirements_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let cma = &session.appeal.cma_requirements;
    let data = json!({
        "interpreter": cma.access_needs.is_interpreter_services_needed,
        "languages": cma.access_needs.interpreter_language.iter()
            .map(|l| json!({ "language": l.language, "dialect": l.language_dialect }))
            .collect::<Vec<_>>(),
        "stepFreeAccess": cma.access_needs.is_hearing_room_needed,
        "hearingLoop": cma.access_needs.is_hearing_loop_needed,
        "multimediaEvidence": cma.other_needs.multimedia_evidence,
        "singleSexAppointment": cma.other_needs.single_sex_appointment,
        "privateAppointment": cma.other_needs.private_appointment,
        "healthConditions": cma.other_needs.health_conditions,
        "pastExperiences": cma.other_needs.past_experiences,
        "anythingElse": cma.other_needs.anything_else,
        "datesToAvoid": cma.dates_to_avoid.dates.iter()
            .map(|d| json!({ "date": d.date.to_string(), "reason": d.reason }))
            .collect::<Vec<_>>(),
    });
    Ok(page(&session, "your-appointment-needs", data))
}

pub(crate) async fn clarifying_answers_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let answers = session
        .appeal
        .clarifying_questions_answers
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
    Ok(page(&session, "your-answers", json!({ "answers": answers })))
}

pub(crate) async fn home_office_documents_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let documents = session
        .appeal
        .respondent_documents
        .iter()
        .map(|d| {
            json!({
                "dateUploaded": d.date_uploaded,
                "fileId": d.evidence.file_id,
                "name": d.evidence.name,
            })
        })
        .collect::<Vec<_>>();
    Ok(page(
        &session,
        "home-office-documents",
        json!({ "documents": documents }),
    ))
}

/// Streams the stored binary for a session file key. Keys that the session's
/// document map does not know redirect to the not-found page instead of
/// leaking whether the url space exists.
pub(crate) async fn view_document_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let map = DocumentMap::from_entries(session.appeal.document_map.clone());
    let Some(url) = map.resolve(&id).map(str::to_string) else {
        return Ok(see_other(&session, common::FILE_NOT_FOUND));
    };
    let security = state.tokens.security_headers().await?;
    let bytes = state.documents.fetch_binary(&url, &security).await?;
    let content_type = stored_filename(&session.appeal, &id)
        .map(content_type_for)
        .unwrap_or("application/octet-stream");
    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}

/// The display name the session recorded for a file key, from whichever
/// evidence collection it lives in.
fn stored_filename<'a>(appeal: &'a Appeal, file_id: &str) -> Option<&'a str> {
    let matches = |e: &'a Evidence| (e.file_id == file_id).then_some(e.name.as_str());
    let in_answers = |answers: &'a Option<Vec<aip_model::ClarifyingQuestion>>| {
        answers
            .as_deref()
            .unwrap_or_default()
            .iter()
            .flat_map(|q| q.value.supporting_evidence.as_deref().unwrap_or_default())
            .find_map(matches)
    };
    appeal
        .application
        .late_appeal
        .as_ref()
        .and_then(|late| late.evidence.as_ref())
        .and_then(matches)
        .or_else(|| appeal.reasons_for_appeal.evidences.iter().find_map(matches))
        .or_else(|| in_answers(&appeal.draft_clarifying_questions_answers))
        .or_else(|| in_answers(&appeal.clarifying_questions_answers))
        .or_else(|| appeal.ask_for_more_time.evidence.iter().find_map(matches))
        .or_else(|| {
            appeal
                .respondent_documents
                .iter()
                .find_map(|d| matches(&d.evidence))
        })
}

fn content_type_for(name: &str) -> &'static str {
    let ext = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
    match ext.to_ascii_lowercase().as_str() {
        "bmp" => "image/bmp",
        "gif" => "image/gif",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "svg" => "image/svg+xml",
        "tif" | "tiff" => "image/tiff",
        "pdf" => "application/pdf",
        "csv" => "text/csv",
        "txt" => "text/plain",
        "rtf" => "application/rtf",
        "doc" | "dot" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" | "xlt" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" | "pot" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        _ => "application/octet-stream",
    }
}

pub(crate) async fn file_not_found_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    Ok(page(
        &session,
        "file-not-found",
        json!({ "title": "The file you requested could not be found" }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aip_model::{LateAppeal, ReasonsForAppeal};

    #[test]
    fn content_type_follows_the_stored_extension() {
        assert_eq!(content_type_for("scan.PDF"), "application/pdf");
        assert_eq!(content_type_for("photo.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("notes.txt"), "text/plain");
        assert_eq!(content_type_for("no-extension"), "application/octet-stream");
        assert_eq!(content_type_for("archive.zip"), "application/octet-stream");
    }

    #[test]
    fn filename_is_found_across_the_evidence_collections() {
        let mut appeal = Appeal::default();
        appeal.application.late_appeal = Some(LateAppeal {
            reason: Some("post went missing".to_string()),
            evidence: Some(Evidence {
                file_id: "late-1".to_string(),
                name: "letter.png".to_string(),
                ..Evidence::default()
            }),
        });
        appeal.reasons_for_appeal = ReasonsForAppeal {
            evidences: vec![Evidence {
                file_id: "reason-1".to_string(),
                name: "statement.pdf".to_string(),
                ..Evidence::default()
            }],
            ..ReasonsForAppeal::default()
        };

        assert_eq!(stored_filename(&appeal, "late-1"), Some("letter.png"));
        assert_eq!(stored_filename(&appeal, "reason-1"), Some("statement.pdf"));
        assert_eq!(stored_filename(&appeal, "missing"), None);
    }
}
