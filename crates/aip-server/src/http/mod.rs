// SPDX-License-Identifier: Apache-2.0

//! Wizard handlers. Each page module owns its GET (page model) and POST
//! (validate, mutate the session appeal, redirect or 422) pair; the shared
//! helpers here cover sessions, page responses, and save points.

pub(crate) mod clarifying;
pub(crate) mod cma;
pub(crate) mod health;
pub(crate) mod home_office;
pub(crate) mod more_time;
pub(crate) mod overview;
pub(crate) mod reasons;
pub(crate) mod viewers;

use crate::session::{new_session_key, SESSION_COOKIE};
use crate::{AppError, AppState};
use aip_case::Event;
use aip_model::{Appeal, FieldError};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde_json::{json, Value};

/// The resolved session for one request: cookie key, the case-store user the
/// session belongs to, and the working appeal copy.
pub(crate) struct PageSession {
    pub key: String,
    pub user_id: String,
    pub appeal: Appeal,
    new_session: bool,
}

pub(crate) fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| {
            let (k, v) = pair.trim().split_once('=')?;
            (k == name).then(|| v.to_string())
        })
        .next()
}

/// Finds the caller's session, or starts one by loading (or creating) their
/// case. A new session gets its cookie attached on the way out.
pub(crate) async fn page_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<PageSession, AppError> {
    if let Some(key) = cookie_value(headers, SESSION_COOKIE) {
        if let Some(session) = state.sessions.get(&key).await {
            return Ok(PageSession {
                key,
                user_id: session.user_id,
                appeal: session.appeal,
                new_session: false,
            });
        }
    }
    let user_id = state.config.dev_user_id.clone();
    let appeal = state.service.load_appeal(&user_id).await?;
    let key = new_session_key();
    state.sessions.insert(&key, &user_id, appeal.clone()).await;
    Ok(PageSession {
        key,
        user_id,
        appeal,
        new_session: true,
    })
}

fn with_session_cookie(session: &PageSession, mut response: Response) -> Response {
    if session.new_session {
        let cookie = format!("{SESSION_COOKIE}={}; Path=/; HttpOnly", session.key);
        if let Ok(value) = cookie.parse() {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }
    response
}

/// 200 with the page model the renderer consumes.
pub(crate) fn page(session: &PageSession, name: &str, data: Value) -> Response {
    let body = Json(json!({ "page": name, "data": data }));
    with_session_cookie(session, body.into_response())
}

/// 422 with field errors, echoing the submitted data for re-rendering.
pub(crate) fn validation_failed(
    session: &PageSession,
    name: &str,
    errors: Vec<FieldError>,
    data: Value,
) -> Response {
    let body = Json(json!({ "page": name, "data": data, "errors": errors }));
    with_session_cookie(session, (StatusCode::UNPROCESSABLE_ENTITY, body).into_response())
}

/// 303 to the next wizard page.
pub(crate) fn see_other(session: &PageSession, to: &str) -> Response {
    with_session_cookie(session, Redirect::to(to).into_response())
}

/// Updates the session's working copy without touching the case store. Used
/// by pages that collect answers ahead of a later submit event.
pub(crate) async fn stash(state: &AppState, session: &PageSession, appeal: Appeal) {
    state.sessions.set_appeal(&session.key, appeal).await;
}

/// A save point: pushes the appeal through the case store with `event` and
/// replaces the session copy with the decoded result.
pub(crate) async fn persist(
    state: &AppState,
    session: &PageSession,
    event: Event,
    appeal: &Appeal,
) -> Result<Appeal, AppError> {
    let saved = state.service.submit_event(event, &session.user_id, appeal).await?;
    state.sessions.set_appeal(&session.key, saved.clone()).await;
    Ok(saved)
}

/// Reads the first file out of a multipart form, validates it against the
/// allow-list and size cap, stores it, and registers the url in the appeal's
/// document map. `Ok(Err(_))` is a page-level validation failure.
pub(crate) async fn receive_upload(
    state: &AppState,
    appeal: &mut Appeal,
    multipart: &mut axum::extract::Multipart,
) -> Result<Result<aip_model::Evidence, FieldError>, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError(format!("read multipart failed: {e}")))?
    {
        if let Some(name) = field.file_name().map(str::to_string) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError(format!("read upload failed: {e}")))?;
            upload = Some((name, bytes.to_vec()));
            break;
        }
    }
    let Some((name, bytes)) = upload else {
        return Ok(Err(FieldError::new("file-upload", "Select a file")));
    };
    if let Err(message) =
        crate::uploads::validate_upload(&name, bytes.len(), state.config.max_file_size_mb)
    {
        return Ok(Err(FieldError::new("file-upload", message)));
    }

    let security = state.tokens.security_headers().await?;
    let stored = state.documents.upload(&name, bytes, &security).await?;
    let mut map = aip_case::DocumentMap::from_entries(std::mem::take(&mut appeal.document_map));
    let file_id = map.register(&stored.url);
    appeal.document_map = map.into_entries();

    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();
    Ok(Ok(aip_model::Evidence {
        file_id,
        name: stored.name,
        date_uploaded: aip_model::PartedDate::from_iso(&today),
        description: None,
        tag: None,
    }))
}

/// Deletes a stored document by its session file id and drops the map entry.
/// Unknown ids are ignored so a double-submit of the delete form is harmless.
pub(crate) async fn discard_upload(
    state: &AppState,
    appeal: &mut Appeal,
    file_id: &str,
) -> Result<(), AppError> {
    let map = aip_case::DocumentMap::from_entries(appeal.document_map.clone());
    let Some(url) = map.resolve(file_id).map(str::to_string) else {
        return Ok(());
    };
    let security = state.tokens.security_headers().await?;
    state.documents.delete(&url, &security).await?;
    appeal.document_map.retain(|entry| entry.id != file_id);
    Ok(())
}

/// Evidence rows as every evidence-list page shows them.
pub(crate) fn evidence_rows(evidences: &[aip_model::Evidence]) -> Value {
    json!(evidences
        .iter()
        .map(|e| json!({ "fileId": e.file_id, "name": e.name }))
        .collect::<Vec<_>>())
}
