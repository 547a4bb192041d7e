#![forbid(unsafe_code)]
//! HTTP server for the appeal-in-person wizard.
//!
//! Pages are returned as structured JSON models for the external renderer;
//! POSTs validate the form, mutate the session appeal, persist through the
//! case store where a save point exists, and answer `303 See Other` on
//! success or `422` with field errors for re-rendering.

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::atomic::{AtomicBool, AtomicU64};
use std::sync::Arc;

pub mod config;
pub mod documents;
mod http;
mod middleware;
pub mod paths;
pub mod security;
pub mod service;
pub mod session;
pub mod store;
pub mod uploads;

pub use config::ServerConfig;
pub use documents::{DocumentService, FakeDocumentService, HttpDocumentService};
pub use security::{SecurityHeaders, StaticTokenProvider, TokenProvider};
pub use service::UpdateAppealService;
pub use session::SessionRegistry;
pub use store::{CaseStoreBackend, FakeCaseStore, HttpCaseStore, RetryPolicy};

pub const CRATE_NAME: &str = "aip-server";

/// Handler-level failure: anything the page cannot recover from locally.
/// Validation problems never come through here; they re-render as 422s.
#[derive(Debug)]
pub struct AppError(pub String);

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for AppError {}

impl From<store::CaseStoreError> for AppError {
    fn from(err: store::CaseStoreError) -> Self {
        Self(err.0)
    }
}
impl From<documents::DocumentServiceError> for AppError {
    fn from(err: documents::DocumentServiceError) -> Self {
        Self(err.0)
    }
}
impl From<aip_case::MappingError> for AppError {
    fn from(err: aip_case::MappingError) -> Self {
        Self(err.0)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "code": "internalServerError",
                "message": "Sorry, there is a problem with the service",
            })),
        )
            .into_response()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CaseStoreBackend>,
    pub service: Arc<UpdateAppealService>,
    pub documents: Arc<dyn DocumentService>,
    pub tokens: Arc<dyn TokenProvider>,
    pub sessions: Arc<SessionRegistry>,
    pub config: ServerConfig,
    /// Cleared when shutdown starts so readiness flips before the drain
    /// window ends and the load balancer stops routing here.
    pub accepting_requests: Arc<AtomicBool>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(
        store: Arc<dyn CaseStoreBackend>,
        documents: Arc<dyn DocumentService>,
        tokens: Arc<dyn TokenProvider>,
        config: ServerConfig,
    ) -> Self {
        Self {
            service: Arc::new(UpdateAppealService::new(
                Arc::clone(&store),
                Arc::clone(&tokens),
            )),
            store,
            documents,
            tokens,
            sessions: Arc::new(SessionRegistry::new(config.session_ttl)),
            config,
            accepting_requests: Arc::new(AtomicBool::new(true)),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    use paths::{appeal_started, ask_for_more_time, clarifying_questions, cma_requirements, common, reasons_for_appeal};

    let max_upload_bytes = (state.config.max_file_size_mb as usize + 1) * 1024 * 1024;
    Router::new()
        .route(common::HEALTH, get(http::health::health_handler))
        .route(common::LIVENESS, get(http::health::liveness_handler))
        .route(common::READINESS, get(http::health::readiness_handler))
        .route(common::OVERVIEW, get(http::overview::overview_handler))
        .route(common::FILE_NOT_FOUND, get(http::viewers::file_not_found_handler))
        .route(
            appeal_started::TASK_LIST,
            get(http::home_office::task_list_handler),
        )
        .route(
            appeal_started::DETAILS,
            get(http::home_office::get_reference_number).post(http::home_office::post_reference_number),
        )
        .route(
            appeal_started::LETTER_SENT,
            get(http::home_office::get_letter_sent).post(http::home_office::post_letter_sent),
        )
        .route(
            appeal_started::APPEAL_LATE,
            get(http::home_office::get_appeal_late).post(http::home_office::post_appeal_late),
        )
        .route(
            appeal_started::UPLOAD_EVIDENCE,
            post(http::home_office::post_upload_evidence),
        )
        .route(
            appeal_started::DELETE_EVIDENCE,
            post(http::home_office::post_delete_evidence),
        )
        .route(
            reasons_for_appeal::DECISION,
            get(http::reasons::get_decision).post(http::reasons::post_decision),
        )
        .route(
            reasons_for_appeal::SUPPORTING_EVIDENCE,
            get(http::reasons::get_supporting_evidence).post(http::reasons::post_supporting_evidence),
        )
        .route(
            reasons_for_appeal::SUPPORTING_EVIDENCE_UPLOAD,
            get(http::reasons::get_evidence_upload),
        )
        .route(
            reasons_for_appeal::SUPPORTING_EVIDENCE_UPLOAD_FILE,
            post(http::reasons::post_upload_file),
        )
        .route(
            reasons_for_appeal::SUPPORTING_EVIDENCE_DELETE_FILE,
            post(http::reasons::post_delete_file),
        )
        .route(
            reasons_for_appeal::CHECK_AND_SEND,
            get(http::reasons::get_check_and_send).post(http::reasons::post_check_and_send),
        )
        .route(
            reasons_for_appeal::CONFIRMATION,
            get(http::reasons::confirmation_handler),
        )
        .route(
            clarifying_questions::QUESTIONS_LIST,
            get(http::clarifying::questions_list_handler),
        )
        .route(
            clarifying_questions::QUESTION,
            get(http::clarifying::get_question).post(http::clarifying::post_question),
        )
        .route(
            clarifying_questions::SUPPORTING_EVIDENCE,
            get(http::clarifying::get_supporting_evidence)
                .post(http::clarifying::post_supporting_evidence),
        )
        .route(
            clarifying_questions::SUPPORTING_EVIDENCE_UPLOAD,
            get(http::clarifying::get_evidence_upload).post(http::clarifying::post_upload_file),
        )
        .route(
            clarifying_questions::SUPPORTING_EVIDENCE_DELETE,
            post(http::clarifying::post_delete_file),
        )
        .route(
            clarifying_questions::CHECK_AND_SEND,
            get(http::clarifying::get_check_and_send).post(http::clarifying::post_check_and_send),
        )
        .route(
            clarifying_questions::CONFIRMATION,
            get(http::clarifying::confirmation_handler),
        )
        .route(
            cma_requirements::TASK_LIST,
            get(http::cma::task_list_handler),
        )
        .route(
            cma_requirements::ACCESS_NEEDS,
            get(http::cma::access_needs_handler),
        )
        .route(
            cma_requirements::INTERPRETER,
            get(http::cma::get_interpreter).post(http::cma::post_interpreter),
        )
        .route(
            cma_requirements::ADDITIONAL_LANGUAGE,
            get(http::cma::get_additional_language).post(http::cma::post_additional_language),
        )
        .route(
            cma_requirements::STEP_FREE_ACCESS,
            get(http::cma::get_step_free_access).post(http::cma::post_step_free_access),
        )
        .route(
            cma_requirements::HEARING_LOOP,
            get(http::cma::get_hearing_loop).post(http::cma::post_hearing_loop),
        )
        .route(
            cma_requirements::OTHER_NEEDS,
            get(http::cma::other_needs_handler),
        )
        .route(
            cma_requirements::MULTIMEDIA_EVIDENCE,
            get(http::cma::get_multimedia_evidence).post(http::cma::post_multimedia_evidence),
        )
        .route(
            cma_requirements::MULTIMEDIA_EQUIPMENT,
            get(http::cma::get_multimedia_equipment).post(http::cma::post_multimedia_equipment),
        )
        .route(
            cma_requirements::MULTIMEDIA_EQUIPMENT_REASON,
            get(http::cma::get_multimedia_equipment_reason)
                .post(http::cma::post_multimedia_equipment_reason),
        )
        .route(
            cma_requirements::SINGLE_SEX,
            get(http::cma::get_single_sex).post(http::cma::post_single_sex),
        )
        .route(
            cma_requirements::SINGLE_SEX_TYPE,
            get(http::cma::get_single_sex_type).post(http::cma::post_single_sex_type),
        )
        .route(
            cma_requirements::SINGLE_SEX_TYPE_REASON,
            get(http::cma::get_single_sex_reason).post(http::cma::post_single_sex_reason),
        )
        .route(
            cma_requirements::PRIVATE,
            get(http::cma::get_private_appointment).post(http::cma::post_private_appointment),
        )
        .route(
            cma_requirements::PRIVATE_REASON,
            get(http::cma::get_private_reason).post(http::cma::post_private_reason),
        )
        .route(
            cma_requirements::HEALTH_CONDITIONS,
            get(http::cma::get_health_conditions).post(http::cma::post_health_conditions),
        )
        .route(
            cma_requirements::HEALTH_CONDITIONS_REASON,
            get(http::cma::get_health_conditions_reason)
                .post(http::cma::post_health_conditions_reason),
        )
        .route(
            cma_requirements::PAST_EXPERIENCES,
            get(http::cma::get_past_experiences).post(http::cma::post_past_experiences),
        )
        .route(
            cma_requirements::PAST_EXPERIENCES_REASON,
            get(http::cma::get_past_experiences_reason)
                .post(http::cma::post_past_experiences_reason),
        )
        .route(
            cma_requirements::ANYTHING_ELSE,
            get(http::cma::get_anything_else).post(http::cma::post_anything_else),
        )
        .route(
            cma_requirements::ANYTHING_ELSE_REASON,
            get(http::cma::get_anything_else_reason).post(http::cma::post_anything_else_reason),
        )
        .route(
            cma_requirements::DATES_TO_AVOID,
            get(http::cma::get_dates_to_avoid).post(http::cma::post_dates_to_avoid),
        )
        .route(
            cma_requirements::DATES_TO_AVOID_ENTER,
            get(http::cma::get_enter_a_date).post(http::cma::post_enter_a_date),
        )
        .route(
            cma_requirements::DATES_TO_AVOID_REASON,
            get(http::cma::get_date_reason).post(http::cma::post_date_reason),
        )
        .route(
            cma_requirements::DATES_TO_AVOID_ADD_ANOTHER,
            get(http::cma::get_add_another_date).post(http::cma::post_add_another_date),
        )
        .route(
            cma_requirements::CHECK_AND_SEND,
            get(http::cma::get_check_and_send).post(http::cma::post_check_and_send),
        )
        .route(
            cma_requirements::CONFIRMATION,
            get(http::cma::confirmation_handler),
        )
        .route(
            ask_for_more_time::REASON,
            get(http::more_time::get_reason).post(http::more_time::post_reason),
        )
        .route(
            ask_for_more_time::EVIDENCE_YES_NO,
            get(http::more_time::get_evidence_yes_no).post(http::more_time::post_evidence_yes_no),
        )
        .route(
            ask_for_more_time::EVIDENCE_UPLOAD,
            get(http::more_time::get_evidence_upload),
        )
        .route(
            ask_for_more_time::EVIDENCE_UPLOAD_FILE,
            post(http::more_time::post_upload_file),
        )
        .route(
            ask_for_more_time::EVIDENCE_DELETE_FILE,
            post(http::more_time::post_delete_file),
        )
        .route(
            ask_for_more_time::CHECK_AND_SEND,
            get(http::more_time::get_check_and_send).post(http::more_time::post_check_and_send),
        )
        .route(
            ask_for_more_time::CONFIRMATION,
            get(http::more_time::confirmation_handler),
        )
        .route(
            common::VIEW_APPEAL_DETAILS,
            get(http::viewers::appeal_details_handler),
        )
        .route(
            common::VIEW_REASONS_FOR_APPEAL,
            get(http::viewers::reasons_for_appeal_handler),
        )
        .route(
            common::VIEW_CMA_REQUIREMENTS,
            get(http::viewers::cma_requirements_handler),
        )
        .route(
            common::VIEW_CLARIFYING_ANSWERS,
            get(http::viewers::clarifying_answers_handler),
        )
        .route(
            common::VIEW_HOME_OFFICE_DOCUMENTS,
            get(http::viewers::home_office_documents_handler),
        )
        .route(common::VIEW_DOCUMENT, get(http::viewers::view_document_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
