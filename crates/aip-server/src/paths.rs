//! Route constants for the wizard. Grouped by the case state that owns the
//! pages, so handlers and redirects always agree on the url strings.

pub mod appeal_started {
    pub const TASK_LIST: &str = "/about-appeal";
    pub const DETAILS: &str = "/home-office-reference-number";
    pub const LETTER_SENT: &str = "/date-letter-sent";
    pub const APPEAL_LATE: &str = "/late-appeal";
    pub const UPLOAD_EVIDENCE: &str = "/home-office/upload-evidence";
    pub const DELETE_EVIDENCE: &str = "/home-office/delete-evidence";
}

pub mod reasons_for_appeal {
    pub const DECISION: &str = "/case-building/home-office-decision-wrong";
    pub const SUPPORTING_EVIDENCE: &str = "/case-building/supporting-evidence";
    pub const SUPPORTING_EVIDENCE_UPLOAD: &str = "/case-building/provide-supporting-evidence";
    pub const SUPPORTING_EVIDENCE_UPLOAD_FILE: &str =
        "/case-building/reason-for-appeal/supporting-evidence/upload/file";
    pub const SUPPORTING_EVIDENCE_DELETE_FILE: &str =
        "/case-building/reason-for-appeal/supporting-evidence/delete/file";
    pub const CHECK_AND_SEND: &str = "/case-building/check-answer";
    pub const CONFIRMATION: &str = "/case-building/answer-sent";
}

pub mod clarifying_questions {
    pub const QUESTIONS_LIST: &str = "/questions-about-appeal";
    pub const QUESTION: &str = "/question/:id";
    pub const SUPPORTING_EVIDENCE: &str = "/clarifying-questions/supporting-evidence/:id";
    pub const SUPPORTING_EVIDENCE_UPLOAD: &str = "/clarifying-questions/upload-evidence/:id";
    pub const SUPPORTING_EVIDENCE_DELETE: &str = "/clarifying-questions/delete-evidence/:id";
    pub const CHECK_AND_SEND: &str = "/check-your-answers";
    pub const CONFIRMATION: &str = "/clarifying-questions-sent";
}

pub mod cma_requirements {
    pub const TASK_LIST: &str = "/appointment-needs";
    pub const ACCESS_NEEDS: &str = "/appointment-access-needs";
    pub const INTERPRETER: &str = "/appointment-interpreter";
    pub const ADDITIONAL_LANGUAGE: &str = "/appointment-add-language-details";
    pub const STEP_FREE_ACCESS: &str = "/appointment-step-free-access";
    pub const HEARING_LOOP: &str = "/appointment-hearing-loop";
    pub const OTHER_NEEDS: &str = "/appointment-other-needs";
    pub const MULTIMEDIA_EVIDENCE: &str = "/appointment-multimedia-evidence";
    pub const MULTIMEDIA_EQUIPMENT: &str = "/appointment-multimedia-evidence-equipment";
    pub const MULTIMEDIA_EQUIPMENT_REASON: &str =
        "/appointment-multimedia-evidence-equipment-reasons";
    pub const SINGLE_SEX: &str = "/appointment-single-sex";
    pub const SINGLE_SEX_TYPE: &str = "/appointment-single-sex-type";
    pub const SINGLE_SEX_TYPE_REASON: &str = "/appointment-single-sex-type-reasons";
    pub const PRIVATE: &str = "/appointment-private";
    pub const PRIVATE_REASON: &str = "/appointment-private-reasons";
    pub const HEALTH_CONDITIONS: &str = "/appointment-physical-mental-health";
    pub const HEALTH_CONDITIONS_REASON: &str = "/appointment-physical-mental-health-reasons";
    pub const PAST_EXPERIENCES: &str = "/appointment-past-experiences";
    pub const PAST_EXPERIENCES_REASON: &str = "/appointment-past-experiences-reasons";
    pub const ANYTHING_ELSE: &str = "/appointment-anything-else";
    pub const ANYTHING_ELSE_REASON: &str = "/appointment-anything-else-reasons";
    pub const DATES_TO_AVOID: &str = "/appointment-dates-avoid";
    pub const DATES_TO_AVOID_ENTER: &str = "/appointment-dates-avoid-enter";
    pub const DATES_TO_AVOID_REASON: &str = "/appointment-dates-avoid-reasons";
    pub const DATES_TO_AVOID_ADD_ANOTHER: &str = "/appointment-dates-avoid-new";
    pub const CHECK_AND_SEND: &str = "/appointment-check-answers";
    pub const CONFIRMATION: &str = "/appointment-success";
}

pub mod ask_for_more_time {
    pub const REASON: &str = "/ask-for-more-time";
    pub const EVIDENCE_YES_NO: &str = "/supporting-evidence-more-time";
    pub const EVIDENCE_UPLOAD: &str = "/provide-supporting-evidence-more-time";
    pub const EVIDENCE_UPLOAD_FILE: &str = "/provide-supporting-evidence-more-time-submit";
    pub const EVIDENCE_DELETE_FILE: &str = "/provide-supporting-evidence-more-time-delete";
    pub const CHECK_AND_SEND: &str = "/check-answer-more-time";
    pub const CONFIRMATION: &str = "/request-more-time-sent";
}

pub mod common {
    pub const OVERVIEW: &str = "/appeal-overview";
    pub const HEALTH: &str = "/health";
    pub const LIVENESS: &str = "/liveness";
    pub const READINESS: &str = "/health/readiness";
    pub const FILE_NOT_FOUND: &str = "/file-not-found";

    pub const VIEW_DOCUMENT: &str = "/view/document/:id";
    pub const VIEW_HOME_OFFICE_DOCUMENTS: &str = "/view/home-office-documents";
    pub const VIEW_APPEAL_DETAILS: &str = "/appeal-details";
    pub const VIEW_REASONS_FOR_APPEAL: &str = "/appeal-reasons";
    pub const VIEW_CMA_REQUIREMENTS: &str = "/your-appointment-needs";
    pub const VIEW_CLARIFYING_ANSWERS: &str = "/your-answers";
}
