use crate::clarifying::ClarifyingQuestion;
use crate::cma::CmaRequirements;
use crate::date::PartedDate;
use crate::state::AppealState;
use serde::{Deserialize, Serialize};

/// The per-user session aggregate. Loaded from the case store when the
/// session starts, mutated field-by-field as wizard pages are submitted, and
/// pushed back on each submit event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Appeal {
    pub ccd_case_id: Option<String>,
    pub appeal_status: AppealState,
    pub application: AppealApplication,
    pub reasons_for_appeal: ReasonsForAppeal,
    pub draft_clarifying_questions_answers: Option<Vec<ClarifyingQuestion>>,
    pub clarifying_questions_answers: Option<Vec<ClarifyingQuestion>>,
    pub cma_requirements: CmaRequirements,
    pub ask_for_more_time: AskForMoreTime,
    pub respondent_documents: Vec<RespondentDocument>,
    pub directions: Vec<Direction>,
    /// Opaque file-id to store-url pairs for every document the session has
    /// seen. Pages only ever hold the id; the url never reaches the browser.
    pub document_map: Vec<DocumentRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppealApplication {
    pub home_office_ref_number: Option<String>,
    pub appeal_type: Option<String>,
    pub date_letter_sent: PartedDate,
    pub is_appeal_late: bool,
    pub late_appeal: Option<LateAppeal>,
    pub personal_details: PersonalDetails,
    pub contact_details: ContactDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalDetails {
    pub given_names: Option<String>,
    pub family_name: Option<String>,
    pub dob: PartedDate,
    pub nationality: Option<String>,
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub county: Option<String>,
    pub postcode: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub email: Option<String>,
    pub wants_email: bool,
    pub phone: Option<String>,
    pub wants_sms: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LateAppeal {
    pub reason: Option<String>,
    pub evidence: Option<Evidence>,
}

/// A stored document as the session sees it: an opaque id resolvable through
/// the appeal's document map, plus the display name and upload metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub file_id: String,
    pub name: String,
    pub date_uploaded: Option<PartedDate>,
    pub description: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReasonsForAppeal {
    pub application_reason: Option<String>,
    pub evidences: Vec<Evidence>,
    pub upload_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AskForMoreTime {
    pub in_flight: bool,
    pub reason: Option<String>,
    pub evidence: Vec<Evidence>,
    pub request_date: Option<String>,
    pub state: Option<String>,
    pub status: Option<String>,
    pub review_requested: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RespondentDocument {
    pub date_uploaded: String,
    pub evidence: Evidence,
}

/// Tribunal direction metadata kept for deadline display on the overview
/// page. Clarifying questions attached to a direction are mapped separately.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    pub tag: String,
    pub parties: Option<String>,
    pub date_due: Option<String>,
    pub date_sent: Option<String>,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub id: String,
    pub url: String,
}
