// SPDX-License-Identifier: Apache-2.0

use crate::yes_no::YesNo;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JOURNEY_TYPE_AIP: &str = "aip";
pub const CLARIFYING_QUESTIONS_DIRECTION_TAG: &str = "requestClarifyingQuestions";

/// The case store's collection envelope: every list element is wrapped in
/// `{ "id": ..., "value": ... }`, with the id assigned server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdValue<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub value: T,
}

impl<T> IdValue<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self { id: None, value }
    }
}

/// A document reference as the store records it. `document_binary_url` is
/// always `document_url` plus `/binary`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseDocument {
    pub document_url: String,
    pub document_filename: String,
    pub document_binary_url: String,
}

impl CaseDocument {
    #[must_use]
    pub fn new(url: &str, filename: &str) -> Self {
        Self {
            document_url: url.to_string(),
            document_filename: filename.to_string(),
            document_binary_url: format!("{url}/binary"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseAddressUk {
    #[serde(rename = "AddressLine1")]
    pub address_line_1: String,
    #[serde(rename = "AddressLine2")]
    pub address_line_2: String,
    #[serde(rename = "PostTown")]
    pub post_town: String,
    #[serde(rename = "County")]
    pub county: String,
    #[serde(rename = "PostCode")]
    pub post_code: String,
    #[serde(rename = "Country")]
    pub country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireNationality {
    pub code: String,
}

/// Notification subscription. Fields are serialized even when absent: the
/// store records explicit nulls for the channels the appellant declined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireSubscription {
    pub subscriber: String,
    #[serde(rename = "wantsEmail")]
    pub wants_email: YesNo,
    pub email: Option<String>,
    #[serde(rename = "wantsSms")]
    pub wants_sms: YesNo,
    #[serde(rename = "mobileNumber")]
    pub mobile_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireDocumentWithMetadata {
    #[serde(rename = "dateUploaded", default, skip_serializing_if = "Option::is_none")]
    pub date_uploaded: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub document: CaseDocument,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireRespondentDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub document: CaseDocument,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "dateUploaded", default, skip_serializing_if = "Option::is_none")]
    pub date_uploaded: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireClarifyingAnswer {
    #[serde(rename = "dateSent", default, skip_serializing_if = "Option::is_none")]
    pub date_sent: Option<String>,
    #[serde(rename = "dueDate", default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(
        rename = "supportingEvidence",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub supporting_evidence: Option<Vec<IdValue<CaseDocument>>>,
    #[serde(
        rename = "dateResponded",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub date_responded: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireDirection {
    pub tag: String,
    #[serde(rename = "dateDue", default, skip_serializing_if = "Option::is_none")]
    pub date_due: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parties: Option<String>,
    #[serde(rename = "dateSent", default, skip_serializing_if = "Option::is_none")]
    pub date_sent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(
        rename = "previousDates",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub previous_dates: Option<Vec<Value>>,
    #[serde(
        rename = "clarifyingQuestions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub clarifying_questions: Option<Vec<IdValue<WireClarifyingAnswer>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireTimeExtension {
    #[serde(rename = "requestDate", default, skip_serializing_if = "Option::is_none")]
    pub request_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Vec<IdValue<CaseDocument>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<String>,
    #[serde(
        rename = "decisionReason",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub decision_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireInterpreterLanguage {
    pub language: String,
    #[serde(
        rename = "languageDialect",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub language_dialect: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireDateToAvoid {
    #[serde(rename = "dateToAvoid")]
    pub date_to_avoid: String,
    #[serde(
        rename = "dateToAvoidReason",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub date_to_avoid_reason: Option<String>,
}

/// The flat case record. Every field is optional on the wire; absent fields
/// are omitted entirely so partial saves never clobber server-side values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CaseData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journey_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_office_reference_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_office_decision_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_out_of_time: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_out_of_time_explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_out_of_time_document: Option<CaseDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appellant_given_names: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appellant_family_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appellant_date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appellant_nationalities: Option<Vec<IdValue<WireNationality>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appellant_has_fixed_address: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appellant_address: Option<CaseAddressUk>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appeal_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriptions: Option<Vec<IdValue<WireSubscription>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasons_for_appeal_decision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasons_for_appeal_date_uploaded: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasons_for_appeal_documents: Option<Vec<IdValue<WireDocumentWithMetadata>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub respondent_documents: Option<Vec<IdValue<WireRespondentDocument>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directions: Option<Vec<IdValue<WireDirection>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft_clarifying_questions_answers: Option<Vec<IdValue<WireClarifyingAnswer>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clarifying_questions_answers: Option<Vec<IdValue<WireClarifyingAnswer>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_extensions: Option<Vec<IdValue<WireTimeExtension>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit_time_extension_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit_time_extension_evidence: Option<Vec<IdValue<CaseDocument>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_time_extension_required: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_interpreter_services_needed: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpreter_language: Option<Vec<IdValue<WireInterpreterLanguage>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_hearing_room_needed: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_hearing_loop_needed: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multimedia_evidence: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multimedia_evidence_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_sex_court: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_sex_court_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_sex_court_type_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_camera_court: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_camera_court_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_or_mental_health_issues: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_or_mental_health_issues_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub past_experiences: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub past_experiences_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_requests: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_requests_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates_to_avoid_yes_no: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates_to_avoid: Option<Vec<IdValue<WireDateToAvoid>>>,
}

/// What the store returns for a case: its id, current state, and the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseDetails {
    pub id: String,
    pub state: String,
    pub case_data: CaseData,
}
