// SPDX-License-Identifier: Apache-2.0

use crate::docmap::DocumentMap;
use crate::wire::{
    CaseData, CaseDetails, CaseDocument, IdValue, WireClarifyingAnswer, WireDirection,
    CLARIFYING_QUESTIONS_DIRECTION_TAG,
};
use crate::yes_no::YesNo;
use aip_model::{
    Address, Appeal, AppealState, AskForMoreTime, ClarifyingAnswer, ClarifyingQuestion,
    ContactDetails, DateToAvoid, Direction, Evidence, InterpreterLanguage, LateAppeal, PartedDate,
    RespondentDocument, ANYTHING_ELSE_QUESTION,
};

const SUBSCRIBER_APPELLANT: &str = "appellant";
const TIME_EXTENSION_SUBMITTED: &str = "submitted";

/// Rebuilds the session appeal from a stored case. Total: missing or
/// malformed fields fall back to their unanswered session shape, and every
/// document url is swapped for a fresh opaque key in the document map.
#[must_use]
pub fn case_to_appeal(details: &CaseDetails) -> Appeal {
    let case = &details.case_data;
    let mut map = DocumentMap::new();
    let mut appeal = Appeal {
        ccd_case_id: Some(details.id.clone()),
        appeal_status: AppealState::parse(&details.state),
        ..Appeal::default()
    };

    decode_application(case, &mut appeal, &mut map);
    decode_reasons(case, &mut appeal, &mut map);
    decode_clarifying_questions(case, &mut appeal, &mut map);
    decode_cma_requirements(case, &mut appeal);

    appeal.ask_for_more_time = AskForMoreTime {
        in_flight: case
            .time_extensions
            .as_ref()
            .and_then(|extensions| extensions.last())
            .and_then(|latest| latest.value.status.as_deref())
            == Some(TIME_EXTENSION_SUBMITTED),
        ..AskForMoreTime::default()
    };

    if let Some(documents) = &case.respondent_documents {
        appeal.respondent_documents = documents
            .iter()
            .map(|entry| RespondentDocument {
                date_uploaded: entry.value.date_uploaded.clone().unwrap_or_default(),
                evidence: Evidence {
                    description: entry.value.description.clone(),
                    tag: entry.value.tag.clone(),
                    date_uploaded: entry
                        .value
                        .date_uploaded
                        .as_deref()
                        .and_then(PartedDate::from_iso),
                    ..evidence_for(&mut map, &entry.value.document)
                },
            })
            .collect();
    }

    if let Some(directions) = &case.directions {
        appeal.directions = directions
            .iter()
            .map(|entry| Direction {
                tag: entry.value.tag.clone(),
                parties: entry.value.parties.clone(),
                date_due: entry.value.date_due.clone(),
                date_sent: entry.value.date_sent.clone(),
                explanation: entry.value.explanation.clone(),
            })
            .collect();
    }

    appeal.document_map = map.into_entries();
    appeal
}

fn decode_application(case: &CaseData, appeal: &mut Appeal, map: &mut DocumentMap) {
    let application = &mut appeal.application;
    application.home_office_ref_number = case.home_office_reference_number.clone();
    application.appeal_type = case.appeal_type.clone();
    if let Some(date) = case
        .home_office_decision_date
        .as_deref()
        .and_then(PartedDate::from_iso)
    {
        application.date_letter_sent = date;
    }
    application.is_appeal_late = case
        .submission_out_of_time
        .map(YesNo::as_bool)
        .unwrap_or(false);
    if case.application_out_of_time_explanation.is_some()
        || case.application_out_of_time_document.is_some()
    {
        application.late_appeal = Some(LateAppeal {
            reason: case.application_out_of_time_explanation.clone(),
            evidence: case
                .application_out_of_time_document
                .as_ref()
                .map(|doc| evidence_for(map, doc)),
        });
    }

    let personal = &mut application.personal_details;
    personal.given_names = case.appellant_given_names.clone();
    personal.family_name = case.appellant_family_name.clone();
    if let Some(dob) = case
        .appellant_date_of_birth
        .as_deref()
        .and_then(PartedDate::from_iso)
    {
        personal.dob = dob;
    }
    personal.nationality = case
        .appellant_nationalities
        .as_ref()
        .and_then(|list| list.first())
        .map(|entry| entry.value.code.clone());
    if let Some(address) = &case.appellant_address {
        personal.address = Some(Address {
            line1: address.address_line_1.clone(),
            line2: non_empty(&address.address_line_2),
            city: address.post_town.clone(),
            county: non_empty(&address.county),
            postcode: address.post_code.clone(),
        });
    }

    if let Some(subscription) = case
        .subscriptions
        .as_ref()
        .and_then(|subs| subs.iter().find(|s| s.value.subscriber == SUBSCRIBER_APPELLANT))
    {
        application.contact_details = ContactDetails {
            email: subscription.value.email.clone(),
            wants_email: subscription.value.wants_email.as_bool(),
            phone: subscription.value.mobile_number.clone(),
            wants_sms: subscription.value.wants_sms.as_bool(),
        };
    }
}

fn decode_reasons(case: &CaseData, appeal: &mut Appeal, map: &mut DocumentMap) {
    appeal.reasons_for_appeal.application_reason = case.reasons_for_appeal_decision.clone();
    appeal.reasons_for_appeal.upload_date = case.reasons_for_appeal_date_uploaded.clone();
    if let Some(documents) = &case.reasons_for_appeal_documents {
        appeal.reasons_for_appeal.evidences = documents
            .iter()
            .map(|entry| Evidence {
                date_uploaded: entry
                    .value
                    .date_uploaded
                    .as_deref()
                    .and_then(PartedDate::from_iso),
                description: entry.value.description.clone(),
                tag: entry.value.tag.clone(),
                ..evidence_for(map, &entry.value.document)
            })
            .collect();
    }
}

fn decode_clarifying_questions(case: &CaseData, appeal: &mut Appeal, map: &mut DocumentMap) {
    if let Some(drafts) = &case.draft_clarifying_questions_answers {
        // A stored draft round is normalized for editing: an unanswered
        // question gets an empty answer and an empty evidence list.
        appeal.draft_clarifying_questions_answers = Some(
            drafts
                .iter()
                .map(|entry| ClarifyingQuestion {
                    id: entry.id.clone(),
                    value: ClarifyingAnswer {
                        answer: Some(entry.value.answer.clone().unwrap_or_default()),
                        supporting_evidence: Some(decode_supporting_evidence(map, entry)),
                        ..answer_without_evidence(&entry.value)
                    },
                })
                .collect(),
        );
    } else if appeal.appeal_status == AppealState::AwaitingClarifyingQuestionsAnswers {
        // First visit after the tribunal sends questions: seed the draft from
        // the direction and append the fixed closing question. The direction
        // stays in the record after the round is answered, so seeding is
        // gated on the awaiting state.
        if let Some(direction) = find_clarifying_direction(case) {
            let mut drafts: Vec<ClarifyingQuestion> = direction
                .clarifying_questions
                .iter()
                .flatten()
                .map(|entry| ClarifyingQuestion {
                    id: entry.id.clone(),
                    value: ClarifyingAnswer {
                        date_sent: direction.date_sent.clone(),
                        due_date: direction.date_due.clone(),
                        question: entry.value.question.clone(),
                        ..ClarifyingAnswer::default()
                    },
                })
                .collect();
            drafts.push(ClarifyingQuestion {
                id: None,
                value: ClarifyingAnswer {
                    date_sent: direction.date_sent.clone(),
                    due_date: direction.date_due.clone(),
                    question: ANYTHING_ELSE_QUESTION.to_string(),
                    ..ClarifyingAnswer::default()
                },
            });
            appeal.draft_clarifying_questions_answers = Some(drafts);
        }
    }

    if let Some(answers) = &case.clarifying_questions_answers {
        appeal.clarifying_questions_answers = Some(
            answers
                .iter()
                .map(|entry| ClarifyingQuestion {
                    id: entry.id.clone(),
                    value: ClarifyingAnswer {
                        answer: entry.value.answer.clone(),
                        supporting_evidence: entry
                            .value
                            .supporting_evidence
                            .as_ref()
                            .map(|_| decode_supporting_evidence(map, entry)),
                        ..answer_without_evidence(&entry.value)
                    },
                })
                .collect(),
        );
    }
}

fn decode_cma_requirements(case: &CaseData, appeal: &mut Appeal) {
    let cma = &mut appeal.cma_requirements;

    let access = &mut cma.access_needs;
    access.is_interpreter_services_needed = yes(case.is_interpreter_services_needed);
    access.is_hearing_room_needed = yes(case.is_hearing_room_needed);
    access.is_hearing_loop_needed = yes(case.is_hearing_loop_needed);
    if let Some(languages) = &case.interpreter_language {
        access.interpreter_language = languages
            .iter()
            .map(|entry| InterpreterLanguage {
                language: entry.value.language.clone(),
                language_dialect: entry.value.language_dialect.clone(),
            })
            .collect();
    }

    let other = &mut cma.other_needs;
    if let Some(multimedia) = case.multimedia_evidence {
        let wants = multimedia.as_bool();
        other.multimedia_evidence = Some(wants);
        if wants {
            // A recorded description means the appellant cannot bring their
            // own playback equipment.
            match &case.multimedia_evidence_description {
                Some(description) => {
                    other.bring_own_multimedia_equipment = Some(false);
                    other.bring_own_multimedia_equipment_reason = Some(description.clone());
                }
                None => other.bring_own_multimedia_equipment = Some(true),
            }
        }
    }
    if let Some(single_sex) = case.single_sex_court {
        other.single_sex_appointment = Some(single_sex.as_bool());
        if single_sex.as_bool() {
            other.single_sex_type_appointment = case.single_sex_court_type.clone();
            other.single_sex_appointment_reason = case.single_sex_court_type_description.clone();
        }
    }
    if let Some(private) = case.in_camera_court {
        other.private_appointment = Some(private.as_bool());
        if private.as_bool() {
            other.private_appointment_reason = case.in_camera_court_description.clone();
        }
    }
    if let Some(health) = case.physical_or_mental_health_issues {
        other.health_conditions = Some(health.as_bool());
        if health.as_bool() {
            other.health_conditions_reason =
                case.physical_or_mental_health_issues_description.clone();
        }
    }
    if let Some(past) = case.past_experiences {
        other.past_experiences = Some(past.as_bool());
        if past.as_bool() {
            other.past_experiences_reason = case.past_experiences_description.clone();
        }
    }
    if let Some(anything) = case.additional_requests {
        other.anything_else = Some(anything.as_bool());
        if anything.as_bool() {
            other.anything_else_reason = case.additional_requests_description.clone();
        }
    }

    let dates = &mut cma.dates_to_avoid;
    dates.is_date_cannot_attend = case.dates_to_avoid_yes_no.map(YesNo::as_bool);
    if let Some(entries) = &case.dates_to_avoid {
        dates.dates = entries
            .iter()
            .filter_map(|entry| {
                PartedDate::from_iso(&entry.value.date_to_avoid).map(|date| DateToAvoid {
                    date,
                    reason: entry.value.date_to_avoid_reason.clone(),
                })
            })
            .collect();
    }
}

fn find_clarifying_direction(case: &CaseData) -> Option<&WireDirection> {
    case.directions
        .as_ref()?
        .iter()
        .map(|entry| &entry.value)
        .find(|direction| direction.tag == CLARIFYING_QUESTIONS_DIRECTION_TAG)
}

fn decode_supporting_evidence(
    map: &mut DocumentMap,
    entry: &IdValue<WireClarifyingAnswer>,
) -> Vec<Evidence> {
    entry
        .value
        .supporting_evidence
        .iter()
        .flatten()
        .map(|doc| evidence_for(map, &doc.value))
        .collect()
}

fn answer_without_evidence(value: &WireClarifyingAnswer) -> ClarifyingAnswer {
    ClarifyingAnswer {
        date_sent: value.date_sent.clone(),
        due_date: value.due_date.clone(),
        question: value.question.clone(),
        date_responded: value.date_responded.clone(),
        ..ClarifyingAnswer::default()
    }
}

fn evidence_for(map: &mut DocumentMap, document: &CaseDocument) -> Evidence {
    Evidence {
        file_id: map.register(&document.document_url),
        name: document.document_filename.clone(),
        ..Evidence::default()
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn yes(value: Option<YesNo>) -> bool {
    value.map(YesNo::as_bool).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn details_in_state(state: &str, case_data: serde_json::Value) -> CaseDetails {
        serde_json::from_value(json!({
            "id": "caseId",
            "state": state,
            "case_data": case_data
        }))
        .unwrap()
    }

    fn details_with(case_data: serde_json::Value) -> CaseDetails {
        details_in_state("awaitingReasonsForAppeal", case_data)
    }

    fn base_case_data() -> serde_json::Value {
        json!({
            "appealType": "protection",
            "journeyType": "aip",
            "homeOfficeReferenceNumber": "A1234567",
            "homeOfficeDecisionDate": "2019-01-02",
            "appellantFamilyName": "Pedro",
            "appellantGivenNames": "Jimenez",
            "appellantDateOfBirth": "1990-03-21",
            "appellantNationalities": [{"id": "0", "value": {"code": "AF"}}],
            "appellantHasFixedAddress": "Yes",
            "appellantAddress": {
                "County": "",
                "Country": "United Kingdom",
                "PostCode": "W1W 7RT",
                "PostTown": "LONDON",
                "AddressLine1": "123 An Address",
                "AddressLine2": ""
            },
            "submissionOutOfTime": "Yes",
            "applicationOutOfTimeExplanation": "An Explanation on why this appeal was late",
            "applicationOutOfTimeDocument": {
                "document_url": "http://dm-store:4506/documents/9f788e06",
                "document_filename": "1580296112615-evidence-file.jpeg",
                "document_binary_url": "http://dm-store:4506/documents/9f788e06/binary"
            },
            "subscriptions": [{
                "id": "7166f13d",
                "value": {
                    "subscriber": "appellant",
                    "email": "email@example.net",
                    "wantsSms": "Yes",
                    "mobileNumber": "07123456789",
                    "wantsEmail": "Yes"
                }
            }],
            "reasonsForAppealDecision": "I've decided to appeal because ...",
            "reasonsForAppealDateUploaded": "2020-01-02",
            "reasonsForAppealDocuments": [{
                "id": "f29cde8d",
                "value": {
                    "document": {
                        "document_url": "http://dm-store:4506/documents/f29cde8d",
                        "document_filename": "supporting-evidence-file.jpeg",
                        "document_binary_url": "http://dm-store:4506/documents/f29cde8d/binary"
                    }
                }
            }],
            "respondentDocuments": [{
                "id": "1",
                "value": {
                    "tag": "respondentEvidence",
                    "document": {
                        "document_url": "http://dm-store:4506/documents/086bdfd6",
                        "document_filename": "Screenshot.png",
                        "document_binary_url": "http://dm-store:4506/documents/086bdfd6/binary"
                    },
                    "description": "Screenshot of evidence",
                    "dateUploaded": "2020-02-21"
                }
            }],
            "timeExtensions": [{
                "id": "1",
                "value": {
                    "requestDate": "2020-01-02",
                    "reason": "some reason",
                    "status": "inProgress",
                    "state": "awaitingReasonsForAppeal"
                }
            }],
            "isInterpreterServicesNeeded": "false",
            "isHearingRoomNeeded": "true",
            "isHearingLoopNeeded": "true"
        })
    }

    #[test]
    fn rebuilds_the_session_from_a_stored_case() {
        let appeal = case_to_appeal(&details_with(base_case_data()));

        assert_eq!(appeal.ccd_case_id.as_deref(), Some("caseId"));
        assert_eq!(appeal.appeal_status, AppealState::AwaitingReasonsForAppeal);
        let application = &appeal.application;
        assert_eq!(application.appeal_type.as_deref(), Some("protection"));
        assert_eq!(application.home_office_ref_number.as_deref(), Some("A1234567"));
        assert_eq!(application.date_letter_sent, PartedDate::new("2019", "1", "2"));
        assert!(application.is_appeal_late);
        let personal = &application.personal_details;
        assert_eq!(personal.family_name.as_deref(), Some("Pedro"));
        assert_eq!(personal.given_names.as_deref(), Some("Jimenez"));
        assert_eq!(personal.dob, PartedDate::new("1990", "3", "21"));
        assert_eq!(personal.nationality.as_deref(), Some("AF"));
        let address = personal.address.as_ref().unwrap();
        assert_eq!(address.line1, "123 An Address");
        assert_eq!(address.line2, None);
        assert_eq!(address.city, "LONDON");
        assert_eq!(address.postcode, "W1W 7RT");
        let contact = &application.contact_details;
        assert_eq!(contact.email.as_deref(), Some("email@example.net"));
        assert_eq!(contact.phone.as_deref(), Some("07123456789"));
        assert!(contact.wants_email);
        assert!(contact.wants_sms);
        let late = application.late_appeal.as_ref().unwrap();
        assert_eq!(
            late.evidence.as_ref().unwrap().name,
            "1580296112615-evidence-file.jpeg"
        );
        assert_eq!(
            appeal.reasons_for_appeal.application_reason.as_deref(),
            Some("I've decided to appeal because ...")
        );
        assert_eq!(
            appeal.reasons_for_appeal.upload_date.as_deref(),
            Some("2020-01-02")
        );
        assert_eq!(appeal.reasons_for_appeal.evidences.len(), 1);
        assert_eq!(appeal.respondent_documents.len(), 1);
        assert_eq!(appeal.respondent_documents[0].date_uploaded, "2020-02-21");
        assert_eq!(appeal.respondent_documents[0].evidence.name, "Screenshot.png");
        // 'true'/'false' strings in the record read as unanswered.
        assert!(!appeal.cma_requirements.access_needs.is_interpreter_services_needed);
        assert!(!appeal.cma_requirements.access_needs.is_hearing_room_needed);
        assert!(!appeal.cma_requirements.access_needs.is_hearing_loop_needed);
        assert!(!appeal.ask_for_more_time.in_flight);
    }

    #[test]
    fn every_document_url_gets_an_opaque_key() {
        let appeal = case_to_appeal(&details_with(base_case_data()));
        // Late-appeal evidence, one reasons document, one respondent document.
        assert_eq!(appeal.document_map.len(), 3);
        let late_id = &appeal
            .application
            .late_appeal
            .as_ref()
            .unwrap()
            .evidence
            .as_ref()
            .unwrap()
            .file_id;
        let entry = appeal
            .document_map
            .iter()
            .find(|e| &e.id == late_id)
            .unwrap();
        assert_eq!(entry.url, "http://dm-store:4506/documents/9f788e06");
        assert_eq!(late_id.split('-').count(), 5);
    }

    #[test]
    fn pending_time_extension_marks_more_time_in_flight() {
        let mut case_data = base_case_data();
        case_data["timeExtensions"] = json!([{
            "id": "1",
            "value": {
                "requestDate": "2020-01-02",
                "reason": "some reason",
                "status": "submitted",
                "state": "awaitingReasonsForAppeal"
            }
        }]);
        let appeal = case_to_appeal(&details_with(case_data));
        assert!(appeal.ask_for_more_time.in_flight);
    }

    #[test]
    fn missing_time_extensions_read_as_not_in_flight() {
        let appeal = case_to_appeal(&details_with(json!({})));
        assert!(!appeal.ask_for_more_time.in_flight);
        assert_eq!(appeal.application.late_appeal, None);
        assert!(appeal.document_map.is_empty());
    }

    #[test]
    fn seeds_draft_questions_from_the_clarifying_direction() {
        let case_data = json!({
            "directions": [{
                "id": "3",
                "value": {
                    "tag": "requestClarifyingQuestions",
                    "dateDue": "2020-05-07",
                    "parties": "appellant",
                    "dateSent": "2020-04-23",
                    "explanation": "You need to answer some questions about your appeal.",
                    "previousDates": [],
                    "clarifyingQuestions": [{
                        "id": "947398d5",
                        "value": {"question": "Give us some more information"}
                    }]
                }
            }]
        });
        let appeal = case_to_appeal(&details_in_state(
            "awaitingClarifyingQuestionsAnswers",
            case_data,
        ));
        let drafts = appeal.draft_clarifying_questions_answers.unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].id.as_deref(), Some("947398d5"));
        assert_eq!(drafts[0].value.question, "Give us some more information");
        assert_eq!(drafts[0].value.date_sent.as_deref(), Some("2020-04-23"));
        assert_eq!(drafts[0].value.due_date.as_deref(), Some("2020-05-07"));
        assert_eq!(drafts[0].value.answer, None);
        assert_eq!(drafts[1].id, None);
        assert_eq!(
            drafts[1].value.question,
            "Do you want to tell us anything else about your case?"
        );
    }

    #[test]
    fn stored_draft_answers_win_over_the_direction() {
        let case_data = json!({
            "draftClarifyingQuestionsAnswers": [{
                "id": "id",
                "value": {
                    "dateSent": "2020-04-23",
                    "dueDate": "2020-05-07",
                    "question": "the questions"
                }
            }],
            "directions": [{
                "id": "3",
                "value": {
                    "tag": "requestClarifyingQuestions",
                    "dateDue": "2020-05-07",
                    "dateSent": "2020-04-23",
                    "clarifyingQuestions": [{
                        "value": {"question": "a different question"}
                    }]
                }
            }]
        });
        let appeal = case_to_appeal(&details_in_state(
            "awaitingClarifyingQuestionsAnswers",
            case_data,
        ));
        let drafts = appeal.draft_clarifying_questions_answers.unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].value.question, "the questions");
        assert_eq!(drafts[0].value.answer.as_deref(), Some(""));
        assert_eq!(drafts[0].value.supporting_evidence, Some(vec![]));
    }

    #[test]
    fn answered_rounds_do_not_reseed_drafts_from_the_direction() {
        // The direction stays on the record after the answers go in; a
        // reload must not bring the blank drafts back.
        let case_data = json!({
            "directions": [{
                "id": "3",
                "value": {
                    "tag": "requestClarifyingQuestions",
                    "dateDue": "2020-05-07",
                    "dateSent": "2020-04-23",
                    "clarifyingQuestions": [{
                        "id": "947398d5",
                        "value": {"question": "Give us some more information"}
                    }]
                }
            }],
            "clarifyingQuestionsAnswers": [{
                "id": "947398d5",
                "value": {
                    "question": "Give us some more information",
                    "answer": "Here is the information",
                    "dateResponded": "2020-05-01"
                }
            }]
        });
        let appeal = case_to_appeal(&details_in_state(
            "clarifyingQuestionsAnswersSubmitted",
            case_data,
        ));
        assert_eq!(appeal.draft_clarifying_questions_answers, None);
        let answers = appeal.clarifying_questions_answers.unwrap();
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].value.answer.as_deref(), Some("Here is the information"));
    }

    #[test]
    fn rebuilds_cma_requirements_from_the_scalars() {
        let case_data = json!({
            "datesToAvoidYesNo": "Yes",
            "datesToAvoid": [
                {"value": {"dateToAvoid": "2020-06-23", "dateToAvoidReason": "I have an important appointment on this day"}},
                {"value": {"dateToAvoid": "2020-06-24", "dateToAvoidReason": "I need this day off"}}
            ],
            "inCameraCourt": "Yes",
            "inCameraCourtDescription": "The reason why I would need a private appointment",
            "interpreterLanguage": [{"value": {"language": "Afar", "languageDialect": "A dialect"}}],
            "isHearingLoopNeeded": "Yes",
            "isHearingRoomNeeded": "Yes",
            "isInterpreterServicesNeeded": "Yes",
            "multimediaEvidence": "Yes",
            "multimediaEvidenceDescription": "I do not own the equipment",
            "pastExperiences": "Yes",
            "pastExperiencesDescription": "Past experiences description",
            "physicalOrMentalHealthIssues": "Yes",
            "physicalOrMentalHealthIssuesDescription": "Reason for mental health conditions",
            "singleSexCourt": "Yes",
            "singleSexCourtType": "All female",
            "singleSexCourtTypeDescription": "The reason why I will need an all-female",
            "additionalRequests": "Yes",
            "additionalRequestsDescription": "Anything else description"
        });
        let appeal = case_to_appeal(&details_with(case_data));
        let cma = &appeal.cma_requirements;
        assert!(cma.access_needs.is_interpreter_services_needed);
        assert!(cma.access_needs.is_hearing_room_needed);
        assert!(cma.access_needs.is_hearing_loop_needed);
        assert_eq!(cma.access_needs.interpreter_language[0].language, "Afar");
        let other = &cma.other_needs;
        assert_eq!(other.multimedia_evidence, Some(true));
        assert_eq!(other.bring_own_multimedia_equipment, Some(false));
        assert_eq!(
            other.bring_own_multimedia_equipment_reason.as_deref(),
            Some("I do not own the equipment")
        );
        assert_eq!(other.single_sex_appointment, Some(true));
        assert_eq!(other.single_sex_type_appointment.as_deref(), Some("All female"));
        assert_eq!(other.private_appointment, Some(true));
        assert_eq!(other.health_conditions, Some(true));
        assert_eq!(other.past_experiences, Some(true));
        assert_eq!(other.anything_else, Some(true));
        assert_eq!(
            other.anything_else_reason.as_deref(),
            Some("Anything else description")
        );
        let dates = &cma.dates_to_avoid;
        assert_eq!(dates.is_date_cannot_attend, Some(true));
        assert_eq!(dates.dates.len(), 2);
        assert_eq!(dates.dates[0].date, PartedDate::new("2020", "6", "23"));
        assert_eq!(
            dates.dates[1].reason.as_deref(),
            Some("I need this day off")
        );
    }

    #[test]
    fn multimedia_without_a_description_means_own_equipment() {
        let case_data = json!({"multimediaEvidence": "Yes"});
        let appeal = case_to_appeal(&details_with(case_data));
        let other = &appeal.cma_requirements.other_needs;
        assert_eq!(other.multimedia_evidence, Some(true));
        assert_eq!(other.bring_own_multimedia_equipment, Some(true));
        assert_eq!(other.bring_own_multimedia_equipment_reason, None);
    }

    #[test]
    fn encode_of_a_decoded_case_resolves_every_document() {
        let details = details_with(base_case_data());
        let appeal = case_to_appeal(&details);
        let case = crate::appeal_to_case(&appeal).unwrap();
        let document = case.application_out_of_time_document.unwrap();
        assert_eq!(document.document_url, "http://dm-store:4506/documents/9f788e06");
        assert_eq!(
            document.document_binary_url,
            "http://dm-store:4506/documents/9f788e06/binary"
        );
    }
}
