// SPDX-License-Identifier: Apache-2.0

use crate::docmap::DocumentMap;
use crate::wire::{
    CaseAddressUk, CaseData, CaseDocument, IdValue, WireClarifyingAnswer, WireDateToAvoid,
    WireDocumentWithMetadata, WireInterpreterLanguage, WireNationality, WireSubscription,
    JOURNEY_TYPE_AIP,
};
use crate::yes_no::YesNo;
use crate::MappingError;
use aip_model::{Appeal, CmaRequirements, Evidence};

const SUBSCRIBER_APPELLANT: &str = "appellant";
const ADDRESS_COUNTRY_UK: &str = "United Kingdom";
const DEFAULT_EVIDENCE_TAG: &str = "additionalEvidence";

/// Flattens the session appeal into the store's record shape. Only answered
/// fields are emitted; an untouched appeal encodes to `journeyType` alone.
pub fn appeal_to_case(appeal: &Appeal) -> Result<CaseData, MappingError> {
    let map = DocumentMap::from_entries(appeal.document_map.clone());
    let mut case = CaseData {
        journey_type: Some(JOURNEY_TYPE_AIP.to_string()),
        ..CaseData::default()
    };

    let application = &appeal.application;
    case.home_office_reference_number = application.home_office_ref_number.clone();

    if application.date_letter_sent.is_complete() {
        case.home_office_decision_date = application.date_letter_sent.to_iso();
        case.submission_out_of_time = Some(YesNo::from(application.is_appeal_late));
    }
    if application.is_appeal_late {
        if let Some(late) = &application.late_appeal {
            case.application_out_of_time_explanation = late.reason.clone();
            if let Some(evidence) = &late.evidence {
                case.application_out_of_time_document = Some(resolve_document(&map, evidence)?);
            }
        }
    }

    let personal = &application.personal_details;
    case.appellant_given_names = personal.given_names.clone();
    case.appellant_family_name = personal.family_name.clone();
    if personal.dob.is_complete() {
        case.appellant_date_of_birth = personal.dob.to_iso();
    }
    if let Some(code) = &personal.nationality {
        case.appellant_nationalities = Some(vec![IdValue::new(WireNationality {
            code: code.clone(),
        })]);
    }
    if let Some(address) = &personal.address {
        case.appellant_has_fixed_address = Some(YesNo::Yes);
        case.appellant_address = Some(CaseAddressUk {
            address_line_1: address.line1.clone(),
            address_line_2: address.line2.clone().unwrap_or_default(),
            post_town: address.city.clone(),
            county: address.county.clone().unwrap_or_default(),
            post_code: address.postcode.clone(),
            country: ADDRESS_COUNTRY_UK.to_string(),
        });
    }

    case.appeal_type = application.appeal_type.clone();

    let contact = &application.contact_details;
    if contact.email.is_some() || contact.phone.is_some() {
        case.subscriptions = Some(vec![IdValue::new(WireSubscription {
            subscriber: SUBSCRIBER_APPELLANT.to_string(),
            wants_email: YesNo::from(contact.wants_email),
            email: contact.email.clone(),
            wants_sms: YesNo::from(contact.wants_sms),
            mobile_number: contact.phone.clone(),
        })]);
    }

    let reasons = &appeal.reasons_for_appeal;
    case.reasons_for_appeal_decision = reasons.application_reason.clone();
    case.reasons_for_appeal_date_uploaded = reasons.upload_date.clone();
    if !reasons.evidences.is_empty() {
        let docs = reasons
            .evidences
            .iter()
            .map(|evidence| {
                Ok(IdValue::new(WireDocumentWithMetadata {
                    date_uploaded: evidence.date_uploaded.as_ref().and_then(|d| d.to_iso()),
                    description: evidence.description.clone(),
                    tag: Some(
                        evidence
                            .tag
                            .clone()
                            .unwrap_or_else(|| DEFAULT_EVIDENCE_TAG.to_string()),
                    ),
                    document: resolve_document(&map, evidence)?,
                }))
            })
            .collect::<Result<Vec<_>, MappingError>>()?;
        case.reasons_for_appeal_documents = Some(docs);
    }

    if let Some(answers) = &appeal.clarifying_questions_answers {
        let wire = answers
            .iter()
            .map(|question| {
                let supporting = match &question.value.supporting_evidence {
                    Some(evidences) => Some(
                        evidences
                            .iter()
                            .map(|e| Ok(IdValue::new(resolve_document(&map, e)?)))
                            .collect::<Result<Vec<_>, MappingError>>()?,
                    ),
                    None => None,
                };
                Ok(IdValue {
                    id: question.id.clone(),
                    value: WireClarifyingAnswer {
                        date_sent: question.value.date_sent.clone(),
                        due_date: question.value.due_date.clone(),
                        question: question.value.question.clone(),
                        answer: question.value.answer.clone(),
                        supporting_evidence: supporting,
                        date_responded: question.value.date_responded.clone(),
                    },
                })
            })
            .collect::<Result<Vec<_>, MappingError>>()?;
        case.clarifying_questions_answers = Some(wire);
    }

    let more_time = &appeal.ask_for_more_time;
    if more_time.reason.is_some() {
        case.submit_time_extension_reason = more_time.reason.clone();
        let evidence = more_time
            .evidence
            .iter()
            .map(|e| Ok(IdValue::new(resolve_document(&map, e)?)))
            .collect::<Result<Vec<_>, MappingError>>()?;
        case.submit_time_extension_evidence = Some(evidence);
        if more_time.review_requested {
            case.review_time_extension_required = Some(YesNo::Yes);
        }
    }

    encode_cma_requirements(&appeal.cma_requirements, &mut case);
    Ok(case)
}

fn encode_cma_requirements(cma: &CmaRequirements, case: &mut CaseData) {
    let access = &cma.access_needs;
    if access.is_interpreter_services_needed || !access.interpreter_language.is_empty() {
        case.is_interpreter_services_needed =
            Some(YesNo::from(access.is_interpreter_services_needed));
        if access.is_interpreter_services_needed {
            case.interpreter_language = Some(
                access
                    .interpreter_language
                    .iter()
                    .map(|lang| {
                        IdValue::new(WireInterpreterLanguage {
                            language: lang.language.clone(),
                            language_dialect: lang.language_dialect.clone(),
                        })
                    })
                    .collect(),
            );
        }
        case.is_hearing_room_needed = Some(YesNo::from(access.is_hearing_room_needed));
        case.is_hearing_loop_needed = Some(YesNo::from(access.is_hearing_loop_needed));
    }

    let other = &cma.other_needs;
    if let Some(multimedia) = other.multimedia_evidence {
        case.multimedia_evidence = Some(YesNo::from(multimedia));
        // Description is recorded only when the appellant cannot bring
        // their own playback equipment.
        if multimedia && other.bring_own_multimedia_equipment == Some(false) {
            case.multimedia_evidence_description =
                other.bring_own_multimedia_equipment_reason.clone();
        }
    }
    if let Some(single_sex) = other.single_sex_appointment {
        case.single_sex_court = Some(YesNo::from(single_sex));
        if single_sex {
            case.single_sex_court_type = other.single_sex_type_appointment.clone();
            case.single_sex_court_type_description = other.single_sex_appointment_reason.clone();
        }
    }
    if let Some(private) = other.private_appointment {
        case.in_camera_court = Some(YesNo::from(private));
        if private {
            case.in_camera_court_description = other.private_appointment_reason.clone();
        }
    }
    if let Some(health) = other.health_conditions {
        case.physical_or_mental_health_issues = Some(YesNo::from(health));
        if health {
            case.physical_or_mental_health_issues_description =
                other.health_conditions_reason.clone();
        }
    }
    if let Some(past) = other.past_experiences {
        case.past_experiences = Some(YesNo::from(past));
        if past {
            case.past_experiences_description = other.past_experiences_reason.clone();
        }
    }
    if let Some(anything) = other.anything_else {
        case.additional_requests = Some(YesNo::from(anything));
        if anything {
            case.additional_requests_description = other.anything_else_reason.clone();
        }
    }

    let dates = &cma.dates_to_avoid;
    if let Some(cannot_attend) = dates.is_date_cannot_attend {
        case.dates_to_avoid_yes_no = Some(YesNo::from(cannot_attend));
        if !dates.dates.is_empty() {
            case.dates_to_avoid = Some(
                dates
                    .dates
                    .iter()
                    .filter_map(|entry| {
                        entry.date.to_iso().map(|iso| {
                            IdValue::new(WireDateToAvoid {
                                date_to_avoid: iso,
                                date_to_avoid_reason: entry.reason.clone(),
                            })
                        })
                    })
                    .collect(),
            );
        }
    }
}

fn resolve_document(map: &DocumentMap, evidence: &Evidence) -> Result<CaseDocument, MappingError> {
    let url = map.resolve(&evidence.file_id).ok_or_else(|| {
        MappingError(format!(
            "document {} is not present in the document map",
            evidence.file_id
        ))
    })?;
    Ok(CaseDocument::new(url, &evidence.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aip_model::{
        Address, AskForMoreTime, ContactDetails, DateToAvoid, DocumentRef, InterpreterLanguage,
        LateAppeal, PartedDate,
    };

    fn empty_appeal() -> Appeal {
        Appeal::default()
    }

    fn only_journey_type() -> CaseData {
        CaseData {
            journey_type: Some("aip".to_string()),
            ..CaseData::default()
        }
    }

    #[test]
    fn converts_empty_application() {
        let case = appeal_to_case(&empty_appeal()).unwrap();
        assert_eq!(case, only_journey_type());
    }

    #[test]
    fn converts_home_office_reference_number() {
        let mut appeal = empty_appeal();
        appeal.application.home_office_ref_number = Some("ref".to_string());
        let case = appeal_to_case(&appeal).unwrap();
        assert_eq!(
            case.home_office_reference_number.as_deref(),
            Some("ref")
        );
        assert_eq!(case.home_office_decision_date, None);
    }

    #[test]
    fn converts_letter_date_with_and_without_leading_zeros() {
        for (parts, iso) in [
            (("2019", "12", "11"), "2019-12-11"),
            (("2019", "02", "01"), "2019-02-01"),
            (("2019", "2", "3"), "2019-02-03"),
        ] {
            let mut appeal = empty_appeal();
            appeal.application.date_letter_sent = PartedDate::new(parts.0, parts.1, parts.2);
            appeal.application.is_appeal_late = true;
            let case = appeal_to_case(&appeal).unwrap();
            assert_eq!(case.home_office_decision_date.as_deref(), Some(iso));
            assert_eq!(case.submission_out_of_time, Some(YesNo::Yes));
        }
    }

    #[test]
    fn on_time_appeal_encodes_submission_out_of_time_no() {
        let mut appeal = empty_appeal();
        appeal.application.date_letter_sent = PartedDate::new("2020", "1", "1");
        appeal.application.is_appeal_late = false;
        let case = appeal_to_case(&appeal).unwrap();
        assert_eq!(case.submission_out_of_time, Some(YesNo::No));
        assert_eq!(case.application_out_of_time_explanation, None);
    }

    #[test]
    fn converts_names_and_date_of_birth() {
        let mut appeal = empty_appeal();
        appeal.application.personal_details.given_names = Some("givenNames".to_string());
        appeal.application.personal_details.family_name = Some("familyName".to_string());
        appeal.application.personal_details.dob = PartedDate::new("1980", "1", "2");
        let case = appeal_to_case(&appeal).unwrap();
        assert_eq!(case.appellant_given_names.as_deref(), Some("givenNames"));
        assert_eq!(case.appellant_family_name.as_deref(), Some("familyName"));
        assert_eq!(case.appellant_date_of_birth.as_deref(), Some("1980-01-02"));
    }

    #[test]
    fn converts_nationality_and_address() {
        let mut appeal = empty_appeal();
        appeal.application.personal_details.nationality = Some("AF".to_string());
        appeal.application.personal_details.address = Some(Address {
            line1: "60 Beautiful Street".to_string(),
            line2: Some("Flat 2".to_string()),
            city: "London".to_string(),
            county: Some("London".to_string()),
            postcode: "W1W 7RT".to_string(),
        });
        let case = appeal_to_case(&appeal).unwrap();
        let nationalities = case.appellant_nationalities.unwrap();
        assert_eq!(nationalities[0].value.code, "AF");
        assert_eq!(case.appellant_has_fixed_address, Some(YesNo::Yes));
        let address = case.appellant_address.unwrap();
        assert_eq!(address.address_line_1, "60 Beautiful Street");
        assert_eq!(address.post_town, "London");
        assert_eq!(address.country, "United Kingdom");
    }

    #[test]
    fn converts_contact_details_per_channel() {
        let mut appeal = empty_appeal();
        appeal.application.contact_details = ContactDetails {
            email: Some("abc@example.net".to_string()),
            wants_email: true,
            phone: None,
            wants_sms: false,
        };
        let case = appeal_to_case(&appeal).unwrap();
        let subs = case.subscriptions.unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].value.subscriber, "appellant");
        assert_eq!(subs[0].value.wants_email, YesNo::Yes);
        assert_eq!(subs[0].value.email.as_deref(), Some("abc@example.net"));
        assert_eq!(subs[0].value.wants_sms, YesNo::No);
        assert_eq!(subs[0].value.mobile_number, None);
    }

    #[test]
    fn declined_contact_serializes_null_channels() {
        let mut appeal = empty_appeal();
        appeal.application.contact_details = ContactDetails {
            email: None,
            wants_email: false,
            phone: Some("07123456789".to_string()),
            wants_sms: true,
        };
        let case = appeal_to_case(&appeal).unwrap();
        let json = serde_json::to_value(&case).unwrap();
        let sub = &json["subscriptions"][0]["value"];
        assert_eq!(sub["email"], serde_json::Value::Null);
        assert_eq!(sub["wantsSms"], "Yes");
        assert_eq!(sub["mobileNumber"], "07123456789");
    }

    #[test]
    fn late_appeal_document_resolves_through_the_map() {
        let mut appeal = empty_appeal();
        appeal.application.date_letter_sent = PartedDate::new("2019", "12", "11");
        appeal.application.is_appeal_late = true;
        appeal.application.late_appeal = Some(LateAppeal {
            reason: Some("a reason".to_string()),
            evidence: Some(Evidence {
                file_id: "00000000-0000-0000-0000-000000000000".to_string(),
                name: "somefile.png".to_string(),
                ..Evidence::default()
            }),
        });
        appeal.document_map = vec![DocumentRef {
            id: "00000000-0000-0000-0000-000000000000".to_string(),
            url: "http://dm-store:4506/documents/00000000-0000-0000-0000-000000000000".to_string(),
        }];
        let case = appeal_to_case(&appeal).unwrap();
        assert_eq!(
            case.application_out_of_time_explanation.as_deref(),
            Some("a reason")
        );
        let document = case.application_out_of_time_document.unwrap();
        assert_eq!(document.document_filename, "somefile.png");
        assert_eq!(
            document.document_binary_url,
            "http://dm-store:4506/documents/00000000-0000-0000-0000-000000000000/binary"
        );
    }

    #[test]
    fn unknown_file_id_is_a_mapping_error() {
        let mut appeal = empty_appeal();
        appeal.application.is_appeal_late = true;
        appeal.application.late_appeal = Some(LateAppeal {
            reason: Some("late".to_string()),
            evidence: Some(Evidence {
                file_id: "not-registered".to_string(),
                name: "f.png".to_string(),
                ..Evidence::default()
            }),
        });
        let err = appeal_to_case(&appeal).unwrap_err();
        assert!(err.0.contains("not-registered"));
    }

    #[test]
    fn reasons_evidence_gets_the_default_tag_and_iso_dates() {
        let mut appeal = empty_appeal();
        appeal.reasons_for_appeal.application_reason =
            Some("I've decided to appeal because ...".to_string());
        appeal.reasons_for_appeal.upload_date = Some("2020-01-02".to_string());
        appeal.reasons_for_appeal.evidences = vec![Evidence {
            file_id: "00000000-0000-0000-0000-000000000001".to_string(),
            name: "File1.png".to_string(),
            date_uploaded: Some(PartedDate::new("2020", "1", "1")),
            description: Some("Some evidence 1".to_string()),
            tag: None,
        }];
        appeal.document_map = vec![DocumentRef {
            id: "00000000-0000-0000-0000-000000000001".to_string(),
            url: "http://dm-store:4506/documents/00000000-0000-0000-0000-000000000001".to_string(),
        }];
        let case = appeal_to_case(&appeal).unwrap();
        assert_eq!(
            case.reasons_for_appeal_decision.as_deref(),
            Some("I've decided to appeal because ...")
        );
        let docs = case.reasons_for_appeal_documents.unwrap();
        assert_eq!(docs[0].value.date_uploaded.as_deref(), Some("2020-01-01"));
        assert_eq!(docs[0].value.tag.as_deref(), Some("additionalEvidence"));
        assert_eq!(docs[0].value.document.document_filename, "File1.png");
    }

    #[test]
    fn more_time_without_a_reason_encodes_nothing() {
        let mut appeal = empty_appeal();
        appeal.ask_for_more_time = AskForMoreTime::default();
        let case = appeal_to_case(&appeal).unwrap();
        assert_eq!(case, only_journey_type());
    }

    #[test]
    fn more_time_request_encodes_reason_evidence_and_review_flag() {
        let mut appeal = empty_appeal();
        appeal.ask_for_more_time = AskForMoreTime {
            reason: Some("more time reason".to_string()),
            evidence: vec![Evidence {
                file_id: "fileId".to_string(),
                name: "name".to_string(),
                ..Evidence::default()
            }],
            review_requested: true,
            ..AskForMoreTime::default()
        };
        appeal.document_map = vec![DocumentRef {
            id: "fileId".to_string(),
            url: "someurl".to_string(),
        }];
        let case = appeal_to_case(&appeal).unwrap();
        assert_eq!(
            case.submit_time_extension_reason.as_deref(),
            Some("more time reason")
        );
        assert_eq!(case.review_time_extension_required, Some(YesNo::Yes));
        let evidence = case.submit_time_extension_evidence.unwrap();
        assert_eq!(evidence[0].value.document_url, "someurl");
        assert_eq!(evidence[0].value.document_binary_url, "someurl/binary");
        assert_eq!(evidence[0].value.document_filename, "name");
    }

    #[test]
    fn cma_requirements_fan_out_to_the_yes_no_scalars() {
        let mut appeal = empty_appeal();
        appeal.cma_requirements = CmaRequirements {
            access_needs: aip_model::AccessNeeds {
                is_interpreter_services_needed: true,
                interpreter_language: vec![InterpreterLanguage {
                    language: "Afar".to_string(),
                    language_dialect: Some("A dialect".to_string()),
                }],
                is_hearing_room_needed: true,
                is_hearing_loop_needed: true,
            },
            other_needs: aip_model::OtherNeeds {
                multimedia_evidence: Some(true),
                bring_own_multimedia_equipment: Some(false),
                bring_own_multimedia_equipment_reason: Some("I do not own the equipment".to_string()),
                single_sex_appointment: Some(true),
                single_sex_type_appointment: Some("All female".to_string()),
                single_sex_appointment_reason: Some(
                    "The reason why I will need an all-female".to_string(),
                ),
                private_appointment: Some(true),
                private_appointment_reason: Some(
                    "The reason why I would need a private appointment".to_string(),
                ),
                health_conditions: Some(true),
                health_conditions_reason: Some("Reason for mental health conditions".to_string()),
                past_experiences: Some(true),
                past_experiences_reason: Some("Past experiences description".to_string()),
                anything_else: Some(true),
                anything_else_reason: Some("Anything else description".to_string()),
            },
            dates_to_avoid: aip_model::DatesToAvoid {
                is_date_cannot_attend: Some(true),
                dates: vec![
                    DateToAvoid {
                        date: PartedDate::new("2020", "06", "23"),
                        reason: Some("I have an important appointment on this day".to_string()),
                    },
                    DateToAvoid {
                        date: PartedDate::new("2020", "06", "24"),
                        reason: Some("I need this day off".to_string()),
                    },
                ],
            },
        };
        let case = appeal_to_case(&appeal).unwrap();
        assert_eq!(case.is_interpreter_services_needed, Some(YesNo::Yes));
        assert_eq!(
            case.interpreter_language.as_ref().unwrap()[0].value.language,
            "Afar"
        );
        assert_eq!(case.is_hearing_room_needed, Some(YesNo::Yes));
        assert_eq!(case.is_hearing_loop_needed, Some(YesNo::Yes));
        assert_eq!(case.multimedia_evidence, Some(YesNo::Yes));
        assert_eq!(
            case.multimedia_evidence_description.as_deref(),
            Some("I do not own the equipment")
        );
        assert_eq!(case.single_sex_court, Some(YesNo::Yes));
        assert_eq!(case.single_sex_court_type.as_deref(), Some("All female"));
        assert_eq!(case.in_camera_court, Some(YesNo::Yes));
        assert_eq!(case.physical_or_mental_health_issues, Some(YesNo::Yes));
        assert_eq!(case.past_experiences, Some(YesNo::Yes));
        assert_eq!(case.additional_requests, Some(YesNo::Yes));
        assert_eq!(case.dates_to_avoid_yes_no, Some(YesNo::Yes));
        let dates = case.dates_to_avoid.unwrap();
        assert_eq!(dates[0].value.date_to_avoid, "2020-06-23");
        assert_eq!(
            dates[1].value.date_to_avoid_reason.as_deref(),
            Some("I need this day off")
        );
    }

    #[test]
    fn own_equipment_suppresses_the_multimedia_description() {
        let mut appeal = empty_appeal();
        appeal.cma_requirements.other_needs.multimedia_evidence = Some(true);
        appeal
            .cma_requirements
            .other_needs
            .bring_own_multimedia_equipment = Some(true);
        let case = appeal_to_case(&appeal).unwrap();
        assert_eq!(case.multimedia_evidence, Some(YesNo::Yes));
        assert_eq!(case.multimedia_evidence_description, None);
    }
}
