// SPDX-License-Identifier: Apache-2.0

//! Case-management-appointment requirements. Most pages are a yes/no radio
//! or a reason textarea that differ only in the appeal field they touch and
//! where they go next, so they share two table-driven handlers; answers stay
//! in the session until the final check-and-send submit.

use super::home_office::PartedDateForm;
use super::{page, page_session, persist, see_other, stash, validation_failed};
use super::reasons::YesNoForm;
use crate::paths::cma_requirements;
use crate::{AppError, AppState};
use aip_case::Event;
use aip_model::{
    validate_parted_date, validate_required_text, Appeal, DateRule, DateToAvoid,
    InterpreterLanguage,
};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Form;
use serde::Deserialize;
use serde_json::json;

/// One yes/no page: the field it reads and writes plus both exits.
struct YesNoPage {
    name: &'static str,
    error: &'static str,
    read: fn(&Appeal) -> Option<bool>,
    write: fn(&mut Appeal, bool),
    next_yes: &'static str,
    next_no: &'static str,
}

async fn yes_no_get(
    state: &AppState,
    headers: &HeaderMap,
    spec: &YesNoPage,
) -> Result<Response, AppError> {
    let session = page_session(state, headers).await?;
    let data = json!({ "answer": (spec.read)(&session.appeal) });
    Ok(page(&session, spec.name, data))
}

async fn yes_no_post(
    state: &AppState,
    headers: &HeaderMap,
    form: YesNoForm,
    spec: &YesNoPage,
) -> Result<Response, AppError> {
    let mut session = page_session(state, headers).await?;
    match form.as_bool(spec.error) {
        Ok(answer) => {
            (spec.write)(&mut session.appeal, answer);
            stash(state, &session, session.appeal.clone()).await;
            let next = if answer { spec.next_yes } else { spec.next_no };
            Ok(see_other(&session, next))
        }
        Err(error) => Ok(validation_failed(&session, spec.name, vec![error], json!({}))),
    }
}

/// One reason-textarea page.
struct ReasonPage {
    name: &'static str,
    error: &'static str,
    read: fn(&Appeal) -> Option<String>,
    write: fn(&mut Appeal, String),
    next: &'static str,
}

async fn reason_get(
    state: &AppState,
    headers: &HeaderMap,
    spec: &ReasonPage,
) -> Result<Response, AppError> {
    let session = page_session(state, headers).await?;
    let data = json!({ "reason": (spec.read)(&session.appeal) });
    Ok(page(&session, spec.name, data))
}

async fn reason_post(
    state: &AppState,
    headers: &HeaderMap,
    form: ReasonForm,
    spec: &ReasonPage,
) -> Result<Response, AppError> {
    let mut session = page_session(state, headers).await?;
    match validate_required_text("reason", &form.reason, spec.error) {
        Ok(reason) => {
            (spec.write)(&mut session.appeal, reason);
            stash(state, &session, session.appeal.clone()).await;
            Ok(see_other(&session, spec.next))
        }
        Err(error) => Ok(validation_failed(
            &session,
            spec.name,
            vec![error],
            json!({ "reason": form.reason }),
        )),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReasonForm {
    #[serde(default)]
    reason: String,
}

pub(crate) async fn task_list_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let cma = &session.appeal.cma_requirements;
    Ok(page(
        &session,
        "appointment-needs",
        json!({
            "otherNeedsStarted": cma.other_needs.multimedia_evidence.is_some(),
            "datesToAvoidStarted": cma.dates_to_avoid.is_date_cannot_attend.is_some(),
        }),
    ))
}

pub(crate) async fn access_needs_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    Ok(page(&session, "access-needs", json!({})))
}

pub(crate) async fn other_needs_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    Ok(page(&session, "other-needs", json!({})))
}

const INTERPRETER: YesNoPage = YesNoPage {
    name: "appointment-interpreter",
    error: "Select Yes if you need an interpreter",
    read: |a| Some(a.cma_requirements.access_needs.is_interpreter_services_needed),
    write: |a, v| {
        a.cma_requirements.access_needs.is_interpreter_services_needed = v;
        if !v {
            a.cma_requirements.access_needs.interpreter_language.clear();
        }
    },
    next_yes: cma_requirements::ADDITIONAL_LANGUAGE,
    next_no: cma_requirements::STEP_FREE_ACCESS,
};

const STEP_FREE_ACCESS: YesNoPage = YesNoPage {
    name: "appointment-step-free-access",
    error: "Select Yes if you need step-free access",
    read: |a| Some(a.cma_requirements.access_needs.is_hearing_room_needed),
    write: |a, v| a.cma_requirements.access_needs.is_hearing_room_needed = v,
    next_yes: cma_requirements::HEARING_LOOP,
    next_no: cma_requirements::HEARING_LOOP,
};

const HEARING_LOOP: YesNoPage = YesNoPage {
    name: "appointment-hearing-loop",
    error: "Select Yes if you need a hearing loop",
    read: |a| Some(a.cma_requirements.access_needs.is_hearing_loop_needed),
    write: |a, v| a.cma_requirements.access_needs.is_hearing_loop_needed = v,
    next_yes: cma_requirements::TASK_LIST,
    next_no: cma_requirements::TASK_LIST,
};

const MULTIMEDIA_EVIDENCE: YesNoPage = YesNoPage {
    name: "appointment-multimedia-evidence",
    error: "Select Yes if you will bring multimedia evidence",
    read: |a| a.cma_requirements.other_needs.multimedia_evidence,
    write: |a, v| a.cma_requirements.other_needs.multimedia_evidence = Some(v),
    next_yes: cma_requirements::MULTIMEDIA_EQUIPMENT,
    next_no: cma_requirements::SINGLE_SEX,
};

const MULTIMEDIA_EQUIPMENT: YesNoPage = YesNoPage {
    name: "appointment-multimedia-evidence-equipment",
    error: "Select Yes if you will bring the equipment to play this evidence",
    read: |a| a.cma_requirements.other_needs.bring_own_multimedia_equipment,
    write: |a, v| {
        a.cma_requirements.other_needs.bring_own_multimedia_equipment = Some(v);
        if v {
            a.cma_requirements.other_needs.bring_own_multimedia_equipment_reason = None;
        }
    },
    next_yes: cma_requirements::SINGLE_SEX,
    next_no: cma_requirements::MULTIMEDIA_EQUIPMENT_REASON,
};

const MULTIMEDIA_EQUIPMENT_REASON: ReasonPage = ReasonPage {
    name: "appointment-multimedia-evidence-equipment-reasons",
    error: "Tell us why you cannot bring the equipment to play this evidence",
    read: |a| a.cma_requirements.other_needs.bring_own_multimedia_equipment_reason.clone(),
    write: |a, v| a.cma_requirements.other_needs.bring_own_multimedia_equipment_reason = Some(v),
    next: cma_requirements::SINGLE_SEX,
};

const SINGLE_SEX: YesNoPage = YesNoPage {
    name: "appointment-single-sex",
    error: "Select Yes if you need an all-female or all-male appointment",
    read: |a| a.cma_requirements.other_needs.single_sex_appointment,
    write: |a, v| {
        a.cma_requirements.other_needs.single_sex_appointment = Some(v);
        if !v {
            a.cma_requirements.other_needs.single_sex_type_appointment = None;
            a.cma_requirements.other_needs.single_sex_appointment_reason = None;
        }
    },
    next_yes: cma_requirements::SINGLE_SEX_TYPE,
    next_no: cma_requirements::PRIVATE,
};

const SINGLE_SEX_TYPE_REASON: ReasonPage = ReasonPage {
    name: "appointment-single-sex-type-reasons",
    error: "Tell us why you need a single-sex appointment",
    read: |a| a.cma_requirements.other_needs.single_sex_appointment_reason.clone(),
    write: |a, v| a.cma_requirements.other_needs.single_sex_appointment_reason = Some(v),
    next: cma_requirements::PRIVATE,
};

const PRIVATE: YesNoPage = YesNoPage {
    name: "appointment-private",
    error: "Select Yes if you need a private appointment",
    read: |a| a.cma_requirements.other_needs.private_appointment,
    write: |a, v| {
        a.cma_requirements.other_needs.private_appointment = Some(v);
        if !v {
            a.cma_requirements.other_needs.private_appointment_reason = None;
        }
    },
    next_yes: cma_requirements::PRIVATE_REASON,
    next_no: cma_requirements::HEALTH_CONDITIONS,
};

const PRIVATE_REASON: ReasonPage = ReasonPage {
    name: "appointment-private-reasons",
    error: "Tell us why you need a private appointment",
    read: |a| a.cma_requirements.other_needs.private_appointment_reason.clone(),
    write: |a, v| a.cma_requirements.other_needs.private_appointment_reason = Some(v),
    next: cma_requirements::HEALTH_CONDITIONS,
};

const HEALTH_CONDITIONS: YesNoPage = YesNoPage {
    name: "appointment-physical-mental-health",
    error: "Select Yes if you have physical or mental health conditions",
    read: |a| a.cma_requirements.other_needs.health_conditions,
    write: |a, v| {
        a.cma_requirements.other_needs.health_conditions = Some(v);
        if !v {
            a.cma_requirements.other_needs.health_conditions_reason = None;
        }
    },
    next_yes: cma_requirements::HEALTH_CONDITIONS_REASON,
    next_no: cma_requirements::PAST_EXPERIENCES,
};

const HEALTH_CONDITIONS_REASON: ReasonPage = ReasonPage {
    name: "appointment-physical-mental-health-reasons",
    error: "Tell us how any physical or mental health conditions may affect you at the appointment",
    read: |a| a.cma_requirements.other_needs.health_conditions_reason.clone(),
    write: |a, v| a.cma_requirements.other_needs.health_conditions_reason = Some(v),
    next: cma_requirements::PAST_EXPERIENCES,
};

const PAST_EXPERIENCES: YesNoPage = YesNoPage {
    name: "appointment-past-experiences",
    error: "Select Yes if past experiences may affect you at the appointment",
    read: |a| a.cma_requirements.other_needs.past_experiences,
    write: |a, v| {
        a.cma_requirements.other_needs.past_experiences = Some(v);
        if !v {
            a.cma_requirements.other_needs.past_experiences_reason = None;
        }
    },
    next_yes: cma_requirements::PAST_EXPERIENCES_REASON,
    next_no: cma_requirements::ANYTHING_ELSE,
};

const PAST_EXPERIENCES_REASON: ReasonPage = ReasonPage {
    name: "appointment-past-experiences-reasons",
    error: "Tell us how any past experiences may affect you at the appointment",
    read: |a| a.cma_requirements.other_needs.past_experiences_reason.clone(),
    write: |a, v| a.cma_requirements.other_needs.past_experiences_reason = Some(v),
    next: cma_requirements::ANYTHING_ELSE,
};

const ANYTHING_ELSE: YesNoPage = YesNoPage {
    name: "appointment-anything-else",
    error: "Select Yes if there is anything else you would like to tell us",
    read: |a| a.cma_requirements.other_needs.anything_else,
    write: |a, v| {
        a.cma_requirements.other_needs.anything_else = Some(v);
        if !v {
            a.cma_requirements.other_needs.anything_else_reason = None;
        }
    },
    next_yes: cma_requirements::ANYTHING_ELSE_REASON,
    next_no: cma_requirements::TASK_LIST,
};

const ANYTHING_ELSE_REASON: ReasonPage = ReasonPage {
    name: "appointment-anything-else-reasons",
    error: "Tell us what else you would like us to know about the appointment",
    read: |a| a.cma_requirements.other_needs.anything_else_reason.clone(),
    write: |a, v| a.cma_requirements.other_needs.anything_else_reason = Some(v),
    next: cma_requirements::TASK_LIST,
};

const DATES_TO_AVOID: YesNoPage = YesNoPage {
    name: "appointment-dates-avoid",
    error: "Select Yes if there are any dates you cannot go to the appointment",
    read: |a| a.cma_requirements.dates_to_avoid.is_date_cannot_attend,
    write: |a, v| {
        a.cma_requirements.dates_to_avoid.is_date_cannot_attend = Some(v);
        if !v {
            a.cma_requirements.dates_to_avoid.dates.clear();
        }
    },
    next_yes: cma_requirements::DATES_TO_AVOID_ENTER,
    next_no: cma_requirements::CHECK_AND_SEND,
};

const ADD_ANOTHER_DATE: YesNoPage = YesNoPage {
    name: "appointment-dates-avoid-new",
    error: "Select Yes if you want to add another date",
    read: |_| None,
    write: |_, _| {},
    next_yes: cma_requirements::DATES_TO_AVOID_ENTER,
    next_no: cma_requirements::CHECK_AND_SEND,
};

macro_rules! yes_no_handlers {
    ($get:ident, $post:ident, $spec:expr) => {
        pub(crate) async fn $get(
            State(state): State<AppState>,
            headers: HeaderMap,
        ) -> Result<Response, AppError> {
            yes_no_get(&state, &headers, &$spec).await
        }

        pub(crate) async fn $post(
            State(state): State<AppState>,
            headers: HeaderMap,
            Form(form): Form<YesNoForm>,
        ) -> Result<Response, AppError> {
            yes_no_post(&state, &headers, form, &$spec).await
        }
    };
}

macro_rules! reason_handlers {
    ($get:ident, $post:ident, $spec:expr) => {
        pub(crate) async fn $get(
            State(state): State<AppState>,
            headers: HeaderMap,
        ) -> Result<Response, AppError> {
            reason_get(&state, &headers, &$spec).await
        }

        pub(crate) async fn $post(
            State(state): State<AppState>,
            headers: HeaderMap,
            Form(form): Form<ReasonForm>,
        ) -> Result<Response, AppError> {
            reason_post(&state, &headers, form, &$spec).await
        }
    };
}

yes_no_handlers!(get_interpreter, post_interpreter, INTERPRETER);
yes_no_handlers!(get_step_free_access, post_step_free_access, STEP_FREE_ACCESS);
yes_no_handlers!(get_hearing_loop, post_hearing_loop, HEARING_LOOP);
yes_no_handlers!(get_multimedia_evidence, post_multimedia_evidence, MULTIMEDIA_EVIDENCE);
yes_no_handlers!(get_multimedia_equipment, post_multimedia_equipment, MULTIMEDIA_EQUIPMENT);
yes_no_handlers!(get_single_sex, post_single_sex, SINGLE_SEX);
yes_no_handlers!(get_private_appointment, post_private_appointment, PRIVATE);
yes_no_handlers!(get_health_conditions, post_health_conditions, HEALTH_CONDITIONS);
yes_no_handlers!(get_past_experiences, post_past_experiences, PAST_EXPERIENCES);
yes_no_handlers!(get_anything_else, post_anything_else, ANYTHING_ELSE);
yes_no_handlers!(get_dates_to_avoid, post_dates_to_avoid, DATES_TO_AVOID);
yes_no_handlers!(get_add_another_date, post_add_another_date, ADD_ANOTHER_DATE);

reason_handlers!(
    get_multimedia_equipment_reason,
    post_multimedia_equipment_reason,
    MULTIMEDIA_EQUIPMENT_REASON
);
reason_handlers!(get_single_sex_reason, post_single_sex_reason, SINGLE_SEX_TYPE_REASON);
reason_handlers!(get_private_reason, post_private_reason, PRIVATE_REASON);
reason_handlers!(
    get_health_conditions_reason,
    post_health_conditions_reason,
    HEALTH_CONDITIONS_REASON
);
reason_handlers!(
    get_past_experiences_reason,
    post_past_experiences_reason,
    PAST_EXPERIENCES_REASON
);
reason_handlers!(get_anything_else_reason, post_anything_else_reason, ANYTHING_ELSE_REASON);

pub(crate) async fn get_additional_language(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let language = session
        .appeal
        .cma_requirements
        .access_needs
        .interpreter_language
        .first();
    let data = json!({
        "language": language.map(|l| l.language.clone()),
        "dialect": language.and_then(|l| l.language_dialect.clone()),
    });
    Ok(page(&session, "appointment-add-language-details", data))
}

#[derive(Debug, Deserialize)]
pub(crate) struct LanguageForm {
    #[serde(default)]
    language: String,
    #[serde(default)]
    dialect: String,
}

pub(crate) async fn post_additional_language(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LanguageForm>,
) -> Result<Response, AppError> {
    let mut session = page_session(&state, &headers).await?;
    match validate_required_text("language", &form.language, "Enter the language you need") {
        Ok(language) => {
            let dialect = form.dialect.trim();
            session.appeal.cma_requirements.access_needs.interpreter_language =
                vec![InterpreterLanguage {
                    language,
                    language_dialect: (!dialect.is_empty()).then(|| dialect.to_string()),
                }];
            stash(&state, &session, session.appeal.clone()).await;
            Ok(see_other(&session, cma_requirements::STEP_FREE_ACCESS))
        }
        Err(error) => Ok(validation_failed(
            &session,
            "appointment-add-language-details",
            vec![error],
            json!({ "language": form.language, "dialect": form.dialect }),
        )),
    }
}

const SINGLE_SEX_TYPES: [&str; 2] = ["All male", "All female"];

pub(crate) async fn get_single_sex_type(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let data = json!({
        "types": SINGLE_SEX_TYPES,
        "selected": session.appeal.cma_requirements.other_needs.single_sex_type_appointment,
    });
    Ok(page(&session, "appointment-single-sex-type", data))
}

#[derive(Debug, Deserialize)]
pub(crate) struct SingleSexTypeForm {
    #[serde(default, rename = "singleSexType")]
    single_sex_type: String,
}

pub(crate) async fn post_single_sex_type(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SingleSexTypeForm>,
) -> Result<Response, AppError> {
    let mut session = page_session(&state, &headers).await?;
    if !SINGLE_SEX_TYPES.contains(&form.single_sex_type.as_str()) {
        return Ok(validation_failed(
            &session,
            "appointment-single-sex-type",
            vec![aip_model::FieldError::new(
                "singleSexType",
                "Select what type of appointment you need",
            )],
            json!({ "types": SINGLE_SEX_TYPES }),
        ));
    }
    session.appeal.cma_requirements.other_needs.single_sex_type_appointment =
        Some(form.single_sex_type);
    stash(&state, &session, session.appeal.clone()).await;
    Ok(see_other(&session, cma_requirements::SINGLE_SEX_TYPE_REASON))
}

pub(crate) async fn get_enter_a_date(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    Ok(page(&session, "appointment-dates-avoid-enter", json!({})))
}

pub(crate) async fn post_enter_a_date(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<PartedDateForm>,
) -> Result<Response, AppError> {
    let mut session = page_session(&state, &headers).await?;
    let date = form.into_date();
    if let Err(errors) = validate_parted_date(&date, DateRule::Any) {
        let data = json!({ "day": date.day, "month": date.month, "year": date.year });
        return Ok(validation_failed(
            &session,
            "appointment-dates-avoid-enter",
            errors,
            data,
        ));
    }
    session
        .appeal
        .cma_requirements
        .dates_to_avoid
        .dates
        .push(DateToAvoid { date, reason: None });
    stash(&state, &session, session.appeal.clone()).await;
    Ok(see_other(&session, cma_requirements::DATES_TO_AVOID_REASON))
}

pub(crate) async fn get_date_reason(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let date = session
        .appeal
        .cma_requirements
        .dates_to_avoid
        .dates
        .last()
        .map(|d| d.date.to_string());
    Ok(page(
        &session,
        "appointment-dates-avoid-reasons",
        json!({ "date": date }),
    ))
}

/// The reason for a date is optional; blank just leaves it unset.
pub(crate) async fn post_date_reason(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ReasonForm>,
) -> Result<Response, AppError> {
    let mut session = page_session(&state, &headers).await?;
    let reason = form.reason.trim();
    if let Some(last) = session.appeal.cma_requirements.dates_to_avoid.dates.last_mut() {
        last.reason = (!reason.is_empty()).then(|| reason.to_string());
    }
    stash(&state, &session, session.appeal.clone()).await;
    Ok(see_other(&session, cma_requirements::DATES_TO_AVOID_ADD_ANOTHER))
}

pub(crate) async fn get_check_and_send(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let cma = &session.appeal.cma_requirements;
    let dates = cma
        .dates_to_avoid
        .dates
        .iter()
        .map(|d| json!({ "date": d.date.to_string(), "reason": d.reason }))
        .collect::<Vec<_>>();
    let data = json!({
        "accessNeeds": {
            "interpreter": cma.access_needs.is_interpreter_services_needed,
            "languages": cma.access_needs.interpreter_language.iter()
                .map(|l| json!({ "language": l.language, "dialect": l.language_dialect }))
                .collect::<Vec<_>>(),
            "stepFreeAccess": cma.access_needs.is_hearing_room_needed,
            "hearingLoop": cma.access_needs.is_hearing_loop_needed,
        },
        "otherNeeds": {
            "multimediaEvidence": cma.other_needs.multimedia_evidence,
            "bringOwnMultimediaEquipment": cma.other_needs.bring_own_multimedia_equipment,
            "bringOwnMultimediaEquipmentReason": cma.other_needs.bring_own_multimedia_equipment_reason,
            "singleSexAppointment": cma.other_needs.single_sex_appointment,
            "singleSexTypeAppointment": cma.other_needs.single_sex_type_appointment,
            "singleSexAppointmentReason": cma.other_needs.single_sex_appointment_reason,
            "privateAppointment": cma.other_needs.private_appointment,
            "privateAppointmentReason": cma.other_needs.private_appointment_reason,
            "healthConditions": cma.other_needs.health_conditions,
            "healthConditionsReason": cma.other_needs.health_conditions_reason,
            "pastExperiences": cma.other_needs.past_experiences,
            "pastExperiencesReason": cma.other_needs.past_experiences_reason,
            "anythingElse": cma.other_needs.anything_else,
            "anythingElseReason": cma.other_needs.anything_else_reason,
        },
        "datesToAvoid": dates,
    });
    Ok(page(&session, "appointment-check-answers", data))
}

pub(crate) async fn post_check_and_send(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    persist(
        &state,
        &session,
        Event::SubmitCmaRequirements,
        &session.appeal.clone(),
    )
    .await?;
    Ok(see_other(&session, cma_requirements::CONFIRMATION))
}

pub(crate) async fn confirmation_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let session = page_session(&state, &headers).await?;
    let data = json!({ "title": "Your appointment needs have been sent" });
    Ok(page(&session, "appointment-success", data))
}
