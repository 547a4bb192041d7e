use crate::date::PartedDate;
use serde::{Deserialize, Serialize};

/// Case-management-appointment requirements, grouped the way the wizard
/// collects them: access needs, other needs, then dates to avoid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CmaRequirements {
    pub access_needs: AccessNeeds,
    pub other_needs: OtherNeeds,
    pub dates_to_avoid: DatesToAvoid,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessNeeds {
    pub is_interpreter_services_needed: bool,
    pub interpreter_language: Vec<InterpreterLanguage>,
    pub is_hearing_room_needed: bool,
    pub is_hearing_loop_needed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterpreterLanguage {
    pub language: String,
    pub language_dialect: Option<String>,
}

/// Each yes/no answer and, where the page asks for one, its reason. The
/// multimedia pair is inverted on the wire: the case record carries a
/// description only when the appellant cannot bring their own equipment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OtherNeeds {
    pub multimedia_evidence: Option<bool>,
    pub bring_own_multimedia_equipment: Option<bool>,
    pub bring_own_multimedia_equipment_reason: Option<String>,
    pub single_sex_appointment: Option<bool>,
    pub single_sex_type_appointment: Option<String>,
    pub single_sex_appointment_reason: Option<String>,
    pub private_appointment: Option<bool>,
    pub private_appointment_reason: Option<String>,
    pub health_conditions: Option<bool>,
    pub health_conditions_reason: Option<String>,
    pub past_experiences: Option<bool>,
    pub past_experiences_reason: Option<String>,
    pub anything_else: Option<bool>,
    pub anything_else_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatesToAvoid {
    pub is_date_cannot_attend: Option<bool>,
    pub dates: Vec<DateToAvoid>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateToAvoid {
    pub date: PartedDate,
    pub reason: Option<String>,
}
