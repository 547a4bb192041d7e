#![forbid(unsafe_code)]
//! Session-side model SSOT for the appeal-in-person service.
//!
//! Everything a user types during the wizard lives here, shaped the way the
//! pages collect it (dates as day/month/year parts, yes/no answers as bools).
//! The case-record wire shape and the translation to it live in `aip-case`.

mod appeal;
mod clarifying;
mod cma;
mod date;
mod state;
mod validation;

pub use appeal::{
    Address, Appeal, AppealApplication, AskForMoreTime, ContactDetails, Direction, DocumentRef,
    Evidence, LateAppeal, PersonalDetails, ReasonsForAppeal, RespondentDocument,
};
pub use clarifying::{ClarifyingAnswer, ClarifyingQuestion, ANYTHING_ELSE_QUESTION};
pub use cma::{
    AccessNeeds, CmaRequirements, DateToAvoid, DatesToAvoid, InterpreterLanguage, OtherNeeds,
};
pub use date::PartedDate;
pub use state::AppealState;
pub use validation::{
    validate_home_office_reference, validate_parted_date, validate_required_text, DateRule,
    FieldError, HOME_OFFICE_REF_MAX_LEN,
};

pub const CRATE_NAME: &str = "aip-model";
