#![forbid(unsafe_code)]
//! Case-record wire format and the session <-> case mapping.
//!
//! The remote case store keeps one flat, mostly-optional record per appeal;
//! the session keeps the same facts nested the way the wizard collects them.
//! `appeal_to_case` and `case_to_appeal` are the only two ways across, and
//! both are pure: no I/O, no clocks, no global state.

mod decode;
mod docmap;
mod encode;
mod event;
mod wire;
mod yes_no;

pub use decode::case_to_appeal;
pub use docmap::DocumentMap;
pub use encode::appeal_to_case;
pub use event::Event;
pub use wire::{
    CaseAddressUk, CaseData, CaseDetails, CaseDocument, IdValue, WireClarifyingAnswer,
    WireDateToAvoid, WireDirection, WireDocumentWithMetadata, WireInterpreterLanguage,
    WireNationality, WireRespondentDocument, WireSubscription, WireTimeExtension,
    CLARIFYING_QUESTIONS_DIRECTION_TAG, JOURNEY_TYPE_AIP,
};
pub use yes_no::YesNo;

use std::fmt::{Display, Formatter};

/// Raised when the session refers to a document the map cannot resolve;
/// everything else in the mapping is best-effort and total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingError(pub String);

impl Display for MappingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for MappingError {}

pub const CRATE_NAME: &str = "aip-case";
