use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Events the frontend is allowed to fire against a case. The identifier is
/// the case store's event id; the summary doubles as the audit-log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Event {
    StartAppeal,
    EditAppeal,
    SubmitAppeal,
    SubmitReasonsForAppeal,
    SubmitClarifyingQuestionAnswers,
    SubmitCmaRequirements,
    SubmitTimeExtension,
    Unknown,
}

impl Event {
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::StartAppeal => "startAppeal",
            Self::EditAppeal => "editAppeal",
            Self::SubmitAppeal => "submitAppeal",
            Self::SubmitReasonsForAppeal => "submitReasonsForAppeal",
            Self::SubmitClarifyingQuestionAnswers => "submitClarifyingQuestionAnswers",
            Self::SubmitCmaRequirements => "submitCmaRequirements",
            Self::SubmitTimeExtension => "submitTimeExtension",
            Self::Unknown => "unknown",
        }
    }

    #[must_use]
    pub fn summary(self) -> &'static str {
        match self {
            Self::StartAppeal => "Start appeal case AIP",
            Self::EditAppeal => "Update appeal case AIP",
            Self::SubmitAppeal => "Submit appeal case AIP",
            Self::SubmitReasonsForAppeal => "Submits reasons for appeal case AIP",
            Self::SubmitClarifyingQuestionAnswers => "Submits clarifying question answers",
            Self::SubmitCmaRequirements => "Submit case management appointment requirements",
            Self::SubmitTimeExtension => "Submit an appellant time extension",
            Self::Unknown => "Unknown event",
        }
    }
}

impl From<String> for Event {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "startAppeal" => Self::StartAppeal,
            "editAppeal" => Self::EditAppeal,
            "submitAppeal" => Self::SubmitAppeal,
            "submitReasonsForAppeal" => Self::SubmitReasonsForAppeal,
            "submitClarifyingQuestionAnswers" => Self::SubmitClarifyingQuestionAnswers,
            "submitCmaRequirements" => Self::SubmitCmaRequirements,
            "submitTimeExtension" => Self::SubmitTimeExtension,
            _ => Self::Unknown,
        }
    }
}

impl From<Event> for String {
    fn from(event: Event) -> Self {
        event.id().to_string()
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}
