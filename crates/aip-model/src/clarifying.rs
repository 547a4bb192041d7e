use crate::appeal::Evidence;
use serde::{Deserialize, Serialize};

/// One clarifying question as held in the session, with the appellant's
/// draft answer and any supporting evidence attached so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClarifyingQuestion {
    pub id: Option<String>,
    pub value: ClarifyingAnswer,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClarifyingAnswer {
    pub date_sent: Option<String>,
    pub due_date: Option<String>,
    pub question: String,
    pub answer: Option<String>,
    pub supporting_evidence: Option<Vec<Evidence>>,
    pub date_responded: Option<String>,
}

/// The fixed final question every round of clarifying questions ends with.
pub const ANYTHING_ELSE_QUESTION: &str = "Do you want to tell us anything else about your case?";
