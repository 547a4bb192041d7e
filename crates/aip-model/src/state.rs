// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Case states the frontend distinguishes. The case store owns the state
/// machine; we only read the state back and branch page content on it, so
/// unrecognized states are carried through rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AppealState {
    AppealStarted,
    AppealSubmitted,
    AwaitingRespondentEvidence,
    AwaitingReasonsForAppeal,
    ReasonsForAppealSubmitted,
    AwaitingClarifyingQuestionsAnswers,
    ClarifyingQuestionsAnswersSubmitted,
    AwaitingCmaRequirements,
    CmaRequirementsSubmitted,
    CmaAdjustmentsAgreed,
    CmaListed,
    Other(String),
}

impl AppealState {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::AppealStarted => "appealStarted",
            Self::AppealSubmitted => "appealSubmitted",
            Self::AwaitingRespondentEvidence => "awaitingRespondentEvidence",
            Self::AwaitingReasonsForAppeal => "awaitingReasonsForAppeal",
            Self::ReasonsForAppealSubmitted => "reasonsForAppealSubmitted",
            Self::AwaitingClarifyingQuestionsAnswers => "awaitingClarifyingQuestionsAnswers",
            Self::ClarifyingQuestionsAnswersSubmitted => "clarifyingQuestionsAnswersSubmitted",
            Self::AwaitingCmaRequirements => "awaitingCmaRequirements",
            Self::CmaRequirementsSubmitted => "cmaRequirementsSubmitted",
            Self::CmaAdjustmentsAgreed => "cmaAdjustmentsAgreed",
            Self::CmaListed => "cmaListed",
            Self::Other(raw) => raw,
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "appealStarted" => Self::AppealStarted,
            "appealSubmitted" => Self::AppealSubmitted,
            "awaitingRespondentEvidence" => Self::AwaitingRespondentEvidence,
            "awaitingReasonsForAppeal" => Self::AwaitingReasonsForAppeal,
            "reasonsForAppealSubmitted" => Self::ReasonsForAppealSubmitted,
            "awaitingClarifyingQuestionsAnswers" => Self::AwaitingClarifyingQuestionsAnswers,
            "clarifyingQuestionsAnswersSubmitted" => Self::ClarifyingQuestionsAnswersSubmitted,
            "awaitingCmaRequirements" => Self::AwaitingCmaRequirements,
            "cmaRequirementsSubmitted" => Self::CmaRequirementsSubmitted,
            "cmaAdjustmentsAgreed" => Self::CmaAdjustmentsAgreed,
            "cmaListed" => Self::CmaListed,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Default for AppealState {
    fn default() -> Self {
        Self::AppealStarted
    }
}

impl Display for AppealState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for AppealState {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<AppealState> for String {
    fn from(state: AppealState) -> Self {
        state.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_states_round_trip() {
        for raw in [
            "appealStarted",
            "awaitingReasonsForAppeal",
            "awaitingClarifyingQuestionsAnswers",
            "awaitingCmaRequirements",
            "cmaListed",
        ] {
            assert_eq!(AppealState::parse(raw).as_str(), raw);
        }
    }

    #[test]
    fn unknown_state_is_carried_through() {
        let state = AppealState::parse("decisionPending");
        assert_eq!(state, AppealState::Other("decisionPending".to_string()));
        assert_eq!(state.as_str(), "decisionPending");
    }
}
