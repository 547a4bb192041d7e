use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The case store's boolean: the literal strings `"Yes"` and `"No"`.
///
/// Records written by other services sometimes carry `"true"`/`"false"` in
/// these fields; anything that is not exactly `"Yes"` reads as no.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    #[must_use]
    pub fn as_bool(self) -> bool {
        self == Self::Yes
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

impl Default for YesNo {
    fn default() -> Self {
        Self::No
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value {
            Self::Yes
        } else {
            Self::No
        }
    }
}

impl From<String> for YesNo {
    fn from(raw: String) -> Self {
        if raw == "Yes" {
            Self::Yes
        } else {
            Self::No
        }
    }
}

impl From<YesNo> for String {
    fn from(value: YesNo) -> Self {
        value.as_str().to_string()
    }
}

impl Display for YesNo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_exact_yes_literal_reads_as_yes() {
        for raw in ["No", "true", "false", "yes", "YES", ""] {
            assert!(!YesNo::from(raw.to_string()).as_bool(), "{raw}");
        }
        assert!(YesNo::from("Yes".to_string()).as_bool());
    }

    #[test]
    fn serializes_as_the_literal_strings() {
        assert_eq!(serde_json::to_string(&YesNo::Yes).unwrap(), "\"Yes\"");
        assert_eq!(serde_json::to_string(&YesNo::No).unwrap(), "\"No\"");
        let parsed: YesNo = serde_json::from_str("\"true\"").unwrap();
        assert_eq!(parsed, YesNo::No);
    }
}
