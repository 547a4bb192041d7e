use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A date exactly as a user types it into the three-field date input.
///
/// Parts are kept as strings: the session must echo back whatever was typed
/// (including leading zeros) when a page is re-rendered with errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartedDate {
    pub year: String,
    pub month: String,
    pub day: String,
}

impl PartedDate {
    #[must_use]
    pub fn new(year: impl Into<String>, month: impl Into<String>, day: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            month: month.into(),
            day: day.into(),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.year.trim().is_empty() && !self.month.trim().is_empty() && !self.day.trim().is_empty()
    }

    /// Calendar interpretation of the parts, if they form a real date.
    #[must_use]
    pub fn as_naive_date(&self) -> Option<NaiveDate> {
        let year = self.year.trim().parse::<i32>().ok()?;
        let month = self.month.trim().parse::<u32>().ok()?;
        let day = self.day.trim().parse::<u32>().ok()?;
        if !(1000..=9999).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// Zero-padded `YYYY-MM-DD`, the format the case store expects.
    #[must_use]
    pub fn to_iso(&self) -> Option<String> {
        self.as_naive_date().map(|d| d.format("%Y-%m-%d").to_string())
    }

    /// Parses an ISO `YYYY-MM-DD` into parts without leading zeros, which is
    /// how the wizard pages redisplay stored dates (`2019-01-02` -> `1`/`2`).
    #[must_use]
    pub fn from_iso(value: &str) -> Option<Self> {
        let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()?;
        Some(Self {
            year: date.year().to_string(),
            month: date.month().to_string(),
            day: date.day().to_string(),
        })
    }
}

impl Display for PartedDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.day, self.month, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_output_is_zero_padded() {
        let date = PartedDate::new("2019", "2", "3");
        assert_eq!(date.to_iso().as_deref(), Some("2019-02-03"));
        let padded = PartedDate::new("2019", "02", "01");
        assert_eq!(padded.to_iso().as_deref(), Some("2019-02-01"));
    }

    #[test]
    fn iso_input_drops_leading_zeros() {
        let date = PartedDate::from_iso("2019-01-02").expect("valid iso date");
        assert_eq!(date.year, "2019");
        assert_eq!(date.month, "1");
        assert_eq!(date.day, "2");
    }

    #[test]
    fn invalid_calendar_dates_are_rejected() {
        assert!(PartedDate::new("2019", "2", "30").as_naive_date().is_none());
        assert!(PartedDate::new("20190", "1", "1").as_naive_date().is_none());
        assert!(PartedDate::new("2019", "x", "1").as_naive_date().is_none());
        assert!(PartedDate::from_iso("02-01-2019").is_none());
    }

    #[test]
    fn completeness_requires_all_three_parts() {
        assert!(PartedDate::new("2019", "1", "2").is_complete());
        assert!(!PartedDate::new("2019", "", "2").is_complete());
        assert!(!PartedDate::default().is_complete());
    }
}
