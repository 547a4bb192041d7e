// SPDX-License-Identifier: Apache-2.0

use crate::date::PartedDate;
use chrono::Utc;
use serde::{Deserialize, Serialize};

pub const HOME_OFFICE_REF_MAX_LEN: usize = 10;

/// A field-level validation failure, shaped for re-rendering the page that
/// produced it: `href` anchors the error summary link to the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub key: String,
    pub text: String,
    pub href: String,
}

impl FieldError {
    #[must_use]
    pub fn new(key: &str, text: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            text: text.into(),
            href: format!("#{key}"),
        }
    }
}

/// Home Office references are one or two letters followed by six to eight
/// digits, or a purely numeric CID reference up to nine digits.
pub fn validate_home_office_reference(raw: &str) -> Result<String, FieldError> {
    let value = raw.trim();
    let invalid = || {
        FieldError::new(
            "homeOfficeRefNumber",
            "Enter your Home Office reference number in the correct format",
        )
    };
    if value.is_empty() || value.len() > HOME_OFFICE_REF_MAX_LEN {
        return Err(invalid());
    }
    let letters = value.chars().take_while(|c| c.is_ascii_alphabetic()).count();
    let digits = &value[letters..];
    if letters > 2 || digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let ok = if letters == 0 {
        (1..=9).contains(&digits.len())
    } else {
        (6..=8).contains(&digits.len())
    };
    if ok {
        Ok(value.to_string())
    } else {
        Err(invalid())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRule {
    /// The date must not be after today (letter-sent, date of birth).
    NotInFuture,
    /// Any calendar-valid date (dates to avoid may be in the future).
    Any,
}

/// Validates a parted date field-by-field so the page can anchor errors on
/// the part that is wrong. Missing parts are reported before format errors.
pub fn validate_parted_date(date: &PartedDate, rule: DateRule) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    for (key, value) in [
        ("day", &date.day),
        ("month", &date.month),
        ("year", &date.year),
    ] {
        if value.trim().is_empty() {
            errors.push(FieldError::new(key, format!("Enter the {key}")));
        } else if !value.trim().chars().all(|c| c.is_ascii_digit()) {
            errors.push(FieldError::new(key, "Needs to be a valid date."));
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }
    let Some(parsed) = date.as_naive_date() else {
        return Err(vec![FieldError::new("year", "Needs to be a valid date.")]);
    };
    if rule == DateRule::NotInFuture && parsed > Utc::now().date_naive() {
        return Err(vec![FieldError::new(
            "day",
            "The date must not be in the future",
        )]);
    }
    Ok(())
}

pub fn validate_required_text(key: &str, raw: &str, message: &str) -> Result<String, FieldError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldError::new(key, message));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Duration, Utc};

    #[test]
    fn accepts_prefixed_and_numeric_references() {
        assert!(validate_home_office_reference("A1234567").is_ok());
        assert!(validate_home_office_reference("GB123456").is_ok());
        assert!(validate_home_office_reference("123456789").is_ok());
        assert!(validate_home_office_reference(" A1234567 ").is_ok());
    }

    #[test]
    fn rejects_malformed_references() {
        for raw in ["notValid", "", "A12", "ABC123456", "A123456789", "12345678901"] {
            assert!(validate_home_office_reference(raw).is_err(), "{raw}");
        }
    }

    #[test]
    fn date_in_future_fails_the_letter_sent_rule() {
        let future = Utc::now().date_naive() + Duration::days(10);
        let date = PartedDate::new(
            future.year().to_string(),
            future.month().to_string(),
            future.day().to_string(),
        );
        assert!(validate_parted_date(&date, DateRule::NotInFuture).is_err());
        assert!(validate_parted_date(&date, DateRule::Any).is_ok());
    }

    #[test]
    fn missing_and_malformed_parts_report_their_field() {
        let date = PartedDate::new("20190", "1", "1");
        let errors = validate_parted_date(&date, DateRule::NotInFuture).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].key, "year");
        assert_eq!(errors[0].href, "#year");

        let date = PartedDate::new("", "1", "");
        let errors = validate_parted_date(&date, DateRule::NotInFuture).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].key, "day");
    }

    #[test]
    fn required_text_trims_and_rejects_blank() {
        assert_eq!(
            validate_required_text("reason", "  late  ", "Enter a reason").unwrap(),
            "late"
        );
        assert!(validate_required_text("reason", "   ", "Enter a reason").is_err());
    }
}
