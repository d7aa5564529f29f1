//! Calendar-date helpers shared by tasks, goals and callers.

use super::ValidationError;
use chrono::{Local, NaiveDate};

/// Wire format for every persisted calendar date.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();
    // chrono accepts single-digit month/day; the wire format is zero-padded.
    if trimmed.len() != 10 {
        return Err(ValidationError::InvalidDate(trimmed.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(trimmed.to_string()))
}

/// Formats a date in wire format.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Returns the current date in the local timezone.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::{format_iso_date, parse_iso_date};
    use crate::model::ValidationError;
    use chrono::NaiveDate;

    #[test]
    fn parse_accepts_padded_iso_date() {
        let date = parse_iso_date("2024-05-01").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(format_iso_date(date), "2024-05-01");
    }

    #[test]
    fn parse_rejects_unpadded_and_impossible_dates() {
        assert_eq!(
            parse_iso_date("2024-5-1").unwrap_err(),
            ValidationError::InvalidDate("2024-5-1".to_string())
        );
        assert!(parse_iso_date("2024-02-30").is_err());
        assert!(parse_iso_date("").is_err());
    }
}
