//! Input validation for tool parameters.

use chrono::NaiveDate;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid date format. Use YYYY-MM-DD.")]
    #[diagnostic(code(kharcha::validate::invalid_date))]
    InvalidDate { input: String },

    #[error("End date ({end}) cannot be earlier than start date ({start}).")]
    #[diagnostic(code(kharcha::validate::end_before_start))]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

/// Parse a strict `YYYY-MM-DD` date.
///
/// Exactly four year digits, two month digits and two day digits. Anything
/// else, including impossible calendar dates and year 0000, is rejected.
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::InvalidDate {
        input: input.to_string(),
    };

    let bytes = input.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return Err(invalid());
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return Err(invalid());
    }

    let year: i32 = input[0..4].parse().map_err(|_| invalid())?;
    let month: u32 = input[5..7].parse().map_err(|_| invalid())?;
    let day: u32 = input[8..10].parse().map_err(|_| invalid())?;
    if year == 0 {
        return Err(invalid());
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Fails when `end` is before `start`. Equal dates are a one-day range.
pub fn check_range(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end < start {
        return Err(ValidationError::EndBeforeStart { start, end });
    }
    Ok(())
}

/// Treat blank strings as absent, trimming the rest.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
