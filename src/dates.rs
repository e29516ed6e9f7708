use chrono::{Duration, NaiveDate};

const ISO_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DateError {
    #[error("malformed date {value:?}: expected YYYY-MM-DD")]
    Malformed { value: String },
    #[error("invalid calendar date {value:?}: {source}")]
    Invalid {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Parse a strict `YYYY-MM-DD` calendar date.
///
/// chrono alone accepts single-digit months and signed years, so the shape is
/// checked first and the calendar second.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, DateError> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(DateError::Malformed {
            value: value.to_string(),
        });
    }

    NaiveDate::parse_from_str(value, ISO_FORMAT).map_err(|source| DateError::Invalid {
        value: value.to_string(),
        source,
    })
}

/// Render a date as `YYYY-MM-DD`.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

/// Whole calendar days between two dates, regardless of order.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days().abs()
}

/// `date` shifted by `days` (negative moves backwards).
/// Returns `None` only if the result falls outside chrono's calendar.
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::try_days(days)?)
}

/// `numerator / denominator` rounded half away from zero, in exact integer
/// arithmetic. Both operands are non-negative day-weighted sums.
pub fn round_half_away(numerator: i64, denominator: i64) -> i64 {
    debug_assert!(denominator > 0);
    (2 * numerator + denominator) / (2 * denominator)
}
