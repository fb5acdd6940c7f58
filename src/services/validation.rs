//! Schedule for use form validation

use chrono::{Datelike, Days, NaiveDate, Weekday};
use validator::ValidateEmail;

use crate::{
    error::RequestError,
    models::request::{Field, ScheduleFields},
};

/// Minimum notice staff need to pull an item, in weekdays
pub const MIN_NOTICE_WEEKDAYS: u32 = 3;

/// Minimum digits in a phone number
pub const MIN_PHONE_DIGITS: usize = 10;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Check a submission, stopping at the first rule that fails.
///
/// Rules run in order: completeness, email syntax, phone digits, notice
/// period. Only the completeness rule can tag more than one field.
pub fn validate(fields: &ScheduleFields, today: NaiveDate) -> Result<(), RequestError> {
    let missing: Vec<Field> = Field::ALL
        .into_iter()
        .filter(|field| field.is_required() && fields.get(*field).trim().is_empty())
        .collect();

    if !missing.is_empty() {
        return Err(RequestError::MissingFields(missing));
    }

    if !fields.email.validate_email() {
        return Err(RequestError::InvalidEmail);
    }

    if count_digits(&fields.tel) < MIN_PHONE_DIGITS {
        return Err(RequestError::InvalidPhone);
    }

    let earliest = add_weekdays(today, MIN_NOTICE_WEEKDAYS);
    match parse_date(&fields.date) {
        Some(date) if date >= earliest => Ok(()),
        _ => Err(RequestError::DateTooSoon),
    }
}

fn count_digits(value: &str) -> usize {
    value.chars().filter(char::is_ascii_digit).count()
}

/// Parse a form date (`YYYY-MM-DD` from date inputs, `MM/DD/YYYY` typed by hand)
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// Advance `date` by `count` weekdays, skipping Saturdays and Sundays
pub fn add_weekdays(date: NaiveDate, count: u32) -> NaiveDate {
    let mut current = date;
    let mut remaining = count;

    while remaining > 0 {
        current = current + Days::new(1);
        if !matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
            remaining -= 1;
        }
    }

    current
}
