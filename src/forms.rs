use crate::availability::valid_time_slots;
use crate::types::{BookingDraft, NewsCategory};
use chrono::{NaiveDate, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use validator::{Validate, ValidationError, ValidationErrors};

pub const BOOKING_DATE_FORMAT: &str = "%Y/%m/%d";
pub const BOOKING_TIME_FORMAT: &str = "%H:%M";

lazy_static! {
    // chrono accepts unpadded numbers, so canonical yyyy/mm/dd needs its
    // own gate to keep parse/format a round trip.
    static ref DATE_PATTERN: Regex = Regex::new(r"^\d{4}/\d{2}/\d{2}$").unwrap();
    static ref VALID_TIME_SLOTS: Vec<NaiveTime> = valid_time_slots();
}

/// Parses a canonical `yyyy/mm/dd` string. The same function backs form
/// validation and draft construction, so a value that validated cannot fail
/// to parse later.
pub fn parse_booking_date(value: &str) -> Option<NaiveDate> {
    if !DATE_PATTERN.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, BOOKING_DATE_FORMAT).ok()
}

pub fn format_booking_date(date: NaiveDate) -> String {
    date.format(BOOKING_DATE_FORMAT).to_string()
}

pub fn parse_booking_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, BOOKING_TIME_FORMAT).ok()
}

pub fn format_booking_time(time: NaiveTime) -> String {
    time.format(BOOKING_TIME_FORMAT).to_string()
}

/// Raw booking intake submission.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BookingForm {
    #[validate(length(min = 1, max = 40))]
    pub name: String,
    #[validate(custom(function = validate_booking_date))]
    pub date: String,
    #[validate(custom(function = validate_booking_time))]
    pub time: String,
    #[validate(email)]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 15))]
    pub phone_number: String,
    #[validate(range(min = 1, max = 10))]
    #[serde(default = "default_number_of_people")]
    pub number_of_people: i32,
}

impl BookingForm {
    /// Derives the structured draft from a validated submission. `None` only
    /// if the form was never validated, which callers treat as an internal
    /// fault rather than a user error.
    pub fn into_draft(self) -> Option<BookingDraft> {
        let date = parse_booking_date(&self.date)?;
        let time = parse_booking_time(&self.time)?;
        Some(BookingDraft {
            name: self.name,
            date,
            time,
            email: self.email,
            phone_number: self.phone_number,
            number_of_people: self.number_of_people,
        })
    }
}

fn default_number_of_people() -> i32 {
    1
}

fn validate_booking_date(value: &str) -> Result<(), ValidationError> {
    match parse_booking_date(value) {
        Some(_) => Ok(()),
        None => {
            let mut error = ValidationError::new("date_format");
            error.message = Some("date must be in yyyy/mm/dd format.".into());
            Err(error)
        }
    }
}

// An out-of-slot time is reported as a plain required-field violation,
// without a dedicated message.
fn validate_booking_time(value: &str) -> Result<(), ValidationError> {
    match parse_booking_time(value) {
        Some(time) if VALID_TIME_SLOTS.contains(&time) => Ok(()),
        _ => Err(ValidationError::new("required")),
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MenuForm {
    #[validate(length(min = 1, max = 50))]
    pub title: String,
    #[validate(range(min = 0))]
    pub price: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewsForm {
    #[validate(custom(function = validate_news_category))]
    pub category: String,
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(min = 1))]
    pub text: String,
}

fn validate_news_category(value: &str) -> Result<(), ValidationError> {
    match NewsCategory::from_token(value) {
        Some(_) => Ok(()),
        None => {
            let mut error = ValidationError::new("category");
            error.message = Some("unknown news category.".into());
            Err(error)
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 1, max = 100))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub message: String,
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
}

/// Flattens validator output into a field -> messages map for the 422
/// response body.
pub fn error_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .iter()
        .map(|(field, field_errors)| {
            let messages = field_errors
                .iter()
                .map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| error.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

// HTML forms post absent optional fields as empty strings.
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.trim().is_empty()))
}
