//! Conversion of stored field values to template text.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::server::model::field::SelectionOption;

// TODO: confirm with product owners whether date & datetime output formats should trade places
/// Output format of date fields
pub const DATE_OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Output format of datetime fields
pub const DATETIME_OUTPUT_FORMAT: &str = "%Y-%m-%d";

const STORED_DATE_FORMAT: &str = "%Y-%m-%d";
const STORED_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Whether a non-boolean value should be left out of the output
///
/// Numeric zero is a real value.
pub fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

pub fn format_boolean(value: &Value) -> String {
    let truthy = match value {
        Value::Bool(flag) => *flag,
        Value::Null => false,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    };

    truthy.to_string()
}

/// Plain text conversion used by text & numeric fields
pub fn format_text(value: &Value) -> Option<String> {
    if is_absent(value) {
        return None;
    }

    match value {
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// `"<amount> <currency>"` when the currency is known, else the amount alone
pub fn format_monetary(amount: &Value, currency: Option<&str>) -> Option<String> {
    let amount = format_text(amount)?;

    match currency.filter(|code| !code.is_empty()) {
        Some(code) => Some(format!("{} {}", amount, code)),
        None => Some(amount),
    }
}

/// Formats a date field with a time of day of midnight
pub fn format_date(value: &Value) -> Option<String> {
    let text = format_text(value)?;

    let date = NaiveDate::parse_from_str(&text, STORED_DATE_FORMAT)
        .ok()
        .or_else(|| parse_datetime(&text).map(|datetime| datetime.date()));

    match date.and_then(|date| date.and_hms_opt(0, 0, 0)) {
        Some(datetime) => Some(datetime.format(DATE_OUTPUT_FORMAT).to_string()),
        None => Some(text),
    }
}

/// Formats a datetime field as its calendar day
pub fn format_datetime(value: &Value) -> Option<String> {
    let text = format_text(value)?;

    let date = parse_datetime(&text)
        .map(|datetime| datetime.date())
        .or_else(|| NaiveDate::parse_from_str(&text, STORED_DATE_FORMAT).ok());

    match date {
        Some(date) => Some(date.format(DATETIME_OUTPUT_FORMAT).to_string()),
        None => Some(text),
    }
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    STORED_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|datetime| datetime.naive_utc())
        })
}

/// Label of the stored code in the user's locale, the code itself when no option matches
pub fn format_selection(value: &Value, options: &[SelectionOption], lang: &str) -> Option<String> {
    let code = format_text(value)?;

    match options.iter().find(|option| option.value == code) {
        Some(option) => Some(option.label_for(lang).to_string()),
        None => Some(code),
    }
}

/// Record IDs referenced by a relationship value
///
/// Many-to-one values are an ID or an `[id, display_name]` pair, x2many values an array of
/// IDs.
pub fn referenced_ids(value: &Value) -> Vec<i32> {
    match value {
        Value::Number(_) => as_record_id(value).into_iter().collect(),
        Value::Array(items) => match items.as_slice() {
            [id, Value::String(_)] => as_record_id(id).into_iter().collect(),
            _ => items.iter().filter_map(as_record_id).collect(),
        },
        _ => Vec::new(),
    }
}

fn as_record_id(value: &Value) -> Option<i32> {
    value.as_i64().and_then(|id| i32::try_from(id).ok())
}
