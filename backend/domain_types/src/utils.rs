use error_stack::Report;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

use crate::errors::ConnectorError;

pub fn missing_field_err(
    message: &'static str,
) -> Box<dyn Fn() -> Report<ConnectorError> + 'static> {
    Box::new(move || {
        ConnectorError::MissingRequiredField {
            field_name: message,
        }
        .into()
    })
}

const DOB_INPUT_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day]/[month]/[year]");
const DOB_OUTPUT_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Normalizes a checkout birth date from `dd/mm/yyyy` to `yyyy-mm-dd`.
/// Unparseable input passes through unchanged.
pub fn normalize_birth_date(raw: &str) -> String {
    Date::parse(raw, DOB_INPUT_FORMAT)
        .ok()
        .and_then(|date| date.format(DOB_OUTPUT_FORMAT).ok())
        .unwrap_or_else(|| raw.to_string())
}
