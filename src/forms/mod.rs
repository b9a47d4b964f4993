//! Form definitions backing the customer create, edit and filter screens.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use thiserror::Error;
use validator::{ValidateEmail, ValidationError, ValidationErrors};

use crate::domain::lenient::{parse_flag, parse_timestamp};
use crate::domain::types::is_local_phone;

pub mod customer;
pub mod filter;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid customer id")]
    InvalidCustomerId,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("invalid date")]
    InvalidDate,
}

impl FormError {
    /// First message per offending field, for display next to each input.
    ///
    /// Non-field errors are reported under the `"form"` key.
    pub fn field_messages(&self) -> BTreeMap<String, String> {
        match self {
            FormError::Validation(errors) => errors
                .field_errors()
                .into_iter()
                .filter_map(|(field, errors)| {
                    errors.first().map(|error| {
                        let message = error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| error.code.to_string());
                        (field.to_string(), message)
                    })
                })
                .collect(),
            other => BTreeMap::from([("form".to_string(), other.to_string())]),
        }
    }
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Digits only, leading `0`.
pub(crate) fn validate_local_phone(value: &str) -> Result<(), ValidationError> {
    if is_local_phone(value) {
        Ok(())
    } else {
        Err(error(
            "phone",
            "Phone number must start with 0 and contain only digits",
        ))
    }
}

pub(crate) fn validate_optional_phone(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    validate_local_phone(value.trim())
}

pub(crate) fn validate_optional_email(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || value.trim().validate_email() {
        Ok(())
    } else {
        Err(error("email", "Invalid email format"))
    }
}

pub(crate) fn validate_optional_flag(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || parse_flag(value).is_some() {
        Ok(())
    } else {
        Err(error("flag", "Expected true or false"))
    }
}

/// Accepts an empty value or a `YYYY-MM-DD` date.
pub(crate) fn validate_optional_date(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    let valid = value.len() == 10 && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok();
    if valid {
        Ok(())
    } else {
        Err(error(
            "date",
            "Invalid date format. Expected format: YYYY-MM-DD",
        ))
    }
}

/// Accepts an empty value or any timestamp layout the backend produces.
pub(crate) fn validate_optional_timestamp(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || parse_timestamp(value).is_some() {
        Ok(())
    } else {
        Err(error("timestamp", "Invalid date and time"))
    }
}
