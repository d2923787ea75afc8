//! Request parsing helpers shared by the board handlers.
//!
//! Every failure is a `request_not_valid` error whose details name the
//! offending field, the raw value when there is one, and a stable code.

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;

/// Detail codes for rejected request fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldErrorCode {
    MissingField,
    InvalidUuid,
    InvalidTimestamp,
    OutOfRange,
}

impl FieldErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidTimestamp => "invalid_timestamp",
            Self::OutOfRange => "out_of_range",
        }
    }
}

/// Wire name of a request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }
}

struct FieldError {
    field: FieldName,
    message: String,
}

impl FieldError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    fn with_code(self, code: FieldErrorCode) -> Error {
        Error::request_not_valid(self.message).with_details(json!({
            "field": self.field.as_str(),
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: FieldErrorCode, value: impl ToString) -> Error {
        Error::request_not_valid(self.message).with_details(json!({
            "field": self.field.as_str(),
            "value": value.to_string(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    FieldError::new(field, format!("missing required field: {}", field.as_str()))
        .with_code(FieldErrorCode::MissingField)
}

pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value.trim()).map_err(|_| {
        FieldError::new(field, format!("{} must be a valid UUID", field.as_str()))
            .with_value(FieldErrorCode::InvalidUuid, value)
    })
}

pub(crate) fn parse_optional_rfc3339_timestamp(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|timestamp| timestamp.with_timezone(&Utc))
                .map_err(|_| {
                    FieldError::new(
                        field,
                        format!("{} must be an RFC 3339 timestamp", field.as_str()),
                    )
                    .with_value(FieldErrorCode::InvalidTimestamp, raw)
                })
        })
        .transpose()
}

/// Narrow a signed wire number to `u32`; zero passes through for the domain
/// to judge.
pub(crate) fn parse_non_negative(value: i64, field: FieldName) -> Result<u32, Error> {
    u32::try_from(value).map_err(|_| {
        FieldError::new(
            field,
            format!("{} must be between 0 and {}", field.as_str(), u32::MAX),
        )
        .with_value(FieldErrorCode::OutOfRange, value)
    })
}

/// Parse a path segment holding a ranking position.
pub(crate) fn parse_position(value: &str, field: FieldName) -> Result<u32, Error> {
    value.trim().parse::<u32>().map_err(|_| {
        FieldError::new(
            field,
            format!("{} must be a non-negative integer", field.as_str()),
        )
        .with_value(FieldErrorCode::OutOfRange, value)
    })
}
