//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every failure becomes an `invalid_request` error whose details name the
//! offending field, the rejected value where useful, and a stable code.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{
    Error, ExtensionDays, ListingKind, ListingTarget, ListingValidationError, LoginValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidKind,
    OutOfRange,
    InvalidCredentials,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidKind => "invalid_kind",
            ErrorCode::OutOfRange => "out_of_range",
            ErrorCode::InvalidCredentials => "invalid_credentials",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, message: impl Into<String>, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn field_value_error(
    field: FieldName,
    message: impl Into<String>,
    code: ErrorCode,
    value: &str,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(field, format!("missing required field: {name}"), ErrorCode::MissingField)
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| {
        field_value_error(
            field,
            format!("{} must be a valid UUID", field.as_str()),
            ErrorCode::InvalidUuid,
            value,
        )
    })
}

/// Parse a path id into a target of `kind`.
pub(crate) fn parse_target(kind: ListingKind, raw_id: &str) -> Result<ListingTarget, Error> {
    parse_uuid(raw_id, FieldName::new("id")).map(|id| ListingTarget::new(kind, id))
}

/// Parse a `kind` query value, requiring one.
pub(crate) fn parse_kind(value: Option<&str>) -> Result<ListingKind, Error> {
    let field = FieldName::new("kind");
    let raw = value.ok_or_else(|| missing_field_error(field))?;
    raw.parse().map_err(|_: ListingValidationError| {
        field_value_error(
            field,
            "kind must be posting or candidate",
            ErrorCode::InvalidKind,
            raw,
        )
    })
}

/// Validate an extension length.
pub(crate) fn parse_extension_days(days: i64) -> Result<ExtensionDays, Error> {
    ExtensionDays::new(days).map_err(|error| {
        field_value_error(
            FieldName::new("days"),
            error.to_string(),
            ErrorCode::OutOfRange,
            &days.to_string(),
        )
    })
}

/// Map credential validation failures to field-level errors.
pub(crate) fn credential_error(error: LoginValidationError) -> Error {
    let field = match error {
        LoginValidationError::EmptyEmail | LoginValidationError::MalformedEmail => "email",
        LoginValidationError::EmptyPassword | LoginValidationError::PasswordTooShort { .. } => {
            "password"
        }
        LoginValidationError::PasswordMismatch => "confirmation",
    };
    field_error(
        FieldName::new(field),
        error.to_string(),
        ErrorCode::InvalidCredentials,
    )
}
