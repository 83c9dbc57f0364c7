//! Coercion of command-line text into typed field values. Bad input here is
//! a usage error reported before the store is touched.

use anyhow::{Result, bail};

use crate::store::{FieldValue, Gender, Status};

/// Accepts the short code, the full name (both case-insensitive) or the
/// numeric status code.
pub fn parse_status(input: &str) -> Result<Status> {
    match input.trim().to_uppercase().as_str() {
        "I" | "INACTIVE" | "0" => Ok(Status::Inactive),
        "A" | "ACTIVE" | "1" => Ok(Status::Active),
        "W" | "WAITING_REGISTRATION" | "2" => Ok(Status::WaitingRegistration),
        other => bail!("invalid status '{other}' (expected I, A, W or a full name)"),
    }
}

/// Accepts the short code, the full name (both case-insensitive) or the
/// numeric gender code.
pub fn parse_gender(input: &str) -> Result<Gender> {
    match input.trim().to_uppercase().as_str() {
        "U" | "UNDEF" | "0" => Ok(Gender::Undef),
        "M" | "MALE" | "1" => Ok(Gender::Male),
        "F" | "FEMALE" | "2" => Ok(Gender::Female),
        other => bail!("invalid gender '{other}' (expected M, F, U or a full name)"),
    }
}

/// Type the raw value of an `update` command for the named field. Fields the
/// store does not recognize pass through as text so the store can reject
/// them itself.
pub fn coerce_update_value(field: &str, value: &str) -> Result<FieldValue> {
    let value = match field {
        "status" => FieldValue::Status(parse_status(value)?),
        "gender" => FieldValue::Gender(parse_gender(value)?),
        _ => FieldValue::Text(value.to_string()),
    };
    Ok(value)
}
