//! Helpers shared by the API handlers.

use axum::http::HeaderMap;
use chrono::{NaiveDate, NaiveDateTime};

use crate::error::ApiError;
use ipdesk_core::errors::{Error, ValidationError};

/// The acting user, injected by the authenticating gateway in front of this
/// service. Trimmed here so the service layer always sees a clean
/// identifier.
pub(crate) fn actor(headers: &HeaderMap) -> Result<String, ApiError> {
    let value = headers
        .get("x-user")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .unwrap_or("");
    if value.is_empty() {
        return Err(ApiError(Error::Validation(ValidationError::MissingField(
            "X-User".to_string(),
        ))));
    }
    Ok(value.to_string())
}

/// The path names the IP right type; a mismatch with the stored record is
/// treated the same as an unknown id.
pub(crate) fn check_right_type(
    application: &ipdesk_core::applications::Application,
    ip_right_type: ipdesk_core::applications::IpRightType,
) -> Result<(), ApiError> {
    if application.ip_right_type != ip_right_type {
        return Err(ApiError(Error::Database(
            ipdesk_core::errors::DatabaseError::NotFound(format!(
                "no {} application {}",
                ip_right_type, application.id
            )),
        )));
    }
    Ok(())
}

/// Parses an optional `YYYY-MM-DD` filter value to the start of that day.
pub(crate) fn parse_date_optional(
    value: Option<String>,
    field: &str,
) -> Result<Option<NaiveDateTime>, ApiError> {
    match value {
        None => Ok(None),
        Some(raw) => {
            let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|e| {
                ApiError(Error::Validation(ValidationError::InvalidInput(format!(
                    "{}: {}",
                    field, e
                ))))
            })?;
            Ok(date.and_hms_opt(0, 0, 0))
        }
    }
}

/// End-of-day variant for inclusive upper bounds.
pub(crate) fn parse_date_optional_end(
    value: Option<String>,
    field: &str,
) -> Result<Option<NaiveDateTime>, ApiError> {
    Ok(parse_date_optional(value, field)?
        .map(|dt| dt.date().and_hms_opt(23, 59, 59).unwrap_or(dt)))
}
