//! Shared helpers for mapping SQLite rows back into domain types.

use crate::{DbError, Result};

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use uuid::Uuid;

#[track_caller]
pub(crate) fn parse_uuid(value: &str, column: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| DbError::Initialization {
        message: format!("Invalid UUID in {}: {}", column, e),
        location: ErrorLocation::from(Location::caller()),
    })
}

#[track_caller]
pub(crate) fn parse_opt_uuid(value: Option<&str>, column: &str) -> Result<Option<Uuid>> {
    value.map(|v| parse_uuid(v, column)).transpose()
}

#[track_caller]
pub(crate) fn parse_ts(secs: i64, column: &str) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| DbError::Initialization {
        message: format!("Invalid timestamp in {}", column),
        location: ErrorLocation::from(Location::caller()),
    })
}

#[track_caller]
pub(crate) fn parse_opt_ts(secs: Option<i64>, column: &str) -> Result<Option<DateTime<Utc>>> {
    secs.map(|s| parse_ts(s, column)).transpose()
}
