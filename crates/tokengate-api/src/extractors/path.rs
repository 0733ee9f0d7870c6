//! Typed path parameter helpers.

use uuid::Uuid;

use tokengate_core::error::AppError;

/// Parses a UUID path segment. An unparseable id names no record, so it is
/// reported as not found.
pub fn parse_uuid(s: &str, what: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(s).map_err(|_| AppError::not_found(format!("{what} not found")))
}
