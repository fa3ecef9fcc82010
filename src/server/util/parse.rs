use std::num::ParseIntError;
use uuid::Uuid;

use crate::server::error::{internal::InternalError, AppError};

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

/// Parses a UUID from a string slice
///
/// # Returns
/// - `Ok(Uuid)` - Successfully parsed UUID
/// - `Err(InternalError::ParseUuid)` - Value is not a valid UUID
pub fn parse_uuid(value: &str) -> Result<Uuid, InternalError> {
    Uuid::parse_str(value.trim()).map_err(|e| InternalError::ParseUuid {
        value: value.to_string(),
        source: e,
    })
}

/// Parses a comma separated list of u64 values, ignoring blank entries.
pub fn parse_u64_list(value: &str) -> Result<Vec<u64>, ParseIntError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<u64>)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_u64_list_with_blanks_and_spaces() {
        assert_eq!(
            parse_u64_list(" 123, 456 ,,789").unwrap(),
            vec![123, 456, 789]
        );
        assert!(parse_u64_list("").unwrap().is_empty());
    }

    #[test]
    fn rejects_non_numeric_list_entry() {
        assert!(parse_u64_list("123,abc").is_err());
    }

    #[test]
    fn parses_uuid_and_reports_bad_value() {
        let id = Uuid::new_v4();
        assert_eq!(parse_uuid(&id.to_string()).unwrap(), id);

        let err = parse_uuid("not-a-uuid").unwrap_err();
        assert!(err.to_string().contains("not-a-uuid"));
    }

    #[test]
    fn parses_u64_from_string() {
        assert_eq!(parse_u64_from_string("42".to_string()).unwrap(), 42);
        assert!(parse_u64_from_string("x".to_string()).is_err());
    }
}
