use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse a numeric id from String
    ///
    /// Results a in 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// Failure to parse a UUID from String
    #[error("Failed to parse UUID from String '{value}': {source}")]
    ParseUuid {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: uuid::Error,
    },

    /// A value stored in the database is not one of the known enum values.
    #[error("Unknown {field} value '{value}' stored in database")]
    UnknownEnumValue {
        /// Column the value was read from
        field: &'static str,
        /// The stored value
        value: String,
    },
}
