//! Errors reported by the strict parsers.
//!
//! Boxes never fail: their default parsers degrade to `None`. The strict
//! variants ([`parse_bool`](crate::boolean::parse_bool),
//! [`parse_date`](crate::date::parse_date),
//! [`parse_number`](crate::number::parse_number)) surface the failure for
//! callers that need to tell "empty" apart from "invalid".

use thiserror::Error;

/// Result type for strict parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors that can occur when interpreting user-entered text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Text is not a recognized boolean word.
    #[error("`{input}` is not a boolean (expected sí/si/1/true or no/0/false)")]
    InvalidBool { input: String },

    /// Text does not match the `d/m/yyyy[ h:mm]` pattern.
    #[error("`{input}` does not match the date pattern `{pattern}`")]
    InvalidDateFormat { input: String, pattern: &'static str },

    /// Text matches the pattern but names a date that does not exist
    /// in the local calendar.
    #[error("`{input}` is not a valid local date")]
    InvalidDate { input: String },

    /// Text is not a number.
    #[error("`{input}` is not a number")]
    InvalidNumber { input: String },
}

impl ParseError {
    /// The input text that failed to parse.
    pub fn input(&self) -> &str {
        match self {
            Self::InvalidBool { input }
            | Self::InvalidDateFormat { input, .. }
            | Self::InvalidDate { input }
            | Self::InvalidNumber { input } => input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_includes_input() {
        let err = ParseError::InvalidNumber { input: "abc".into() };
        assert!(err.to_string().contains("abc"));
        assert_eq!(err.input(), "abc");
    }
}
