//! Errors raised while building or compiling filter predicates.
//!
//! Every error carries a code for programmatic handling, a message and
//! context about the operator involved.
//!
//! # Error Codes
//!
//! Error codes follow the pattern `F{number}`:
//! - F1001: an operator that needs a list of operands got something else
//! - F1002: an operator got the wrong number of operands
//! - F1003: the operator name is not recognized
//! - F1004: a predicate object does not have exactly one key
//! - F1005: an operand compiled to nothing
//!
//! ```rust
//! use odata_filter::{ErrorCode, FilterError};
//!
//! let err = FilterError::unknown_operator("equals");
//! assert_eq!(err.code, ErrorCode::UnknownOperator);
//! assert!(err.to_string().starts_with("[F1003]"));
//! ```

use std::fmt;
use thiserror::Error;

/// Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Operand is not a list where one is required (F1001).
    OperandShape = 1001,
    /// Wrong number of operands (F1002).
    OperandArity = 1002,
    /// Operator name not recognized (F1003).
    UnknownOperator = 1003,
    /// Predicate object without exactly one key (F1004).
    MalformedPredicate = 1004,
    /// Operand that compiled to nothing (F1005).
    MissingOperand = 1005,
}

impl ErrorCode {
    /// Get the error code string (e.g., "F1001").
    pub fn code(&self) -> String {
        format!("F{}", *self as u16)
    }

    /// Get a short description of the error code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::OperandShape => "Operand must be a list",
            Self::OperandArity => "Wrong number of operands",
            Self::UnknownOperator => "Unknown operator",
            Self::MalformedPredicate => "Malformed predicate",
            Self::MissingOperand => "Missing operand",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Suggestion for fixing an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// The suggestion text.
    pub text: String,
    /// Optional example.
    pub code: Option<String>,
}

impl Suggestion {
    /// Create a new suggestion.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            code: None,
        }
    }

    /// Add an example.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Additional context for an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// The operator involved.
    pub operator: Option<String>,
    /// Number of operands received.
    pub operands: Option<usize>,
    /// Suggestions for fixing the error.
    pub suggestions: Vec<Suggestion>,
    /// Help text.
    pub help: Option<String>,
}

/// Errors that can occur while building or compiling a predicate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct FilterError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// Additional context.
    pub context: ErrorContext,
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl FilterError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Set the operator involved.
    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.context.operator = Some(operator.into());
        self
    }

    /// Set the number of operands received.
    pub fn with_operands(mut self, count: usize) -> Self {
        self.context.operands = Some(count);
        self
    }

    /// Add a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.context.suggestions.push(Suggestion::new(suggestion));
        self
    }

    /// Add a suggestion with an example.
    pub fn with_code_suggestion(mut self, text: impl Into<String>, code: impl Into<String>) -> Self {
        self.context.suggestions.push(Suggestion::new(text).with_code(code));
        self
    }

    /// Add help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.context.help = Some(help.into());
        self
    }

    // ============== Constructor Functions ==============

    /// An operator that needs a list of operands got something else.
    pub fn operand_shape(operator: impl Into<String>) -> Self {
        let operator = operator.into();
        Self::new(
            ErrorCode::OperandShape,
            format!("Operator `{}` requires a list of operands", operator),
        )
        .with_code_suggestion(
            "Wrap the operands in a list",
            format!(r#"{{ "{}": ["Field", 1] }}"#, operator),
        )
        .with_operator(operator)
    }

    /// An operator got the wrong number of operands.
    pub fn operand_arity(operator: impl Into<String>, expected: &str, got: usize) -> Self {
        let operator = operator.into();
        Self::new(
            ErrorCode::OperandArity,
            format!(
                "Operator `{}` takes {} operands, got {}",
                operator, expected, got
            ),
        )
        .with_operator(operator)
        .with_operands(got)
    }

    /// The operator name is not recognized.
    pub fn unknown_operator(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(
            ErrorCode::UnknownOperator,
            format!("Operator `{}` is not recognized", name),
        )
        .with_operator(name)
        .with_help("Operator names are case-sensitive, e.g. `eq`, `startswith`, `matchesPattern`")
    }

    /// A predicate object does not have exactly one key.
    pub fn malformed_predicate(keys: usize) -> Self {
        Self::new(
            ErrorCode::MalformedPredicate,
            format!("A predicate object needs exactly one operator key, found {}", keys),
        )
        .with_operands(keys)
        .with_code_suggestion(
            "Combine several conditions with `and`",
            r#"{ "and": [{ "eq": ["A", 1] }, { "eq": ["B", 2] }] }"#,
        )
    }

    /// An operand of `operator` compiled to nothing.
    pub fn missing_operand(operator: impl Into<String>) -> Self {
        let operator = operator.into();
        Self::new(
            ErrorCode::MissingOperand,
            format!("An operand of `{}` compiled to nothing", operator),
        )
        .with_operator(operator)
        .with_help("Use `null` to compare against null; only `and`/`or` and arithmetic drop absent operands")
    }

    // ============== Error Checks ==============

    /// Check if an operand was not a list.
    pub fn is_shape_error(&self) -> bool {
        self.code == ErrorCode::OperandShape
    }

    /// Check if an operator got the wrong number of operands.
    pub fn is_arity_error(&self) -> bool {
        self.code == ErrorCode::OperandArity
    }

    /// Check if an operand compiled to nothing.
    pub fn is_missing_operand(&self) -> bool {
        self.code == ErrorCode::MissingOperand
    }

    /// Check if the predicate named an unknown operator or was malformed.
    pub fn is_unknown_operator(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::UnknownOperator | ErrorCode::MalformedPredicate
        )
    }

    /// Display the full error with all context and suggestions.
    pub fn display_full(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Error [{}]: {}\n", self.code.code(), self.message));

        if let Some(ref operator) = self.context.operator {
            output.push_str(&format!("  → Operator: {}\n", operator));
        }
        if let Some(count) = self.context.operands {
            output.push_str(&format!("  → Operands: {}\n", count));
        }

        if !self.context.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for (i, suggestion) in self.context.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion.text));
                if let Some(ref code) = suggestion.code {
                    output.push_str(&format!("     {}\n", code));
                }
            }
        }

        if let Some(ref help) = self.context.help {
            output.push_str(&format!("\nHelp: {}\n", help));
        }

        output
    }
}
