//! Error types for parameter registration and parsing.

use thiserror::Error;

/// Error produced by a parameter's conversion function.
pub type ConversionError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for slashparam.
#[derive(Error, Debug)]
pub enum ParameterError {
    /// A label was empty or only whitespace
    #[error("Invalid label: {0}")]
    InvalidLabel(String),

    /// A label collides with an already registered parameter
    #[error("Label must be unique, '{0}' is already registered")]
    DuplicateLabel(String),

    /// A required argument was not supplied
    #[error("Invalid argument: {0} must be supplied")]
    InvalidArgument(&'static str),

    /// A raw token does not follow the `/label:value` grammar
    #[error("Parameter does not match correct format. {reason} : {token}")]
    InvalidParameterFormat {
        reason: &'static str,
        token: String,
    },

    /// A token names a label that was never registered
    #[error("Parameter label does not match registered parameters : {0}")]
    UnregisteredParameter(String),

    /// The conversion function rejected the supplied text
    #[error("Failed to parse value for parameter '{label}' from '{token}': {source}")]
    ParameterParse {
        label: String,
        token: String,
        #[source]
        source: ConversionError,
    },

    /// A message was requested from a registry with nothing in it
    #[error("No parameters have been registered")]
    EmptyRegistry,
}

/// Result type alias for slashparam operations
pub type Result<T> = std::result::Result<T, ParameterError>;

impl ParameterError {
    pub(crate) fn missing_slash(token: &str) -> Self {
        ParameterError::InvalidParameterFormat {
            reason: "Initial slash not found",
            token: token.to_string(),
        }
    }

    pub(crate) fn missing_separator(token: &str) -> Self {
        ParameterError::InvalidParameterFormat {
            reason: "'Label:Value' format not found",
            token: token.to_string(),
        }
    }
}
