//! Domain error types

use thiserror::Error;

/// Errors detected while validating a tool call against its definition.
///
/// All of these occur before any process is spawned; a call that fails
/// validation never reaches the executor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required parameter '{field}'")]
    MissingRequired { field: String },

    #[error("Unknown parameter '{field}'")]
    UnknownParameter { field: String },

    #[error("Invalid value for '{field}': must be one of {}", allowed.join(", "))]
    InvalidEnumValue { field: String, allowed: Vec<String> },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ValidationError {
    pub fn missing_required(field: impl Into<String>) -> Self {
        Self::MissingRequired {
            field: field.into(),
        }
    }

    pub fn unknown_parameter(field: impl Into<String>) -> Self {
        Self::UnknownParameter {
            field: field.into(),
        }
    }

    pub fn invalid_enum(field: impl Into<String>, allowed: &[String]) -> Self {
        Self::InvalidEnumValue {
            field: field.into(),
            allowed: allowed.to_vec(),
        }
    }

    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The parameter name this error refers to.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingRequired { field }
            | Self::UnknownParameter { field }
            | Self::InvalidEnumValue { field, .. }
            | Self::InvalidValue { field, .. } => field,
        }
    }
}
