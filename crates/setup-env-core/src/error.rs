//! Error taxonomy for action input handling.

/// Errors raised while reading or validating action inputs.
///
/// Construction of an `ActionConfig` stops at the first of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Input required and not supplied: {field}")]
    MissingRequiredInput { field: String },

    #[error("Invalid input for {field}{}. The allowed values are: {allowed}", display_value(.value))]
    InvalidFieldValue {
        field: String,
        /// Offending raw value. `None` for secrets.
        value: Option<String>,
        allowed: String,
    },
}

fn display_value(value: &Option<String>) -> String {
    match value {
        Some(v) => format!(" (got '{v}')"),
        None => String::new(),
    }
}

impl InputError {
    pub fn missing(field: &str) -> Self {
        InputError::MissingRequiredInput {
            field: field.to_string(),
        }
    }

    pub fn invalid(field: &str, value: &str, allowed: impl Into<String>) -> Self {
        InputError::InvalidFieldValue {
            field: field.to_string(),
            value: Some(value.to_string()),
            allowed: allowed.into(),
        }
    }

    /// Name of the input field this error is about.
    pub fn field(&self) -> &str {
        match self {
            InputError::MissingRequiredInput { field } => field,
            InputError::InvalidFieldValue { field, .. } => field,
        }
    }
}

/// Errors surfaced by the setup step as a whole.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("Action input failed for reason: {0}")]
    Input(#[from] InputError),

    #[error("invalid environment variable {name}: {reason}")]
    InvalidEnvVar { name: String, reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for setup-env operations.
pub type Result<T> = std::result::Result<T, ActionError>;
