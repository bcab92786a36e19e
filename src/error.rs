use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InsightsError {
    #[error("Invalid input in {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl InsightsError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        InsightsError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending input field, if this is an input error
    pub fn field(&self) -> Option<&str> {
        match self {
            InsightsError::InvalidInput { field, .. } => Some(field),
            InsightsError::InvalidConfig(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, InsightsError>;
