//! Error type shared by the model, the builders and program dispatch

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LasrError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LasrError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// A builder was finalized without one of its required fields.
    #[error("Incomplete {kind} instruction: missing {field}")]
    IncompleteInstruction {
        kind: &'static str,
        field: &'static str,
    },

    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    #[error("Invalid supply: {0}")]
    InvalidSupply(String),

    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid namespace: {0}")]
    InvalidNamespace(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Action '{action}' is not supported for field '{field}'")]
    UnsupportedAction { field: String, action: String },

    /// The payload attached to a field update belongs to a different field.
    #[error("Field '{field}' cannot carry a '{value}' payload")]
    FieldMismatch { field: String, value: String },

    #[error("Invalid inputs: {0}")]
    InvalidInputs(String),
}

impl LasrError {
    pub(crate) fn incomplete(kind: &'static str, field: &'static str) -> Self {
        LasrError::IncompleteInstruction { kind, field }
    }
}

impl From<serde_json::Error> for LasrError {
    fn from(err: serde_json::Error) -> Self {
        LasrError::InvalidInputs(err.to_string())
    }
}
