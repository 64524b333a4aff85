use thiserror::Error;

/// Problems detected at the boundary before any computation runs.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("{field} {reason}")]
    InvalidField { field: String, reason: String },

    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("computation did not complete: {0}")]
    Compute(#[from] tokio::task::JoinError),
}

impl InputError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        InputError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
