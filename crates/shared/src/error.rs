use thiserror::Error;

use crate::domain::UnknownVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidCredentials,
    NetworkError,
    ApiError,
    CorruptSession,
    ValidationError,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidCredentials => "invalid_credentials",
            ErrorCode::NetworkError => "network_error",
            ErrorCode::ApiError => "api_error",
            ErrorCode::CorruptSession => "corrupt_session",
            ErrorCode::ValidationError => "validation_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("not signed in; run `login` first")]
    NotSignedIn,
    #[error("network error: {0}")]
    Network(String),
    #[error("API Error: {status_text}")]
    Api {
        status: Option<u16>,
        status_text: String,
    },
    #[error("malformed payload: {0}")]
    Payload(#[from] NormalizeError),
    #[error("corrupt session: {0}")]
    CorruptSession(String),
    #[error("{0}")]
    Validation(String),
}

impl AdminError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AdminError::InvalidCredentials | AdminError::NotSignedIn => {
                ErrorCode::InvalidCredentials
            }
            AdminError::Network(_) => ErrorCode::NetworkError,
            AdminError::Api { .. } | AdminError::Payload(_) => ErrorCode::ApiError,
            AdminError::CorruptSession(_) => ErrorCode::CorruptSession,
            AdminError::Validation(_) => ErrorCode::ValidationError,
        }
    }
}

/// Raised at the wire boundary when a remote record cannot become an internal one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("expected a JSON array of {entity} records")]
    NotAList { entity: &'static str },
    #[error("{entity} record has an unexpected shape: {reason}")]
    Shape {
        entity: &'static str,
        reason: String,
    },
    #[error("{entity} record is missing '{field}'")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },
    #[error("{entity} record has invalid date in '{field}': '{value}'")]
    InvalidDate {
        entity: &'static str,
        field: &'static str,
        value: String,
    },
    #[error(transparent)]
    UnknownVariant(#[from] UnknownVariant),
}
