use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{ActivityId, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    NoSession,
    WrongRole,
    NotFound,
    ActivityFull,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HubError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("no active session; log in first")]
    NoSession,
    #[error("{role} sessions cannot {action}")]
    WrongRole { role: Role, action: &'static str },
    #[error("activity {0} not found")]
    NotFound(ActivityId),
    #[error("activity {activity_id} is full ({enrolled}/{capacity})")]
    ActivityFull {
        activity_id: ActivityId,
        enrolled: usize,
        capacity: u32,
    },
}

impl HubError {
    pub fn code(&self) -> ErrorCode {
        match self {
            HubError::Validation(_) => ErrorCode::Validation,
            HubError::NoSession => ErrorCode::NoSession,
            HubError::WrongRole { .. } => ErrorCode::WrongRole,
            HubError::NotFound(_) => ErrorCode::NotFound,
            HubError::ActivityFull { .. } => ErrorCode::ActivityFull,
        }
    }
}

/// Serializable form of a rejected command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorPayload {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<&HubError> for ErrorPayload {
    fn from(value: &HubError) -> Self {
        Self::new(value.code(), value.to_string())
    }
}

impl From<HubError> for ErrorPayload {
    fn from(value: HubError) -> Self {
        Self::from(&value)
    }
}
