use std::fmt;

use thiserror::Error;

use crate::wire::{PageBody, SessionGrant};

/// Caller-chosen tag echoed back on the matching [`EngineEvent`].
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    PageLoaded {
        request_id: RequestId,
        result: Result<PageBody, ApiError>,
    },
    CallCompleted {
        request_id: RequestId,
        result: Result<(), ApiError>,
    },
    /// Login or registration finished.
    SessionGranted {
        request_id: RequestId,
        result: Result<SessionGrant, ApiError>,
    },
}

impl EngineEvent {
    pub fn request_id(&self) -> RequestId {
        match self {
            EngineEvent::PageLoaded { request_id, .. }
            | EngineEvent::CallCompleted { request_id, .. }
            | EngineEvent::SessionGranted { request_id, .. } => *request_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    /// 401/403, or a login response without a token.
    Unauthorized,
    Timeout,
    Network,
    Decode,
}

impl FailureKind {
    /// Timeouts, network errors, 429 and 5xx.
    pub fn is_retryable(&self) -> bool {
        match self {
            FailureKind::Timeout | FailureKind::Network => true,
            FailureKind::HttpStatus(code) => *code == 429 || *code >= 500,
            FailureKind::InvalidUrl | FailureKind::Unauthorized | FailureKind::Decode => false,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Unauthorized => write!(f, "not authorized"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "unexpected response"),
        }
    }
}
