use serde_json::Value;
use std::fmt;

/// Status the backend uses for a missing or expired session.
pub const UNAUTHORIZED: u16 = 401;

/// Normalized failure of a single API call.
///
/// Every failure a caller sees has this shape: branch on [`ApiError::status`]
/// to tell an expired session from a validation failure from a transport
/// failure. The response interceptor never rewrites it.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No response arrived (connection refused, DNS, timeout).
    Transport { message: String },
    /// The server answered with a non-2xx status.
    Status { status: u16, body: Option<Value> },
    /// A request body could not be encoded, or a 2xx body did not match
    /// the type the caller asked for.
    Serialization { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Authentication,
    Rejected,
    Serialization,
}

impl ApiError {
    pub fn transport(message: impl Into<String>) -> Self {
        ApiError::Transport {
            message: message.into(),
        }
    }

    pub fn status_code(status: u16, body: Option<Value>) -> Self {
        ApiError::Status { status, body }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        ApiError::Serialization {
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&Value> {
        match self {
            ApiError::Status { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::Transport { .. } => FailureKind::Transport,
            ApiError::Status { status, .. } if *status == UNAUTHORIZED => {
                FailureKind::Authentication
            }
            ApiError::Status { .. } => FailureKind::Rejected,
            ApiError::Serialization { .. } => FailureKind::Serialization,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind() == FailureKind::Authentication
    }

    /// Human-readable text from the server body, when it sent one.
    pub fn server_message(&self) -> Option<&str> {
        let body = self.body()?;
        if let Some(text) = body.as_str() {
            return Some(text).filter(|t| !t.trim().is_empty());
        }
        ["message", "error", "detail"]
            .iter()
            .find_map(|key| body.get(*key).and_then(|v| v.as_str()))
            .filter(|t| !t.trim().is_empty())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport { message } => write!(f, "Network error: {}", message),
            ApiError::Status { status, .. } => match self.server_message() {
                Some(message) => write!(f, "API error (status {}): {}", status, message),
                None => write!(f, "API error (status {})", status),
            },
            ApiError::Serialization { message } => write!(f, "Serialization error: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::transport(format!("request timed out: {}", err))
        } else {
            ApiError::transport(err.to_string())
        }
    }
}
