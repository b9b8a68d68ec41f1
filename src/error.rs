use crate::api::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum TicketDeskError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Session error: {0}")]
    Session(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Other(String),
}

impl TicketDeskError {
    /// Status code of the underlying API failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            TicketDeskError::Api(e) => e.status(),
            _ => None,
        }
    }
}

impl From<String> for TicketDeskError {
    fn from(msg: String) -> Self {
        TicketDeskError::Other(msg)
    }
}

impl From<&str> for TicketDeskError {
    fn from(msg: &str) -> Self {
        TicketDeskError::Other(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TicketDeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_failures_keep_their_status() {
        let err: TicketDeskError = ApiError::status_code(401, None).into();
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "API error (status 401)");
        assert_eq!(TicketDeskError::from("boom").status(), None);
    }
}
