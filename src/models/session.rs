use serde::{Deserialize, Serialize};

/// Client-held identity. `token` being set is what makes a session
/// authenticated; `email` and `role` only mean something alongside it.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Session {
    pub fn authenticated(
        token: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            token: Some(token.into()),
            email: Some(email.into()),
            role: Some(role.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.email.is_none() && self.role.is_none()
    }
}
