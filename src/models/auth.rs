use serde::{Deserialize, Serialize};

use super::Session;

#[derive(Serialize, Clone, Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LoginResponse {
    pub token: String,
    pub email: String,
    pub role: String,
}

impl From<LoginResponse> for Session {
    fn from(login: LoginResponse) -> Self {
        Session::authenticated(login.token, login.email, login.role)
    }
}
