use tracing::info;

use super::{user_message, ActionState, Dispatcher};
use crate::api::FailureKind;
use crate::error::Result;
use crate::models::{Credentials, LoginResponse, Session};

impl Dispatcher {
    /// `POST /auth/login`; on success token, email and role are stored
    /// together.
    pub async fn login(&mut self, credentials: Credentials) -> &ActionState<Session> {
        self.state.login = ActionState::Loading;

        let result = match self
            .client
            .post::<_, LoginResponse>("/auth/login", &credentials, None)
            .await
        {
            Ok(login) => {
                let session = Session::from(login);
                match self.client.session().save(&session) {
                    Ok(()) => {
                        info!(email = ?session.email, role = ?session.role, "logged in");
                        Ok(session)
                    }
                    Err(e) => Err(format!("Logged in, but the session could not be stored: {}", e)),
                }
            }
            Err(e) if e.kind() == FailureKind::Authentication => {
                Err(e.server_message().unwrap_or("Invalid email or password.").to_string())
            }
            Err(e) => Err(user_message(&e)),
        };

        self.state.login.settle(result);
        &self.state.login
    }

    /// Local only: the backend keeps no session to tear down.
    pub fn logout(&mut self) -> Result<()> {
        self.client.session().clear()?;
        self.state = Default::default();
        info!("logged out");
        Ok(())
    }
}
