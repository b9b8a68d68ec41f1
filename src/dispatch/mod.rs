//! Page-level flows: each issues one API call per user action and
//! records the outcome in [`DeskState`].

mod auth;
mod hazards;
mod notifications;
mod tasks;
mod tickets;

pub use tickets::TicketDraft;
pub use hazards::HazardDraft;

use crate::api::{ApiClient, ApiError, FailureKind};
use crate::models::{HazardReport, Notification, Session, Task, Ticket};

#[derive(Debug, Clone, PartialEq)]
pub enum ActionState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Default for ActionState<T> {
    fn default() -> Self {
        ActionState::Idle
    }
}

impl<T> ActionState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ActionState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ActionState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ActionState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    fn settle(&mut self, result: Result<T, String>) {
        *self = match result {
            Ok(data) => ActionState::Ready(data),
            Err(message) => ActionState::Failed(message),
        };
    }
}

/// Shared state the flows write into.
#[derive(Debug, Default)]
pub struct DeskState {
    pub login: ActionState<Session>,
    pub tickets: ActionState<Vec<Ticket>>,
    pub submitted_ticket: ActionState<Ticket>,
    pub engineer_notice: ActionState<()>,
    pub hazard: ActionState<HazardReport>,
    pub notifications: ActionState<Vec<Notification>>,
    pub marked_read: ActionState<Notification>,
    pub tasks: ActionState<Vec<Task>>,
}

pub struct Dispatcher {
    client: ApiClient,
    state: DeskState,
}

impl Dispatcher {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: DeskState::default(),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn state(&self) -> &DeskState {
        &self.state
    }

    pub fn session(&self) -> Session {
        self.client.session().read()
    }

    fn current_email(&self) -> Result<String, String> {
        self.session()
            .email
            .filter(|email| !email.is_empty())
            .ok_or_else(|| NOT_LOGGED_IN.to_string())
    }
}

pub(crate) const NOT_LOGGED_IN: &str = "You are not logged in. Run `ticketdesk login` first.";

/// Message shown to the user for a failed call. The server's own wording
/// wins when it sent any.
pub fn user_message(err: &ApiError) -> String {
    if let Some(message) = err.server_message() {
        return message.to_string();
    }
    match err.kind() {
        FailureKind::Transport => {
            "Unable to reach the server. Check your connection and try again.".to_string()
        }
        FailureKind::Authentication => "Your session has expired. Please log in again.".to_string(),
        FailureKind::Serialization => "Received an unexpected response from the server.".to_string(),
        FailureKind::Rejected => match err.status() {
            Some(403) => "You do not have permission to perform this action.".to_string(),
            Some(404) => "The requested resource was not found.".to_string(),
            Some(status) if status >= 500 => {
                "The server encountered an error. Please try again later.".to_string()
            }
            Some(status) => format!("Request failed with status {}.", status),
            None => "Request failed.".to_string(),
        },
    }
}
