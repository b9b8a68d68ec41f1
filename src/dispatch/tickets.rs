use tracing::debug;

use super::{user_message, ActionState, DeskState, Dispatcher};
use crate::models::{EngineerNotice, NewTicket, Priority, Ticket};

/// Form input for a new service ticket; the reporter comes from the session.
#[derive(Debug, Clone)]
pub struct TicketDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
}

impl TicketDraft {
    fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title is required.".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("Description is required.".to_string());
        }
        Ok(())
    }
}

impl Dispatcher {
    pub async fn submit_ticket(&mut self, draft: TicketDraft) -> &ActionState<Ticket> {
        self.state.submitted_ticket = ActionState::Loading;

        let result = match draft.validate().and_then(|()| self.current_email()) {
            Ok(email) => {
                let ticket = NewTicket {
                    title: draft.title.trim().to_string(),
                    description: draft.description.trim().to_string(),
                    category: draft.category,
                    priority: draft.priority,
                    email,
                };
                self.client
                    .post::<_, Ticket>("/tickets", &ticket, None)
                    .await
                    .map_err(|e| user_message(&e))
            }
            Err(message) => Err(message),
        };

        if let Ok(ticket) = &result {
            debug!(id = ticket.id, "ticket submitted");
        }
        self.state.submitted_ticket.settle(result);
        &self.state.submitted_ticket
    }

    /// Submit, then notify the engineer, strictly in that order: the notice
    /// is only sent once the ticket exists and has an id.
    pub async fn submit_ticket_and_notify(
        &mut self,
        draft: TicketDraft,
        engineer: &str,
    ) -> &DeskState {
        let ticket = self.submit_ticket(draft).await.data().cloned();

        match ticket {
            Some(ticket) => {
                let notice = EngineerNotice {
                    engineer: engineer.to_string(),
                    ticket_id: ticket.id,
                    message: format!("New ticket #{}: {}", ticket.id, ticket.title),
                };
                self.notify_engineer(notice).await;
            }
            None => self.state.engineer_notice = ActionState::Idle,
        }
        &self.state
    }

    pub async fn notify_engineer(&mut self, notice: EngineerNotice) -> &ActionState<()> {
        self.state.engineer_notice = ActionState::Loading;
        let result = self
            .client
            .post::<_, serde_json::Value>("/notifications", &notice, None)
            .await
            .map(|_| ())
            .map_err(|e| user_message(&e));
        self.state.engineer_notice.settle(result);
        &self.state.engineer_notice
    }

    /// Tickets reported by the logged-in user.
    pub async fn list_tickets(&mut self) -> &ActionState<Vec<Ticket>> {
        self.state.tickets = ActionState::Loading;
        let result = match self.current_email() {
            Ok(email) => self
                .client
                .get_query::<Vec<Ticket>>("/tickets", &[("email", email.as_str())], None)
                .await
                .map_err(|e| user_message(&e)),
            Err(message) => Err(message),
        };
        self.state.tickets.settle(result);
        &self.state.tickets
    }
}
