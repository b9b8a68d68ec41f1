//! Runs one CLI command against the dispatcher and renders the outcome.

use crate::cli::{Command, HazardCommand, NotificationCommand, TicketCommand};
use crate::dispatch::{ActionState, Dispatcher, HazardDraft, TicketDraft};
use crate::error::{Result, TicketDeskError};
use crate::models::Credentials;
use crate::ui::{
    display_error, display_hazard, display_notifications, display_session, display_success,
    display_tasks, display_ticket, display_tickets,
};
use colored::*;

pub async fn run(dispatcher: &mut Dispatcher, command: Command) -> Result<()> {
    match command {
        Command::Login { email, password } => {
            let state = dispatcher.login(Credentials { email, password }).await;
            let session = settled(state)?;
            display_session(session);
        }
        Command::Logout => {
            dispatcher.logout()?;
            display_success("Logged out.");
        }
        Command::Whoami => display_session(&dispatcher.session()),
        Command::Tickets(TicketCommand::List) => {
            display_tickets(settled(dispatcher.list_tickets().await)?);
        }
        Command::Tickets(TicketCommand::Submit {
            title,
            description,
            category,
            priority,
            notify,
        }) => {
            let draft = TicketDraft {
                title,
                description,
                category,
                priority,
            };
            match notify {
                Some(engineer) => {
                    let state = dispatcher.submit_ticket_and_notify(draft, &engineer).await;
                    let ticket = settled(&state.submitted_ticket)?;
                    display_success("Ticket submitted.");
                    display_ticket(ticket);
                    match &state.engineer_notice {
                        ActionState::Ready(()) => {
                            println!("{}", format!("Notified {}.", engineer).dimmed())
                        }
                        ActionState::Failed(message) => {
                            display_error(&format!("Could not notify {}: {}", engineer, message))
                        }
                        _ => {}
                    }
                }
                None => {
                    let ticket = settled(dispatcher.submit_ticket(draft).await)?;
                    display_success("Ticket submitted.");
                    display_ticket(ticket);
                }
            }
        }
        Command::Hazards(HazardCommand::Submit {
            location,
            hazard_type,
            description,
            severity,
        }) => {
            let draft = HazardDraft {
                location,
                hazard_type,
                description,
                severity,
            };
            let report = settled(dispatcher.submit_hazard(draft).await)?;
            display_success("Hazard reported.");
            display_hazard(report);
        }
        Command::Notifications(NotificationCommand::List) => {
            display_notifications(settled(dispatcher.fetch_notifications().await)?);
            let unread = dispatcher.unread_count();
            if unread > 0 {
                println!("{}", format!("{} unread", unread).yellow());
            }
        }
        Command::Notifications(NotificationCommand::Read { id }) => {
            settled(dispatcher.mark_notification_read(id).await)?;
            display_success(&format!("Notification #{} marked as read.", id));
        }
        Command::Tasks => {
            display_tasks(settled(dispatcher.fetch_admin_tasks().await)?);
        }
    }
    Ok(())
}

fn settled<T>(state: &ActionState<T>) -> Result<&T> {
    match state {
        ActionState::Ready(data) => Ok(data),
        ActionState::Failed(message) => Err(TicketDeskError::Other(message.clone())),
        ActionState::Idle | ActionState::Loading => {
            Err(TicketDeskError::Other("Action did not complete.".to_string()))
        }
    }
}
