use crate::models::{HazardReport, Notification, Session, Task, Ticket};
use colored::*;

pub fn display_error(message: &str) {
    eprintln!("{} {}", "Error:".red(), message);
}

pub fn display_success(message: &str) {
    println!("{}", message.green());
}

pub fn display_session(session: &Session) {
    if !session.is_authenticated() {
        println!("{}", "Not logged in.".dimmed());
        return;
    }
    println!(
        "{} {}",
        "Logged in as".green(),
        session.email.as_deref().unwrap_or("(unknown email)").cyan()
    );
    if let Some(role) = &session.role {
        println!("{}", format!("Role: {}", role).dimmed());
    }
}

pub fn display_ticket(ticket: &Ticket) {
    println!(
        "{} {} {}",
        format!("#{}", ticket.id).cyan(),
        ticket.title.bold(),
        format!("[{} / {:?}]", ticket.status, ticket.priority).dimmed()
    );
    if !ticket.description.is_empty() {
        println!("    {}", ticket.description);
    }
}

pub fn display_tickets(tickets: &[Ticket]) {
    if tickets.is_empty() {
        println!("{}", "No tickets.".dimmed());
        return;
    }
    for ticket in tickets {
        display_ticket(ticket);
    }
}

pub fn display_hazard(report: &HazardReport) {
    println!(
        "{} {} at {} {}",
        format!("#{}", report.id).cyan(),
        report.hazard_type.bold(),
        report.location,
        format!("[{:?}]", report.severity).dimmed()
    );
}

pub fn display_notifications(notifications: &[Notification]) {
    if notifications.is_empty() {
        println!("{}", "No notifications.".dimmed());
        return;
    }
    for notification in notifications {
        let marker = if notification.read { " ".normal() } else { "●".yellow() };
        let when = notification
            .created_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!(
            "{} {} {} {}",
            marker,
            format!("#{}", notification.id).cyan(),
            notification.message,
            when.dimmed()
        );
    }
}

pub fn display_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("{}", "No tasks.".dimmed());
        return;
    }
    for task in tasks {
        let status = task.status.as_deref().unwrap_or("open");
        let assignee = task
            .assignee
            .as_deref()
            .map(|a| format!(" → {}", a))
            .unwrap_or_default();
        println!(
            "{} {}{} {}",
            format!("#{}", task.id).cyan(),
            task.title,
            assignee,
            format!("[{}]", status).dimmed()
        );
    }
}
