use clap::{Parser, Subcommand};

use crate::models::{Priority, Severity};

#[derive(Parser, Debug)]
#[command(name = "ticketdesk")]
#[command(about = "Command-line client for the service desk API", long_about = None)]
pub struct Args {
    #[arg(
        long = "api-url",
        global = true,
        help = "API base URL (e.g., https://desk.example.com/api)"
    )]
    pub api_url: Option<String>,

    #[arg(short = 'v', long = "verbose", global = true, help = "Log requests to stderr")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TICKETDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show who the stored session belongs to
    Whoami,
    /// Service tickets
    #[command(subcommand)]
    Tickets(TicketCommand),
    /// Hazard reports
    #[command(subcommand)]
    Hazards(HazardCommand),
    /// Your notifications
    #[command(subcommand)]
    Notifications(NotificationCommand),
    /// Admin task board
    Tasks,
}

#[derive(Subcommand, Debug)]
pub enum TicketCommand {
    /// Tickets you reported
    List,
    /// Open a new ticket
    Submit {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long, default_value = "general")]
        category: String,
        #[arg(long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
        #[arg(long, help = "Engineer to notify once the ticket is created")]
        notify: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum HazardCommand {
    /// Report a hazard
    Submit {
        #[arg(long)]
        location: String,
        #[arg(long = "hazard-type")]
        hazard_type: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, value_enum, default_value_t = Severity::Moderate)]
        severity: Severity,
    },
}

#[derive(Subcommand, Debug)]
pub enum NotificationCommand {
    /// List notifications
    List,
    /// Mark one notification as read
    Read { id: u64 },
}
