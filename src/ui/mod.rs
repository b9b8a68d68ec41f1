pub mod output;

pub use output::{
    display_error, display_hazard, display_notifications, display_session, display_success,
    display_tasks, display_ticket, display_tickets,
};
