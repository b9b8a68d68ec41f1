mod auth;
mod notification;
mod session;
mod task;
mod ticket;

pub use auth::{Credentials, LoginResponse};
pub use notification::{EngineerNotice, Notification};
pub use session::Session;
pub use task::Task;
pub use ticket::{HazardReport, NewHazardReport, NewTicket, Priority, Severity, Ticket};
