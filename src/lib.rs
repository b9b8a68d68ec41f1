pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod navigation;
pub mod session;
pub mod ui;

pub use api::{ApiClient, ApiError};
pub use error::{Result, TicketDeskError};
