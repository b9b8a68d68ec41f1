//! Redirect capability used when a session is invalidated.

use colored::*;
use std::sync::Mutex;

/// Login entry point the client redirects to after a 401.
pub const LOGIN_PATH: &str = "/login";

/// Whatever hosts the client decides what "going to a path" means.
pub trait Navigator: Send + Sync {
    fn go_to(&self, path: &str);
}

/// Keeps every path it was sent to; the last one is the current location.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_location(&self) -> Option<String> {
        self.visited().last().cloned()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn go_to(&self, path: &str) {
        self.visited
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(path.to_string());
    }
}

/// Terminal host: the login page is the `login` subcommand, so a redirect
/// there becomes a hint on stderr. Repeated redirects print once.
#[derive(Debug, Default)]
pub struct ConsoleNavigator {
    announced: Mutex<bool>,
}

impl ConsoleNavigator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Navigator for ConsoleNavigator {
    fn go_to(&self, path: &str) {
        let mut announced = self.announced.lock().unwrap_or_else(|p| p.into_inner());
        if path == LOGIN_PATH {
            if !*announced {
                eprintln!(
                    "{} {}",
                    "Session expired.".yellow(),
                    "Run `ticketdesk login` to sign in again.".dimmed()
                );
                *announced = true;
            }
        } else {
            eprintln!("{}", format!("Redirected to {}", path).dimmed());
        }
    }
}
