use clap::Parser;
use reqwest::header::HeaderMap;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

use ticketdesk::cli::Args;
use ticketdesk::commands;
use ticketdesk::config::Config;
use ticketdesk::dispatch::Dispatcher;
use ticketdesk::navigation::ConsoleNavigator;
use ticketdesk::session::FilesystemSessionStore;
use ticketdesk::ui::display_error;
use ticketdesk::ApiClient;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match Config::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            display_error(&format!("{:#}", e));
            process::exit(1);
        }
    };

    init_tracing(config.verbose);

    let session = Arc::new(FilesystemSessionStore::new(config.session_path.clone()));
    let client = match ApiClient::new(
        &config.api_url,
        HeaderMap::new(),
        session,
        Arc::new(ConsoleNavigator::new()),
        Duration::from_secs(config.timeout_secs),
    ) {
        Ok(client) => client,
        Err(e) => {
            display_error(&e.to_string());
            process::exit(1);
        }
    };

    let mut dispatcher = Dispatcher::new(client);
    if let Err(e) = commands::run(&mut dispatcher, args.command).await {
        display_error(&e.to_string());
        process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `--verbose` turns on debug output for this crate.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "ticketdesk=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
