use anyhow::Result;
use ticketsearch_core::{ApiFactory, EventBus, Session};
use tracing::info;

mod app;
mod components;
mod handlers;
mod state;
mod utils;

use app::App;

#[tokio::main]
async fn main() -> Result<()> {
    // Log to stderr only; stdout belongs to the terminal UI
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .init();
    info!("Starting TicketSearch TUI");

    // Optional: load .env (ignore errors if missing)
    let _ = dotenvy::dotenv();

    // Create event bus for communication
    let event_bus = EventBus::new();
    let event_sender = event_bus.sender();

    // Choose backend: the real services if a base URL is configured,
    // otherwise the built-in mock
    let api = match ApiFactory::create_http_from_env() {
        Ok(api) => api,
        Err(_) => ApiFactory::create_mock(),
    };

    // Create session
    let session = Session::new(api, event_sender.clone());

    // Create and run the TUI application
    let mut app = App::new(session, event_bus.into_receiver());
    app.run().await?;

    info!("TicketSearch TUI shutting down");
    Ok(())
}
