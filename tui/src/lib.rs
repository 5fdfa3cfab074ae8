//! Terminal UI for TicketSearch: search a ticket knowledge base and chat
//! with an assistant about the results.

pub mod app;
pub mod components;
pub mod handlers;
pub mod state;
pub mod utils;

// Re-export main types for convenience
pub use app::App;
