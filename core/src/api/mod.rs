use async_trait::async_trait;
use thiserror::Error;

use crate::session::ChatMessage;
use crate::ticket::Ticket;

pub mod http;
pub mod mock;

pub use http::HttpApi;
pub use mock::MockApi;

/// The external support services consumed by the client.
///
/// Both calls are black boxes: search ranks tickets for a query, chat
/// answers a transcript in the context of the currently displayed tickets.
#[async_trait]
pub trait SupportApi: Send + Sync {
    /// Search the knowledge base for tickets matching `query`
    async fn search(&self, query: &str) -> Result<Vec<Ticket>, ApiError>;

    /// Send the transcript so far plus the current result set and get the
    /// assistant's reply text
    async fn chat(
        &self,
        history: Vec<ChatMessage>,
        tickets: Vec<Ticket>,
    ) -> Result<String, ApiError>;

    /// Get backend information for display
    fn info(&self) -> ApiInfo;
}

/// Information about a backend
#[derive(Debug, Clone)]
pub struct ApiInfo {
    pub name: String,
    pub description: String,
}

/// Errors that can occur when talking to the support services.
///
/// Transport failures, non-2xx statuses, undecodable bodies and decodable
/// bodies that violate the ticket contract are distinct variants so the UI
/// can report what actually went wrong.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("decode error: {0}")]
    Decode(String),

    #[error("invalid response: {0}")]
    Validation(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Factory for creating backends
pub struct ApiFactory;

impl ApiFactory {
    /// Create an HTTP backend from the environment.
    /// Required: TICKETSEARCH_BASE_URL (e.g. "http://127.0.0.1:8000")
    pub fn create_http_from_env() -> Result<std::sync::Arc<dyn SupportApi>, ApiError> {
        let base_url = std::env::var("TICKETSEARCH_BASE_URL")
            .map_err(|_| ApiError::Configuration("Missing TICKETSEARCH_BASE_URL".to_string()))?;
        Ok(std::sync::Arc::new(HttpApi::new(base_url)))
    }

    /// Create the built-in mock backend seeded with demo tickets
    pub fn create_mock() -> std::sync::Arc<dyn SupportApi> {
        std::sync::Arc::new(MockApi::new())
    }
}
