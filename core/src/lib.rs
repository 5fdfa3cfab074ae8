pub mod api;
pub mod events;
pub mod session;
pub mod ticket;

// Re-export main types for convenience
pub use api::{ApiError, ApiFactory, ApiInfo, SupportApi};
pub use events::{AppEvent, EventBus, EventSender};
pub use session::{ChatMessage, MessageRole, Session};
pub use ticket::Ticket;
