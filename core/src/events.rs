use crate::api::ApiError;
use crate::ticket::Ticket;
use tokio::sync::mpsc;

/// Events that flow through the application.
///
/// Every completion event carries the search generation (`seq`) it was
/// issued under so the UI can discard responses that a newer search has
/// superseded.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Search request resolved with a new result set
    SearchCompleted { seq: u64, tickets: Vec<Ticket> },

    /// Search request failed; the previous result set stays in place
    SearchFailed { seq: u64, error: ApiError },

    /// Chat request resolved with the assistant's reply text
    ChatReply { seq: u64, content: String },

    /// Chat request failed
    ChatFailed { seq: u64, error: ApiError },

    /// Application should quit
    Quit,
}

/// Event bus for communication between components
#[derive(Debug)]
pub struct EventBus {
    sender: mpsc::UnboundedSender<AppEvent>,
    receiver: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self { sender, receiver }
    }

    /// Get a sender handle for the event bus
    pub fn sender(&self) -> EventSender {
        EventSender {
            inner: self.sender.clone(),
        }
    }

    /// Get the receiver (should only be used by the main event loop)
    pub fn into_receiver(self) -> mpsc::UnboundedReceiver<AppEvent> {
        self.receiver
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for sending events to the event bus
#[derive(Debug, Clone)]
pub struct EventSender {
    inner: mpsc::UnboundedSender<AppEvent>,
}

impl EventSender {
    /// Send an event to the bus
    pub fn send(&self, event: AppEvent) -> Result<(), EventSendError> {
        self.inner
            .send(event)
            .map_err(|_| EventSendError::ChannelClosed)
    }

    /// Send a completed search result set
    pub fn send_search_completed(
        &self,
        seq: u64,
        tickets: Vec<Ticket>,
    ) -> Result<(), EventSendError> {
        self.send(AppEvent::SearchCompleted { seq, tickets })
    }

    /// Send a search failure
    pub fn send_search_failed(&self, seq: u64, error: ApiError) -> Result<(), EventSendError> {
        self.send(AppEvent::SearchFailed { seq, error })
    }

    /// Send an assistant reply
    pub fn send_chat_reply(&self, seq: u64, content: String) -> Result<(), EventSendError> {
        self.send(AppEvent::ChatReply { seq, content })
    }

    /// Send a chat failure
    pub fn send_chat_failed(&self, seq: u64, error: ApiError) -> Result<(), EventSendError> {
        self.send(AppEvent::ChatFailed { seq, error })
    }

    /// Send quit signal
    pub fn send_quit(&self) -> Result<(), EventSendError> {
        self.send(AppEvent::Quit)
    }
}

/// Errors that can occur when sending events
#[derive(Debug, thiserror::Error)]
pub enum EventSendError {
    #[error("Event channel is closed")]
    ChannelClosed,
}
