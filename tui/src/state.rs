use ticketsearch_core::{AppEvent, Session};
use std::time::Instant;
use tokio::sync::mpsc;

/// Panels that can hold keyboard focus on the main screen
pub const FOCUS_SEARCH: usize = 0;
pub const FOCUS_RESULTS: usize = 1;

/// Application state
pub struct AppState {
    /// The knowledge-base session (tickets + transcript)
    pub session: Session,

    /// Current search input text
    pub search_input: String,

    /// Cursor position in the search input (byte index)
    pub search_cursor: usize,

    /// Current chat input text (inside the overlay)
    pub chat_input: String,

    /// Cursor position in the chat input (byte index)
    pub chat_cursor: usize,

    /// Whether the application should quit
    pub should_quit: bool,

    /// Whether a search request is in flight
    pub searching: bool,

    /// Whether a chat request is in flight
    pub chat_sending: bool,

    /// Whether the chat overlay is open
    pub chat_open: bool,

    /// Whether at least one search has completed (switches the results
    /// header from "Recent Solutions" to "Found Solutions")
    pub searched: bool,

    /// Last search failure, shown in the status line until the next search
    pub last_error: Option<String>,

    /// Event receiver for handling app events
    pub event_receiver: mpsc::UnboundedReceiver<AppEvent>,

    /// Results list scroll state
    pub results_scroll: usize,

    /// Chat transcript scroll state
    pub chat_scroll: usize,

    /// Whether to auto-scroll the transcript to the bottom on new messages
    pub auto_scroll_chat: bool,

    /// Currently focused panel on the main screen
    pub focused_panel: usize,

    /// Whether cursor is visible (for blinking effect)
    pub cursor_visible: bool,

    /// Last time cursor blinked
    pub last_cursor_blink: Instant,
}

impl AppState {
    /// Create a new application state
    pub fn new(session: Session, event_receiver: mpsc::UnboundedReceiver<AppEvent>) -> Self {
        Self {
            session,
            search_input: String::new(),
            search_cursor: 0,
            chat_input: String::new(),
            chat_cursor: 0,
            should_quit: false,
            searching: false,
            chat_sending: false,
            chat_open: false,
            searched: false,
            last_error: None,
            event_receiver,
            results_scroll: 0,
            chat_scroll: 0,
            auto_scroll_chat: true,
            focused_panel: FOCUS_SEARCH,
            cursor_visible: true,
            last_cursor_blink: Instant::now(),
        }
    }

    /// Open the chat overlay. Only possible once a search has produced
    /// tickets; with nothing to talk about this is a no-op.
    pub fn open_chat(&mut self) {
        if self.session.tickets().is_empty() {
            return;
        }
        self.chat_open = true;
        self.auto_scroll_chat = true;
    }

    /// Close the chat overlay
    pub fn close_chat(&mut self) {
        self.chat_open = false;
    }

    /// Update cursor blinking state
    pub fn update_cursor_blink(&mut self) {
        let now = Instant::now();
        if now.duration_since(self.last_cursor_blink).as_millis() >= 500 {
            self.cursor_visible = !self.cursor_visible;
            self.last_cursor_blink = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;
    use ticketsearch_core::api::MockApi;
    use ticketsearch_core::EventBus;

    fn test_state() -> AppState {
        let bus = EventBus::new();
        let sender = bus.sender();
        let api = Arc::new(MockApi::new().with_delay(Duration::from_millis(1)));
        AppState::new(Session::new(api, sender), bus.into_receiver())
    }

    #[tokio::test]
    async fn chat_cannot_open_without_tickets() {
        let mut state = test_state();
        state.open_chat();
        assert!(!state.chat_open);
    }

    #[tokio::test]
    async fn chat_opens_once_tickets_present() {
        let mut state = test_state();
        assert!(state.session.begin_search("vpn"));
        let event = state.event_receiver.recv().await.unwrap();
        if let AppEvent::SearchCompleted { seq, tickets } = event {
            state.session.apply_search(seq, tickets);
        }
        state.open_chat();
        assert!(state.chat_open);
    }
}
