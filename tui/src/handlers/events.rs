use ticketsearch_core::AppEvent;
use tracing::{debug, error};

use crate::state::AppState;

/// Applies session events to the UI state
pub struct EventHandler;

impl EventHandler {
    /// Handle application events
    pub fn handle_event(state: &mut AppState, event: AppEvent) {
        debug!("Handling app event: {:?}", event);
        match event {
            AppEvent::SearchCompleted { seq, tickets } => {
                if state.session.apply_search(seq, tickets) {
                    state.searching = false;
                    state.searched = true;
                    state.results_scroll = 0;
                    state.last_error = None;
                }
                // Stale results are dropped inside apply_search; the busy
                // flag belongs to the newer request still in flight.
            }
            AppEvent::SearchFailed { seq, error: api_error } => {
                error!("Search failed: {}", api_error);
                if state.session.is_current(seq) {
                    // The previous result set stays in place
                    state.searching = false;
                    state.last_error = Some(api_error.to_string());
                }
            }
            AppEvent::ChatReply { seq, content } => {
                if state.session.apply_chat_reply(seq, content) {
                    state.chat_sending = false;
                    state.auto_scroll_chat = true;
                }
                // A reply for a superseded search is dropped; the search
                // that superseded it already reset the chat flags.
            }
            AppEvent::ChatFailed { seq, error: api_error } => {
                error!("Chat failed: {}", api_error);
                if state.session.is_current(seq) {
                    state.chat_sending = false;
                    state.session.add_error_message(api_error.to_string());
                    state.auto_scroll_chat = true;
                }
            }
            AppEvent::Quit => {
                state.should_quit = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::InputHandler;
    use std::sync::Arc;
    use std::time::Duration;
    use ticketsearch_core::api::{ApiError, MockApi};
    use ticketsearch_core::{EventBus, MessageRole, Session, Ticket};

    fn test_state() -> AppState {
        let bus = EventBus::new();
        let sender = bus.sender();
        let api = Arc::new(MockApi::new().with_delay(Duration::from_millis(1)));
        AppState::new(Session::new(api, sender), bus.into_receiver())
    }

    fn drive_search(state: &mut AppState, query: &str) {
        state.search_input = query.to_string();
        state.search_cursor = state.search_input.len();
        InputHandler::submit_search(state);
    }

    async fn settle_search(state: &mut AppState) {
        let event = state.event_receiver.recv().await.unwrap();
        EventHandler::handle_event(state, event);
    }

    #[tokio::test]
    async fn successful_search_installs_tickets_and_clears_busy() {
        let mut state = test_state();
        drive_search(&mut state, "vpn");
        assert!(state.searching);

        settle_search(&mut state).await;

        assert!(!state.searching);
        assert!(state.searched);
        assert!(!state.session.tickets().is_empty());
        assert_eq!(state.session.tickets()[0].id, "T-1024");
    }

    #[tokio::test]
    async fn failed_search_keeps_previous_tickets() {
        let mut state = test_state();
        drive_search(&mut state, "vpn");
        settle_search(&mut state).await;
        let before = state.session.tickets().to_vec();

        // The mock treats this query as a transport failure
        drive_search(&mut state, "network error");
        settle_search(&mut state).await;

        assert!(!state.searching);
        assert_eq!(state.session.tickets(), before.as_slice());
        assert!(state.last_error.is_some());
    }

    #[tokio::test]
    async fn chat_round_trip_appends_user_then_assistant() {
        let mut state = test_state();
        drive_search(&mut state, "vpn");
        settle_search(&mut state).await;

        state.open_chat();
        state.chat_input = "what's the fix?".to_string();
        InputHandler::submit_chat(&mut state);
        assert!(state.chat_sending);
        assert_eq!(state.session.messages().len(), 1);

        let event = state.event_receiver.recv().await.unwrap();
        EventHandler::handle_event(&mut state, event);

        assert!(!state.chat_sending);
        let roles: Vec<_> = state
            .session
            .messages()
            .iter()
            .map(|m| m.role.clone())
            .collect();
        assert_eq!(roles, vec![MessageRole::User, MessageRole::Assistant]);
    }

    #[tokio::test]
    async fn chat_failure_is_surfaced_in_transcript() {
        let mut state = test_state();
        drive_search(&mut state, "vpn");
        settle_search(&mut state).await;

        state.open_chat();
        state.chat_input = "fail".to_string();
        InputHandler::submit_chat(&mut state);

        let event = state.event_receiver.recv().await.unwrap();
        EventHandler::handle_event(&mut state, event);

        assert!(!state.chat_sending);
        let last = state.session.messages().last().unwrap();
        assert_eq!(last.role, MessageRole::Error);
    }

    #[tokio::test]
    async fn stale_chat_reply_after_new_search_is_dropped() {
        let mut state = test_state();
        drive_search(&mut state, "vpn");
        settle_search(&mut state).await;

        state.open_chat();
        state.chat_input = "what's the fix?".to_string();
        InputHandler::submit_chat(&mut state);

        // New search while the chat request is in flight
        drive_search(&mut state, "docker");
        assert!(!state.chat_open);
        assert!(state.session.messages().is_empty());

        // Drain both pending completions in whatever order they land
        for _ in 0..2 {
            let event = state.event_receiver.recv().await.unwrap();
            EventHandler::handle_event(&mut state, event);
        }

        // The stale reply must not have resurrected the old transcript
        assert!(state.session.messages().is_empty());
        assert!(!state.searching);
    }

    #[tokio::test]
    async fn stale_search_failure_does_not_clear_busy() {
        let mut state = test_state();
        drive_search(&mut state, "vpn");
        let stale = AppEvent::SearchFailed {
            seq: 0,
            error: ApiError::Network("late failure".to_string()),
        };
        EventHandler::handle_event(&mut state, stale);
        assert!(state.searching);
        assert!(state.last_error.is_none());
    }

    #[tokio::test]
    async fn stale_search_result_does_not_overwrite_tickets() {
        let mut state = test_state();
        drive_search(&mut state, "vpn");
        settle_search(&mut state).await;
        let current = state.session.tickets().to_vec();

        let stale = AppEvent::SearchCompleted {
            seq: 0,
            tickets: vec![Ticket {
                id: "T-STALE".to_string(),
                title: "old".to_string(),
                content: "old".to_string(),
                status: "Open".to_string(),
                priority: "Low".to_string(),
                tags: vec![],
                similarity_score: None,
            }],
        };
        EventHandler::handle_event(&mut state, stale);
        assert_eq!(state.session.tickets(), current.as_slice());
    }
}
