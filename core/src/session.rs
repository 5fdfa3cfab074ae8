use crate::api::SupportApi;
use crate::events::EventSender;
use crate::ticket::Ticket;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Who sent the message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
    /// Local UI artifact for surfaced chat failures; never sent on the wire
    Error,
}

/// A single message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: String) -> Self {
        Self {
            role: MessageRole::User,
            content,
        }
    }

    pub fn assistant(content: String) -> Self {
        Self {
            role: MessageRole::Assistant,
            content,
        }
    }

    pub fn system(content: String) -> Self {
        Self {
            role: MessageRole::System,
            content,
        }
    }

    pub fn error(content: String) -> Self {
        Self {
            role: MessageRole::Error,
            content,
        }
    }
}

/// The client's view of the knowledge base: the current result set and the
/// chat transcript about it.
///
/// Both requests run as background tasks so the UI never blocks; results
/// come back through the event bus. `seq` is the search generation: it is
/// bumped on every accepted search, every spawned request captures it, and
/// completion events carrying a stale `seq` are discarded. That is what
/// keeps a superseded search or an in-flight chat reply from overwriting
/// state that belongs to a newer search.
pub struct Session {
    tickets: Vec<Ticket>,
    messages: Vec<ChatMessage>,
    api: Arc<dyn SupportApi>,
    event_sender: EventSender,
    seq: u64,
}

impl Session {
    /// Create a new session with the given backend
    pub fn new(api: Arc<dyn SupportApi>, event_sender: EventSender) -> Self {
        Self {
            tickets: Vec::new(),
            messages: Vec::new(),
            api,
            event_sender,
            seq: 0,
        }
    }

    /// Current result set
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// All messages in the transcript
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Current search generation
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Whether `seq` belongs to the latest accepted search
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.seq
    }

    /// Start a search for `raw`.
    ///
    /// Whitespace-only input is a no-op and returns false. Otherwise the
    /// transcript is cleared (it only made sense for the previous result
    /// set), the generation is bumped, and the request is spawned. Returns
    /// true so the caller can set its busy flag and close the chat panel.
    pub fn begin_search(&mut self, raw: &str) -> bool {
        let query = raw.trim();
        if query.is_empty() {
            return false;
        }

        self.seq += 1;
        self.messages.clear();

        let seq = self.seq;
        let query = query.to_string();
        let api = self.api.clone();
        let sender = self.event_sender.clone();
        tokio::spawn(async move {
            match api.search(&query).await {
                Ok(tickets) => {
                    let _ = sender.send_search_completed(seq, tickets);
                }
                Err(error) => {
                    let _ = sender.send_search_failed(seq, error);
                }
            }
        });
        true
    }

    /// Install a completed search's result set, unless superseded.
    pub fn apply_search(&mut self, seq: u64, tickets: Vec<Ticket>) -> bool {
        if !self.is_current(seq) {
            tracing::debug!(seq, current = self.seq, "dropping stale search result");
            return false;
        }
        self.tickets = tickets;
        true
    }

    /// Send a chat message about the current result set.
    ///
    /// Whitespace-only input is a no-op and returns false. The user entry
    /// is appended before the request is spawned, so it is visible while
    /// the call is in flight. The request carries a snapshot of the
    /// transcript so far and the exact tickets currently displayed.
    pub fn send_chat(&mut self, raw: &str) -> bool {
        let text = raw.trim();
        if text.is_empty() {
            return false;
        }

        self.messages.push(ChatMessage::user(text.to_string()));

        let seq = self.seq;
        let history = self.messages.clone();
        let tickets = self.tickets.clone();
        let api = self.api.clone();
        let sender = self.event_sender.clone();
        tokio::spawn(async move {
            match api.chat(history, tickets).await {
                Ok(content) => {
                    let _ = sender.send_chat_reply(seq, content);
                }
                Err(error) => {
                    let _ = sender.send_chat_failed(seq, error);
                }
            }
        });
        true
    }

    /// Append the assistant's reply, unless a newer search superseded it.
    pub fn apply_chat_reply(&mut self, seq: u64, content: String) -> bool {
        if !self.is_current(seq) {
            tracing::debug!(seq, current = self.seq, "dropping stale chat reply");
            return false;
        }
        self.messages.push(ChatMessage::assistant(content));
        true
    }

    /// Surface a chat failure in the transcript
    pub fn add_error_message(&mut self, content: String) {
        self.messages.push(ChatMessage::error(content));
    }

    /// Get backend information
    pub fn api_info(&self) -> crate::api::ApiInfo {
        self.api.info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiFactory, MockApi};
    use crate::events::{AppEvent, EventBus};
    use std::time::Duration;

    fn test_session() -> (Session, tokio::sync::mpsc::UnboundedReceiver<AppEvent>) {
        let bus = EventBus::new();
        let sender = bus.sender();
        let api = Arc::new(MockApi::new().with_delay(Duration::from_millis(1)));
        (Session::new(api, sender), bus.into_receiver())
    }

    #[tokio::test]
    async fn empty_search_is_a_noop() {
        let (mut session, mut receiver) = test_session();
        session.send_chat("hello");
        let before = session.messages().len();

        assert!(!session.begin_search("   "));
        assert_eq!(session.seq(), 0);
        assert_eq!(session.messages().len(), before);

        // The no-op must not have spawned a search; only the chat reply
        // from send_chat above may arrive.
        let event = receiver.recv().await.unwrap();
        assert!(matches!(event, AppEvent::ChatReply { .. }));
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn search_clears_transcript_and_bumps_generation() {
        let (mut session, _receiver) = test_session();
        session.send_chat("hello");
        assert_eq!(session.messages().len(), 1);

        assert!(session.begin_search("vpn"));
        assert_eq!(session.seq(), 1);
        assert!(session.messages().is_empty());
    }

    #[tokio::test]
    async fn search_result_replaces_tickets() {
        let (mut session, mut receiver) = test_session();
        assert!(session.begin_search("vpn"));

        match receiver.recv().await.unwrap() {
            AppEvent::SearchCompleted { seq, tickets } => {
                assert!(session.apply_search(seq, tickets));
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(!session.tickets().is_empty());
        assert_eq!(session.tickets()[0].id, "T-1024");
    }

    #[tokio::test]
    async fn stale_search_result_is_dropped() {
        let (mut session, _receiver) = test_session();
        assert!(session.begin_search("vpn"));
        let old_seq = session.seq();
        assert!(session.begin_search("docker"));

        assert!(!session.apply_search(old_seq, vec![]));
    }

    #[tokio::test]
    async fn chat_appends_user_entry_before_reply_arrives() {
        let (mut session, _receiver) = test_session();
        assert!(session.send_chat("what's the fix?"));

        // Visible immediately, not after the network call settles
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, MessageRole::User);
        assert_eq!(session.messages()[0].content, "what's the fix?");
    }

    #[tokio::test]
    async fn chat_reply_preserves_transcript_order() {
        let (mut session, mut receiver) = test_session();
        assert!(session.send_chat("what's the fix?"));

        match receiver.recv().await.unwrap() {
            AppEvent::ChatReply { seq, content } => {
                assert!(session.apply_chat_reply(seq, content));
            }
            other => panic!("unexpected event: {:?}", other),
        }

        let roles: Vec<_> = session.messages().iter().map(|m| m.role.clone()).collect();
        assert_eq!(roles, vec![MessageRole::User, MessageRole::Assistant]);
    }

    #[tokio::test]
    async fn reply_for_superseded_search_is_dropped() {
        let (mut session, mut receiver) = test_session();
        assert!(session.send_chat("what's the fix?"));

        // A new search invalidates the in-flight chat request
        assert!(session.begin_search("docker"));

        loop {
            match receiver.recv().await.unwrap() {
                AppEvent::ChatReply { seq, content } => {
                    assert!(!session.apply_chat_reply(seq, content));
                    break;
                }
                // The new search's own events may land first
                _ => continue,
            }
        }
        assert!(session.messages().is_empty());
    }

    #[tokio::test]
    async fn empty_chat_input_is_a_noop() {
        let (mut session, _receiver) = test_session();
        assert!(!session.send_chat("   "));
        assert!(session.messages().is_empty());
    }

    #[tokio::test]
    async fn factory_mock_backend_reports_info() {
        let api = ApiFactory::create_mock();
        assert_eq!(api.info().name, "Mock backend");
    }
}
