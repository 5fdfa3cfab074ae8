use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ApiError, ApiInfo, SupportApi};
use crate::session::{ChatMessage, MessageRole};
use crate::ticket::Ticket;

/// HTTP client for the external search and chat services.
pub struct HttpApi {
    info: ApiInfo,
    base_url: String,
    client: reqwest::Client,
}

impl HttpApi {
    pub fn new(base_url: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            info: ApiInfo {
                name: "TicketSearch API".to_string(),
                description: base_url.clone(),
            },
            base_url,
            client: reqwest::Client::new(),
        }
    }

    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        Err(ApiError::Status { status, body })
    }
}

/// Body of `POST /chat`. The tickets are passed through exactly as
/// displayed: same order, same fields.
#[derive(Debug, Serialize)]
struct ChatRequest {
    messages: Vec<ChatMessage>,
    tickets: Vec<Ticket>,
}

#[derive(Debug, Deserialize)]
struct ChatReplyBody {
    content: String,
}

/// Drop transcript entries the services should never see.
///
/// Error entries are local UI artifacts for surfaced failures; the wire
/// contract only knows user/assistant/system roles.
fn wire_history(history: Vec<ChatMessage>) -> Vec<ChatMessage> {
    history
        .into_iter()
        .filter(|m| m.role != MessageRole::Error)
        .collect()
}

#[async_trait]
impl SupportApi for HttpApi {
    async fn search(&self, query: &str) -> Result<Vec<Ticket>, ApiError> {
        let url = format!("{}/search", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("query", query)])
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("request error: {}", e)))?;

        let resp = Self::check_status(resp).await?;

        let tickets: Vec<Ticket> = resp
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("search response: {}", e)))?;

        for ticket in &tickets {
            ticket.validate().map_err(ApiError::Validation)?;
        }
        Ok(tickets)
    }

    async fn chat(
        &self,
        history: Vec<ChatMessage>,
        tickets: Vec<Ticket>,
    ) -> Result<String, ApiError> {
        let url = format!("{}/chat", self.base_url);
        let body = ChatRequest {
            messages: wire_history(history),
            tickets,
        };

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("request error: {}", e)))?;

        let resp = Self::check_status(resp).await?;

        let reply: ChatReplyBody = resp
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("chat response: {}", e)))?;
        Ok(reply.content)
    }

    fn info(&self) -> ApiInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn sample_ticket() -> Ticket {
        serde_json::from_value(json!({
            "id": "1",
            "title": "VPN drops",
            "content": "...",
            "status": "Open",
            "priority": "High",
            "tags": ["network"],
            "similarity_score": 0.87
        }))
        .unwrap()
    }

    #[test]
    fn wire_history_drops_error_entries() {
        let history = vec![
            ChatMessage::user("what's the fix?".to_string()),
            ChatMessage::error("network error: boom".to_string()),
            ChatMessage::assistant("Restart the client".to_string()),
        ];
        let wire = wire_history(history);
        assert_eq!(wire.len(), 2);
        assert_eq!(wire[0].role, MessageRole::User);
        assert_eq!(wire[1].role, MessageRole::Assistant);
    }

    #[test]
    fn chat_request_serializes_wire_contract() {
        let body = ChatRequest {
            messages: vec![
                ChatMessage::user("what's the fix?".to_string()),
                ChatMessage::assistant("Restart the client".to_string()),
            ],
            tickets: vec![sample_ticket()],
        };
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "what's the fix?");
        assert_eq!(value["messages"][1]["role"], "assistant");
        assert_eq!(value["tickets"][0]["id"], "1");
        assert_eq!(value["tickets"][0]["similarity_score"], 0.87);
    }

    #[test]
    fn chat_request_tickets_round_trip_unchanged() {
        let tickets = vec![sample_ticket()];
        let body = ChatRequest {
            messages: vec![],
            tickets: tickets.clone(),
        };
        let value = serde_json::to_value(&body).unwrap();
        let sent: Value = value["tickets"].clone();
        let displayed = serde_json::to_value(&tickets).unwrap();
        assert_eq!(sent, displayed);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = HttpApi::new("http://127.0.0.1:8000/".to_string());
        assert_eq!(api.base_url, "http://127.0.0.1:8000");
    }
}
