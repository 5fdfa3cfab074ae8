use async_trait::async_trait;
use std::time::Duration;

use super::{ApiError, ApiInfo, SupportApi};
use crate::session::{ChatMessage, MessageRole};
use crate::ticket::Ticket;

/// In-process backend with canned demo tickets and a simulated delay.
///
/// Stands in for the real services when no base URL is configured and
/// drives the UI and session tests. The trigger phrases "network error"
/// (search) and "fail" (chat) simulate failures.
pub struct MockApi {
    info: ApiInfo,
    delay: Duration,
    tickets: Vec<Ticket>,
}

fn demo_ticket(
    id: &str,
    title: &str,
    content: &str,
    status: &str,
    priority: &str,
    tags: &[&str],
) -> Ticket {
    Ticket {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        status: status.to_string(),
        priority: priority.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        similarity_score: None,
    }
}

impl MockApi {
    pub fn new() -> Self {
        let tickets = vec![
            demo_ticket(
                "T-1024",
                "VPN Connection Fails on macOS Sequoia",
                "Users reporting AnyConnect timeouts after updating to macOS 15.0. \
                 Workaround involves disabling IPv6 in network settings.",
                "Solved",
                "High",
                &["network", "vpn"],
            ),
            demo_ticket(
                "T-1025",
                "SSO Login Loop - Okta Integration",
                "Authentication redirects indefinitely. Root cause identified as \
                 clock skew on the auth server. Sync NTP to fix.",
                "Solved",
                "Critical",
                &["auth", "sso"],
            ),
            demo_ticket(
                "T-1021",
                "Docker Container OOM on Build Pipeline",
                "CI jobs failing with exit code 137. Increased memory limit in \
                 values.yaml resolved the crash.",
                "Solved",
                "Medium",
                &["ci", "docker"],
            ),
            demo_ticket(
                "T-1018",
                "Internal API Rate Limiting for Sales Dashboard",
                "Sales dashboard returning 429s. Whitelisted the dashboard IP \
                 range in the gateway.",
                "Open",
                "Medium",
                &["api"],
            ),
        ];

        Self {
            info: ApiInfo {
                name: "Mock backend".to_string(),
                description: "Built-in demo tickets, no services required".to_string(),
            },
            delay: Duration::from_millis(300),
            tickets,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Fraction of query terms that appear in the ticket's title or content.
    fn score(ticket: &Ticket, terms: &[&str]) -> f64 {
        let haystack = format!("{} {}", ticket.title, ticket.content).to_lowercase();
        let hits = terms.iter().filter(|t| haystack.contains(**t)).count();
        hits as f64 / terms.len() as f64
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SupportApi for MockApi {
    async fn search(&self, query: &str) -> Result<Vec<Ticket>, ApiError> {
        // Simulate failures for testing
        if query.trim().eq_ignore_ascii_case("network error") {
            return Err(ApiError::Network("Simulated network failure".to_string()));
        }

        tokio::time::sleep(self.delay).await;

        let lowered = query.to_lowercase();
        let terms: Vec<&str> = lowered.split_whitespace().collect();
        if terms.is_empty() {
            return Ok(vec![]);
        }

        let mut scored: Vec<Ticket> = self
            .tickets
            .iter()
            .filter_map(|t| {
                let score = Self::score(t, &terms);
                if score > 0.0 {
                    let mut hit = t.clone();
                    hit.similarity_score = Some(score);
                    Some(hit)
                } else {
                    None
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.similarity_score
                .partial_cmp(&a.similarity_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        // Same cutoff as the real service
        scored.truncate(3);
        Ok(scored)
    }

    async fn chat(
        &self,
        history: Vec<ChatMessage>,
        tickets: Vec<Ticket>,
    ) -> Result<String, ApiError> {
        let last_user = history
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map(|m| m.content.clone())
            .unwrap_or_default();

        if last_user.trim().eq_ignore_ascii_case("fail") {
            return Err(ApiError::Network("Simulated network failure".to_string()));
        }

        tokio::time::sleep(self.delay).await;

        let reply = match tickets.first() {
            Some(first) => format!(
                "Based on {} matched ticket(s), the closest precedent is {} ({}). {}",
                tickets.len(),
                first.id,
                first.title,
                "Check its resolution notes for the suggested fix."
            ),
            None => "No relevant tickets found for your question.".to_string(),
        };
        Ok(reply)
    }

    fn info(&self) -> ApiInfo {
        self.info.clone()
    }
}
