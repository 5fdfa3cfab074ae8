use serde::{Deserialize, Serialize};

/// A knowledge-base record returned by the search service.
///
/// Tickets are immutable snapshots: the UI never mutates individual
/// tickets, it only replaces the whole list when a new search completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_priority")]
    pub priority: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Present only on search results, in [0, 1].
    #[serde(default)]
    pub similarity_score: Option<f64>,
}

fn default_status() -> String {
    "Open".to_string()
}

fn default_priority() -> String {
    "Medium".to_string()
}

impl Ticket {
    /// Check the contract a decoded ticket must satisfy.
    ///
    /// Decoding already enforces field types; this catches payloads that
    /// are well-formed JSON but still unusable (empty id, score outside
    /// [0, 1]).
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("ticket has an empty id".to_string());
        }
        if let Some(score) = self.similarity_score {
            if !(0.0..=1.0).contains(&score) {
                return Err(format!(
                    "ticket {}: similarity_score {} outside [0, 1]",
                    self.id, score
                ));
            }
        }
        Ok(())
    }

    /// Similarity score as a whole percentage for display ("87% match").
    pub fn match_percent(&self) -> Option<u8> {
        self.similarity_score.map(|s| (s * 100.0).round() as u8)
    }

    /// Whether the ticket is marked resolved by the service.
    pub fn is_solved(&self) -> bool {
        self.status == "Solved"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_applies_defaults() {
        let json = r#"{"id": "T-1", "title": "VPN drops", "content": "..."}"#;
        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.status, "Open");
        assert_eq!(ticket.priority, "Medium");
        assert!(ticket.tags.is_empty());
        assert!(ticket.similarity_score.is_none());
    }

    #[test]
    fn decode_full_search_result() {
        let json = r#"{
            "id": "1",
            "title": "VPN drops",
            "content": "...",
            "status": "Open",
            "priority": "High",
            "tags": ["network"],
            "similarity_score": 0.87
        }"#;
        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.tags, vec!["network"]);
        assert_eq!(ticket.match_percent(), Some(87));
        ticket.validate().unwrap();
    }

    #[test]
    fn validate_rejects_empty_id() {
        let ticket = Ticket {
            id: "  ".to_string(),
            title: "t".to_string(),
            content: "c".to_string(),
            status: default_status(),
            priority: default_priority(),
            tags: vec![],
            similarity_score: None,
        };
        assert!(ticket.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_score() {
        let ticket = Ticket {
            id: "T-9".to_string(),
            title: "t".to_string(),
            content: "c".to_string(),
            status: default_status(),
            priority: default_priority(),
            tags: vec![],
            similarity_score: Some(1.5),
        };
        assert!(ticket.validate().is_err());
    }

    #[test]
    fn match_percent_rounds() {
        let mut ticket = Ticket {
            id: "T-9".to_string(),
            title: "t".to_string(),
            content: "c".to_string(),
            status: default_status(),
            priority: default_priority(),
            tags: vec![],
            similarity_score: Some(0.876),
        };
        assert_eq!(ticket.match_percent(), Some(88));
        ticket.similarity_score = None;
        assert_eq!(ticket.match_percent(), None);
    }
}
