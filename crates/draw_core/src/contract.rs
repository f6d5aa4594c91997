use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ticket::TicketRecord;

pub const DEFAULT_TICKETS_TO_RETURN: i64 = 1;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DrawRequest {
    #[serde(default)]
    pub tickets_to_return: Option<i64>,
}

impl DrawRequest {
    /// Requested winner count, defaulting to one and never below one.
    pub fn winner_count(&self) -> usize {
        let requested = self
            .tickets_to_return
            .unwrap_or(DEFAULT_TICKETS_TO_RETURN)
            .max(1);
        usize::try_from(requested).unwrap_or(usize::MAX)
    }
}

/// Winner as exposed to the caller. Email addresses stay in the stored draw.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WinnerSummary {
    pub ticket: Value,
    pub name: String,
}

impl From<&TicketRecord> for WinnerSummary {
    fn from(record: &TicketRecord) -> Self {
        Self {
            ticket: record.ticket.clone(),
            name: record.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrawResponse {
    pub draw_id: String,
    pub winners: Vec<WinnerSummary>,
}

impl DrawResponse {
    pub fn new(draw_id: impl Into<String>, winners: &[TicketRecord]) -> Self {
        Self {
            draw_id: draw_id.into(),
            winners: winners.iter().map(WinnerSummary::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map};

    use super::*;

    #[test]
    fn defaults_to_one_winner() {
        let request: DrawRequest = serde_json::from_value(json!({})).expect("should parse");
        assert_eq!(request.winner_count(), 1);

        let explicit_null: DrawRequest =
            serde_json::from_value(json!({"tickets_to_return": null})).expect("should parse");
        assert_eq!(explicit_null.winner_count(), 1);
    }

    #[test]
    fn clamps_zero_and_negative_counts_to_one() {
        for requested in [0, -3, i64::MIN] {
            let request = DrawRequest {
                tickets_to_return: Some(requested),
            };
            assert_eq!(request.winner_count(), 1);
        }
    }

    #[test]
    fn keeps_positive_counts() {
        let request: DrawRequest =
            serde_json::from_value(json!({"tickets_to_return": 5, "campaign": "autumn"}))
                .expect("unknown fields should be ignored");
        assert_eq!(request.winner_count(), 5);
    }

    #[test]
    fn rejects_fractional_counts() {
        let result = serde_json::from_value::<DrawRequest>(json!({"tickets_to_return": 2.5}));
        assert!(result.is_err());
    }

    #[test]
    fn response_omits_email_and_extra_fields() {
        let winners = vec![TicketRecord {
            ticket: json!("A-100"),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            extra: Map::from_iter([("phone".to_string(), json!("555-0100"))]),
        }];

        let body = serde_json::to_value(DrawResponse::new("draw-1", &winners))
            .expect("response should serialize");

        assert_eq!(
            body,
            json!({
                "draw_id": "draw-1",
                "winners": [{"ticket": "A-100", "name": "Ada"}]
            })
        );
    }
}
