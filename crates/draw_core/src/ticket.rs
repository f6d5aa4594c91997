use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A decoded entry that carries every field a winner needs.
///
/// Fields beyond `ticket`, `name` and `email` are kept in `extra` so the
/// persisted draw record matches what the entrant submitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketRecord {
    pub ticket: Value,
    pub name: String,
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TicketRejection {
    #[error("an exception was encountered while loading it: {0}")]
    Unreadable(String),
    #[error("it is not a valid ticket record: {0}")]
    Malformed(String),
    #[error("it does not have a valid ticket number: {0}")]
    MissingTicket(Value),
    #[error("it does not have a valid name: {0}")]
    MissingName(Value),
    #[error("it does not have a valid email address: {0}")]
    MissingEmail(Value),
}

impl TicketRecord {
    /// Decodes raw entry bytes, rejecting on the first required field that is
    /// missing or empty. Fields are checked as `ticket`, `name`, then `email`.
    pub fn decode(bytes: &[u8]) -> Result<Self, TicketRejection> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|error| TicketRejection::Malformed(error.to_string()))?;
        let Value::Object(mut fields) = value else {
            return Err(TicketRejection::Malformed(
                "entry must be a JSON object".to_string(),
            ));
        };

        let ticket = match fields.remove("ticket") {
            Some(value) if is_truthy(&value) => value,
            other => return Err(TicketRejection::MissingTicket(other.unwrap_or(Value::Null))),
        };
        let name = match fields.remove("name") {
            Some(Value::String(name)) if !name.is_empty() => name,
            other => return Err(TicketRejection::MissingName(other.unwrap_or(Value::Null))),
        };
        let email = match fields.remove("email") {
            Some(Value::String(email)) if !email.is_empty() => email,
            other => return Err(TicketRejection::MissingEmail(other.unwrap_or(Value::Null))),
        };

        Ok(Self {
            ticket,
            name,
            email,
            extra: fields,
        })
    }
}

// Entrants submit ticket numbers as strings or numbers; zero, blank and empty
// containers all count as "no ticket".
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => !matches!(number.as_f64(), Some(value) if value == 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn decode_value(value: Value) -> Result<TicketRecord, TicketRejection> {
        TicketRecord::decode(value.to_string().as_bytes())
    }

    #[test]
    fn decodes_complete_record_and_keeps_extra_fields() {
        let record = decode_value(json!({
            "ticket": "A-100",
            "name": "Ada",
            "email": "ada@example.com",
            "entered_at": "2026-10-01T09:00:00Z"
        }))
        .expect("record should decode");

        assert_eq!(record.ticket, json!("A-100"));
        assert_eq!(record.name, "Ada");
        assert_eq!(record.email, "ada@example.com");
        assert_eq!(record.extra.get("entered_at"), Some(&json!("2026-10-01T09:00:00Z")));
    }

    #[test]
    fn accepts_numeric_ticket_identifier() {
        let record = decode_value(json!({"ticket": 42, "name": "Ada", "email": "a@x.io"}))
            .expect("numeric ticket should decode");
        assert_eq!(record.ticket, json!(42));
    }

    #[test]
    fn rejects_invalid_json() {
        let rejection = TicketRecord::decode(b"{not json").expect_err("should reject");
        assert!(matches!(rejection, TicketRejection::Malformed(_)));
    }

    #[test]
    fn rejects_non_object_json() {
        let rejection = decode_value(json!(["A-100", "Ada"])).expect_err("should reject");
        assert_eq!(
            rejection,
            TicketRejection::Malformed("entry must be a JSON object".to_string())
        );
    }

    #[test]
    fn rejects_falsy_ticket_values() {
        for ticket in [json!(null), json!(""), json!(0), json!(false), json!([]), json!({})] {
            let rejection = decode_value(json!({"ticket": ticket, "name": "Ada", "email": "a@x.io"}))
                .expect_err("falsy ticket should reject");
            assert_eq!(rejection, TicketRejection::MissingTicket(ticket));
        }
    }

    #[test]
    fn reports_first_missing_field_only() {
        let rejection = decode_value(json!({"ticket": "A-1"})).expect_err("should reject");
        assert_eq!(rejection, TicketRejection::MissingName(Value::Null));
    }

    #[test]
    fn rejects_empty_or_non_string_name() {
        let empty = decode_value(json!({"ticket": "A-1", "name": "", "email": "a@x.io"}))
            .expect_err("empty name should reject");
        assert_eq!(empty, TicketRejection::MissingName(json!("")));

        let numeric = decode_value(json!({"ticket": "A-1", "name": 7, "email": "a@x.io"}))
            .expect_err("numeric name should reject");
        assert_eq!(numeric, TicketRejection::MissingName(json!(7)));
    }

    #[test]
    fn rejects_missing_email() {
        let rejection = decode_value(json!({"ticket": "A-1", "name": "Ada"}))
            .expect_err("should reject");
        assert_eq!(rejection, TicketRejection::MissingEmail(Value::Null));
        assert_eq!(
            rejection.to_string(),
            "it does not have a valid email address: null"
        );
    }
}
