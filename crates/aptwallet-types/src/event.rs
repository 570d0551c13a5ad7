//! Events as returned by the node's event-stream endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of an account event log.
///
/// Fields are kept loose so that a malformed entry can be reported by the
/// consumer instead of failing the whole HTTP response decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Ledger version that emitted the event (u64 as a decimal string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<Value>,
    /// Position within the event stream (u64 as a decimal string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl Event {
    /// Build an event carrying `{ "id": id }` as its payload.
    pub fn with_id(sequence_number: &str, id: Value) -> Self {
        Self {
            sequence_number: Some(sequence_number.to_string()),
            data: serde_json::json!({ "id": id }),
            ..Default::default()
        }
    }

    /// Ledger version parsed as a number.
    pub fn version_number(&self) -> Option<u64> {
        self.version.as_deref().and_then(|v| v.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_node_event() {
        let json = r#"{
            "version": "12345",
            "guid": {"creation_number": "4", "account_address": "0x1"},
            "sequence_number": "3",
            "type": "0x3::token::DepositEvent",
            "data": {"id": {"token_data_id": {"creator": "0x1", "collection": "c", "name": "n"}, "property_version": "0"}, "amount": "1"}
        }"#;
        let ev: Event = serde_json::from_str(json).unwrap();
        assert_eq!(ev.sequence_number.as_deref(), Some("3"));
        assert_eq!(ev.version_number(), Some(12345));
        assert_eq!(ev.event_type.as_deref(), Some("0x3::token::DepositEvent"));
        assert!(ev.data.get("id").is_some());
    }

    #[test]
    fn test_decode_tolerates_missing_fields() {
        let ev: Event = serde_json::from_str(r#"{"data": {}}"#).unwrap();
        assert!(ev.sequence_number.is_none());
        assert_eq!(ev.version_number(), None);
    }
}
