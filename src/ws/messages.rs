//! WebSocket message types: envelope and commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level WebSocket message envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsMessage {
    /// Client-provided ID for requests; server-generated for events.
    pub id: String,
    /// Message type discriminator.
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,
    /// ISO-8601 timestamp.
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    pub payload: serde_json::Value,
}

/// Discriminator for WebSocket message types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WsMessageType {
    /// Client → Server command.
    Command,
    /// Server → Client response to a command.
    Response,
    /// Server → Client broadcast event.
    Event,
    /// Server → Client error.
    Error,
}

/// Commands that a client can send over WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WsCommand {
    /// Subscribe to table-change kinds. Use `["*"]` for all changes.
    Subscribe {
        /// Change kinds to subscribe to (`"record_added"`,
        /// `"record_updated"`, `"record_deleted"`, or `"*"`).
        events: Vec<String>,
    },
    /// Unsubscribe from table-change kinds.
    Unsubscribe {
        /// Change kinds to unsubscribe from.
        events: Vec<String>,
    },
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_command_deserializes() {
        let json = r#"{"command":"subscribe","events":["record_added","*"]}"#;
        let parsed: Result<WsCommand, _> = serde_json::from_str(json);
        let Ok(WsCommand::Subscribe { events }) = parsed else {
            panic!("expected subscribe command");
        };
        assert_eq!(events, vec!["record_added", "*"]);
    }

    #[test]
    fn unknown_command_is_rejected() {
        let json = r#"{"command":"truncate","events":[]}"#;
        let parsed: Result<WsCommand, _> = serde_json::from_str(json);
        assert!(parsed.is_err());
    }

    #[test]
    fn envelope_round_trips() {
        let msg = WsMessage {
            id: "req-1".to_string(),
            msg_type: WsMessageType::Command,
            timestamp: Utc::now(),
            payload: serde_json::json!({"command": "subscribe", "events": ["*"]}),
        };
        let json = serde_json::to_string(&msg).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        let back: Result<WsMessage, _> = serde_json::from_str(&json);
        let Ok(back) = back else {
            panic!("deserialization failed");
        };
        assert_eq!(back.msg_type, WsMessageType::Command);
        assert_eq!(back.id, "req-1");
    }
}
