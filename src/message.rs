//! Raw notification message input type.
//!
//! A `RawMessage` is the unit of input to extraction: one decoded message
//! body, with the originating sender id optionally attached. The message is
//! evaluated once and discarded; nothing here is stored.

use serde::{Deserialize, Serialize};

/// A single raw notification message.
///
/// The body is arbitrary text: it may be empty, contain embedded newlines,
/// or be non-ASCII. The sender id (e.g. a short code like "HDFCBK") is
/// optional and only used for provider identification, never for matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessage {
    /// Decoded message body text
    pub body: String,

    /// Originating sender id, if known
    #[serde(default)]
    pub sender: Option<String>,
}

impl RawMessage {
    /// Create a message from body text alone.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            sender: None,
        }
    }

    /// Create a message with a sender id attached.
    pub fn with_sender(body: impl Into<String>, sender: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            sender: Some(sender.into()),
        }
    }
}

impl From<&str> for RawMessage {
    fn from(body: &str) -> Self {
        Self::new(body)
    }
}

impl From<String> for RawMessage {
    fn from(body: String) -> Self {
        Self::new(body)
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends.
///
/// Provider notifications frequently arrive with irregular spacing and line
/// wraps; the bank and UPI patterns match against the normalized form. The
/// fixed spent-template matches the raw body instead, so that its merchant
/// capture stays verbatim.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_body() {
        let msg = RawMessage::new("hello");
        assert_eq!(msg.body, "hello");
        assert_eq!(msg.sender, None);
    }

    #[test]
    fn test_message_with_sender() {
        let msg = RawMessage::with_sender("body", "HDFCBK");
        assert_eq!(msg.sender.as_deref(), Some("HDFCBK"));
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(
            normalize_whitespace("  Rs. 89.00\n debited\tfrom  A/c "),
            "Rs. 89.00 debited from A/c"
        );
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace("   \n\t "), "");
    }

    #[test]
    fn test_serde_roundtrip() {
        let msg = RawMessage::with_sender("₹150 paid to Zomato", "PHONEPE");
        let json = serde_json::to_string(&msg).unwrap();
        let back: RawMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_deserialize_without_sender() {
        let msg: RawMessage = serde_json::from_str(r#"{"body": "hi"}"#).unwrap();
        assert_eq!(msg.body, "hi");
        assert_eq!(msg.sender, None);
    }
}
