//! Wire types for the chat endpoint.
//!
//! Field names match the JSON the server sends, so these double as the
//! in-memory message model.

use serde::{Deserialize, Serialize};

/// Who wrote a message, as described by the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SenderInfo {
    /// Avatar URI. Empty for locally composed messages.
    pub image: String,
    pub is_kyc_verified: bool,
    /// True when the message was written by the current user.
    #[serde(rename = "self")]
    pub is_self: bool,
    pub user_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub message: String,
    pub sender: SenderInfo,
    /// ISO-8601 timestamp string, kept verbatim.
    pub time: String,
}

/// One page of the chat feed plus the trip it belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatPage {
    pub chats: Vec<ChatMessage>,
    pub from: String,
    pub to: String,
    pub name: String,
}

impl ChatPage {
    /// Splits the page into its messages and the trip metadata.
    pub fn into_parts(self) -> (Vec<ChatMessage>, TripDetails) {
        let trip = TripDetails {
            from: self.from,
            to: self.to,
            name: self.name,
        };
        (self.chats, trip)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TripDetails {
    pub from: String,
    pub to: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_JSON: &str = r#"{
        "chats": [
            {
                "id": "abc",
                "message": "See you at the pickup point",
                "sender": {
                    "image": "https://example.com/a.png",
                    "is_kyc_verified": true,
                    "self": false,
                    "user_id": "u-1"
                },
                "time": "2024-05-01 10:00:00"
            }
        ],
        "from": "IGI Airport, T3",
        "to": "Sector 28",
        "name": "Trip 1",
        "status": "success"
    }"#;

    #[test]
    fn test_page_deserializes_from_wire_format() {
        let page: ChatPage = serde_json::from_str(PAGE_JSON).unwrap();
        assert_eq!(page.chats.len(), 1);
        assert_eq!(page.chats[0].id, "abc");
        assert!(page.chats[0].sender.is_kyc_verified);
        assert!(!page.chats[0].sender.is_self);
        assert_eq!(page.chats[0].sender.user_id, "u-1");
        assert_eq!(page.name, "Trip 1");
    }

    #[test]
    fn test_sender_self_field_keeps_wire_name() {
        let sender = SenderInfo {
            image: String::new(),
            is_kyc_verified: true,
            is_self: true,
            user_id: "self".to_string(),
        };
        let json = serde_json::to_value(&sender).unwrap();
        assert_eq!(json["self"], serde_json::Value::Bool(true));
        assert!(json.get("is_self").is_none());
    }

    #[test]
    fn test_into_parts_splits_trip_metadata() {
        let page: ChatPage = serde_json::from_str(PAGE_JSON).unwrap();
        let (chats, trip) = page.into_parts();
        assert_eq!(chats.len(), 1);
        assert_eq!(trip.from, "IGI Airport, T3");
        assert_eq!(trip.to, "Sector 28");
        assert_eq!(trip.name, "Trip 1");
    }

    #[test]
    fn test_missing_chats_field_is_rejected() {
        let result = serde_json::from_str::<ChatPage>(r#"{"from":"A","to":"B","name":"T"}"#);
        assert!(result.is_err());
    }
}
