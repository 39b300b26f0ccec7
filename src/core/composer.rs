//! Optimistic composer: turns typed text into a local message that goes
//! straight into the feed. Nothing is sent over the network.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::remote::{ChatMessage, SenderInfo};

/// Prefix that marks client-generated ids.
pub const LOCAL_ID_PREFIX: &str = "local-";
pub const SELF_USER_ID: &str = "self";

#[derive(Debug, Default)]
pub struct Composer {
    /// Last millisecond stamp handed out, keeps local ids distinct.
    last_stamp: i64,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a local message from `text` as sent at `now`.
    ///
    /// Returns `None` for empty or whitespace-only text.
    pub fn compose(&mut self, text: &str, now: DateTime<Utc>) -> Option<ChatMessage> {
        let body = text.trim();
        if body.is_empty() {
            return None;
        }

        let stamp = now.timestamp_millis().max(self.last_stamp + 1);
        self.last_stamp = stamp;

        Some(ChatMessage {
            id: format!("{LOCAL_ID_PREFIX}{stamp}"),
            message: body.to_string(),
            sender: SenderInfo {
                image: String::new(),
                is_kyc_verified: true,
                is_self: true,
                user_id: SELF_USER_ID.to_string(),
            },
            time: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

pub fn is_local_id(id: &str) -> bool {
    id.starts_with(LOCAL_ID_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_whitespace_only_composes_nothing() {
        let mut composer = Composer::new();
        assert!(composer.compose("", fixed_now()).is_none());
        assert!(composer.compose("   \t\n ", fixed_now()).is_none());
    }

    #[test]
    fn test_local_message_shape() {
        let mut composer = Composer::new();
        let msg = composer.compose("  hello  ", fixed_now()).unwrap();

        assert_eq!(msg.message, "hello");
        assert_eq!(msg.id, format!("local-{}", fixed_now().timestamp_millis()));
        assert!(is_local_id(&msg.id));
        assert!(msg.sender.is_self);
        assert!(msg.sender.is_kyc_verified);
        assert!(msg.sender.image.is_empty());
        assert_eq!(msg.sender.user_id, "self");
        assert_eq!(msg.time, "2024-05-01T10:00:00.000Z");
    }

    #[test]
    fn test_same_millisecond_sends_get_distinct_ids() {
        let mut composer = Composer::new();
        let first = composer.compose("one", fixed_now()).unwrap();
        let second = composer.compose("two", fixed_now()).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(
            second.id,
            format!("local-{}", fixed_now().timestamp_millis() + 1)
        );
    }

    #[test]
    fn test_server_ids_are_not_local() {
        assert!(!is_local_id("8f2c1a"));
    }
}
