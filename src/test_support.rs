//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::remote::{ChatMessage, ChatPage, ChatSource, FetchError, SenderInfo};

/// A source that replays queued results and records requested pages.
#[derive(Default)]
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<ChatPage, FetchError>>>,
    pub requested: Mutex<Vec<u32>>,
}

impl ScriptedSource {
    pub fn push(&self, response: Result<ChatPage, FetchError>) {
        self.responses.lock().unwrap().push_back(response);
    }
}

#[async_trait]
impl ChatSource for ScriptedSource {
    fn describe(&self) -> String {
        "scripted".to_string()
    }

    async fn fetch_page(&self, page: u32) -> Result<ChatPage, FetchError> {
        self.requested.lock().unwrap().push(page);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Network("no scripted response".to_string())))
    }
}

/// Creates a test App backed by an empty ScriptedSource.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(ScriptedSource::default()))
}

/// A message from another traveller with text derived from its id.
pub fn chat(id: &str) -> ChatMessage {
    chat_with_text(id, &format!("message {id}"))
}

pub fn chat_with_text(id: &str, text: &str) -> ChatMessage {
    ChatMessage {
        id: id.to_string(),
        message: text.to_string(),
        sender: SenderInfo {
            image: format!("https://example.com/{id}.png"),
            is_kyc_verified: false,
            is_self: false,
            user_id: format!("user-{id}"),
        },
        time: "2024-05-01 10:00:00".to_string(),
    }
}

pub fn page_of(chats: Vec<ChatMessage>) -> ChatPage {
    page_with_trip(chats, "IGI Airport, T3", "Sector 28", "Trip 1")
}

pub fn page_with_trip(chats: Vec<ChatMessage>, from: &str, to: &str, name: &str) -> ChatPage {
    ChatPage {
        chats,
        from: from.to_string(),
        to: to.to_string(),
        name: name.to_string(),
    }
}
