//! # Message Store
//!
//! The chat feed as one ordered list, deduplicated by message id.
//!
//! ```text
//! head (index 0)                                   tail
//! ┌──────────┬──────────┬──────────┬─────┬──────────┐
//! │ local-.. │ msg      │ msg      │ ... │ msg      │
//! └──────────┴──────────┴──────────┴─────┴──────────┘
//!   ▲ optimistic sends     ▲ backfill pages      ▲ forward pages
//!     go here                are prepended         are appended
//! ```
//!
//! The view renders the list inverted: the head is the bottom row.
//!
//! ## Merge rule
//!
//! A merge concatenates (existing ++ page for forward, page ++ existing for
//! backfill) and feeds the result through an insertion-ordered map keyed by
//! id. Each repeated id overwrites the stored value, so the last occurrence
//! in the concatenation wins. The position an id occupies is the one it got
//! when the map first saw it. Keeping the first occurrence's value instead is
//! a different rule and is not what happens here.

use indexmap::IndexMap;

use crate::core::pager::FetchDirection;
use crate::remote::ChatMessage;

#[derive(Debug, Default, Clone)]
pub struct MessageStore {
    messages: IndexMap<String, ChatMessage>,
    /// Bumped on every mutation so views can invalidate cached layout.
    revision: u64,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, id: &str) -> Option<&ChatMessage> {
        self.messages.get(id)
    }

    /// Message at store position `index` (0 = head).
    pub fn get_index(&self, index: usize) -> Option<&ChatMessage> {
        self.messages.get_index(index).map(|(_, msg)| msg)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ChatMessage> + ExactSizeIterator {
        self.messages.values()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.messages.keys().map(String::as_str).collect()
    }

    /// Merges a fetched page into the store.
    pub fn merge(&mut self, page: Vec<ChatMessage>, direction: FetchDirection) {
        let existing = std::mem::take(&mut self.messages).into_values();
        self.messages = match direction {
            FetchDirection::Forward => dedup_last_wins(existing.chain(page)),
            FetchDirection::Backfill => dedup_last_wins(page.into_iter().chain(existing)),
        };
        self.revision += 1;
    }

    /// Inserts a message at the head of the store.
    ///
    /// An id already present is moved to the head and its value replaced.
    pub fn push_front(&mut self, message: ChatMessage) {
        self.messages.shift_insert(0, message.id.clone(), message);
        self.revision += 1;
    }
}

fn dedup_last_wins(sequence: impl Iterator<Item = ChatMessage>) -> IndexMap<String, ChatMessage> {
    let mut map = IndexMap::new();
    for message in sequence {
        map.insert(message.id.clone(), message);
    }
    map
}
