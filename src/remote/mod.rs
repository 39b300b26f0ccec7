pub mod http;
pub mod source;
pub mod types;

pub use http::HttpChatSource;
pub use source::{ChatSource, FetchError};
pub use types::{ChatMessage, ChatPage, SenderInfo, TripDetails};
