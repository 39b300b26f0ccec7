use std::fmt;

use async_trait::async_trait;

use super::types::ChatPage;

/// A failed page fetch.
///
/// All variants are handled the same way (alert + manual retry); the
/// variant only records what went wrong for the log.
#[derive(Debug)]
pub enum FetchError {
    /// Transport failure (DNS, connection refused, reset).
    Network(String),
    /// The server answered with a non-success status.
    Api { status: u16, message: String },
    /// The body was not a valid chat page.
    Parse(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            FetchError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Something that can hand out pages of the chat feed.
#[async_trait]
pub trait ChatSource: Send + Sync {
    /// Human-readable description of where pages come from (for logs).
    fn describe(&self) -> String;

    /// Fetches page `page` of the feed.
    async fn fetch_page(&self, page: u32) -> Result<ChatPage, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_status() {
        let err = FetchError::Api {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "API error (HTTP 503): unavailable");
    }

    #[test]
    fn test_display_network_and_parse() {
        assert_eq!(
            FetchError::Network("refused".into()).to_string(),
            "network error: refused"
        );
        assert_eq!(
            FetchError::Parse("eof".into()).to_string(),
            "parse error: eof"
        );
    }
}
