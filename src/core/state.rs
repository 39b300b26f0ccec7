//! # Application State
//!
//! Core business state for Tripchat. Domain logic only, no TUI types.
//! Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── source: Arc<dyn ChatSource>   // where pages come from
//! ├── feed: MessageStore            // ordered, deduplicated messages
//! ├── pager: Pager                  // page counter, has_more, in-flight latches
//! ├── composer: Composer            // optimistic local messages
//! ├── trip: Option<TripDetails>     // set once from the first page
//! ├── status_message: String        // status text for the header
//! └── alert: Option<FetchAlert>     // failed fetch awaiting Retry/dismiss
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::composer::Composer;
use crate::core::config::{INITIAL_PAGE, PAGE_SIZE};
use crate::core::feed::MessageStore;
use crate::core::pager::{FetchDirection, Pager};
use crate::remote::{ChatSource, TripDetails};

pub const FETCH_FAILED_MESSAGE: &str =
    "Failed to load messages. Please check your connection and try again.";

/// A failed fetch the user has not yet retried or dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchAlert {
    /// Direction to re-request on Retry.
    pub direction: FetchDirection,
    pub message: String,
    /// Cause, for the log and the alert's detail line.
    pub detail: String,
}

pub struct App {
    pub source: Arc<dyn ChatSource>,
    pub feed: MessageStore,
    pub pager: Pager,
    pub composer: Composer,
    pub trip: Option<TripDetails>,
    pub status_message: String,
    pub alert: Option<FetchAlert>,
}

impl App {
    pub fn new(source: Arc<dyn ChatSource>) -> Self {
        Self {
            source,
            feed: MessageStore::new(),
            pager: Pager::new(INITIAL_PAGE, PAGE_SIZE),
            composer: Composer::new(),
            trip: None,
            status_message: String::new(),
            alert: None,
        }
    }

    pub fn is_loading_initial(&self) -> bool {
        self.pager.is_loading(FetchDirection::Forward)
    }

    pub fn is_loading_older(&self) -> bool {
        self.pager.is_loading(FetchDirection::Backfill)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(app.feed.is_empty());
        assert_eq!(app.pager.page(), 0);
        assert!(app.pager.has_more());
        assert!(app.trip.is_none());
        assert!(app.alert.is_none());
        assert!(!app.is_loading_initial());
        assert!(!app.is_loading_older());
    }
}
