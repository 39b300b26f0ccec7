//! # Actions
//!
//! Everything that can happen in Tripchat becomes an `Action`.
//! User presses Enter? That's `Action::Send(text)`.
//! A page arrives? That's `Action::PageLoaded { .. }`.
//!
//! `update()` takes the current state and an action, mutates the state, and
//! returns an [`Effect`] describing the I/O the caller should perform. No
//! side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use chrono::Utc;
use log::{debug, info, warn};

use crate::core::pager::{FetchDirection, PageTicket};
use crate::core::state::{App, FETCH_FAILED_MESSAGE, FetchAlert};
use crate::remote::{ChatPage, FetchError};

#[derive(Debug)]
pub enum Action {
    /// Ask for the next page in the given direction. Dropped silently when
    /// the pager is busy or the feed is exhausted.
    RequestPage(FetchDirection),
    PageLoaded { ticket: PageTicket, page: ChatPage },
    PageFailed { ticket: PageTicket, error: FetchError },
    /// Retry the fetch behind the current alert.
    RetryFetch,
    /// Compose a local message from the input box text.
    Send(String),
    Quit,
}

/// I/O requested by `update()`, performed by the adapter.
#[derive(Debug)]
pub enum Effect {
    None,
    /// Issue exactly one GET for the ticket's page.
    Fetch(PageTicket),
    /// Move the view to the newest message.
    ScrollToNewest,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::RequestPage(direction) => match app.pager.begin(direction) {
            Some(ticket) => {
                info!(
                    "Requesting page {} ({})",
                    ticket.page(),
                    direction.label()
                );
                app.status_message = match direction {
                    FetchDirection::Forward => "Loading...".to_string(),
                    FetchDirection::Backfill => "Loading older messages...".to_string(),
                };
                Effect::Fetch(ticket)
            }
            None => Effect::None,
        },
        Action::PageLoaded { ticket, page } => {
            let direction = ticket.direction();
            let page_number = ticket.page();
            let (chats, trip) = page.into_parts();
            let fetched = chats.len();

            if app.trip.is_none() {
                info!("Trip: {} ({} → {})", trip.name, trip.from, trip.to);
                app.trip = Some(trip);
            }

            app.feed.merge(chats, direction);
            app.pager.complete(ticket, fetched);

            info!(
                "Page {} merged ({}, {} chats, {} in store, has_more={})",
                page_number,
                direction.label(),
                fetched,
                app.feed.len(),
                app.pager.has_more()
            );
            app.status_message = if app.pager.has_more() {
                String::new()
            } else {
                "No older messages".to_string()
            };
            Effect::None
        }
        Action::PageFailed { ticket, error } => {
            let direction = ticket.direction();
            warn!(
                "Page {} ({}) failed: {}",
                ticket.page(),
                direction.label(),
                error
            );
            app.pager.fail(ticket);
            app.status_message = "Failed to load messages".to_string();
            app.alert = Some(FetchAlert {
                direction,
                message: FETCH_FAILED_MESSAGE.to_string(),
                detail: error.to_string(),
            });
            Effect::None
        }
        Action::RetryFetch => match app.alert.take() {
            Some(alert) => {
                debug!("Retrying {} fetch", alert.direction.label());
                update(app, Action::RequestPage(alert.direction))
            }
            None => Effect::None,
        },
        Action::Send(text) => match app.composer.compose(&text, Utc::now()) {
            Some(message) => {
                debug!("Local message {} added", message.id);
                app.feed.push_front(message);
                Effect::ScrollToNewest
            }
            None => Effect::None,
        },
        Action::Quit => Effect::Quit,
    }
}
