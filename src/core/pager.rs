//! # Pager
//!
//! Tracks where the feed is in the server's page sequence and makes sure
//! only one page request is ever outstanding.
//!
//! ```text
//! Pager
//! ├── page: u32              // next page to request, shared by both directions
//! ├── has_more: bool         // false once a short page arrives; gates everything
//! ├── forward: Latch         // held while a forward fetch is in flight
//! └── backfill: Latch        // held while a backfill fetch is in flight
//! ```
//!
//! `begin()` hands out a [`PageTicket`] holding one latch. The ticket travels
//! with the request and releases its latch when dropped, so the pager can
//! never stay busy after a request ends, however it ends.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;

/// Which end of the feed a fetch grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchDirection {
    /// Initial load and next-sequence data; appended at the tail.
    Forward,
    /// Scroll-triggered older data; prepended at the head.
    Backfill,
}

impl FetchDirection {
    pub fn label(self) -> &'static str {
        match self {
            FetchDirection::Forward => "forward",
            FetchDirection::Backfill => "backfill",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            FetchDirection::Forward => FetchDirection::Backfill,
            FetchDirection::Backfill => FetchDirection::Forward,
        }
    }
}

#[derive(Debug, Default, Clone)]
struct Latch(Arc<AtomicBool>);

impl Latch {
    fn try_acquire(&self) -> bool {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn release(&self) {
        self.0.store(false, Ordering::Release);
    }

    fn is_held(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Permission to issue exactly one page request.
#[derive(Debug)]
pub struct PageTicket {
    direction: FetchDirection,
    page: u32,
    latch: Latch,
}

impl PageTicket {
    pub fn direction(&self) -> FetchDirection {
        self.direction
    }

    pub fn page(&self) -> u32 {
        self.page
    }
}

impl Drop for PageTicket {
    fn drop(&mut self) {
        self.latch.release();
    }
}

#[derive(Debug)]
pub struct Pager {
    page: u32,
    has_more: bool,
    page_size: usize,
    forward: Latch,
    backfill: Latch,
}

impl Pager {
    pub fn new(initial_page: u32, page_size: usize) -> Self {
        Self {
            page: initial_page,
            has_more: true,
            page_size,
            forward: Latch::default(),
            backfill: Latch::default(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_loading(&self, direction: FetchDirection) -> bool {
        self.latch(direction).is_held()
    }

    pub fn is_busy(&self) -> bool {
        self.forward.is_held() || self.backfill.is_held()
    }

    fn latch(&self, direction: FetchDirection) -> &Latch {
        match direction {
            FetchDirection::Forward => &self.forward,
            FetchDirection::Backfill => &self.backfill,
        }
    }

    /// Claims the right to fetch the current page in `direction`.
    ///
    /// Returns `None` (and changes nothing) when the feed is exhausted or a
    /// fetch in either direction is already in flight.
    pub fn begin(&self, direction: FetchDirection) -> Option<PageTicket> {
        if !self.has_more {
            debug!("Ignoring {} request: no more pages", direction.label());
            return None;
        }

        let own = self.latch(direction);
        if !own.try_acquire() {
            debug!("Ignoring {} request: already in flight", direction.label());
            return None;
        }

        let other = direction.opposite();
        if self.latch(other).is_held() {
            own.release();
            debug!(
                "Ignoring {} request: {} fetch in flight",
                direction.label(),
                other.label()
            );
            return None;
        }

        Some(PageTicket {
            direction,
            page: self.page,
            latch: own.clone(),
        })
    }

    /// Records a successful fetch of `fetched` entries and releases the ticket.
    pub fn complete(&mut self, ticket: PageTicket, fetched: usize) {
        if fetched < self.page_size {
            self.has_more = false;
        }
        self.page += 1;
        drop(ticket);
    }

    /// Releases the ticket of a failed fetch. The page counter does not move,
    /// so a retry asks for the same page.
    pub fn fail(&mut self, ticket: PageTicket) {
        drop(ticket);
    }
}
