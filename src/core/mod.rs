//! # Core Application Logic
//!
//! Tripchat's business logic. It knows nothing about any specific UI
//! technology and performs no I/O of its own.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect::Fetch(ticket)
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │  spawns the request ───▶ │   remote   │
//!     │  Adapter   │  ◀── Action::PageLoaded  │ ChatSource │
//!     │ (ratatui)  │                          │ (reqwest)  │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and `update()`
//! - [`feed`]: The deduplicating message store
//! - [`pager`]: Page counter and single-flight latches
//! - [`composer`]: Optimistic local messages
//! - [`config`]: Settings and fixed constants

pub mod action;
pub mod composer;
pub mod config;
pub mod feed;
pub mod pager;
pub mod state;
