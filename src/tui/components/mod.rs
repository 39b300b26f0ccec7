//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `Header`: trip name, status and route
//! - `Message`: one chat bubble
//! - `Alert`: fetch-failure overlay
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: single-line composer with a character cap
//! - `MessageList`: inverted, scrollable feed with layout caching
//!
//! Components receive external data as props (struct fields or render
//! parameters) rather than reading the `App` directly:
//!
//! ```rust,ignore
//! Header::new(app.trip.as_ref(), &app.status_message).render(frame, area);
//! ```
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── header.rs        (trip banner)
//! ├── message.rs       (single bubble)
//! ├── message_list.rs  (scrollable feed)
//! ├── alert.rs         (retry overlay)
//! └── input_box/       (composer)
//! ```

pub mod alert;
pub mod header;
pub mod input_box;
pub mod message;
pub mod message_list;

pub use alert::{Alert, is_retry_key};
pub use header::{HEADER_HEIGHT, Header};
pub use input_box::{INPUT_HEIGHT, InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
