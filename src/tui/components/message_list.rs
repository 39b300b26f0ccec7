//! # MessageList Component
//!
//! Scrollable, inverted view of the message store.
//!
//! The store's head (newest, including optimistic sends) is drawn at the
//! bottom and its tail at the top, like a chat app's inverted list. While a
//! page is loading, an indicator row sits above the oldest message.
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the store (props).
//! Since `Component::render` takes `&mut self`, the layout cache and scroll
//! state are updated during the render pass.
//!
//! ## End reached
//!
//! After each render the state records whether the viewport is within
//! [`END_REACHED_THRESHOLD`] viewports of the top. The event loop turns that
//! into a backfill request; the pager drops it if one is already running.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::feed::MessageStore;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;

/// Fraction of the viewport height from the top that counts as "end reached".
pub const END_REACHED_THRESHOLD: f32 = 0.5;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, keep the newest message (bottom) in view.
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Set by render when the top of the feed is within the threshold.
    pub end_reached: bool,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
            end_reached: false,
        }
    }

    /// Jump to the newest message and keep following it.
    pub fn scroll_to_newest(&mut self) {
        self.stick_to_bottom = true;
        self.scroll_state.scroll_to_bottom();
    }

    fn max_offset(&self) -> u16 {
        self.layout.canvas_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll if the user has scrolled back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    fn update_end_reached(&mut self, has_content: bool) {
        let threshold = (self.viewport_height as f32 * END_REACHED_THRESHOLD) as u16;
        self.end_reached = has_content && self.scroll_state.offset().y <= threshold;
    }
}

/// Scrollable chat view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub feed: &'a MessageStore,
    /// Text for the loading row above the oldest message, if any.
    pub loading_label: Option<&'a str>,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        feed: &'a MessageStore,
        loading_label: Option<&'a str>,
    ) -> Self {
        Self {
            state,
            feed,
            loading_label,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let indicator_rows: u16 = u16::from(self.loading_label.is_some());

        // 1. Refresh the layout cache when the store or width changed
        self.state
            .layout
            .refresh(self.feed, content_width, indicator_rows);

        let canvas_height = self.state.layout.canvas_height();
        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        // 2. Render visible rows into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        if let Some(label) = self.loading_label {
            let indicator = Paragraph::new(Line::from(label).centered()).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            );
            scroll_view.render_widget(indicator, Rect::new(0, 0, content_width, 1));
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }
        let scroll_offset = if self.state.stick_to_bottom {
            self.state.max_offset()
        } else {
            self.state.scroll_state.offset().y
        };
        let visible = self.state.layout.visible_range(scroll_offset, area.height);

        for row in visible {
            let Some(message) = self.state.layout.message_at(self.feed, row) else {
                continue;
            };
            let top = self.state.layout.canvas_top(row);
            let height = self.state.layout.heights[row];
            scroll_view.render_widget(
                Message::new(message),
                Rect::new(0, top, content_width, height),
            );
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);

        // 3. Top-of-feed detection for backfill
        self.state.update_end_reached(!self.feed.is_empty());
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToNewest => self.scroll_to_newest(),
            _ => {}
        }
        None
    }
}

/// Tallest canvas the scroll view can hold.
pub const MAX_CANVAS_HEIGHT: u32 = u16::MAX as u32;

/// Cached row heights in display order (oldest first).
///
/// Row `i` shows store index `len - 1 - i`. Heights start below the
/// optional loading row. Prefix sums are kept in `u32` so a long feed never
/// overflows. Only the newest rows that fit in [`MAX_CANVAS_HEIGHT`] are put
/// on the canvas; older rows stay in the cache but are not drawn.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u32>,
    top_padding: u16,
    revision: Option<u64>,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            top_padding: 0,
            revision: None,
            content_width: 0,
        }
    }

    /// Whether the cached heights still describe `feed` at `content_width`.
    pub fn is_current(&self, feed: &MessageStore, content_width: u16) -> bool {
        self.revision == Some(feed.revision()) && self.content_width == content_width
    }

    pub fn refresh(&mut self, feed: &MessageStore, content_width: u16, top_padding: u16) {
        self.top_padding = top_padding;
        if !self.is_current(feed, content_width) {
            self.heights = feed
                .iter()
                .rev()
                .map(|message| Message::calculate_height(message, content_width))
                .collect();
            self.revision = Some(feed.revision());
            self.content_width = content_width;
        }
        self.rebuild_prefix_heights();
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(u32::from(self.top_padding), |acc, &h| {
                *acc += u32::from(h);
                Some(*acc)
            })
            .collect();
    }

    /// Height of the whole feed, loading row included.
    pub fn total_height(&self) -> u32 {
        self.prefix_heights
            .last()
            .copied()
            .unwrap_or(u32::from(self.top_padding))
    }

    /// Feed-space y of the top edge of display row `row`.
    pub fn row_top(&self, row: usize) -> u32 {
        if row == 0 {
            u32::from(self.top_padding)
        } else {
            self.prefix_heights[row - 1]
        }
    }

    /// First display row placed on the canvas.
    pub fn first_row(&self) -> usize {
        let total = self.total_height();
        if total <= MAX_CANVAS_HEIGHT {
            return 0;
        }
        let overflow = total - MAX_CANVAS_HEIGHT;
        let padding = u32::from(self.top_padding);
        self.prefix_heights
            .partition_point(|&end| end - padding < overflow)
            + 1
    }

    /// Feed-space y that maps to canvas y = loading row's bottom edge.
    fn canvas_base(&self) -> u32 {
        self.row_top(self.first_row()) - u32::from(self.top_padding)
    }

    /// Height of the scroll view canvas, at most [`MAX_CANVAS_HEIGHT`].
    pub fn canvas_height(&self) -> u16 {
        u16::try_from(self.total_height() - self.canvas_base()).unwrap_or(u16::MAX)
    }

    /// Canvas y of the top edge of display row `row` (`row >= first_row()`).
    pub fn canvas_top(&self, row: usize) -> u16 {
        let top = self.row_top(row).saturating_sub(self.canvas_base());
        u16::try_from(top).unwrap_or(u16::MAX)
    }

    pub fn message_at<'f>(
        &self,
        feed: &'f MessageStore,
        row: usize,
    ) -> Option<&'f crate::remote::ChatMessage> {
        let len = feed.len();
        if row >= len {
            return None;
        }
        feed.get_index(len - 1 - row)
    }

    /// Rows overlapping the viewport at canvas offset `scroll_offset`, with
    /// half a viewport of slack on each side.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = u32::from(viewport_height / 2);
        let top = self.canvas_base() + u32::from(scroll_offset);
        let buffered_start = top.saturating_sub(buffer);
        let buffered_end = top + u32::from(viewport_height) + buffer;

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start)
            .max(self.first_row());
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end.max(start)
    }
}
