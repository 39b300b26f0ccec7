//! # InputBox Component
//!
//! Single-line message composer.
//!
//! ## Responsibilities
//!
//! - Capture text input, capped at `max_chars` characters
//! - Handle editing (backspace, delete, cursor movement, paste)
//! - Emit `Submit` on Enter when the text is not blank
//!
//! Blank submissions emit nothing and leave the buffer as it was. A paste
//! that would overflow the cap is truncated, and newlines in pastes become
//! spaces.

mod cursor;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::{CursorState, next_char_boundary};

/// Height of the input box: one text row plus borders.
pub const INPUT_HEIGHT: u16 = 3;
/// Border (2) + padding (2) consumed horizontally.
const HORIZONTAL_OVERHEAD: u16 = 4;
const PLACEHOLDER: &str = "Type a message";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted non-blank text (Enter pressed)
    Submit(String),
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Maximum number of characters accepted
    pub max_chars: usize,
    cursor: CursorState,
}

impl InputBox {
    pub fn new(max_chars: usize) -> Self {
        Self {
            buffer: String::new(),
            max_chars,
            cursor: CursorState::new(),
        }
    }

    pub fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    fn remaining(&self) -> usize {
        self.max_chars.saturating_sub(self.char_count())
    }

    fn insert(&mut self, text: &str) -> bool {
        let accepted: String = text
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .filter(|c| !c.is_control())
            .take(self.remaining())
            .collect();
        if accepted.is_empty() {
            return false;
        }
        self.buffer.insert_str(self.cursor.pos, &accepted);
        self.cursor.pos += accepted.len();
        true
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD) as usize;
        self.cursor.update_scroll(&self.buffer, inner_width);

        let counter = format!(" {}/{} ", self.char_count(), self.max_chars);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Message")
            .title_bottom(Line::from(counter).right_aligned())
            .padding(Padding::horizontal(1));

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(PLACEHOLDER).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Paragraph::new(self.cursor.visible(&self.buffer, inner_width))
                .style(Style::default().fg(Color::Cyan))
        };

        frame.render_widget(paragraph.block(block), area);

        let col = self
            .cursor
            .column(&self.buffer)
            .saturating_sub(self.cursor.scroll_col);
        let x = area.x + 2 + col as u16;
        frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert(c.encode_utf8(&mut tmp))
                    .then_some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => self.insert(text).then_some(InputEvent::ContentChanged),
            TuiEvent::Backspace => {
                let before = self.cursor.pos;
                if self.cursor.move_left(&self.buffer) {
                    self.buffer.drain(self.cursor.pos..before);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor.pos < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor.pos);
                    self.buffer.drain(self.cursor.pos..next);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => self
                .cursor
                .move_left(&self.buffer)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::CursorRight => self
                .cursor
                .move_right(&self.buffer)
                .then_some(InputEvent::ContentChanged),
            TuiEvent::CursorHome => (self.cursor.pos != 0).then(|| {
                self.cursor.pos = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor.pos != self.buffer.len()).then(|| {
                self.cursor.pos = self.buffer.len();
                InputEvent::ContentChanged
            }),
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    None
                } else {
                    let text = std::mem::take(&mut self.buffer);
                    self.cursor.reset();
                    Some(InputEvent::Submit(text))
                }
            }
            _ => None,
        }
    }
}
