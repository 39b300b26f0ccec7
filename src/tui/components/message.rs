use chrono::{DateTime, Local, NaiveDateTime};
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::composer::is_local_id;
use crate::remote::ChatMessage;
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Rows narrower than this use the full width for the bubble.
const MIN_SPLIT_WIDTH: u16 = 24;

const VERIFIED_MARK: &str = "✓";

/// A single chat bubble.
///
/// Own messages sit on the right, everyone else's on the left with their
/// user id (and a verified mark) in the border. The bottom border carries
/// the send time.
///
/// # Height Calculation
///
/// [`calculate_height`](Self::calculate_height) predicts the rendered height
/// with `textwrap` options that match Ratatui's `Paragraph` wrapping, so the
/// list can lay out rows without rendering them.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub message: &'a ChatMessage,
}

impl<'a> Message<'a> {
    pub fn new(message: &'a ChatMessage) -> Self {
        Self { message }
    }

    /// Bubble width for a row of `row_width` columns.
    pub fn bubble_width(row_width: u16) -> u16 {
        if row_width < MIN_SPLIT_WIDTH {
            row_width
        } else {
            row_width * 3 / 4
        }
    }

    /// Height required for `message` in a row of `row_width` columns.
    pub fn calculate_height(message: &ChatMessage, row_width: u16) -> u16 {
        let content_width = Self::bubble_width(row_width).saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Too narrow for borders + padding; still take one row
            return 1;
        }

        let content = message.message.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD)
    }

    fn sender_label(&self) -> String {
        let sender = &self.message.sender;
        if sender.is_self {
            "you".to_string()
        } else if sender.is_kyc_verified {
            format!("{} {}", sender.user_id, VERIFIED_MARK)
        } else {
            sender.user_id.clone()
        }
    }

    fn style(&self) -> Style {
        if self.message.sender.is_self {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::White)
        }
    }
}

/// Formats a message timestamp as local `HH:MM`, or returns it unchanged
/// when it is in neither RFC 3339 nor `YYYY-MM-DD HH:MM:SS` form.
pub fn format_time(time: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(time) {
        return dt.with_timezone(&Local).format("%H:%M").to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(time, "%Y-%m-%d %H:%M:%S") {
        return naive.format("%H:%M").to_string();
    }
    time.to_string()
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = Self::bubble_width(area.width);
        let x = if self.message.sender.is_self {
            area.x + area.width.saturating_sub(width)
        } else {
            area.x
        };
        let bubble = Rect::new(x, area.y, width, area.height);

        let style = self.style();
        let mut border_style = style.add_modifier(Modifier::DIM);
        // Not yet seen by the server
        if is_local_id(&self.message.id) {
            border_style = border_style.add_modifier(Modifier::ITALIC);
        }

        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.sender_label())
            .title_bottom(Line::from(format_time(&self.message.time)).right_aligned())
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));
        if self.message.sender.is_self {
            block = block.title_alignment(ratatui::layout::Alignment::Right);
        }

        let inner = block.inner(bubble);
        block.render(bubble, buf);

        Paragraph::new(self.message.message.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
