//! # Alert Overlay
//!
//! Modal box shown when a page fetch fails. Its only action is Retry, so
//! the feed can always be fetched again. While it is open it receives every
//! key; Ctrl+C still quits.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::core::state::FetchAlert;
use crate::tui::event::TuiEvent;

/// Whether `event` presses Retry (Enter or `r`). Other keys are swallowed.
pub fn is_retry_key(event: &TuiEvent) -> bool {
    matches!(
        event,
        TuiEvent::Submit | TuiEvent::InputChar('r') | TuiEvent::InputChar('R')
    )
}

pub struct Alert<'a> {
    alert: &'a FetchAlert,
}

impl<'a> Alert<'a> {
    pub fn new(alert: &'a FetchAlert) -> Self {
        Self { alert }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 9, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Error ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Retry ").centered())
            .padding(Padding::horizontal(1));

        let body = vec![
            Line::from(self.alert.message.as_str()),
            Line::from(""),
            Line::from(self.alert.detail.as_str()).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        ];

        let paragraph = Paragraph::new(body)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, overlay);
    }
}

/// A rect `percent_x` wide (percentage) and `height` rows tall, centered in `outer`.
fn centered_rect(percent_x: u16, height: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(outer.height)),
        Constraint::Fill(1),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pager::FetchDirection;
    use crate::core::state::FETCH_FAILED_MESSAGE;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_only_retry_keys_act() {
        assert!(is_retry_key(&TuiEvent::Submit));
        assert!(is_retry_key(&TuiEvent::InputChar('r')));
        assert!(is_retry_key(&TuiEvent::InputChar('R')));
        assert!(!is_retry_key(&TuiEvent::Escape));
        assert!(!is_retry_key(&TuiEvent::InputChar('x')));
        assert!(!is_retry_key(&TuiEvent::ScrollUp));
    }

    #[test]
    fn test_render_shows_message_and_actions() {
        let alert = FetchAlert {
            direction: FetchDirection::Forward,
            message: FETCH_FAILED_MESSAGE.to_string(),
            detail: "network error: refused".to_string(),
        };
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal
            .draw(|f| Alert::new(&alert).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Error"));
        assert!(text.contains("Failed to load messages."));
        assert!(text.contains("Enter Retry"));
    }

    #[test]
    fn test_centered_rect_fits_small_area() {
        let area = Rect::new(0, 0, 20, 4);
        let rect = centered_rect(60, 9, area);
        assert!(rect.height <= 4);
        assert!(rect.width <= 20);
    }
}
