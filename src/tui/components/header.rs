//! # Header Component
//!
//! Two-row trip banner at the top of the screen.
//!
//! ```text
//! Trip 1 | Loading older messages...
//! From IGI Airport, T3 to Sector 28
//! ```
//!
//! Stateless: it renders whatever trip metadata and status it is given.
//! Until the first page arrives there is no trip, so a placeholder name and
//! an empty route are shown.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::remote::TripDetails;
use crate::tui::component::Component;

/// Rows the header occupies.
pub const HEADER_HEIGHT: u16 = 2;

const PLACEHOLDER_NAME: &str = "Trip";

pub struct Header<'a> {
    pub trip: Option<&'a TripDetails>,
    pub status_message: &'a str,
}

impl<'a> Header<'a> {
    pub fn new(trip: Option<&'a TripDetails>, status_message: &'a str) -> Self {
        Self {
            trip,
            status_message,
        }
    }

    fn title_line(&self) -> Line<'a> {
        let name = match self.trip {
            Some(trip) if !trip.name.is_empty() => trip.name.as_str(),
            _ => PLACEHOLDER_NAME,
        };
        let mut spans = vec![Span::styled(
            name,
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                self.status_message,
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    }

    fn route_line(&self) -> Line<'a> {
        let (from, to) = match self.trip {
            Some(trip) => (trip.from.as_str(), trip.to.as_str()),
            None => ("", ""),
        };
        let location = Style::default().add_modifier(Modifier::BOLD);
        Line::from(vec![
            Span::styled("From ", Style::default().fg(Color::DarkGray)),
            Span::styled(from, location),
            Span::styled(" to ", Style::default().fg(Color::DarkGray)),
            Span::styled(to, location),
        ])
    }
}

impl<'a> Component for Header<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(vec![self.title_line(), self.route_line()]);
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(trip: Option<&TripDetails>, status: &str) -> String {
        let backend = TestBackend::new(60, HEADER_HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut header = Header::new(trip, status);
        terminal.draw(|f| header.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_header_shows_trip_and_route() {
        let trip = TripDetails {
            from: "IGI Airport".to_string(),
            to: "Sector 28".to_string(),
            name: "Trip 1".to_string(),
        };
        let text = render_text(Some(&trip), "");
        assert!(text.contains("Trip 1"));
        assert!(text.contains("From IGI Airport to Sector 28"));
        assert!(!text.contains('|'));
    }

    #[test]
    fn test_header_placeholder_before_first_page() {
        let text = render_text(None, "Loading...");
        assert!(text.starts_with("Trip | Loading..."));
        assert!(text.contains("From  to"));
    }
}
