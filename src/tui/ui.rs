use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{Alert, HEADER_HEIGHT, Header, INPUT_HEIGHT, MessageList};

pub const LOADING_LABEL: &str = "Loading...";
pub const LOADING_OLDER_LABEL: &str = "Loading older messages...";

/// Draws the whole screen: header, feed, input, and the alert on top.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(HEADER_HEIGHT + 1), Min(0), Length(INPUT_HEIGHT)]);
    let [header_area, feed_area, input_area] = layout.areas(frame.area());

    let header_block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let header_inner = header_block.inner(header_area);
    frame.render_widget(header_block, header_area);
    Header::new(app.trip.as_ref(), &app.status_message).render(frame, header_inner);

    MessageList::new(&mut tui.message_list, &app.feed, loading_label(app)).render(frame, feed_area);

    tui.input_box.render(frame, input_area);

    if let Some(alert) = &app.alert {
        Alert::new(alert).render(frame, frame.area());
    }
}

fn loading_label(app: &App) -> Option<&'static str> {
    if app.is_loading_older() {
        Some(LOADING_OLDER_LABEL)
    } else if app.is_loading_initial() {
        Some(LOADING_LABEL)
    } else {
        None
    }
}
