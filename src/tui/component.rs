use ratatui::Frame;
use ratatui::layout::Rect;

/// A piece of the chat screen that draws itself into a `Rect`.
///
/// Components receive data as struct fields (props) and may borrow
/// persistent state mutably, so `render` takes `&mut self`. This lets the
/// message list refresh its layout cache and scroll offset while drawing,
/// the same way Ratatui's `StatefulWidget` works.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that reacts to terminal events.
pub trait EventHandler {
    /// The high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
