use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components receive their data as props (struct fields) and draw it into
/// the `Rect` they are given. They keep no state between frames: the loop
/// rebuilds them every tick from the current dashboard state.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
