//! Single-row diagnostic line below the regions, shown in verbose mode.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

use crate::tui::component::Component;
use crate::tui::components::region_panel::write_clipped;

pub struct StatusLine<'a> {
    pub text: &'a str,
}

impl Component for StatusLine<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let visible = area.intersection(frame.area());
        if visible.is_empty() {
            return;
        }
        let style = Style::default().fg(Color::DarkGray);
        write_clipped(frame.buffer_mut(), visible, visible.x, visible.y, self.text, style);
    }
}
