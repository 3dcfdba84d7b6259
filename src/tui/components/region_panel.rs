//! # RegionPanel Component
//!
//! One of the three boxed regions across the top of the screen. The panel
//! draws its border first and then writes each field at its anchor, over
//! the border rows, so a two-row region shows text on both edges of the box:
//!
//! ```text
//! ┌SF, CA──────────────────────|┐
//! └Clear sky────────────────────┘
//! ```
//!
//! Fields are independent: each one's column depends only on its own width
//! and anchor, never on what else is in the panel.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::core::layout::{HorizontalAnchor, Region, VerticalAnchor};
use crate::tui::component::Component;

/// Color role of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Primary,
    Secondary,
    Accent,
}

impl Tone {
    pub fn style(self) -> Style {
        let color = match self {
            Tone::Primary => Color::Indexed(1),
            Tone::Secondary => Color::Indexed(3),
            Tone::Accent => Color::Indexed(4),
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub vertical: VerticalAnchor,
    pub horizontal: HorizontalAnchor,
    pub text: String,
    pub tone: Tone,
}

impl Field {
    pub fn new(
        vertical: VerticalAnchor,
        horizontal: HorizontalAnchor,
        text: impl Into<String>,
        tone: Tone,
    ) -> Self {
        Self {
            vertical,
            horizontal,
            text: text.into(),
            tone,
        }
    }
}

pub struct RegionPanel {
    pub fields: Vec<Field>,
}

impl RegionPanel {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }
}

impl Component for RegionPanel {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let bounds = frame.area();
        let visible = area.intersection(bounds);
        if visible.is_empty() {
            return;
        }

        frame.render_widget(Block::bordered(), visible);

        let region = Region {
            x: area.x,
            y: area.y,
            width: area.width,
            height: area.height,
        };
        let buffer = frame.buffer_mut();
        for field in &self.fields {
            let (x, y) = region.anchor(field.vertical, field.horizontal, &field.text);
            write_clipped(buffer, visible, x, y, &field.text, field.tone.style());
        }
    }
}

/// Writes `text` at `(x, y)`, dropping whatever falls outside `clip`.
pub fn write_clipped(buffer: &mut Buffer, clip: Rect, x: u16, y: u16, text: &str, style: Style) {
    if y < clip.top() || y >= clip.bottom() || x < clip.left() || x >= clip.right() {
        return;
    }
    let max_width = usize::from(clip.right() - x);
    buffer.set_stringn(x, y, text, max_width, style);
}
