//! # Layout
//!
//! Splits the terminal into three side-by-side regions, each two rows tall,
//! and answers "where does this string go" for a named anchor inside a region.
//!
//! ```text
//! ┌─ left ──────┐┌─ center ────┐┌─ right ───────┐
//! └─────────────┘└─────────────┘└───────────────┘
//! <status line, only when the terminal is taller than the regions>
//! ```
//!
//! Coordinates are plain `u16`s so nothing here depends on the terminal
//! backend. `compute` is pure: identical inputs give identical geometry.

use unicode_width::UnicodeWidthStr;

/// Number of rows every region occupies (one top row, one bottom row).
pub const REGION_HEIGHT: u16 = 2;
/// Columns kept free between the region edge and left/right anchored text.
pub const MARGIN: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAnchor {
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAnchor {
    Left,
    Center,
    Right,
}

/// A rectangle in absolute terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Region {
    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Row offset inside the region for a vertical anchor.
    pub fn row(&self, anchor: VerticalAnchor) -> u16 {
        match anchor {
            VerticalAnchor::Top => 0,
            VerticalAnchor::Center => self.height / 2,
            VerticalAnchor::Bottom => self.height.saturating_sub(1),
        }
    }

    /// Column offset inside the region for text of `text_width` cells.
    ///
    /// Centering floors both halves, so an odd leftover puts the text one
    /// column left of true center.
    pub fn column(&self, anchor: HorizontalAnchor, text_width: u16) -> u16 {
        match anchor {
            HorizontalAnchor::Left => MARGIN,
            HorizontalAnchor::Center => (self.width / 2).saturating_sub(text_width / 2),
            HorizontalAnchor::Right => self.width.saturating_sub(MARGIN).saturating_sub(text_width),
        }
    }

    /// Absolute `(x, y)` where `text` starts for the given anchors.
    pub fn anchor(
        &self,
        vertical: VerticalAnchor,
        horizontal: HorizontalAnchor,
        text: &str,
    ) -> (u16, u16) {
        let col = self.column(horizontal, text_width(text));
        (self.x.saturating_add(col), self.y.saturating_add(self.row(vertical)))
    }
}

/// Display width of `text` in terminal cells.
pub fn text_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutGeometry {
    /// Width of the left and center regions; the right one also takes the remainder.
    pub region_width: u16,
    pub region_height: u16,
    pub regions: [Region; 3],
    /// One row below the regions for diagnostics, if the terminal has room.
    pub status_line: Option<Region>,
}

impl LayoutGeometry {
    pub fn left(&self) -> &Region {
        &self.regions[0]
    }

    pub fn center(&self) -> &Region {
        &self.regions[1]
    }

    pub fn right(&self) -> &Region {
        &self.regions[2]
    }
}

pub fn compute(term_width: u16, term_height: u16) -> LayoutGeometry {
    let region_width = term_width / 3;
    let remainder = term_width - region_width * 3;

    let region = |index: u16, width: u16| Region {
        x: region_width * index,
        y: 0,
        width,
        height: REGION_HEIGHT,
    };

    let status_line = (term_height > REGION_HEIGHT).then_some(Region {
        x: 0,
        y: REGION_HEIGHT,
        width: term_width,
        height: 1,
    });

    LayoutGeometry {
        region_width,
        region_height: REGION_HEIGHT,
        regions: [
            region(0, region_width),
            region(1, region_width),
            region(2, region_width + remainder),
        ],
        status_line,
    }
}
