//! Cyclic spinner advanced once per tick.

pub const SPINNER_FRAMES: &[&str] = &["|", "/", "-", "\\"];

#[derive(Debug, Clone)]
pub struct Spinner {
    frames: &'static [&'static str],
    index: usize,
}

impl Spinner {
    pub fn new(frames: &'static [&'static str]) -> Self {
        Self { frames, index: 0 }
    }

    /// Moves to the next glyph and returns it.
    pub fn advance(&mut self) -> &'static str {
        if self.frames.is_empty() {
            return "";
        }
        self.index = (self.index + 1) % self.frames.len();
        self.frames[self.index]
    }

    pub fn current(&self) -> &'static str {
        self.frames.get(self.index).copied().unwrap_or("")
    }

    pub fn restart(&mut self) {
        self.index = 0;
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new(SPINNER_FRAMES)
    }
}
