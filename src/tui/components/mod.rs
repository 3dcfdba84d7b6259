//! # TUI Components
//!
//! Stateless, props-based building blocks for the dashboard:
//!
//! - `RegionPanel`: a bordered region with anchored text fields
//! - `StatusLine`: the verbose diagnostic row under the regions
//!
//! Components receive external data as props (struct fields), never by
//! reaching into dashboard state, so each can be rendered on its own in a
//! `TestBackend`.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── region_panel.rs  (border + anchored fields, clipped writes)
//! └── status_line.rs   (diagnostic row)
//! ```

pub mod region_panel;
pub mod status_line;

pub use region_panel::{Field, RegionPanel, Tone};
pub use status_line::StatusLine;
