//! # Core Dashboard Logic
//!
//! Everything here is terminal-agnostic. It knows nothing about ratatui or
//! crossterm. Apart from `config`, nothing here does I/O: fetching is
//! injected as a closure and drawing happens in the `tui` adapter.
//!
//! ```text
//!      keys ──► Command ──► update(UiState) ──► Effect
//!                                                 │
//!            layout::compute ◄── Relayout ────────┘
//!            refresh::Refresher::maybe_refresh(minute, fetch)
//!            spinner::Spinner::advance
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `Location`, `WeatherSnapshot`, `UiState`, `Phase`
//! - [`action`]: the `Command` enum and the `update()` reducer
//! - [`layout`]: three-region geometry and anchor math
//! - [`refresh`]: the minute-gated weather cache
//! - [`spinner`]: the per-tick animation glyph
//! - [`config`]: config file, env and CLI resolution

pub mod action;
pub mod config;
pub mod layout;
pub mod refresh;
pub mod spinner;
pub mod state;
