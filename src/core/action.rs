//! # Commands
//!
//! Everything the keyboard can ask of the dashboard becomes a `Command`.
//! `q` pressed? That's `Command::Quit`. Terminal resized? That's
//! `Command::Resize { width, height }`.
//!
//! ```text
//! UiState + Command  →  update()  →  Effect
//! ```
//!
//! `update()` only touches `UiState`. Anything that needs another component
//! (re-layout, quitting the loop) is handed back as an `Effect`.

use crate::core::state::UiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    ForceRefresh,
    /// One-way: there is no key that turns verbose mode back off.
    EnableVerbose,
    Resize { width: u16, height: u16 },
}

#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    Relayout { width: u16, height: u16 },
}

pub fn update(state: &mut UiState, command: Command) -> Effect {
    match command {
        Command::Quit => {
            state.running = false;
            Effect::Quit
        }
        Command::ForceRefresh => {
            state.force_refresh_requested = true;
            Effect::None
        }
        Command::EnableVerbose => {
            state.verbose = true;
            Effect::None
        }
        Command::Resize { width, height } => Effect::Relayout { width, height },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_stops_running() {
        let mut state = UiState::default();
        assert_eq!(update(&mut state, Command::Quit), Effect::Quit);
        assert!(!state.running);
    }

    #[test]
    fn test_force_refresh_sets_flag() {
        let mut state = UiState::default();
        assert_eq!(update(&mut state, Command::ForceRefresh), Effect::None);
        assert!(state.force_refresh_requested);
        assert!(state.running);
    }

    #[test]
    fn test_verbose_is_one_way() {
        let mut state = UiState::default();
        update(&mut state, Command::EnableVerbose);
        assert!(state.verbose);
        update(&mut state, Command::EnableVerbose);
        assert!(state.verbose);
    }

    #[test]
    fn test_resize_is_forwarded() {
        let mut state = UiState::default();
        let before = state.clone();
        assert_eq!(
            update(&mut state, Command::Resize { width: 120, height: 40 }),
            Effect::Relayout { width: 120, height: 40 }
        );
        assert_eq!(state, before);
    }
}
