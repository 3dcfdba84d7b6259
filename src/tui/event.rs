use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::action::Command;

/// Poll for a command, blocking at most `timeout`.
///
/// `Ok(None)` means nothing relevant arrived in time (or the key is unbound).
pub fn poll_command(timeout: Duration) -> io::Result<Option<Command>> {
    if event::poll(timeout)? {
        let event = event::read()?;
        Ok(map_event(event))
    } else {
        Ok(None)
    }
}

/// Translate a raw terminal event into a dashboard command.
pub fn map_event(event: Event) -> Option<Command> {
    match event {
        Event::Key(key_event) => map_key(key_event),
        Event::Resize(width, height) => Some(Command::Resize { width, height }),
        _ => None,
    }
}

fn map_key(key_event: KeyEvent) -> Option<Command> {
    // Terminals reporting event types also send releases and repeats
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
    match (key_event.modifiers, key_event.code) {
        // Raw mode swallows SIGINT, so Ctrl+C arrives as a key
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
        (_, KeyCode::Esc) => Some(Command::Quit),
        (_, KeyCode::Char(c)) => match c.to_ascii_lowercase() {
            'q' => Some(Command::Quit),
            'r' => Some(Command::ForceRefresh),
            'v' => Some(Command::EnableVerbose),
            _ => None,
        },
        _ => None,
    }
}
