use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::session::Side;
use crate::snake::Heading::{self, *};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(Side, Heading),
    TogglePause,
    Quit,
}

pub trait InputSource {
    /// Everything that arrived since the last call, oldest first. Never blocks.
    fn poll_commands(&mut self) -> io::Result<Vec<Command>>;
}

/// Player one uses WASD, player two the arrow keys.
pub fn command_for(ev: &KeyEvent) -> Option<Command> {
    if ev.kind == KeyEventKind::Release {
        return None;
    }
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    let steer = |side, heading| Some(Command::Steer(side, heading));

    match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') => steer(Side::One, Up),
        KeyCode::Char('a') | KeyCode::Char('A') => steer(Side::One, Left),
        KeyCode::Char('s') | KeyCode::Char('S') => steer(Side::One, Down),
        KeyCode::Char('d') | KeyCode::Char('D') => steer(Side::One, Right),
        KeyCode::Up => steer(Side::Two, Up),
        KeyCode::Left => steer(Side::Two, Left),
        KeyCode::Down => steer(Side::Two, Down),
        KeyCode::Right => steer(Side::Two, Right),
        KeyCode::Esc => Some(Command::TogglePause),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn players_have_separate_keys() {
        assert_eq!(command_for(&key(KeyCode::Char('w'))), Some(Command::Steer(Side::One, Up)));
        assert_eq!(command_for(&key(KeyCode::Char('D'))), Some(Command::Steer(Side::One, Right)));
        assert_eq!(command_for(&key(KeyCode::Left)), Some(Command::Steer(Side::Two, Left)));
        assert_eq!(command_for(&key(KeyCode::Down)), Some(Command::Steer(Side::Two, Down)));
        assert_eq!(command_for(&key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn control_keys() {
        assert_eq!(command_for(&key(KeyCode::Esc)), Some(Command::TogglePause));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(command_for(&ctrl_c), Some(Command::Quit));
        assert_eq!(command_for(&key(KeyCode::Char('c'))), None);
    }

    #[test]
    fn releases_are_ignored() {
        let release = KeyEvent::new_with_kind(KeyCode::Up, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(command_for(&release), None);
    }
}
