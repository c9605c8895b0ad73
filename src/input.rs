use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Pause,
    Restart,
    Quit,
    Ignore,
}

pub fn command_for(key: &KeyEvent) -> Command {
    if is_ctrl_c(key) {
        return Command::Quit;
    }

    match key.code {
        KeyCode::Char('w') => Command::Steer(Direction::Up),
        KeyCode::Char('a') => Command::Steer(Direction::Left),
        KeyCode::Char('s') => Command::Steer(Direction::Down),
        KeyCode::Char('d') => Command::Steer(Direction::Right),
        KeyCode::Esc => Command::Pause,
        KeyCode::Char('r') => Command::Restart,
        KeyCode::Char('q') => Command::Quit,
        _ => Command::Ignore,
    }
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent { code, modifiers: KeyModifiers::NONE }
    }

    #[test]
    fn test_wasd_steers() {
        assert_eq!(command_for(&key(KeyCode::Char('w'))), Command::Steer(Direction::Up));
        assert_eq!(command_for(&key(KeyCode::Char('a'))), Command::Steer(Direction::Left));
        assert_eq!(command_for(&key(KeyCode::Char('s'))), Command::Steer(Direction::Down));
        assert_eq!(command_for(&key(KeyCode::Char('d'))), Command::Steer(Direction::Right));
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(command_for(&key(KeyCode::Char('x'))), Command::Ignore);
        assert_eq!(command_for(&key(KeyCode::Up)), Command::Ignore);
        assert_eq!(command_for(&key(KeyCode::Char('W'))), Command::Ignore);
        assert_eq!(command_for(&key(KeyCode::Enter)), Command::Ignore);
    }

    #[test]
    fn test_controls() {
        assert_eq!(command_for(&key(KeyCode::Esc)), Command::Pause);
        assert_eq!(command_for(&key(KeyCode::Char('r'))), Command::Restart);
        assert_eq!(command_for(&key(KeyCode::Char('q'))), Command::Quit);

        let ctrl_c = KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL };
        assert_eq!(command_for(&ctrl_c), Command::Quit);
        assert_eq!(command_for(&key(KeyCode::Char('c'))), Command::Ignore);
    }
}
