//! Key mapping from terminal events to logical keys.

use crate::queue::KeyTransition;
use crate::types::KeyKind;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map a physical key to the logical key it is bound to.
pub fn key_for(code: KeyCode) -> Option<KeyKind> {
    match code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(KeyKind::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(KeyKind::MoveRight),

        // Drops
        KeyCode::Down | KeyCode::Char('w') | KeyCode::Char('W') => Some(KeyKind::SoftDrop),
        KeyCode::Up | KeyCode::Char(' ') => Some(KeyKind::SonicDrop),

        // Rotation
        KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('z') | KeyCode::Char('Z') => {
            Some(KeyKind::RotateCcw)
        }
        KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('x') | KeyCode::Char('X') => {
            Some(KeyKind::RotateCw)
        }

        _ => None,
    }
}

/// Translate a terminal key event into a press or release of a logical key.
///
/// Terminal auto-repeat is reported as a press; the input state ignores
/// presses of keys that are already down.
pub fn transition_for(event: KeyEvent) -> Option<KeyTransition> {
    let key = key_for(event.code)?;
    let pressed = match event.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => true,
        KeyEventKind::Release => false,
    };
    Some(KeyTransition { key, pressed })
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(key_for(KeyCode::Left), Some(KeyKind::MoveLeft));
        assert_eq!(key_for(KeyCode::Char('A')), Some(KeyKind::MoveLeft));
        assert_eq!(key_for(KeyCode::Right), Some(KeyKind::MoveRight));
        assert_eq!(key_for(KeyCode::Char('d')), Some(KeyKind::MoveRight));
    }

    #[test]
    fn test_drop_keys() {
        assert_eq!(key_for(KeyCode::Down), Some(KeyKind::SoftDrop));
        assert_eq!(key_for(KeyCode::Char('w')), Some(KeyKind::SoftDrop));
        assert_eq!(key_for(KeyCode::Up), Some(KeyKind::SonicDrop));
        assert_eq!(key_for(KeyCode::Char(' ')), Some(KeyKind::SonicDrop));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(key_for(KeyCode::Char('j')), Some(KeyKind::RotateCcw));
        assert_eq!(key_for(KeyCode::Char('Z')), Some(KeyKind::RotateCcw));
        assert_eq!(key_for(KeyCode::Char('K')), Some(KeyKind::RotateCw));
        assert_eq!(key_for(KeyCode::Char('x')), Some(KeyKind::RotateCw));
        assert_eq!(key_for(KeyCode::Char('c')), None);
    }

    #[test]
    fn test_release_events_become_key_up() {
        let release = KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(
            transition_for(release),
            Some(KeyTransition {
                key: KeyKind::MoveLeft,
                pressed: false
            })
        );
        assert_eq!(
            transition_for(KeyEvent::from(KeyCode::Char('k'))),
            Some(KeyTransition {
                key: KeyKind::RotateCw,
                pressed: true
            })
        );
        assert_eq!(transition_for(KeyEvent::from(KeyCode::Enter)), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
