//! Key bindings for application commands.

use crate::input::{KeyCode, KeyEvent};

/// An application-level command bound to a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Open,
    SetRepeatCount,
    PreviewRepeat,
    Duplicate,
    Substitute,
    PreviewSubstitution,
    Save,
    Clear,
    Undo,
    Redo,
    Quit,
}

/// Bindings in toolbar order, with their labels.
pub const BINDINGS: &[(char, Command, &str)] = &[
    ('o', Command::Open, "Open"),
    ('n', Command::SetRepeatCount, "Count"),
    ('p', Command::PreviewRepeat, "Preview"),
    ('d', Command::Duplicate, "Duplicate"),
    ('r', Command::Substitute, "Replace"),
    ('t', Command::PreviewSubstitution, "Try replace"),
    ('s', Command::Save, "Save"),
    ('l', Command::Clear, "Clear"),
    ('q', Command::Quit, "Quit"),
];

/// Command for a key, if it is bound.
///
/// Ctrl+C quits too, since raw mode turns it into a plain key.
#[must_use]
pub fn command_for(key: &KeyEvent) -> Option<Command> {
    if !key.has_ctrl() {
        return match key.code {
            KeyCode::F(2) => Some(Command::Save),
            KeyCode::F(3) => Some(Command::Open),
            KeyCode::F(5) => Some(Command::Duplicate),
            _ => None,
        };
    }
    let KeyCode::Char(c) = key.code else {
        return None;
    };
    match c.to_ascii_lowercase() {
        'z' => Some(Command::Undo),
        'y' => Some(Command::Redo),
        'c' => Some(Command::Quit),
        c => BINDINGS
            .iter()
            .find(|(bound, _, _)| *bound == c)
            .map(|(_, command, _)| *command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_bindings() {
        assert_eq!(command_for(&KeyEvent::ctrl('o')), Some(Command::Open));
        assert_eq!(command_for(&KeyEvent::ctrl('d')), Some(Command::Duplicate));
        assert_eq!(command_for(&KeyEvent::ctrl('z')), Some(Command::Undo));
        assert_eq!(command_for(&KeyEvent::ctrl('c')), Some(Command::Quit));
        assert_eq!(command_for(&KeyEvent::ctrl('x')), None);
    }

    #[test]
    fn test_plain_keys_are_not_commands() {
        assert_eq!(command_for(&KeyEvent::char('o')), None);
        assert_eq!(command_for(&KeyEvent::key(KeyCode::Enter)), None);
        assert_eq!(
            command_for(&KeyEvent::key(KeyCode::F(5))),
            Some(Command::Duplicate)
        );
    }

    #[test]
    fn test_every_binding_is_reachable() {
        for (c, command, _) in BINDINGS {
            assert_eq!(command_for(&KeyEvent::ctrl(*c)), Some(*command));
        }
    }
}
