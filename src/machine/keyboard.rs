//! The keyboard: key events and the text-to-keystroke adapter.
//!
//! The machine's keyboard has the 26 letters, the digits, a dash, the space
//! bar, a repeat key, and an unlabeled key (the "Blank" key) used for the
//! zeroizing procedure. Front ends feed [`Key`] values into the controller;
//! batch callers convert whole strings with [`keystrokes`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    /// A letter key, stored uppercase.
    Letter(char),
    /// A digit key `0`-`9`.
    Digit(char),
    Dash,
    SpaceBar,
    /// The unlabeled key next to the dash.
    Blank,
    /// The RPT key. The repeat drive is not emulated; the controller always
    /// ignores it.
    Repeat,
}

impl Key {
    /// Map a text character onto the key an operator would press for it.
    pub fn from_char(symbol: char) -> Result<Self, KeyboardError> {
        match symbol {
            'a'..='z' | 'A'..='Z' => Ok(Key::Letter(symbol.to_ascii_uppercase())),
            '0'..='9' => Ok(Key::Digit(symbol)),
            '-' => Ok(Key::Dash),
            ' ' => Ok(Key::SpaceBar),
            _ => Err(KeyboardError::UnknownKey(symbol)),
        }
    }
}

/// Convert a line of text into the keystroke sequence that types it.
pub fn keystrokes(text: &str) -> Result<Vec<Key>, KeyboardError> {
    text.chars().map(Key::from_char).collect()
}

/// Errors from mapping text onto the keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyboardError {
    #[error("no key on the keyboard types {0:?}")]
    UnknownKey(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_upcase() {
        assert_eq!(Key::from_char('h'), Ok(Key::Letter('H')));
        assert_eq!(Key::from_char('H'), Ok(Key::Letter('H')));
    }

    #[test]
    fn test_special_keys() {
        assert_eq!(Key::from_char('7'), Ok(Key::Digit('7')));
        assert_eq!(Key::from_char('-'), Ok(Key::Dash));
        assert_eq!(Key::from_char(' '), Ok(Key::SpaceBar));
    }

    #[test]
    fn test_unknown_characters_are_errors() {
        assert_eq!(Key::from_char('!'), Err(KeyboardError::UnknownKey('!')));
        assert!(keystrokes("HELLO?").is_err());
    }

    #[test]
    fn test_keystrokes_for_a_message() {
        let keys = keystrokes("AB 1-").unwrap();
        assert_eq!(
            keys,
            vec![
                Key::Letter('A'),
                Key::Letter('B'),
                Key::SpaceBar,
                Key::Digit('1'),
                Key::Dash,
            ]
        );
    }
}
