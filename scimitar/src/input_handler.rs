//! # Input Handler Module - Keystroke Classification
//!
//! This module turns raw key events into the single [`Action`] the session controller should
//! perform. It owns the precedence rules, and nothing else: the resulting action is applied by
//! [`SessionState`](crate::SessionState).
//!
//! ## Precedence
//!
//! 1. Left/Right without modifier: move one character (visual)
//! 2. Up/Down without modifier: move one line
//! 3. Ctrl/Cmd + Left/Right: move one word (visual)
//! 4. Ctrl/Cmd + Backspace: delete one word (logical)
//! 5. Backspace: delete one character
//! 6. Printable character or Enter: insert
//!
//! Everything else is ignored. Keyboard input is noisy, so unknown keys are never an error.
//!
//! ## Usage Example
//!
//! ```rust
//! use scimitar::{Action, Horizontal, Key, KeyEvent, Movement, classify};
//!
//! let jump = KeyEvent::new(Key::ArrowLeft).with_ctrl();
//! assert_eq!(classify(&jump), Action::Move(Movement::Word(Horizontal::Left)));
//!
//! let enter = KeyEvent::new(Key::Enter);
//! assert_eq!(classify(&enter), Action::Insert('\n'));
//! ```

use crate::locator::Vertical;
use crate::navigation::{Horizontal, Movement};

/// The key identifiers the session reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Backspace,
    Enter,
    /// A key that produces exactly one printable character
    Char(char),
    /// Any other named key (function keys, Tab, Escape, ...)
    Other,
}

/// Modifier flags relevant to the session
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    /// The Cmd/Super/Meta key
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        meta: false,
    };

    /// True if Ctrl or Cmd is held, the modifier for word-wise operations
    pub const fn is_word(self) -> bool {
        self.ctrl || self.meta
    }
}

/// A key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub const fn with_ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub const fn with_meta(mut self) -> Self {
        self.modifiers.meta = true;
        self
    }
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        Self::new(key)
    }
}

/// What a key press asks the session to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the cursor without touching the buffer
    Move(Movement),
    /// Clear back to the previous word start
    DeleteWord,
    /// Clear the character before the cursor
    DeleteChar,
    /// Type a character at the cursor
    Insert(char),
    Ignore,
}

/// Whether the platform's default handling of a key must be suppressed
///
/// A consumed key must not also scroll the view or move a native caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Consumed,
    Ignored,
}

impl KeyOutcome {
    pub const fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed)
    }
}

/// Classify a key event into exactly one [`Action`]
pub const fn classify(event: &KeyEvent) -> Action {
    let word = event.modifiers.is_word();
    match event.key {
        Key::ArrowLeft if !word => Action::Move(Movement::Step(Horizontal::Left)),
        Key::ArrowRight if !word => Action::Move(Movement::Step(Horizontal::Right)),
        Key::ArrowUp if !word => Action::Move(Movement::Line(Vertical::Up)),
        Key::ArrowDown if !word => Action::Move(Movement::Line(Vertical::Down)),
        Key::ArrowLeft => Action::Move(Movement::Word(Horizontal::Left)),
        Key::ArrowRight => Action::Move(Movement::Word(Horizontal::Right)),
        Key::Backspace if word => Action::DeleteWord,
        Key::Backspace => Action::DeleteChar,
        Key::Enter => Action::Insert('\n'),
        Key::Char(char) => Action::Insert(char),
        Key::ArrowUp | Key::ArrowDown | Key::Other => Action::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_arrows() {
        assert_eq!(
            classify(&Key::ArrowLeft.into()),
            Action::Move(Movement::Step(Horizontal::Left))
        );
        assert_eq!(
            classify(&Key::ArrowRight.into()),
            Action::Move(Movement::Step(Horizontal::Right))
        );
        assert_eq!(
            classify(&Key::ArrowUp.into()),
            Action::Move(Movement::Line(Vertical::Up))
        );
        assert_eq!(
            classify(&Key::ArrowDown.into()),
            Action::Move(Movement::Line(Vertical::Down))
        );
    }

    #[test]
    fn test_word_modifiers() {
        for event in [
            KeyEvent::new(Key::ArrowRight).with_ctrl(),
            KeyEvent::new(Key::ArrowRight).with_meta(),
        ] {
            assert_eq!(
                classify(&event),
                Action::Move(Movement::Word(Horizontal::Right))
            );
        }

        assert_eq!(
            classify(&KeyEvent::new(Key::Backspace).with_meta()),
            Action::DeleteWord
        );
        assert_eq!(classify(&Key::Backspace.into()), Action::DeleteChar);
    }

    #[test]
    fn test_modified_vertical_arrows_are_ignored() {
        assert_eq!(
            classify(&KeyEvent::new(Key::ArrowUp).with_ctrl()),
            Action::Ignore
        );
        assert_eq!(
            classify(&KeyEvent::new(Key::ArrowDown).with_meta()),
            Action::Ignore
        );
    }

    #[test]
    fn test_characters() {
        assert_eq!(classify(&Key::Char('ש').into()), Action::Insert('ש'));
        assert_eq!(classify(&Key::Char(' ').into()), Action::Insert(' '));
        assert_eq!(classify(&Key::Enter.into()), Action::Insert('\n'));
        assert_eq!(classify(&Key::Other.into()), Action::Ignore);
    }
}
