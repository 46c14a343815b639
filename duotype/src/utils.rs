use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    widgets::{Block, BorderType},
};
use scimitar::render::{Layout as TextLayout, LineRenderConfig};
use scimitar::{Direction, Key, Modifiers, ReferenceText};

/// A block with a rounded border
pub const ROUNDED_BLOCK: Block = Block::bordered().border_type(BorderType::Rounded);

/// Position of `column`/`row` relative to the top-left corner of `area`, if inside it
pub fn relative_position(area: Rect, column: u16, row: u16) -> Option<(usize, usize)> {
    area.contains(Position::new(column, row)).then(|| {
        (
            usize::from(row - area.y),
            usize::from(column - area.x),
        )
    })
}

/// A single line in screen order, together with the screen offset of every logical column
///
/// Used for short strings like hints and the editor, where the typing area's geometry is not
/// needed.
pub fn visual_line(line: &str, direction: Direction) -> (String, Vec<usize>) {
    let text = ReferenceText::new(line);
    let layout = TextLayout::new(&text, &LineRenderConfig::new(text.len() + 1));

    let order = layout.visual_order(0, direction);
    let mut offsets = vec![0; text.len()];
    for (offset, index) in order.iter().enumerate() {
        offsets[*index] = offset;
    }

    let visual = order.into_iter().filter_map(|index| text.get(index)).collect();
    (visual, offsets)
}

/// A trait defining helper methods for keyevents
pub trait KeyEventHelper {
    /// Returns true if the keyevent contains a pressed key
    fn is_press(&self) -> bool;

    /// Returns true if the keyevent contains the given modifiers
    fn has_mods(&self, mods: KeyModifiers) -> bool;

    /// Returns true if the keyevent contains a character that matches the input
    fn is_char(&self, character: char) -> bool;

    /// Returns true if the keyevent matches the given character, and is being pressed
    fn is_press_char(&self, character: char) -> bool {
        self.is_press() && self.is_char(character)
    }

    /// Returns true if the keyevent matches the given character, and is being pressed with CTRL as
    /// a modifier.
    fn is_ctrl_press_char(&self, character: char) -> bool {
        self.has_mods(KeyModifiers::CONTROL) && self.is_press_char(character)
    }

    /// Returns true if Ctrl, Alt or Super is held
    ///
    /// Terminals disagree on which of them reaches the application for word-wise editing, so
    /// all three count.
    fn is_word_modified(&self) -> bool {
        self.has_mods(KeyModifiers::CONTROL)
            || self.has_mods(KeyModifiers::ALT)
            || self.has_mods(KeyModifiers::SUPER)
            || self.has_mods(KeyModifiers::META)
    }

    /// Returns true for a word deletion: Ctrl/Alt+Backspace, or the Ctrl+H and Ctrl+W many
    /// terminals send instead
    fn is_word_delete(&self) -> bool;

    /// Converts the keyevent into the event the typing session understands
    fn to_session_event(&self) -> scimitar::KeyEvent;
}

impl KeyEventHelper for KeyEvent {
    fn is_press(&self) -> bool {
        self.kind == KeyEventKind::Press
    }

    fn is_char(&self, character: char) -> bool {
        self.code == KeyCode::Char(character)
    }

    fn has_mods(&self, mods: KeyModifiers) -> bool {
        self.modifiers.contains(mods)
    }

    fn is_word_delete(&self) -> bool {
        match self.code {
            KeyCode::Backspace => self.is_word_modified(),
            KeyCode::Char('h' | 'w') => self.has_mods(KeyModifiers::CONTROL),
            _ => false,
        }
    }

    fn to_session_event(&self) -> scimitar::KeyEvent {
        let word = self.is_word_modified();
        let modifiers = Modifiers {
            ctrl: self.has_mods(KeyModifiers::CONTROL),
            meta: word && !self.has_mods(KeyModifiers::CONTROL),
        };

        let key = match self.code {
            _ if self.is_word_delete() => {
                return scimitar::KeyEvent::new(Key::Backspace).with_ctrl();
            }
            KeyCode::Left => Key::ArrowLeft,
            KeyCode::Right => Key::ArrowRight,
            KeyCode::Up => Key::ArrowUp,
            KeyCode::Down => Key::ArrowDown,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Enter => Key::Enter,
            // Unbound control chords are commands, not text
            KeyCode::Char(_) if self.has_mods(KeyModifiers::CONTROL) => Key::Other,
            KeyCode::Char(character) => Key::Char(character),
            _ => Key::Other,
        };

        scimitar::KeyEvent { key, modifiers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_plain_keys() {
        let event = key(KeyCode::Char('ש'), KeyModifiers::NONE).to_session_event();
        assert_eq!(event, scimitar::KeyEvent::new(Key::Char('ש')));

        let event = key(KeyCode::Char('A'), KeyModifiers::SHIFT).to_session_event();
        assert_eq!(event, scimitar::KeyEvent::new(Key::Char('A')));

        let event = key(KeyCode::Enter, KeyModifiers::NONE).to_session_event();
        assert_eq!(event.key, Key::Enter);

        let event = key(KeyCode::Tab, KeyModifiers::NONE).to_session_event();
        assert_eq!(event.key, Key::Other);
    }

    #[test]
    fn test_word_modifiers() {
        let event = key(KeyCode::Left, KeyModifiers::CONTROL).to_session_event();
        assert_eq!(event, scimitar::KeyEvent::new(Key::ArrowLeft).with_ctrl());

        let event = key(KeyCode::Right, KeyModifiers::ALT).to_session_event();
        assert_eq!(event, scimitar::KeyEvent::new(Key::ArrowRight).with_meta());
        assert!(event.modifiers.is_word());
    }

    #[test]
    fn test_word_delete_variants() {
        for event in [
            key(KeyCode::Backspace, KeyModifiers::CONTROL),
            key(KeyCode::Backspace, KeyModifiers::ALT),
            key(KeyCode::Char('h'), KeyModifiers::CONTROL),
            key(KeyCode::Char('w'), KeyModifiers::CONTROL),
        ] {
            assert!(event.is_word_delete());
            assert_eq!(
                event.to_session_event(),
                scimitar::KeyEvent::new(Key::Backspace).with_ctrl()
            );
        }

        let plain = key(KeyCode::Backspace, KeyModifiers::NONE);
        assert!(!plain.is_word_delete());
        assert_eq!(plain.to_session_event().key, Key::Backspace);
    }

    #[test]
    fn test_control_chords_are_not_text() {
        let event = key(KeyCode::Char('a'), KeyModifiers::CONTROL).to_session_event();
        assert_eq!(event.key, Key::Other);
        assert!(key(KeyCode::Char('q'), KeyModifiers::CONTROL).is_ctrl_press_char('q'));
    }

    #[test]
    fn test_visual_line() {
        let (visual, offsets) = visual_line("שלום abc", Direction::Rtl);
        assert_eq!(visual, "abc םולש");
        assert_eq!(offsets, vec![7, 6, 5, 4, 3, 0, 1, 2]);

        let (visual, _) = visual_line("plain", Direction::Ltr);
        assert_eq!(visual, "plain");

        let (visual, offsets) = visual_line("", Direction::Rtl);
        assert!(visual.is_empty());
        assert!(offsets.is_empty());
    }

    #[test]
    fn test_relative_position() {
        let area = Rect::new(2, 3, 10, 4);
        assert_eq!(relative_position(area, 2, 3), Some((0, 0)));
        assert_eq!(relative_position(area, 11, 6), Some((3, 9)));
        assert_eq!(relative_position(area, 12, 6), None);
        assert_eq!(relative_position(area, 1, 3), None);
    }
}
